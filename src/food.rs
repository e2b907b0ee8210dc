use log::warn;
use macroquad::color::Color;
use macroquad::math::vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::FoodConfig;
use crate::grid::{Cell, Grid, Occupant};
use crate::palette::FOOD_COLORS;
use crate::surface::Surface;
use crate::timer::TaskHandle;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relocation {
    Placed(Cell),
    /// Every sampled cell was taken; try again later.
    Deferred,
}

#[derive(Clone, Debug)]
pub struct Food {
    cell: Option<Cell>,
    color: Color,
    retry: Option<TaskHandle>,
    config: FoodConfig,
}

impl Food {
    pub fn new(config: FoodConfig) -> Self {
        Self { cell: None, color: FOOD_COLORS[0], retry: None, config }
    }

    pub fn cell(&self) -> Option<Cell> { self.cell }

    pub fn color(&self) -> Color { self.color }

    pub fn retry(&self) -> Option<TaskHandle> { self.retry }

    pub fn set_retry(&mut self, handle: Option<TaskHandle>) {
        self.retry = handle;
    }

    /// Forgets its cell without touching the grid; used after the grid is cleared.
    pub fn forget(&mut self) {
        self.cell = None;
        self.retry = None;
    }

    pub fn relocate<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> Relocation {
        if let Some(old) = self.cell.take() {
            if grid.retrieve(old) == Some(Occupant::Food) {
                grid.vacate(old);
            }
        }
        self.retry = None;

        for _ in 0..self.config.max_move_attempts {
            let cell = grid.random_cell(rng);
            if grid.is_occupied(cell) { continue; }

            self.cell = Some(cell);
            self.color = *FOOD_COLORS.choose(rng).unwrap_or(&FOOD_COLORS[0]);
            grid.occupy(cell, Occupant::Food);
            return Relocation::Placed(cell);
        }

        warn!("food found no free cell in {} attempts", self.config.max_move_attempts);
        Relocation::Deferred
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, cell_size: f32) {
        let Some(cell) = self.cell else { return };
        let r = cell_size / 2.0;
        let center = vec2(cell.x as f32 * cell_size + r, cell.y as f32 * cell_size + r);
        surface.fill_circle(center, r, self.color);
    }
}
