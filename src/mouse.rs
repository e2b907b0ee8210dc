use macroquad::math::{Vec2, vec2};
use rand::Rng;

use crate::config::MouseConfig;
use crate::grid::{Cell, Direction, Grid, Occupant};
use crate::palette;
use crate::surface::{Surface, quadratic_points, rotate_all};

const PLACEMENT_ATTEMPTS: u32 = 64;
const TURN_ATTEMPTS: u32 = 8;

/// Wanders the board on its own clock; the snake can catch it.
#[derive(Clone, Debug)]
pub struct Mouse {
    cell: Option<Cell>,
    direction: Direction,
    tick: u32,
    config: MouseConfig,
}

impl Mouse {
    pub fn new(config: MouseConfig) -> Self {
        Self { cell: None, direction: Direction::Left, tick: 0, config }
    }

    pub fn cell(&self) -> Option<Cell> { self.cell }

    pub fn direction(&self) -> Direction { self.direction }

    pub fn tick(&self) -> u32 { self.tick }

    pub fn forget(&mut self) {
        self.cell = None;
    }

    fn vacate(&mut self, grid: &mut Grid) {
        if let Some(old) = self.cell.take() {
            if grid.retrieve(old) == Some(Occupant::Mouse) {
                grid.vacate(old);
            }
        }
    }

    /// Jumps to a random free cell facing a random way. Stays off the board if none is free.
    pub fn change_location<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        self.tick = 0;
        self.vacate(grid);

        if let Some(cell) = grid.random_free_cell(rng, PLACEMENT_ATTEMPTS) {
            self.cell = Some(cell);
            grid.occupy(cell, Occupant::Mouse);
            self.direction = Direction::random(rng);
        }
    }

    pub fn try_move(&self, grid: &Grid) -> Option<Cell> {
        let target = grid.neighbor(self.cell?, self.direction);
        (!grid.is_occupied(target)).then_some(target)
    }

    /// Picks a direction whose next step is free. Returns false when boxed in.
    pub fn change_direction<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        let previous = self.direction;
        for _ in 0..TURN_ATTEMPTS {
            self.direction = Direction::random(rng);
            if self.try_move(grid).is_some() { return true; }
        }
        for d in Direction::ALL {
            self.direction = d;
            if self.try_move(grid).is_some() { return true; }
        }
        self.direction = previous;
        false
    }

    pub fn move_step<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        match self.try_move(grid) {
            Some(target) => {
                self.vacate(grid);
                self.cell = Some(target);
                grid.occupy(target, Occupant::Mouse);
            }
            None => {
                self.change_direction(grid, rng);
            }
        }
    }

    pub fn direction_cadence(&self, snake_length: usize) -> u32 {
        let scale = (snake_length / self.config.length_divisor) as u32;
        self.config
            .direction_change_delay
            .saturating_sub(scale)
            .max(self.config.min_direction_change_delay)
    }

    pub fn move_cadence(&self, snake_length: usize) -> u32 {
        let scale = (snake_length / self.config.length_divisor) as u32;
        self.config.move_delay.saturating_sub(scale).max(self.config.min_move_delay)
    }

    pub fn update<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R, snake_length: usize) {
        if self.tick > 0 && self.cell.is_some() {
            if self.tick % self.direction_cadence(snake_length) == 0 {
                self.change_direction(grid, rng);
            } else if self.tick % self.move_cadence(snake_length) == 0 {
                self.move_step(grid, rng);
            }
        }
        self.tick += 1;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, size: f32) {
        let Some(cell) = self.cell else { return };
        let x = cell.x as f32 * size;
        let y = cell.y as f32 * size;
        let anchor = vec2(x + size / 2.0, y + size / 2.0);
        let turns = self.direction.quarter_turns();

        // body: two curves meeting at the snout (left) and the rump (right)
        let sx = x + size / 2.0;
        let r = size * 1.5;
        let top = vec2(sx, y + size / 6.0);
        let bottom = vec2(sx, y + size * 5.0 / 6.0);
        let mut body = vec![top];
        body.extend(quadratic_points(top, vec2(sx - r, y + size / 2.0), bottom, 8));
        body.extend(quadratic_points(bottom, vec2(x + size + 10.0, y + size / 2.0), top, 8));
        rotate_all(&mut body, anchor, turns);
        surface.fill_polygon(&body, palette::MOUSE_BODY);
        surface.stroke_polygon(&body, 1.0, palette::OUTLINE);

        let mut eyes = [vec2(x + 3.0, y + size / 2.5), vec2(x + 3.0, y + size / 1.65)];
        rotate_all(&mut eyes, anchor, turns);
        for eye in eyes {
            surface.fill_circle(eye, 2.0, palette::MOUSE_EYE);
        }

        let mut tail: [Vec2; 3] = [
            vec2(x + size - 2.0, y + size / 2.5),
            vec2(x + size * 1.5, y + size / 2.0),
            vec2(x + size - 2.0, y + size / 1.75),
        ];
        rotate_all(&mut tail, anchor, turns);
        surface.fill_polygon(&tail, palette::MOUSE_TAIL);
        surface.stroke_polygon(&tail, 1.0, palette::OUTLINE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn placed(grid: &mut Grid, cell: Cell, direction: Direction) -> Mouse {
        let mut mouse = Mouse::new(MouseConfig::default());
        mouse.cell = Some(cell);
        mouse.direction = direction;
        grid.occupy(cell, Occupant::Mouse);
        mouse
    }

    #[test]
    fn change_location_lands_on_a_free_cell() {
        let mut grid = Grid::new(25, 20);
        let mut rng = StdRng::seed_from_u64(11);
        let mut mouse = Mouse::new(MouseConfig::default());
        for _ in 0..20 {
            mouse.change_location(&mut grid, &mut rng);
            assert_eq!(grid.len(), 1);
            assert_eq!(grid.retrieve(mouse.cell().unwrap()), Some(Occupant::Mouse));
            assert_eq!(mouse.tick(), 0);
        }
    }

    #[test]
    fn try_move_wraps_and_respects_occupants() {
        let mut grid = Grid::new(25, 20);
        let mouse = placed(&mut grid, Cell::new(0, 3), Direction::Left);
        assert_eq!(mouse.try_move(&grid), Some(Cell::new(24, 3)));

        grid.occupy(Cell::new(24, 3), Occupant::Segment);
        assert_eq!(mouse.try_move(&grid), None);
    }

    #[test]
    fn blocked_move_turns_instead() {
        let mut grid = Grid::new(25, 20);
        let mut rng = StdRng::seed_from_u64(5);
        let mut mouse = placed(&mut grid, Cell::new(5, 5), Direction::Right);
        grid.occupy(Cell::new(6, 5), Occupant::Food);

        mouse.move_step(&mut grid, &mut rng);
        assert_eq!(mouse.cell(), Some(Cell::new(5, 5)));
        assert_ne!(mouse.direction(), Direction::Right);
        assert!(mouse.try_move(&grid).is_some());
    }

    #[test]
    fn boxed_in_mouse_keeps_still() {
        let mut grid = Grid::new(25, 20);
        let mut rng = StdRng::seed_from_u64(6);
        let mut mouse = placed(&mut grid, Cell::new(5, 5), Direction::Up);
        for d in Direction::ALL {
            let n = grid.neighbor(Cell::new(5, 5), d);
            grid.occupy(n, Occupant::Segment);
        }
        assert!(!mouse.change_direction(&grid, &mut rng));
        assert_eq!(mouse.direction(), Direction::Up);
        mouse.move_step(&mut grid, &mut rng);
        assert_eq!(mouse.cell(), Some(Cell::new(5, 5)));
    }

    #[test]
    fn cadences_shrink_with_length_down_to_a_floor() {
        let mouse = Mouse::new(MouseConfig::default());
        assert_eq!(mouse.direction_cadence(5), 120);
        assert_eq!(mouse.move_cadence(5), 40);
        assert_eq!(mouse.direction_cadence(90), 110);
        assert_eq!(mouse.move_cadence(90), 30);
        assert_eq!(mouse.direction_cadence(10_000), 60);
        assert_eq!(mouse.move_cadence(10_000), 20);
    }

    #[test]
    fn moves_on_the_move_cadence() {
        let mut grid = Grid::new(25, 20);
        let mut rng = StdRng::seed_from_u64(9);
        let mut mouse = placed(&mut grid, Cell::new(5, 5), Direction::Right);

        // tick 0 is skipped, ticks 1..=39 are idle, tick 40 moves
        for _ in 0..40 {
            mouse.update(&mut grid, &mut rng, 5);
        }
        assert_eq!(mouse.cell(), Some(Cell::new(5, 5)));
        mouse.update(&mut grid, &mut rng, 5);
        assert_eq!(mouse.cell(), Some(Cell::new(6, 5)));
        assert_eq!(grid.retrieve(Cell::new(5, 5)), None);
        assert_eq!(grid.retrieve(Cell::new(6, 5)), Some(Occupant::Mouse));
    }
}
