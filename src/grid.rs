use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Clockwise quarter turns from a left-facing sprite.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Occupant {
    SnakeHead,
    Segment,
    Food,
    Mouse,
}

/// Sparse occupancy map over a toroidal board.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cells: HashMap<Cell, Occupant>,
}

impl Grid {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows, cells: HashMap::new() }
    }

    pub fn columns(&self) -> i32 { self.columns }

    pub fn rows(&self) -> i32 { self.rows }

    pub fn occupy(&mut self, cell: Cell, occupant: Occupant) {
        self.cells.insert(cell, occupant);
    }

    pub fn vacate(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    pub fn retrieve(&self, cell: Cell) -> Option<Occupant> {
        self.cells.get(&cell).copied()
    }

    pub fn is_occupied(&self, cell: Cell) -> bool { self.cells.contains_key(&cell) }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize { self.cells.len() }

    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    /// Neighbouring cell in `direction`, wrapping on every edge.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell {
            x: (cell.x + dx).rem_euclid(self.columns),
            y: (cell.y + dy).rem_euclid(self.rows),
        }
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell {
            x: rng.gen_range(0..self.columns),
            y: rng.gen_range(0..self.rows),
        }
    }

    pub fn free_cells(&self) -> Vec<Cell> {
        let mut free = Vec::new();
        for y in 0..self.rows {
            for x in 0..self.columns {
                let c = Cell { x, y };
                if !self.is_occupied(c) { free.push(c); }
            }
        }
        free
    }

    /// Samples up to `attempts` random cells, then falls back to a scan of the free ones.
    pub fn random_free_cell<R: Rng + ?Sized>(&self, rng: &mut R, attempts: u32) -> Option<Cell> {
        for _ in 0..attempts {
            let cell = self.random_cell(rng);
            if !self.is_occupied(cell) { return Some(cell); }
        }
        self.free_cells().choose(rng).copied()
    }
}
