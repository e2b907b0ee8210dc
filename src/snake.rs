use std::collections::VecDeque;

use log::debug;
use macroquad::color::Color;
use macroquad::math::{Vec2, vec2};

use crate::config::SnakeConfig;
use crate::grid::{Cell, Direction, Grid, Occupant};
use crate::input::KeySet;
use crate::palette::{self, BodyPalette};
use crate::scoreboard::Scoreboard;
use crate::surface::{Surface, rotate_all};

/// How a body segment bends, from the direction it was entered to the direction it was left.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CornerType {
    Straight,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl CornerType {
    pub fn between(entered: Direction, left: Direction) -> Self {
        use Direction::*;
        match (entered, left) {
            (Left, Left) | (Left, Right) | (Right, Left) | (Right, Right) => CornerType::Straight,
            (Up, Up) | (Up, Down) | (Down, Up) | (Down, Down) => CornerType::Straight,
            (Left, Up) => CornerType::LeftUp,
            (Up, Left) => CornerType::UpLeft,
            (Right, Up) => CornerType::RightUp,
            (Up, Right) => CornerType::UpRight,
            (Left, Down) => CornerType::LeftDown,
            (Down, Left) => CornerType::DownLeft,
            (Right, Down) => CornerType::RightDown,
            (Down, Right) => CornerType::DownRight,
        }
    }

    /// Clockwise turns applied to the bottom-right triangle; `None` for straight pieces.
    pub fn quarter_turns(self) -> Option<u8> {
        match self {
            CornerType::Straight => None,
            CornerType::UpRight | CornerType::LeftDown => Some(0),
            CornerType::UpLeft | CornerType::RightDown => Some(1),
            CornerType::DownLeft | CornerType::RightUp => Some(2),
            CornerType::DownRight | CornerType::LeftUp => Some(3),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    pub direction: Direction,
}

/// Who is steering: nobody, the attract demo, or the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Demo,
    Playing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Waiting,
    Moved,
    /// The head landed on food or on the mouse.
    Ate(Occupant),
    Collided,
}

#[derive(Clone, Debug)]
pub struct Snake {
    head: Cell,
    direction: Direction,
    next_direction: Option<Direction>,
    tick: u32,
    length: usize,
    segments: VecDeque<Segment>,
    dead_segments: usize,
    config: SnakeConfig,
}

impl Snake {
    pub fn new(config: SnakeConfig) -> Self {
        Self {
            head: Cell::new(0, 0),
            direction: Direction::Right,
            next_direction: None,
            tick: 0,
            length: config.base_size,
            segments: VecDeque::new(),
            dead_segments: 0,
            config,
        }
    }

    pub fn head(&self) -> Cell { self.head }

    pub fn direction(&self) -> Direction { self.direction }

    pub fn length(&self) -> usize { self.length }

    pub fn segments(&self) -> &VecDeque<Segment> { &self.segments }

    pub fn dead_segments(&self) -> usize { self.dead_segments }

    /// Clears the board and lays out a fresh body of `initial_length` segments.
    pub fn reset(&mut self, grid: &mut Grid, initial_length: usize) {
        grid.clear();

        self.head = Cell::new(grid.columns() / 2 - initial_length as i32, grid.rows() / 2);
        self.head.x = self.head.x.rem_euclid(grid.columns());
        self.direction = Direction::Right;
        self.next_direction = None;
        self.tick = 0;
        self.length = initial_length;
        self.segments.clear();
        self.dead_segments = 0;

        let no_keys = KeySet::new();
        for _ in 0..initial_length {
            self.tick = self.config.time_frame.ceil() as u32;
            self.update(Mode::Idle, &no_keys, grid);
        }
        grid.occupy(self.head, Occupant::SnakeHead);
    }

    /// Ticks between moves; shrinks as the snake grows.
    pub fn update_time(&self) -> f32 {
        let speed = self.config.base_speed + self.length as f32 * self.config.speed_growth;
        (self.config.time_frame / speed).max(1.0)
    }

    pub fn update(&mut self, mode: Mode, keys: &KeySet, grid: &mut Grid) -> Step {
        if mode != Mode::Idle {
            for wanted in keys.steering() {
                if wanted != self.direction.opposite() {
                    self.next_direction = Some(wanted);
                }
            }
        }

        self.tick += 1;
        if (self.tick as f32) < self.update_time() {
            return Step::Waiting;
        }
        self.tick = 0;

        self.move_segments(grid);
        self.move_head(grid);

        if mode != Mode::Playing {
            return Step::Moved;
        }

        match grid.retrieve(self.head) {
            Some(Occupant::Segment) => {
                debug!("snake bit itself at {:?}", self.head);
                Step::Collided
            }
            Some(prey @ (Occupant::Food | Occupant::Mouse)) => {
                grid.occupy(self.head, Occupant::SnakeHead);
                Step::Ate(prey)
            }
            _ => {
                grid.occupy(self.head, Occupant::SnakeHead);
                Step::Moved
            }
        }
    }

    /// Grows the target length and scores the bite.
    pub fn eat(&mut self, scoreboard: &mut Scoreboard) {
        self.length += self.config.size_growth;
        scoreboard.increment(self.config.size_growth as u32 * self.config.score_scale);
        debug!("snake ate, length now {}", self.length);
    }

    fn move_segments(&mut self, grid: &mut Grid) {
        self.segments.push_back(Segment { cell: self.head, direction: self.direction });
        grid.occupy(self.head, Occupant::Segment);

        while self.segments.len() > self.length {
            let Some(old) = self.segments.pop_front() else { break };
            let shared = self.segments.iter().any(|s| s.cell == old.cell);
            if !shared && grid.retrieve(old.cell) == Some(Occupant::Segment) {
                grid.vacate(old.cell);
            }
        }
    }

    fn move_head(&mut self, grid: &Grid) {
        let heading = self.next_direction.unwrap_or(self.direction);
        self.head = grid.neighbor(self.head, heading);
        if let Some(next) = self.next_direction.take() {
            self.direction = next;
        }
    }

    /// Greys out one more segment from the tail; returns true once the whole body is grey.
    pub fn advance_death_animation(&mut self) -> bool {
        if self.dead_segments < self.length {
            self.dead_segments += 1;
        }
        self.dead_segments >= self.length
    }

    fn segment_color(&self, index: usize, body: &BodyPalette) -> Color {
        if index < self.dead_segments {
            palette::SNAKE_DEAD
        } else {
            body.at(self.segments.len() - 1 - index)
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, body: &BodyPalette, size: f32, game_over: bool) {
        for (i, segment) in self.segments.iter().enumerate() {
            let left = self.segments.get(i + 1).map_or(self.direction, |s| s.direction);
            let corner = CornerType::between(segment.direction, left);
            let color = self.segment_color(i, body);

            if i == 0 && corner == CornerType::Straight {
                draw_tail(surface, segment.cell, segment.direction, size, color);
            } else {
                draw_segment(surface, segment.cell, corner, size, color);
            }
        }

        let head_color = if game_over { palette::SNAKE_DEAD } else { palette::SNAKE_HEAD };
        draw_head(surface, self.head, self.direction, size, head_color);
    }
}

fn cell_origin(cell: Cell, size: f32) -> (f32, f32) {
    (cell.x as f32 * size, cell.y as f32 * size)
}

fn draw_segment<S: Surface + ?Sized>(surface: &mut S, cell: Cell, corner: CornerType, size: f32, color: Color) {
    let (x, y) = cell_origin(cell, size);
    match corner.quarter_turns() {
        None => {
            surface.fill_rect(x, y, size, size, color);
            surface.stroke_rect(x, y, size, size, 2.0, palette::OUTLINE);
        }
        Some(turns) => {
            let mut tri = [vec2(x + size, y), vec2(x + size, y + size), vec2(x, y + size)];
            rotate_all(&mut tri, vec2(x + size / 2.0, y + size / 2.0), turns);
            surface.fill_polygon(&tri, color);
            surface.stroke_polygon(&tri, 2.0, palette::OUTLINE);
        }
    }
}

fn draw_tail<S: Surface + ?Sized>(surface: &mut S, cell: Cell, direction: Direction, size: f32, color: Color) {
    let (x, y) = cell_origin(cell, size);
    let mut wedge = [vec2(x, y), vec2(x, y + size), vec2(x + size, y + size / 2.0)];
    rotate_all(&mut wedge, vec2(x + size / 2.0, y + size / 2.0), direction.quarter_turns());
    surface.fill_polygon(&wedge, color);
    surface.stroke_polygon(&wedge, 2.0, palette::OUTLINE);
}

fn draw_head<S: Surface + ?Sized>(surface: &mut S, cell: Cell, direction: Direction, size: f32, color: Color) {
    let (x, y) = cell_origin(cell, size);
    let anchor = vec2(x + size / 2.0, y + size / 2.0);
    let turns = direction.quarter_turns();

    // tongue first so the head covers its root
    let mut tongue: [Vec2; 6] = [
        vec2(x, y + size / 3.0),
        vec2(x - 5.0, y + size / 3.0),
        vec2(x - 10.0, y + size * 0.42),
        vec2(x - 10.0, y + size * 0.58),
        vec2(x - 5.0, y + size * 2.0 / 3.0),
        vec2(x, y + size * 2.0 / 3.0),
    ];
    rotate_all(&mut tongue, anchor, turns);
    surface.fill_polygon(&tongue, palette::SNAKE_TONGUE);

    let mut skull: [Vec2; 6] = [
        vec2(x + size, y),
        vec2(x + size / 2.0, y),
        vec2(x, y + size / 5.0),
        vec2(x, y + size * 4.0 / 5.0),
        vec2(x + size / 2.0, y + size),
        vec2(x + size, y + size),
    ];
    rotate_all(&mut skull, anchor, turns);
    surface.fill_polygon(&skull, color);
    surface.stroke_polygon(&skull, 2.0, palette::OUTLINE);

    let mut eyes = [vec2(x + size / 2.5, y + size * 2.0 / 3.0), vec2(x + size / 2.5, y + size / 3.0)];
    rotate_all(&mut eyes, anchor, turns);
    for eye in eyes {
        surface.fill_circle(eye, 3.0, palette::SNAKE_EYE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::surface::recording::{Op, RecordingSurface};

    fn board() -> Grid {
        Grid::new(25, 20)
    }

    fn fresh(grid: &mut Grid) -> Snake {
        let mut snake = Snake::new(SnakeConfig::default());
        snake.reset(grid, 5);
        snake
    }

    /// Ticks until the snake actually moves.
    fn step(snake: &mut Snake, mode: Mode, keys: &KeySet, grid: &mut Grid) -> Step {
        for _ in 0..1000 {
            let s = snake.update(mode, keys, grid);
            if s != Step::Waiting {
                return s;
            }
        }
        panic!("snake never moved");
    }

    fn holding(key: Key) -> KeySet {
        let mut keys = KeySet::new();
        keys.press(key);
        keys
    }

    #[test]
    fn corner_table_covers_every_pair() {
        let mut straight = 0;
        for a in Direction::ALL {
            for b in Direction::ALL {
                let corner = CornerType::between(a, b);
                if a == b || a == b.opposite() {
                    assert_eq!(corner, CornerType::Straight);
                    straight += 1;
                } else {
                    assert!(corner.quarter_turns().is_some());
                }
            }
        }
        assert_eq!(straight, 8);
        assert_eq!(CornerType::between(Direction::Up, Direction::Right), CornerType::UpRight);
        assert_eq!(CornerType::between(Direction::Left, Direction::Down), CornerType::LeftDown);
    }

    #[test]
    fn reset_builds_a_full_body() {
        let mut grid = board();
        let snake = fresh(&mut grid);
        assert_eq!(snake.segments().len(), 5);
        assert_eq!(snake.head(), Cell::new(12 - 5 + 5, 10));
        assert_eq!(snake.direction(), Direction::Right);
        for s in snake.segments() {
            assert_eq!(grid.retrieve(s.cell), Some(Occupant::Segment));
        }
        assert_eq!(grid.retrieve(snake.head()), Some(Occupant::SnakeHead));
        assert_eq!(grid.len(), 6);
    }

    #[test]
    fn history_never_exceeds_length() {
        let mut grid = board();
        let mut snake = Snake::new(SnakeConfig::default());
        let keys = KeySet::new();
        let mut moves = 0;
        for _ in 0..2000 {
            if snake.update(Mode::Demo, &keys, &mut grid) != Step::Waiting {
                moves += 1;
            }
            assert_eq!(snake.segments().len(), moves.min(snake.length()));
        }
        assert!(moves > snake.length());
    }

    #[test]
    fn speed_rises_with_length() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        let slow = snake.update_time();
        snake.eat(&mut Scoreboard::new());
        assert!(snake.update_time() < slow);
        assert_eq!(slow, 180.0 / (10.0 + 5.0 * 0.25));
    }

    #[test]
    fn wraps_around_both_axes() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        snake.head = Cell::new(24, 3);
        step(&mut snake, Mode::Demo, &KeySet::new(), &mut grid);
        assert_eq!(snake.head(), Cell::new(0, 3));

        step(&mut snake, Mode::Demo, &holding(Key::W), &mut grid);
        step(&mut snake, Mode::Demo, &KeySet::new(), &mut grid);
        step(&mut snake, Mode::Demo, &KeySet::new(), &mut grid);
        assert_eq!(snake.head(), Cell::new(0, 0));
        step(&mut snake, Mode::Demo, &KeySet::new(), &mut grid);
        assert_eq!(snake.head(), Cell::new(0, 19));

        step(&mut snake, Mode::Demo, &holding(Key::ArrowLeft), &mut grid);
        assert_eq!(snake.head(), Cell::new(24, 19));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        let start = snake.head();
        step(&mut snake, Mode::Playing, &holding(Key::A), &mut grid);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(start.x + 1, start.y));
    }

    #[test]
    fn idle_mode_ignores_keys() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        step(&mut snake, Mode::Idle, &holding(Key::S), &mut grid);
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn turning_into_the_body_collides() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        assert_eq!(step(&mut snake, Mode::Playing, &holding(Key::S), &mut grid), Step::Moved);
        assert_eq!(step(&mut snake, Mode::Playing, &holding(Key::A), &mut grid), Step::Moved);
        assert_eq!(step(&mut snake, Mode::Playing, &holding(Key::W), &mut grid), Step::Collided);
        assert_eq!(grid.retrieve(snake.head()), Some(Occupant::Segment));
        // no cell on the board holds the head after the bite
        assert_eq!(grid.len(), snake.segments().len());
    }

    #[test]
    fn landing_on_food_reports_a_bite() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        let ahead = grid.neighbor(snake.head(), Direction::Right);
        grid.occupy(ahead, Occupant::Food);
        assert_eq!(step(&mut snake, Mode::Playing, &KeySet::new(), &mut grid), Step::Ate(Occupant::Food));
        assert_eq!(grid.retrieve(ahead), Some(Occupant::SnakeHead));
    }

    #[test]
    fn eating_grows_and_scores_once() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        let mut board = Scoreboard::new();
        snake.eat(&mut board);
        assert_eq!(snake.length(), 8);
        assert_eq!(board.score(), 30);
    }

    #[test]
    fn death_animation_greys_from_the_tail() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        let palette = BodyPalette::for_board(25, 20);

        assert!(!snake.advance_death_animation());
        let mut surface = RecordingSurface::new(625.0, 500.0);
        snake.draw(&mut surface, &palette, 25.0, true);
        match &surface.ops[0] {
            Op::FillPolygon { color, .. } => assert_eq!(*color, palette::SNAKE_DEAD),
            other => panic!("tail should be a wedge, got {other:?}"),
        }
        match &surface.ops[2] {
            Op::FillRect { color, .. } => assert_ne!(*color, palette::SNAKE_DEAD),
            other => panic!("body should be square, got {other:?}"),
        }

        for _ in 0..10 {
            snake.advance_death_animation();
        }
        assert_eq!(snake.dead_segments(), snake.length());
    }

    #[test]
    fn corners_draw_as_triangles() {
        let mut grid = board();
        let mut snake = fresh(&mut grid);
        step(&mut snake, Mode::Demo, &holding(Key::S), &mut grid);
        let palette = BodyPalette::for_board(25, 20);
        let mut surface = RecordingSurface::new(625.0, 500.0);
        snake.draw(&mut surface, &palette, 25.0, false);

        let polygons = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::FillPolygon { points, .. } if points.len() == 3))
            .count();
        // tail wedge plus one corner
        assert_eq!(polygons, 2);
    }
}
