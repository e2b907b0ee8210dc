use macroquad::color::Color;

pub const BACKGROUND: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const OUTLINE: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const TEXT: Color = Color::new(0.0, 0.0, 0.0, 1.0);

pub const SNAKE_HEAD: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const SNAKE_DEAD: Color = Color::new(0.5, 0.5, 0.5, 1.0);
pub const SNAKE_TONGUE: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const SNAKE_EYE: Color = Color::new(0.0, 0.0, 0.0, 1.0);

pub const MOUSE_BODY: Color = Color::new(0.75, 0.75, 0.75, 1.0);
pub const MOUSE_EYE: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const MOUSE_TAIL: Color = Color::new(1.0, 0.08, 0.58, 1.0);

pub const FOOD_COLORS: [Color; 4] = [
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(0.0, 0.0, 1.0, 1.0),
    Color::new(0.5, 0.0, 0.5, 1.0),
    Color::new(1.0, 0.65, 0.0, 1.0),
];

const BODY_STOPS: [Color; 7] = [
    Color::new(0.0, 1.0, 0.0, 1.0),
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 1.0, 1.0),
    Color::new(1.0, 0.0, 1.0, 1.0),
    Color::new(1.0, 1.0, 0.0, 1.0),
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 0.0, 1.0),
];

fn lerp(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        1.0,
    )
}

/// Evenly spaced colours running through `stops`, `steps` entries long.
pub fn gradient(stops: &[Color], steps: usize) -> Vec<Color> {
    match stops {
        [] => return Vec::new(),
        [only] => return vec![*only; steps.max(1)],
        _ => {}
    }
    let steps = steps.max(stops.len());
    let spans = (stops.len() - 1) as f32;
    (0..steps)
        .map(|i| {
            let pos = i as f32 / (steps - 1) as f32 * spans;
            let idx = (pos.floor() as usize).min(stops.len() - 2);
            lerp(stops[idx], stops[idx + 1], pos - idx as f32)
        })
        .collect()
}

/// Cyclic body palette, one entry per half of the board's cells.
#[derive(Clone, Debug)]
pub struct BodyPalette {
    colors: Vec<Color>,
}

impl BodyPalette {
    pub fn for_board(columns: i32, rows: i32) -> Self {
        let steps = (columns * rows / 2).max(1) as usize;
        Self { colors: gradient(&BODY_STOPS, steps) }
    }

    pub fn at(&self, distance_from_head: usize) -> Color {
        self.colors[distance_from_head % self.colors.len()]
    }

    pub fn len(&self) -> usize { self.colors.len() }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
}
