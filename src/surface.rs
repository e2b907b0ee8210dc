use macroquad::color::Color;
use macroquad::math::{Vec2, vec2};

/// 2D drawing surface the game renders onto. Text is anchored at its top-left corner.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_polygon(&mut self, points: &[Vec2], thickness: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
    fn measure_text(&self, text: &str, size: f32) -> f32;
}

/// Rotates `p` clockwise (screen space, y down) around `anchor` by `turns` × 90°.
pub fn rotate_quarter(p: Vec2, anchor: Vec2, turns: u8) -> Vec2 {
    let d = p - anchor;
    let r = match turns % 4 {
        0 => d,
        1 => vec2(-d.y, d.x),
        2 => vec2(-d.x, -d.y),
        _ => vec2(d.y, -d.x),
    };
    anchor + r
}

pub fn rotate_all(points: &mut [Vec2], anchor: Vec2, turns: u8) {
    for p in points.iter_mut() {
        *p = rotate_quarter(*p, anchor, turns);
    }
}

/// Samples a quadratic Bézier from `from` to `to`, excluding `from`.
pub fn quadratic_points(from: Vec2, control: Vec2, to: Vec2, samples: usize) -> Vec<Vec2> {
    (1..=samples)
        .map(|i| {
            let t = i as f32 / samples as f32;
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        })
        .collect()
}

/// Centred text, nudged by an offset from the middle of the surface.
pub fn display_text<S: Surface + ?Sized>(surface: &mut S, text: &str, size: f32, offset: Vec2, color: Color) {
    let em = surface.measure_text("M", size);
    let x = surface.width() / 2.0 - surface.measure_text(text, size) / 2.0 + offset.x;
    let y = surface.height() / 2.0 - em / 2.0 + offset.y;
    surface.draw_text(text, x, y, size, color);
}
