use macroquad::prelude::*;

use crate::input::Key;
use crate::session::Session;
use crate::surface::Surface;

/// The macroquad window as a drawing surface, sized to the board.
pub struct MacroquadSurface {
    width: f32,
    height: f32,
}

impl MacroquadSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Surface for MacroquadSurface {
    fn width(&self) -> f32 { self.width }

    fn height(&self) -> f32 { self.height }

    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        draw_rectangle(x, y, w, h, color);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color) {
        draw_rectangle_lines(x, y, w, h, thickness, color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        // fan from the first vertex; every shape the game draws is star-shaped around it
        let Some((&first, rest)) = points.split_first() else { return };
        for pair in rest.windows(2) {
            draw_triangle(first, pair[0], pair[1], color);
        }
    }

    fn stroke_polygon(&mut self, points: &[Vec2], thickness: f32, color: Color) {
        if points.len() < 2 { return; }
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            draw_line(a.x, a.y, b.x, b.y, thickness, color);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        draw_circle(center.x, center.y, radius, color);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let dims = measure_text(text, None, size as u16, 1.0);
        draw_text(text, x, y + dims.offset_y, size, color);
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        measure_text(text, None, size as u16, 1.0).width
    }
}

pub fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::W => Key::W,
        KeyCode::A => Key::A,
        KeyCode::S => Key::S,
        KeyCode::D => Key::D,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Enter | KeyCode::KpEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::P => Key::P,
        KeyCode::R => Key::R,
        _ => return None,
    };
    Some(key)
}

/// Feeds this frame's key presses and releases to the session.
pub fn pump_keys(session: &mut Session) {
    for code in get_keys_pressed() {
        if let Some(key) = key_from_code(code) {
            session.key_down(key);
        }
    }
    for code in get_keys_released() {
        if let Some(key) = key_from_code(code) {
            session.key_up(key);
        }
    }
}
