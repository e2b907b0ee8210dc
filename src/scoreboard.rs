use crate::palette;
use crate::surface::Surface;

const FONT_SIZE: f32 = 20.0;

#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    score: u32,
    high_score: u32,
}

impl Scoreboard {
    pub fn new() -> Self { Self::default() }

    pub fn score(&self) -> u32 { self.score }

    pub fn high_score(&self) -> u32 { self.high_score }

    pub fn increment(&mut self, amount: u32) {
        self.score += amount;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Zeroes the score; the high score survives.
    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let score = format!("Score: {}", self.score);
        let high = format!("High Score: {}", self.high_score);

        surface.draw_text(&score, 5.0, 5.0, FONT_SIZE, palette::TEXT);
        let x = surface.width() - surface.measure_text(&high, FONT_SIZE) - 25.0;
        surface.draw_text(&high, x, 5.0, FONT_SIZE, palette::TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::RecordingSurface;

    #[test]
    fn high_score_never_drops() {
        let mut board = Scoreboard::new();
        let mut last_high = 0;
        for (amount, reset) in [(30, false), (30, true), (10, false), (90, false), (0, true), (20, false)] {
            if reset {
                board.reset();
            }
            board.increment(amount);
            assert!(board.high_score() >= last_high);
            assert!(board.high_score() >= board.score());
            last_high = board.high_score();
        }
        assert_eq!(board.high_score(), 130);
        assert_eq!(board.score(), 20);
    }

    #[test]
    fn draws_both_counters() {
        let mut board = Scoreboard::new();
        board.increment(30);
        let mut surface = RecordingSurface::new(625.0, 500.0);
        board.draw(&mut surface);
        assert_eq!(surface.texts(), vec!["Score: 30", "High Score: 30"]);
    }
}
