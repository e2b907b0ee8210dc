use crate::config::LoopConfig;
use crate::palette;
use crate::session::Session;
use crate::surface::Surface;

/// Turns variable frame deltas into a whole number of fixed simulation steps.
#[derive(Clone, Debug)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedStep {
    pub fn new(hz: f32, max_steps: u32) -> Self {
        Self { step: 1.0 / hz, accumulator: 0.0, max_steps: max_steps.max(1) }
    }

    /// Adds `dt` seconds and returns how many steps are due. Time beyond `max_steps` is dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let cap = self.step * self.max_steps as f32;
        if self.accumulator > cap {
            self.accumulator = cap;
        }
        let steps = ((self.accumulator / self.step).floor() as u32).min(self.max_steps);
        self.accumulator -= self.step * steps as f32;
        steps
    }
}

pub struct GameLoop {
    clock: FixedStep,
}

impl GameLoop {
    pub fn new(config: &LoopConfig) -> Self {
        Self { clock: FixedStep::new(config.sim_hz, config.max_steps_per_frame) }
    }

    /// One display frame: clear, run the due simulation ticks, draw. Returns the tick count.
    pub fn frame<S: Surface + ?Sized>(&mut self, dt: f32, session: &mut Session, surface: &mut S) -> u32 {
        let steps = self.clock.advance(dt);
        surface.clear(palette::BACKGROUND);
        for _ in 0..steps {
            session.update();
        }
        session.draw(surface);
        steps
    }
}
