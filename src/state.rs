use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::config::{CountdownConfig, DemoConfig};
use crate::grid::Direction;
use crate::input::{Key, KeySet};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Start,
    Countdown,
    Playing,
    Paused,
    GameOver,
}

/// What a bound key does when pressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Goto(GameState),
    /// Reset the board and score, then count down again.
    Restart,
}

impl GameState {
    pub fn bindings(self) -> &'static [(Key, Binding)] {
        match self {
            GameState::Start => &[(Key::Enter, Binding::Goto(GameState::Countdown))],
            GameState::Countdown => &[],
            GameState::Playing => &[(Key::P, Binding::Goto(GameState::Paused))],
            GameState::Paused => &[(Key::P, Binding::Goto(GameState::Playing)), (Key::R, Binding::Restart)],
            GameState::GameOver => &[(Key::R, Binding::Restart), (Key::Escape, Binding::Goto(GameState::Start))],
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Start => "start",
            GameState::Countdown => "countdown",
            GameState::Playing => "playing",
            GameState::Paused => "paused",
            GameState::GameOver => "gameover",
        };
        f.write_str(name)
    }
}

/// The active state and the keys it has bound. Hooks live on the session.
#[derive(Debug, Default)]
pub struct StateMachine {
    current: Option<GameState>,
    bound: HashMap<Key, Binding>,
}

impl StateMachine {
    pub fn new() -> Self { Self::default() }

    pub fn current(&self) -> Option<GameState> { self.current }

    pub fn is(&self, state: GameState) -> bool { self.current == Some(state) }

    pub fn binding(&self, key: Key) -> Option<Binding> { self.bound.get(&key).copied() }

    /// Leaves the current state, dropping its key bindings.
    pub fn exit(&mut self) -> Option<GameState> {
        let old = self.current.take()?;
        for (key, _) in old.bindings() {
            self.bound.remove(key);
        }
        Some(old)
    }

    pub fn bind(&mut self, state: GameState) {
        for (key, binding) in state.bindings() {
            self.bound.insert(*key, *binding);
        }
    }

    pub fn set_current(&mut self, state: GameState) {
        self.current = Some(state);
    }
}

/// 3-2-1 freeze before play.
#[derive(Clone, Debug)]
pub struct Countdown {
    tick: u32,
    count: u32,
    config: CountdownConfig,
}

impl Countdown {
    pub fn new(config: CountdownConfig) -> Self {
        Self { tick: 0, count: config.start, config }
    }

    pub fn count(&self) -> u32 { self.count }

    pub fn restart(&mut self) {
        self.tick = 0;
        self.count = self.config.start;
    }

    /// Returns true once the count has reached zero and play should begin.
    pub fn update(&mut self) -> bool {
        if self.count == 0 {
            return true;
        }
        self.tick += 1;
        if self.tick >= self.config.ticks_per_count {
            self.count -= 1;
            self.tick = 0;
        }
        false
    }

    pub fn label(&self) -> String {
        match self.count {
            0 => "START".to_owned(),
            n => n.to_string(),
        }
    }
}

/// Attract-mode driver that presses pseudo-keys on a timer.
#[derive(Clone, Debug)]
pub struct Demo {
    tick: u32,
    last: Option<Direction>,
    pseudo_keys: KeySet,
    config: DemoConfig,
}

impl Demo {
    pub fn new(config: DemoConfig) -> Self {
        Self { tick: 0, last: None, pseudo_keys: KeySet::new(), config }
    }

    pub fn pseudo_keys(&self) -> &KeySet { &self.pseudo_keys }

    pub fn restart(&mut self) {
        self.tick = 0;
        self.pseudo_keys.clear();
    }

    pub fn prompt_visible(&self) -> bool { self.tick <= self.config.prompt_visible_ticks }

    /// Counts a tick and, once the delay has passed, holds a new steering key for this tick.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tick += 1;
        if self.tick <= self.config.direction_change_delay {
            return;
        }
        self.tick = 0;

        let last = self.last;
        let pick = Direction::ALL
            .into_iter()
            .filter(|d| Some(*d) != last)
            .choose(rng)
            .unwrap_or(Direction::Right);
        self.last = Some(pick);
        self.pseudo_keys.press(Key::for_direction(pick));
    }

    /// Pseudo-keys only last for the tick they were pressed in.
    pub fn release_all(&mut self) {
        self.pseudo_keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn exit_unbinds_and_bind_installs() {
        let mut sm = StateMachine::new();
        sm.bind(GameState::GameOver);
        sm.set_current(GameState::GameOver);
        assert_eq!(sm.binding(Key::R), Some(Binding::Restart));
        assert_eq!(sm.binding(Key::Escape), Some(Binding::Goto(GameState::Start)));

        assert_eq!(sm.exit(), Some(GameState::GameOver));
        assert_eq!(sm.current(), None);
        assert_eq!(sm.binding(Key::R), None);

        sm.bind(GameState::Playing);
        sm.set_current(GameState::Playing);
        assert!(sm.is(GameState::Playing));
        assert_eq!(sm.binding(Key::P), Some(Binding::Goto(GameState::Paused)));
        assert_eq!(sm.binding(Key::Enter), None);
    }

    #[test]
    fn exit_without_a_state_is_a_no_op() {
        let mut sm = StateMachine::new();
        assert_eq!(sm.exit(), None);
    }

    #[test]
    fn countdown_takes_three_counts_plus_one_tick() {
        let mut c = Countdown::new(CountdownConfig::default());
        let mut seen = vec![c.label()];
        let mut ticks = 0;
        loop {
            ticks += 1;
            if c.update() {
                break;
            }
            if seen.last() != Some(&c.label()) {
                seen.push(c.label());
            }
        }
        assert_eq!(ticks, 3 * 60 + 1);
        assert_eq!(seen, vec!["3", "2", "1", "START"]);
    }

    #[test]
    fn demo_presses_one_key_per_period() {
        let mut demo = Demo::new(DemoConfig::default());
        let mut rng = StdRng::seed_from_u64(3);
        let mut presses = 0;
        for _ in 0..(61 * 3) {
            demo.update(&mut rng);
            if demo.pseudo_keys().steering().next().is_some() {
                presses += 1;
            }
            demo.release_all();
        }
        assert_eq!(presses, 3);
    }

    #[test]
    fn demo_never_repeats_its_last_pick() {
        let config = DemoConfig { direction_change_delay: 0, ..DemoConfig::default() };
        let mut demo = Demo::new(config);
        let mut rng = StdRng::seed_from_u64(11);
        let mut previous = None;
        for _ in 0..200 {
            demo.update(&mut rng);
            let picked: Vec<_> = demo.pseudo_keys().steering().collect();
            assert_eq!(picked.len(), 1);
            assert_ne!(Some(picked[0]), previous);
            previous = Some(picked[0]);
            demo.release_all();
        }
    }

    #[test]
    fn bindings_match_the_transition_table() {
        assert_eq!(GameState::Countdown.bindings().len(), 0);
        assert!(GameState::Paused.bindings().contains(&(Key::R, Binding::Restart)));
        assert_eq!(GameState::GameOver.to_string(), "gameover");
    }
}
