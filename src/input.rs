use std::collections::HashSet;

use crate::grid::Direction;

/// Normalized key identifiers the game reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Enter,
    Escape,
    Space,
    P,
    R,
}

impl Key {
    /// Parses a lowercase key name; the space bar arrives as `" "` or `"space"`.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" => Key::W,
            "a" => Key::A,
            "s" => Key::S,
            "d" => Key::D,
            "arrowleft" => Key::ArrowLeft,
            "arrowup" => Key::ArrowUp,
            "arrowright" => Key::ArrowRight,
            "arrowdown" => Key::ArrowDown,
            "enter" => Key::Enter,
            "escape" => Key::Escape,
            " " | "space" => Key::Space,
            "p" => Key::P,
            "r" => Key::R,
            _ => return None,
        };
        Some(key)
    }

    /// Letter key that steers in `direction`; the demo presses these.
    pub fn for_direction(direction: Direction) -> Key {
        match direction {
            Direction::Left => Key::A,
            Direction::Up => Key::W,
            Direction::Right => Key::D,
            Direction::Down => Key::S,
        }
    }
}

/// Set of currently held keys.
#[derive(Clone, Debug, Default)]
pub struct KeySet {
    held: HashSet<Key>,
}

impl KeySet {
    pub fn new() -> Self { Self::default() }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool { self.held.contains(&key) }

    pub fn any(&self, keys: &[Key]) -> bool { keys.iter().any(|k| self.is_down(*k)) }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Steering keys in the order they are checked; a later match overrides an earlier one.
    pub fn steering(&self) -> impl Iterator<Item = Direction> + '_ {
        [
            (Direction::Left, [Key::A, Key::ArrowLeft]),
            (Direction::Right, [Key::D, Key::ArrowRight]),
            (Direction::Up, [Key::W, Key::ArrowUp]),
            (Direction::Down, [Key::S, Key::ArrowDown]),
        ]
        .into_iter()
        .filter(move |(_, keys)| self.any(keys))
        .map(|(d, _)| d)
    }
}
