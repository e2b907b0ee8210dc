use std::fs;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

pub const CONFIG_PATH: &str = "snake.json";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_size: f32,
    pub columns: i32,
    pub rows: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size: 25.0, columns: 25, rows: 20 }
    }
}

impl GridConfig {
    pub fn width(&self) -> f32 { self.cell_size * self.columns as f32 }

    pub fn height(&self) -> f32 { self.cell_size * self.rows as f32 }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub base_size: usize,
    pub size_growth: usize,
    pub time_frame: f32,
    pub base_speed: f32,
    pub speed_growth: f32,
    pub score_scale: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            base_size: 5,
            size_growth: 3,
            time_frame: 180.0,
            base_speed: 10.0,
            speed_growth: 0.25,
            score_scale: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    pub direction_change_delay: u32,
    pub move_delay: u32,
    pub min_direction_change_delay: u32,
    pub min_move_delay: u32,
    /// Snake length per tick shaved off both cadences.
    pub length_divisor: usize,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            direction_change_delay: 120,
            move_delay: 40,
            min_direction_change_delay: 60,
            min_move_delay: 20,
            length_divisor: 9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub max_move_attempts: u32,
    pub retry_delay_ticks: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self { max_move_attempts: 1000, retry_delay_ticks: 60 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub sim_hz: f32,
    pub max_steps_per_frame: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { sim_hz: 60.0, max_steps_per_frame: 8 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub start: u32,
    pub ticks_per_count: u32,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self { start: 3, ticks_per_count: 60 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub direction_change_delay: u32,
    pub prompt_visible_ticks: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { direction_change_delay: 60, prompt_visible_ticks: 40 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub snake: SnakeConfig,
    pub mouse: MouseConfig,
    pub food: FoodConfig,
    pub game_loop: LoopConfig,
    pub countdown: CountdownConfig,
    pub demo: DemoConfig,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            snake: SnakeConfig::default(),
            mouse: MouseConfig::default(),
            food: FoodConfig::default(),
            game_loop: LoopConfig::default(),
            countdown: CountdownConfig::default(),
            demo: DemoConfig::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|source| GameError::ConfigIo { path: path.to_owned(), source })?;
        Self::from_json(&text).map_err(|err| match err {
            GameError::ConfigParse { source, .. } => GameError::ConfigParse { path: path.to_owned(), source },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)
            .map_err(|source| GameError::ConfigParse { path: Default::default(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(GameError::InvalidConfig(msg.to_owned()));

        if self.grid.columns <= 0 || self.grid.rows <= 0 {
            return invalid("grid must have at least one column and one row");
        }
        if self.grid.cell_size <= 0.0 {
            return invalid("grid.cell_size must be positive");
        }
        if self.snake.base_size == 0 {
            return invalid("snake.base_size must be at least 1");
        }
        if self.snake.base_speed <= 0.0 || self.snake.speed_growth < 0.0 || self.snake.time_frame <= 0.0 {
            return invalid("snake speed settings must be positive");
        }
        if self.mouse.length_divisor == 0 || self.mouse.min_move_delay == 0 || self.mouse.min_direction_change_delay == 0 {
            return invalid("mouse cadences must be positive");
        }
        if self.game_loop.sim_hz <= 0.0 || self.game_loop.max_steps_per_frame == 0 {
            return invalid("game_loop rate must be positive");
        }
        if self.countdown.ticks_per_count == 0 {
            return invalid("countdown.ticks_per_count must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "grid": { "columns": 30 }, "log_level": "debug" }"#).unwrap();
        assert_eq!(config.grid.columns, 30);
        assert_eq!(config.grid.rows, 20);
        assert_eq!(config.snake, SnakeConfig::default());
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn default_board_is_625_by_500() {
        let grid = Config::default().grid;
        assert_eq!(grid.width(), 625.0);
        assert_eq!(grid.height(), 500.0);
    }

    #[test]
    fn rejects_empty_board() {
        let err = Config::from_json(r#"{ "grid": { "rows": 0 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Config::from_json("{ grid: ").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("definitely/not/here/snake.json")).unwrap();
        assert_eq!(config, Config::default());
    }
}
