use std::env;
use std::fs::File;
use std::path::PathBuf;

use log::{LevelFilter, info, warn};
use macroquad::prelude::{Conf, get_frame_time, next_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;
use simplelog::WriteLogger;

use snake_arcade::config::CONFIG_PATH;
use snake_arcade::render::{self, MacroquadSurface};
use snake_arcade::{Config, GameError, GameLoop, Session};

const LOG_PATH: &str = "snake.log";

fn config_path() -> PathBuf {
    env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(CONFIG_PATH))
}

fn init_logging(level: LevelFilter) -> Result<(), GameError> {
    let file = File::create(LOG_PATH).map_err(GameError::LogFile)?;
    WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

fn window_conf() -> Conf {
    // the window has to exist before logging is up, so a bad config silently means default size
    let grid = Config::load(&config_path()).unwrap_or_default().grid;
    Conf {
        window_title: "Snake".to_owned(),
        window_width: grid.width() as i32,
        window_height: grid.height() as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let path = config_path();
    let loaded = Config::load(&path);

    let level = loaded.as_ref().map_or(LevelFilter::Info, |c| c.log_level);
    if let Err(err) = init_logging(level) {
        eprintln!("{err}");
    }

    let config = match loaded {
        Ok(config) => {
            if path.exists() {
                info!("loaded config from {}", path.display());
            }
            config
        }
        Err(err) => {
            warn!("{err}; using defaults");
            Config::default()
        }
    };
    info!("starting {}x{} board", config.grid.columns, config.grid.rows);

    let mut surface = MacroquadSurface::new(config.grid.width(), config.grid.height());
    let mut game_loop = GameLoop::new(&config.game_loop);
    let mut session = Session::new(config, StdRng::from_entropy());
    session.start();

    loop {
        render::pump_keys(&mut session);
        game_loop.frame(get_frame_time(), &mut session, &mut surface);
        next_frame().await;
    }
}
