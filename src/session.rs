use log::{debug, info, warn};
use macroquad::math::vec2;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::food::{Food, Relocation};
use crate::grid::{Grid, Occupant};
use crate::input::{Key, KeySet};
use crate::mouse::Mouse;
use crate::palette::{self, BodyPalette};
use crate::scoreboard::Scoreboard;
use crate::snake::{Mode, Snake, Step};
use crate::state::{Binding, Countdown, Demo, GameState, StateMachine};
use crate::surface::{Surface, display_text};
use crate::timer::{Scheduler, Task};

/// Everything one running game owns. Components only ever see each other through here.
pub struct Session {
    config: Config,
    grid: Grid,
    snake: Snake,
    food: Food,
    mouse: Mouse,
    scoreboard: Scoreboard,
    states: StateMachine,
    countdown: Countdown,
    demo: Demo,
    keys: KeySet,
    scheduler: Scheduler,
    body: BodyPalette,
    rng: StdRng,
}

impl Session {
    pub fn new(config: Config, rng: StdRng) -> Self {
        let grid = Grid::new(config.grid.columns, config.grid.rows);
        Self {
            snake: Snake::new(config.snake),
            food: Food::new(config.food),
            mouse: Mouse::new(config.mouse),
            scoreboard: Scoreboard::new(),
            states: StateMachine::new(),
            countdown: Countdown::new(config.countdown),
            demo: Demo::new(config.demo),
            keys: KeySet::new(),
            scheduler: Scheduler::new(),
            body: BodyPalette::for_board(config.grid.columns, config.grid.rows),
            grid,
            rng,
            config,
        }
    }

    /// Enters the attract screen.
    pub fn start(&mut self) {
        self.enter_state(GameState::Start);
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn state(&self) -> Option<GameState> { self.states.current() }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn snake(&self) -> &Snake { &self.snake }

    pub fn food(&self) -> &Food { &self.food }

    pub fn mouse(&self) -> &Mouse { &self.mouse }

    pub fn scoreboard(&self) -> &Scoreboard { &self.scoreboard }

    pub fn countdown(&self) -> &Countdown { &self.countdown }

    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);
        match self.states.binding(key) {
            Some(Binding::Goto(next)) => self.enter_state(next),
            Some(Binding::Restart) => self.restart(),
            None => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    pub fn enter_state(&mut self, next: GameState) {
        if let Some(old) = self.states.exit() {
            self.on_exit(old);
        }
        self.states.bind(next);
        self.on_enter(next);
        self.states.set_current(next);
        info!("entered {next} state");
    }

    fn on_exit(&mut self, old: GameState) {
        if old == GameState::Start {
            self.reset_board(self.config.snake.base_size);
        }
    }

    fn on_enter(&mut self, next: GameState) {
        match next {
            GameState::Start => {
                self.demo.restart();
                let demo_length = (self.config.grid.columns / 2).max(1) as usize;
                self.reset_board(demo_length);
                self.scoreboard.reset();
            }
            GameState::Countdown => self.countdown.restart(),
            GameState::Playing => self.mouse.change_location(&mut self.grid, &mut self.rng),
            GameState::Paused | GameState::GameOver => {}
        }
    }

    /// Fresh board and score, then count down again. The high score is kept.
    pub fn restart(&mut self) {
        info!("restarting, high score {}", self.scoreboard.high_score());
        self.reset_board(self.config.snake.base_size);
        self.scoreboard.reset();
        self.enter_state(GameState::Countdown);
    }

    fn reset_board(&mut self, snake_length: usize) {
        self.scheduler.cancel_all();
        self.food.forget();
        self.mouse.forget();
        self.snake.reset(&mut self.grid, snake_length);
        self.relocate_food();
        self.mouse.change_location(&mut self.grid, &mut self.rng);
    }

    fn relocate_food(&mut self) {
        if let Some(pending) = self.food.retry() {
            self.scheduler.cancel(pending);
        }
        match self.food.relocate(&mut self.grid, &mut self.rng) {
            Relocation::Placed(cell) => debug!("food placed at {cell:?}"),
            Relocation::Deferred => {
                let delay = self.config.food.retry_delay_ticks;
                let handle = self.scheduler.schedule(delay, Task::RelocateFood);
                self.food.set_retry(Some(handle));
                warn!("food placement deferred for {delay} ticks");
            }
        }
    }

    fn eat(&mut self, prey: Occupant) {
        self.snake.eat(&mut self.scoreboard);
        if prey == Occupant::Food {
            self.relocate_food();
        }
        // the mouse jumps away on every bite, food or not
        self.mouse.change_location(&mut self.grid, &mut self.rng);
    }

    fn run_due_tasks(&mut self) {
        for (handle, task) in self.scheduler.tick() {
            match task {
                Task::RelocateFood if self.food.retry() == Some(handle) => {
                    debug!("retrying food placement");
                    self.relocate_food();
                }
                Task::RelocateFood => {}
            }
        }
    }

    /// One simulation tick of the active state.
    pub fn update(&mut self) {
        self.run_due_tasks();

        let snake_length = self.snake.length();
        match self.states.current() {
            Some(GameState::Start) => {
                self.demo.update(&mut self.rng);
                self.mouse.update(&mut self.grid, &mut self.rng, snake_length);
                self.snake.update(Mode::Demo, self.demo.pseudo_keys(), &mut self.grid);
                self.demo.release_all();
            }
            Some(GameState::Countdown) => {
                if self.countdown.update() {
                    self.enter_state(GameState::Playing);
                }
            }
            Some(GameState::Playing) => {
                self.mouse.update(&mut self.grid, &mut self.rng, snake_length);
                match self.snake.update(Mode::Playing, &self.keys, &mut self.grid) {
                    Step::Ate(prey) => self.eat(prey),
                    Step::Collided => {
                        info!("game over with score {}", self.scoreboard.score());
                        self.enter_state(GameState::GameOver);
                    }
                    Step::Moved | Step::Waiting => {}
                }
            }
            Some(GameState::GameOver) => {
                self.mouse.update(&mut self.grid, &mut self.rng, snake_length);
            }
            Some(GameState::Paused) | None => {}
        }
    }

    fn draw_board<S: Surface + ?Sized>(&self, surface: &mut S, with_mouse: bool) {
        let size = self.config.grid.cell_size;
        self.food.draw(surface, size);
        if with_mouse {
            self.mouse.draw(surface, size);
        }
        self.snake.draw(surface, &self.body, size, self.states.is(GameState::GameOver));
        self.scoreboard.draw(surface);
    }

    /// Draws the active state. The game-over death animation advances once per call.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let h = surface.height();
        match self.states.current() {
            Some(GameState::Start) => {
                self.draw_board(surface, true);
                display_text(surface, "SNAKE", 70.0, vec2(0.0, -h / 3.0), palette::TEXT);
                if self.demo.prompt_visible() {
                    display_text(surface, "Press ENTER to start", 35.0, vec2(0.0, 0.0), palette::TEXT);
                }
                let help = "Use W A S D or the Arrow Keys to control the Snake";
                display_text(surface, help, 25.0, vec2(0.0, h / 3.0), palette::TEXT);
            }
            Some(GameState::Countdown) => {
                self.draw_board(surface, false);
                display_text(surface, &self.countdown.label(), 100.0, vec2(0.0, 0.0), palette::TEXT);
            }
            Some(GameState::Playing) => self.draw_board(surface, true),
            Some(GameState::Paused) => {
                self.draw_board(surface, true);
                display_text(surface, "PAUSED", 60.0, vec2(0.0, 0.0), palette::TEXT);
            }
            Some(GameState::GameOver) => {
                self.draw_board(surface, true);
                display_text(surface, "GAME OVER", 60.0, vec2(0.0, 0.0), palette::TEXT);
                display_text(surface, "Press R to restart", 25.0, vec2(0.0, 60.0), palette::TEXT);
                display_text(surface, "Press ESC to exit", 25.0, vec2(0.0, 85.0), palette::TEXT);
                self.snake.advance_death_animation();
            }
            None => {}
        }
    }
}
