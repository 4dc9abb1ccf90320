use super::{
    action::Direction,
    config::{board_extent, GameConfig},
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};
use crate::error::Result;
use crate::storage::HighScoreStore;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random draws tried before food placement falls back to a board scan
pub const MAX_FOOD_ATTEMPTS: usize = 64;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is paused or over; nothing changed
    Idle,
    /// Regular move, length unchanged
    Moved,
    /// Food eaten: the snake grew by two and was moved onto `teleported_to`
    AteFood { teleported_to: Position },
    /// The move hit a wall or the body; only the phase changed
    GameOver {
        collision: CollisionType,
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
}

/// The game engine that owns one session and handles all game logic
pub struct GameEngine<S: HighScoreStore> {
    config: GameConfig,
    state: GameState,
    high_score: u32,
    store: S,
    rng: StdRng,
}

impl<S: HighScoreStore> GameEngine<S> {
    /// Create a new game engine; fails if the configuration is unusable
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Create an engine with a caller-supplied RNG, for reproducible games
    pub fn with_rng(config: GameConfig, mut store: S, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let high_score = match store.load_high_score() {
            Ok(score) => score,
            Err(err) => {
                warn!("Could not load high score, starting from 0: {err}");
                0
            }
        };

        let state = starting_state(config.board_size);
        let mut engine = Self {
            config,
            state,
            high_score,
            store,
            rng,
        };
        engine.reset();
        Ok(engine)
    }

    /// Start a fresh session from any phase
    pub fn reset(&mut self) {
        self.state = starting_state(self.config.board_size);
        self.state.food = self.spawn_food_avoid_snake();

        info!(
            "New session on a {0}x{0} board, food at ({1}, {2})",
            self.config.board_size, self.state.food.x, self.state.food.y
        );
    }

    /// Latch a direction for the next tick
    ///
    /// A reversal of the committed direction is ignored, as is any request
    /// after the game ended.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        if self.state.snake.direction.is_opposite(direction) {
            return;
        }
        self.state.pending_direction = direction;
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.state.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver => {}
        }
    }

    /// Execute one step of the game
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != GamePhase::Running {
            return TickOutcome::Idle;
        }

        // Commit the latched direction
        self.state.snake.direction = self.state.pending_direction;

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        if let Some(collision) = self.check_collision(new_head) {
            return self.end_game(collision);
        }

        if new_head == self.state.food {
            self.state.score += 1;
            self.state.snake.grow_to(new_head);
            self.state.food = self.spawn_food_avoid_snake();

            let target = self.random_cell();
            self.state.snake.teleport(target);

            debug!(
                "Ate food, score {}, length {}, teleported to ({}, {}), next food at ({}, {})",
                self.state.score,
                self.state.snake.len(),
                target.x,
                target.y,
                self.state.food.x,
                self.state.food.y
            );

            return TickOutcome::AteFood {
                teleported_to: target,
            };
        }

        self.state.snake.advance_to(new_head);
        TickOutcome::Moved
    }

    /// Check if the new head position causes a collision
    ///
    /// Compared against the pre-move body, so a snake collapsed by a teleport
    /// never collides on the move that leaves its cell.
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn end_game(&mut self, collision: CollisionType) -> TickOutcome {
        self.state.phase = GamePhase::GameOver;

        let score = self.state.score;
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
            if let Err(err) = self.store.save_high_score(score) {
                warn!("Could not save high score {score}: {err}");
            }
        }

        info!(
            "Game over ({collision:?}) with score {score}, high score {}",
            self.high_score
        );

        TickOutcome::GameOver {
            collision,
            score,
            high_score: self.high_score,
            new_high_score,
        }
    }

    /// Uniform draw over the whole board
    fn random_cell(&mut self) -> Position {
        let size = self.config.extent();
        Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size))
    }

    /// Spawn food at a random cell the snake does not cover
    fn spawn_food_avoid_snake(&mut self) -> Position {
        let mut candidate = self.random_cell();
        for _ in 1..MAX_FOOD_ATTEMPTS {
            if !self.state.is_occupied_by_snake(candidate) {
                return candidate;
            }
            candidate = self.random_cell();
        }
        if !self.state.is_occupied_by_snake(candidate) {
            return candidate;
        }

        match self.first_free_cell() {
            Some(pos) => pos,
            None => {
                warn!("Board is full, food placed under the snake");
                candidate
            }
        }
    }

    /// Row-major scan for the first cell without a snake segment
    fn first_free_cell(&self) -> Option<Position> {
        let size = self.config.extent();
        (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .find(|pos| !self.state.is_occupied_by_snake(*pos))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Single-segment snake at the board center heading right; food not placed yet
fn starting_state(board_size: usize) -> GameState {
    let center = board_extent(board_size) / 2;
    let snake = Snake::new(Position::new(center, center), Direction::Right, 1);
    GameState::new(snake, Position::new(0, 0), board_size)
}
