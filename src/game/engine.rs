use super::{
    action::Direction,
    config::GameConfig,
    food::FoodPlacer,
    state::{CollisionType, GamePhase, GameSnapshot, GameState, Position, Snake, Speed},
};
use crate::score::{ScoreStore, ScoreTracker};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the session ended with a new best score
    pub new_record: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the step was taken while playing
    pub advanced: bool,
    /// Whether the session has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            advanced: false,
            terminated,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
                new_record: false,
            },
        }
    }
}

/// The game engine that owns a session and handles all game logic
///
/// Phase gating of direction input is the caller's job (see
/// [`crate::input::InputFilter`]); `set_direction` only enforces the
/// reversal rule.
pub struct GameEngine<S: ScoreStore> {
    config: GameConfig,
    placer: FoodPlacer,
    tracker: ScoreTracker<S>,
    state: GameState,
}

impl<S: ScoreStore> GameEngine<S> {
    /// Create an engine waiting for its first `start`
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_placer(config, store, FoodPlacer::new())
    }

    /// Create an engine with a specific food placer, e.g. a seeded one
    pub fn with_placer(config: GameConfig, store: S, placer: FoodPlacer) -> Self {
        let state = Self::initial_state(&config);

        Self {
            config,
            placer,
            tracker: ScoreTracker::new(store),
            state,
        }
    }

    fn initial_state(config: &GameConfig) -> GameState {
        let snake = Snake::from_body(config.initial_snake.clone(), Direction::Right);
        GameState::new(snake, config.initial_food, config.board_size)
    }

    /// Begin a fresh session
    pub fn start(&mut self) {
        let mut state = Self::initial_state(&self.config);

        if let Some(food) = self.placer.place(&state.snake.body, state.board_size) {
            state.food = food;
        }
        state.speed = Speed::Every(self.config.initial_speed());
        state.phase = GamePhase::Playing;

        log::info!(
            "Session started (board {}x{}, best {})",
            state.board_size,
            state.board_size,
            self.tracker.high_score()
        );
        self.state = state;
    }

    /// Start again after a game over; identical to `start`
    pub fn restart(&mut self) {
        self.start();
    }

    /// Execute one tick of the game
    pub fn step(&mut self) -> StepResult {
        if self.state.phase != GamePhase::Playing {
            return StepResult::idle(self.state.phase == GamePhase::GameOver);
        }

        // Calculate new head position
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        // Check for collisions
        if let Some(collision_type) = self.check_collision(new_head) {
            log::debug!("{:?} collision at {:?}", collision_type, new_head);
            let new_record = self.end_game();

            return StepResult {
                advanced: true,
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                    new_record,
                },
            };
        }

        self.state.snake.push_head(new_head);

        let ate_food = new_head == self.state.food;
        if !ate_food {
            self.state.snake.pop_tail();
            return StepResult {
                advanced: true,
                terminated: false,
                info: StepInfo {
                    ate_food,
                    collision_type: None,
                    new_record: false,
                },
            };
        }

        self.state.score += self.config.food_reward;
        self.state.speed = self
            .state
            .speed
            .accelerated(self.config.speed_increment(), self.config.min_speed());
        log::debug!(
            "Ate food at {:?}: score {}, speed {:?}",
            new_head,
            self.state.score,
            self.state.speed
        );

        match self
            .placer
            .place(&self.state.snake.body, self.state.board_size)
        {
            Some(food) => {
                self.state.food = food;
                StepResult {
                    advanced: true,
                    terminated: false,
                    info: StepInfo {
                        ate_food,
                        collision_type: None,
                        new_record: false,
                    },
                }
            }
            None => {
                log::info!("Snake fills the whole board");
                let new_record = self.end_game();
                StepResult {
                    advanced: true,
                    terminated: true,
                    info: StepInfo {
                        ate_food,
                        collision_type: Some(CollisionType::BoardFull),
                        new_record,
                    },
                }
            }
        }
    }

    /// Check if the new head position causes a collision
    ///
    /// The self check runs against the body before the tail moves, so the
    /// cell the tail is about to vacate still counts as occupied.
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Change heading unless it would reverse the snake
    ///
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.snake.direction.is_opposite(direction) {
            return false;
        }

        self.state.snake.direction = direction;
        true
    }

    /// Stop the session and settle the high score
    ///
    /// Returns true when the final score set a new record.
    pub fn end_game(&mut self) -> bool {
        self.state.speed = Speed::Paused;
        self.state.phase = GamePhase::GameOver;

        log::info!(
            "Game over: score {}, length {}",
            self.state.score,
            self.state.snake.len()
        );
        self.tracker.record(self.state.score)
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

    pub fn speed(&self) -> Speed {
        self.state.speed
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.tracker.high_score()
    }

    #[cfg(test)]
    pub(crate) fn score_store(&self) -> &S {
        self.tracker.store()
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            snake: &self.state.snake.body,
            direction: self.state.snake.direction,
            food: self.state.food,
            board_size: self.state.board_size,
            score: self.state.score,
            high_score: self.tracker.high_score(),
            phase: self.state.phase,
            speed: self.state.speed,
        }
    }
}
