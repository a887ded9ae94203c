use crate::game::{Direction, GameEngine, GamePhase};
use crate::score::ScoreStore;

use super::handler::KeyAction;

/// What happened to an input after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Direction change reached the engine and was applied
    Turned,
    /// Direction change reached the engine but would have reversed the snake
    Reversal,
    /// Input arrived in a phase that doesn't accept it
    Dropped,
    /// A new session began
    Started,
    /// The player asked to leave
    Quit,
    /// Key has no meaning
    Ignored,
}

/// Gates intents by game phase before they reach the engine
///
/// Direction changes only pass while a session is running. Start and
/// restart only pass while one is not.
pub struct InputFilter;

impl InputFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn dispatch<S: ScoreStore>(&self, engine: &mut GameEngine<S>, action: KeyAction) -> Dispatch {
        match action {
            KeyAction::Turn(direction) => self.turn(engine, direction),
            KeyAction::Start | KeyAction::Restart => self.begin(engine),
            KeyAction::Quit => Dispatch::Quit,
            KeyAction::None => Dispatch::Ignored,
        }
    }

    pub fn turn<S: ScoreStore>(&self, engine: &mut GameEngine<S>, direction: Direction) -> Dispatch {
        if engine.phase() != GamePhase::Playing {
            return Dispatch::Dropped;
        }

        if engine.set_direction(direction) {
            Dispatch::Turned
        } else {
            Dispatch::Reversal
        }
    }

    fn begin<S: ScoreStore>(&self, engine: &mut GameEngine<S>) -> Dispatch {
        match engine.phase() {
            GamePhase::Playing => Dispatch::Dropped,
            GamePhase::NotStarted => {
                engine.start();
                Dispatch::Started
            }
            GamePhase::GameOver => {
                engine.restart();
                Dispatch::Started
            }
        }
    }
}

impl Default for InputFilter {
    fn default() -> Self {
        Self::new()
    }
}
