use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::scheduler::TickScheduler;
use crate::game::{GameConfig, GameEngine};
use crate::input::{Dispatch, InputFilter, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::score::ScoreStore;

pub struct HumanMode<S: ScoreStore> {
    engine: GameEngine<S>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    input_filter: InputFilter,
    should_quit: bool,
}

impl<S: ScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        Self {
            engine: GameEngine::new(config, store),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            input_filter: InputFilter::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks follow the engine's speed; paused until a session starts
        let mut scheduler = TickScheduler::new();
        self.sync_ticks(&mut scheduler);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = scheduler.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // Eating, starting and dying all change the tick period
            self.sync_ticks(&mut scheduler);

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn sync_ticks(&self, scheduler: &mut TickScheduler) {
        if scheduler.sync(self.engine.speed()) {
            log::debug!("Tick period now {:?}", scheduler.period());
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = self.input_handler.handle_key_event(key);

        match self.input_filter.dispatch(&mut self.engine, action) {
            Dispatch::Started => {
                self.metrics.on_game_start();
            }
            Dispatch::Quit => {
                self.should_quit = true;
            }
            Dispatch::Turned | Dispatch::Reversal | Dispatch::Dropped | Dispatch::Ignored => {}
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.step();

        // Track game over
        if result.advanced && result.terminated {
            self.metrics
                .on_game_over(self.engine.state().snake.len());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Raw mode plus alternate screen; undone again if any step fails
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    restore_on_error(enter_alternate_screen, restore_terminal_mode)
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Run `setup`, calling `restore` before its error is returned
fn restore_on_error<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        restore();
    }
    result
}

/// Best-effort undo of a half-finished setup; the setup error wins
fn restore_terminal_mode() {
    if let Err(err) = execute!(stderr(), LeaveAlternateScreen, Show) {
        log::warn!("Failed to leave alternate screen: {}", err);
    }
    if let Err(err) = disable_raw_mode() {
        log::warn!("Failed to disable raw mode: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GamePhase};
    use crate::score::MemoryScoreStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode<MemoryScoreStore> {
        HumanMode::new(GameConfig::small(), MemoryScoreStore::new())
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine.phase(), GamePhase::NotStarted);
        assert_eq!(mode.engine.score(), 0);
        assert!(!mode.metrics.running);
    }

    #[test]
    fn test_enter_starts_session() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));

        assert_eq!(mode.engine.phase(), GamePhase::Playing);
        assert!(mode.metrics.running);
    }

    #[test]
    fn test_direction_keys_need_a_session() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.engine.state().snake.direction, Direction::Right);

        mode.handle_event(key(KeyCode::Enter));
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.engine.state().snake.direction, Direction::Up);
    }

    #[test]
    fn test_game_over_tracked_once() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        mode.handle_event(key(KeyCode::Char('w')));

        // Heading straight up from row 5 hits the wall within six ticks
        for _ in 0..20 {
            mode.update_game();
        }

        assert_eq!(mode.engine.phase(), GamePhase::GameOver);
        assert_eq!(mode.metrics.games_played, 1);
        assert!(!mode.metrics.running);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        mode.engine.end_game();

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.engine.phase(), GamePhase::Playing);
        assert_eq!(mode.engine.score(), 0);
    }

    #[test]
    fn test_failed_setup_is_restored() {
        let restored = std::cell::Cell::new(false);

        let result: Result<()> = restore_on_error(
            || Err(anyhow::anyhow!("no alternate screen")),
            || restored.set(true),
        );

        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_is_kept() {
        let restored = std::cell::Cell::new(false);

        let result = restore_on_error(|| Ok(7), || restored.set(true));

        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
