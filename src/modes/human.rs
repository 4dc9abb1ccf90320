use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::notify::Notifications;
use crate::render::Renderer;
use crate::storage::HighScoreStore;

/// Render at 30 FPS (33ms per frame)
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive session: keyboard in, ratatui out, engine ticked at `speed` Hz
pub struct HumanMode<S: HighScoreStore> {
    engine: GameEngine<S>,
    notifications: Notifications,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S) -> Result<Self> {
        let engine = GameEngine::new(config, store).context("Failed to create game engine")?;

        let mut notifications = Notifications::new();
        notifications.on_session_start();

        Ok(Self {
            engine,
            notifications,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick interval is the game's fixed-rate scheduler
        let mut tick_timer = interval(self.engine.config().tick_period());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    let now = Instant::now();
                    self.notifications.prune(now);
                    let state = self.engine.state();
                    let high_score = self.engine.high_score();
                    let toast = self.notifications.current(now);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, state, high_score, toast);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => self.engine.set_direction(direction),
            KeyAction::TogglePause => {
                self.engine.toggle_pause();
                debug!("Phase is now {:?}", self.engine.phase());
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver {
            score,
            high_score,
            new_high_score,
            ..
        } = self.engine.tick()
        {
            self.notifications
                .on_game_over(score, high_score, new_high_score);
        }
    }

    fn reset_game(&mut self) {
        info!("Restart requested");
        self.engine.reset();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GamePhase};
    use crate::storage::MemoryHighScoreStore;

    fn mode() -> HumanMode<MemoryHighScoreStore> {
        HumanMode::new(GameConfig::default(), MemoryHighScoreStore::default()).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.score(), 0);
        let toast = mode.notifications.current(Instant::now()).unwrap();
        assert_eq!(toast.title, "Welcome to Twisted Snake!");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = HumanMode::new(GameConfig::new(1, 8), MemoryHighScoreStore::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_pause_key_toggles_phase() {
        let mut mode = mode();
        mode.apply(KeyAction::TogglePause);
        assert_eq!(mode.engine.phase(), GamePhase::Paused);
        mode.apply(KeyAction::TogglePause);
        assert_eq!(mode.engine.phase(), GamePhase::Running);
    }

    #[test]
    fn test_game_over_notifies_and_restart() {
        let mut mode = mode();
        mode.apply(KeyAction::Steer(Direction::Up));

        // Heading straight up always ends at the top wall, teleports or not
        for _ in 0..500 {
            if mode.engine.phase() == GamePhase::GameOver {
                break;
            }
            mode.update_game();
        }
        assert_eq!(mode.engine.phase(), GamePhase::GameOver);
        let toast = mode.notifications.current(Instant::now()).unwrap();
        assert!(toast.title == "Game Over" || toast.title == "New High Score!");

        mode.apply(KeyAction::Restart);
        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.score(), 0);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.apply(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
