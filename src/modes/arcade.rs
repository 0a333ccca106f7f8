use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GameState, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// The playable game: keyboard in, terminal frames out, one simulation
/// tick per clock interval
pub struct ArcadeMode {
    engine: GameEngine,
    state: GameState,
    stats: SessionStats,
    renderer: Renderer,
    input: InputHandler,
    should_quit: bool,
}

impl ArcadeMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input: InputHandler::new(),
            should_quit: false,
        }
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

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation cadence comes from the config (default 8 Hz)
        let mut tick_timer = interval(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick; terminal states only repaint
                _ = tick_timer.tick() => {
                    self.advance_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.stats.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

            match self.input.handle_key_event(key) {
                // Heading requests apply as they arrive; the last valid one
                // before a tick is the one the tick consumes
                KeyAction::Turn(direction) => {
                    self.engine.turn(&mut self.state, direction);
                }
                KeyAction::Restart => {
                    let round_over = !self.state.is_running();
                    self.engine.restart(&mut self.state);
                    if round_over {
                        self.stats.round_started();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn advance_tick(&mut self) {
        match self.engine.tick(&mut self.state) {
            TickOutcome::Collided | TickOutcome::Filled => {
                self.stats.round_ended(self.state.score);
            }
            TickOutcome::Moved { .. } | TickOutcome::Idle => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Status;

    #[test]
    fn test_game_initialization() {
        let mode = ArcadeMode::new(GameConfig::small());
        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.len(), 1);
    }

    #[test]
    fn test_restart_only_after_round_ends() {
        let mut mode = ArcadeMode::new(GameConfig::small());
        mode.state.score = 3;

        mode.engine.restart(&mut mode.state);
        assert_eq!(mode.state.score, 3);

        mode.state.status = Status::GameOver;
        mode.engine.restart(&mut mode.state);
        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
    }

    #[test]
    fn test_game_over_tick_updates_stats() {
        let mut mode = ArcadeMode::new(GameConfig::small());
        mode.state.score = 7;
        // curl the snake onto itself so the next tick collides
        mode.state.snake = crate::game::Snake::from_segments(
            vec![
                crate::game::Position::new(3, 3),
                crate::game::Position::new(4, 3),
                crate::game::Position::new(4, 4),
                crate::game::Position::new(3, 4),
            ],
            crate::game::Direction::Down,
        );

        mode.advance_tick();

        assert_eq!(mode.state.status, Status::GameOver);
        assert_eq!(mode.stats.high_score, 7);
        assert_eq!(mode.stats.rounds_played, 1);
    }
}
