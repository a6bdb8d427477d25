//! App: terminal init, main loop, tick and key handling.

use crate::engine::{Engine, GravityClock};
use crate::field::Field;
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::{GameConfig, LoopMode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use rand::Rng;
use std::time::{Duration, Instant};

const TITLE: &str = "blocktui";

/// Whether the loop keeps running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct App {
    config: GameConfig,
    theme: Theme,
    engine: Engine,
    gravity: GravityClock,
}

impl App {
    pub fn new<R: Rng + ?Sized>(config: GameConfig, theme: Theme, rng: &mut R) -> Self {
        let engine = Engine::new(Field::standard(), rng);
        let gravity = GravityClock::new(config.gravity_interval, Instant::now());
        Self {
            config,
            theme,
            engine,
            gravity,
        }
    }

    /// Press events only; the key is applied to the engine unless it is the exit key.
    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        match key_to_action(key) {
            Action::Exit => Flow::Exit,
            action => {
                self.engine.handle(action);
                Flow::Continue
            }
        }
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        terminal.draw(|f| crate::ui::draw(f, &self.engine, &self.theme, TITLE))?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        let result = self.run_in_alternate_screen();
        let restored = restore_terminal();

        match &result {
            Ok(()) => tracing::info!("exit requested"),
            Err(e) => tracing::error!(error = %e, "game loop failed"),
        }
        // The loop error takes precedence over a failed restore.
        result.and(restored)
    }

    fn run_in_alternate_screen(&mut self) -> Result<()> {
        let mut stdout = std::io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        tracing::info!(mode = ?self.config.loop_mode, "game started");
        let result = match self.config.loop_mode {
            LoopMode::Gravity => self.run_gravity_loop(&mut terminal),
            LoopMode::Input => self.run_input_loop(&mut terminal),
        };
        let _ = terminal.show_cursor();
        result
    }

    /// Poll loop: gravity tick when due, one non-blocking key read, draw, short sleep.
    fn run_gravity_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            if self.gravity.due(Instant::now()) {
                self.engine.tick();
            }

            if event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if self.on_key(key) == Flow::Exit {
                        return Ok(());
                    }
                }
            }

            self.draw(terminal)?;
            std::thread::sleep(self.config.poll_interval);
        }
    }

    /// Read-driven loop: no gravity, redraw after every event.
    fn run_input_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            self.draw(terminal)?;
            if let Event::Key(key) = event::read()? {
                if self.on_key(key) == Flow::Exit {
                    return Ok(());
                }
            }
        }
    }
}

/// Leave the alternate screen and raw mode.
fn restore_terminal() -> Result<()> {
    restore_with(
        || crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen),
        crossterm::terminal::disable_raw_mode,
    )
}

/// Run both restore steps regardless of failures; the first error is returned.
fn restore_with(
    leave_screen: impl FnOnce() -> std::io::Result<()>,
    disable_raw: impl FnOnce() -> std::io::Result<()>,
) -> Result<()> {
    let left = leave_screen();
    let raw = disable_raw();
    if let Err(e) = &left {
        tracing::warn!(error = %e, "leaving alternate screen failed");
    }
    if let Err(e) = &raw {
        tracing::warn!(error = %e, "disabling raw mode failed");
    }
    left.and(raw)?;
    Ok(())
}
