//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, translates crossterm key
//! presses into `Trigger`s for the `NavigationController`, and paints the
//! `Screen` the view lifecycle publishes into.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws when something changed: a key
//! was handled, the terminal was resized, or the lifecycle asked for a
//! redraw. Otherwise it sleeps in `poll` for up to 250ms.
//!
//! Chain calls are awaited inline from `handle_key`, so while one is in
//! flight no input is read and no frame is drawn.

mod component;
mod components;
mod event;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::execute;
use log::{debug, info};
use ratatui::widgets::TableState;

use crate::core::NavigationController;
use crate::core::controls::{ControlEntry, KeyOutcome};
use crate::core::lifecycle::DisplaySurface;
use crate::core::view::{ViewKind, ViewOutput};
use crate::tui::event::{TuiEvent, poll_event};
use crate::tui::ui::Chrome;

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// The ratatui `DisplaySurface`: holds what the lifecycle published until the
/// next frame paints it.
#[derive(Debug, Default)]
pub struct Screen {
    main: Option<ViewOutput>,
    controls: Vec<ControlEntry>,
    table_state: TableState,
    needs_redraw: bool,
}

impl Screen {
    pub fn controls(&self) -> &[ControlEntry] {
        &self.controls
    }

    pub fn main(&self) -> Option<&ViewOutput> {
        self.main.as_ref()
    }

    fn main_parts(&mut self) -> (Option<&ViewOutput>, &mut TableState) {
        (self.main.as_ref(), &mut self.table_state)
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

impl DisplaySurface for Screen {
    fn show_main(&mut self, output: ViewOutput) {
        self.main = Some(output);
    }

    fn teardown(&mut self, kind: ViewKind) {
        debug!("Clearing {:?} from screen", kind);
        self.main = None;
        self.table_state = TableState::default();
    }

    fn show_controls(&mut self, controls: &[ControlEntry]) {
        self.controls = controls.to_vec();
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }
}

/// Restores the terminal however `run` exits, including a failed setup.
struct TerminalModeGuard {
    restore: fn(),
}

impl TerminalModeGuard {
    /// Armed before `setup` runs, so an early `?` still restores.
    fn engage(setup: impl FnOnce() -> io::Result<()>, restore: fn()) -> io::Result<Self> {
        let guard = Self { restore };
        setup()?;
        Ok(guard)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = execute!(stdout(), SetCursorStyle::DefaultUserShape);
    ratatui::restore();
}

/// Run the explorer until the user quits. `nav` must already be started.
pub async fn run(nav: &mut NavigationController<Screen>) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::engage(
        || execute!(stdout(), SetCursorStyle::SteadyBar),
        restore_terminal,
    )?;
    info!("Terminal initialised");

    let mut needs_redraw = true; // Force first frame

    loop {
        let requested = nav.lifecycle_mut().surface_mut().take_redraw();
        if needs_redraw || requested {
            let context = nav.context().clone();
            let status = nav.status().cloned();
            let prompt = nav.prompt().cloned();
            let chrome = Chrome {
                context: &context,
                status: status.as_ref(),
                prompt: prompt.as_ref(),
            };
            let screen = nav.lifecycle_mut().surface_mut();
            terminal.draw(|f| ui::draw_ui(f, &chrome, screen))?;
            needs_redraw = false;
        }

        match poll_event(POLL_TIMEOUT)? {
            Some(TuiEvent::Key(trigger)) => {
                if nav.handle_key(trigger).await == KeyOutcome::Quit {
                    info!("Leaving explorer");
                    break;
                }
                needs_redraw = true;
            }
            Some(TuiEvent::Resize) => needs_redraw = true,
            None => {}
        }
    }

    Ok(())
}
