//! # TUI Components
//!
//! Stateless, props-based pieces of the explorer screen. Each receives its
//! data as struct fields and renders into the area it is handed.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── context_bar.rs     (endpoint, chain id, status line)
//! ├── controls_panel.rs  (active key bindings)
//! ├── search_prompt.rs   (search input overlay)
//! └── main_view.rs       (current view: fields, notice, tx table)
//! ```
//!
//! `MainView` is the only one that borrows mutable state, the `TableState`
//! that keeps the selected transaction row scrolled into view.

mod context_bar;
mod controls_panel;
mod main_view;
mod search_prompt;

pub use context_bar::ContextBar;
pub use controls_panel::ControlsPanel;
pub use main_view::MainView;
pub use search_prompt::{PROMPT_HEIGHT, SearchPrompt};
