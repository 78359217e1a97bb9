//! # Core Application Logic
//!
//! Everything the explorer does, independent of how it is drawn.
//!
//! ```text
//!        key press / search text
//!                 │
//!                 ▼
//!     ┌───────────────────────┐   chain calls   ┌──────────────┐
//!     │ NavigationController  │ ──────────────► │ ChainClient  │
//!     └───────────┬───────────┘                 └──────────────┘
//!                 │ update(view)
//!                 ▼
//!     ┌───────────────────────┐
//!     │    ViewLifecycle      │ ──► DisplaySurface (TUI, or a fake in tests)
//!     └───────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`search`]: classify search text as block number, hash, or invalid
//! - [`controls`]: key bindings and the merged `ControlMapping`
//! - [`view`]: the three views and what they display
//! - [`lifecycle`]: installs views, one at a time
//! - [`navigation`]: the state machine driving it all
//! - [`state`]: chain context and status line
//! - [`config`]: endpoint resolution from CLI, env and `settings.toml`

pub mod config;
pub mod controls;
pub mod lifecycle;
pub mod navigation;
pub mod search;
pub mod state;
pub mod view;

pub use navigation::NavigationController;
