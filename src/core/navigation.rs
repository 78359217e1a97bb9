//! # Navigation
//!
//! The top-level state machine. It owns the chain client, turns key presses
//! and search submissions into chain calls, and hands the resulting views to
//! the `ViewLifecycle`.
//!
//! ```text
//!                 refresh            refresh              refresh
//!                ┌──────┐           ┌──────┐             ┌──────┐
//!                ▼      │           ▼      │             ▼      │
//!   start ──► ChainSummary ──────► Block(id) ──Enter──► Transaction(hash)
//!                ▲   search n / hash   ▲  ◄───── b ──────     │
//!                │                     └──────── Esc ─────────┘
//!                └──────── h (home) from anywhere
//! ```
//!
//! `/` opens the search prompt over whatever is showing; Ctrl+C quits from
//! anywhere, prompt included.
//!
//! Every chain call is awaited inline: the machine only moves once the call
//! has returned, and a failed call leaves the current view in place with the
//! error in the status line. Nothing is retried.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::chain::{ChainClient, ChainError};
use crate::core::controls::{
    Command, ControlBinding, KeyOutcome, NamedKey, Resolution, Trigger, default_bindings,
};
use crate::core::lifecycle::{DisplaySurface, ViewLifecycle};
use crate::core::search::{SearchIntent, classify};
use crate::core::state::{ChainContext, Status};
use crate::core::view::{BlockId, View, ViewTarget};

/// Why a command could not be carried out. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The user asked for something that makes no sense right now.
    Input(String),
    /// A chain call failed.
    Fetch(ChainError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Input(msg) => f.write_str(msg),
            CommandError::Fetch(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ChainError> for CommandError {
    fn from(e: ChainError) -> Self {
        CommandError::Fetch(e)
    }
}

/// Text typed into the search overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPrompt {
    pub input: String,
}

pub struct NavigationController<S: DisplaySurface> {
    client: Arc<dyn ChainClient>,
    context: ChainContext,
    lifecycle: ViewLifecycle<S>,
    status: Option<Status>,
    prompt: Option<SearchPrompt>,
    /// Targets to return to with Back, most recent last.
    history: Vec<ViewTarget>,
    quit: bool,
}

impl<S: DisplaySurface> NavigationController<S> {
    pub fn new(client: Arc<dyn ChainClient>, context: ChainContext, surface: S) -> Self {
        Self::with_defaults(client, context, surface, default_bindings())
    }

    pub fn with_defaults(
        client: Arc<dyn ChainClient>,
        context: ChainContext,
        surface: S,
        defaults: Vec<ControlBinding>,
    ) -> Self {
        Self {
            client,
            context,
            lifecycle: ViewLifecycle::new(surface, defaults),
            status: None,
            prompt: None,
            history: Vec::new(),
            quit: false,
        }
    }

    /// Enter the initial chain summary. A failure here is reported like any
    /// other fetch error; the explorer stays usable.
    pub async fn start(&mut self) {
        info!("Starting explorer on {} (chain {})", self.context.endpoint, self.context.chain_id);
        if let Err(e) = self.go_home().await {
            self.report(e);
        }
    }

    // ------------------------------------------------------------------------
    // Accessors for the renderer
    // ------------------------------------------------------------------------

    pub fn context(&self) -> &ChainContext {
        &self.context
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn prompt(&self) -> Option<&SearchPrompt> {
        self.prompt.as_ref()
    }

    pub fn lifecycle(&self) -> &ViewLifecycle<S> {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut ViewLifecycle<S> {
        &mut self.lifecycle
    }

    pub fn current_target(&self) -> Option<ViewTarget> {
        self.lifecycle.current().map(View::target)
    }

    pub fn history(&self) -> &[ViewTarget] {
        &self.history
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// Feed one key press through the prompt (if open) or the current
    /// mapping.
    pub async fn handle_key(&mut self, trigger: Trigger) -> KeyOutcome {
        if self.prompt.is_some() {
            return self.handle_prompt_key(trigger).await;
        }
        self.dispatch(trigger).await
    }

    async fn handle_prompt_key(&mut self, trigger: Trigger) -> KeyOutcome {
        match trigger {
            Trigger::Key(NamedKey::Enter) => {
                let text = self.prompt.take().map(|p| p.input).unwrap_or_default();
                self.lifecycle.surface_mut().request_redraw();
                if let Err(e) = self.submit_search(&text).await {
                    self.report(e);
                }
                KeyOutcome::Consumed
            }
            Trigger::Key(NamedKey::Esc) => {
                debug!("Search prompt dismissed");
                self.prompt = None;
                self.lifecycle.surface_mut().request_redraw();
                KeyOutcome::Consumed
            }
            Trigger::Key(NamedKey::Backspace) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.pop();
                }
                KeyOutcome::Consumed
            }
            // The activation key never ends up in the query.
            Trigger::Char('/') => KeyOutcome::Consumed,
            Trigger::Char(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.push(c);
                }
                KeyOutcome::Consumed
            }
            // Other named keys keep their bindings, so quit still works.
            Trigger::Key(_) => self.dispatch(trigger).await,
        }
    }

    async fn dispatch(&mut self, trigger: Trigger) -> KeyOutcome {
        match self.lifecycle.mapping().resolve(&trigger) {
            Resolution::Unhandled => KeyOutcome::PassThrough,
            Resolution::NoHandler(label) => {
                warn!("Control {} has no handler", label);
                self.set_status(Status::Error(format!("no handler for control {label}")));
                KeyOutcome::Consumed
            }
            Resolution::Run(command) => {
                debug!("Dispatching {:?} for {}", command, trigger);
                match self.run(command).await {
                    Ok(()) if self.quit => KeyOutcome::Quit,
                    Ok(()) => KeyOutcome::Consumed,
                    Err(e) => {
                        self.report(e);
                        KeyOutcome::Consumed
                    }
                }
            }
        }
    }

    /// Execute one bound command.
    pub async fn run(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::ActivateSearch => {
                self.open_search();
                Ok(())
            }
            Command::Home => self.go_home().await,
            Command::Quit => {
                info!("Quit requested");
                self.quit = true;
                Ok(())
            }
            Command::Refresh => self.refresh().await,
            Command::Back => self.back().await,
            Command::SelectPrevious
            | Command::SelectNext
            | Command::PagePrevious
            | Command::PageNext => {
                match self.lifecycle.current_mut() {
                    Some(View::Block(block)) => match command {
                        Command::SelectPrevious => block.select_previous(),
                        Command::SelectNext => block.select_next(),
                        Command::PagePrevious => block.page_previous(),
                        _ => block.page_next(),
                    },
                    _ => return Err(CommandError::Input("nothing to scroll".to_string())),
                }
                self.lifecycle.refresh();
                Ok(())
            }
            Command::OpenSelectedTransaction => {
                let hash = match self.lifecycle.current() {
                    Some(View::Block(block)) => block.selected_hash().map(str::to_string),
                    _ => None,
                }
                .ok_or_else(|| CommandError::Input("no transaction selected".to_string()))?;
                self.open(ViewTarget::Transaction(hash)).await
            }
            Command::OpenContainingBlock => {
                let number = match self.lifecycle.current() {
                    Some(View::Transaction(tx)) => tx.transaction.block_number,
                    _ => None,
                }
                .ok_or_else(|| CommandError::Input("transaction is not in a block yet".to_string()))?;
                self.open(ViewTarget::Block(BlockId::Number(number))).await
            }
        }
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    fn open_search(&mut self) {
        if self.prompt.is_some() {
            return;
        }
        debug!("Search prompt opened");
        self.prompt = Some(SearchPrompt::default());
        self.lifecycle.surface_mut().request_redraw();
    }

    /// Classify `text` and navigate to whatever it names.
    pub async fn submit_search(&mut self, text: &str) -> Result<(), CommandError> {
        let intent = classify(text);
        info!("Search '{}' classified as {:?}", text, intent);
        match intent {
            SearchIntent::BlockNumber(n) => self.open(ViewTarget::Block(BlockId::Number(n))).await,
            SearchIntent::Hash(hash) => self.open_hash(text, &hash).await,
            SearchIntent::Invalid(reason) => Err(CommandError::Input(reason)),
        }
    }

    /// A hash may name a block or a transaction. Blocks are tried first.
    async fn open_hash(&mut self, text: &str, hash: &str) -> Result<(), CommandError> {
        match self.client.block_by_hash(hash).await {
            Ok(block) => {
                self.show(View::block(BlockId::Hash(hash.to_string()), block), true);
                Ok(())
            }
            Err(block_err) => {
                debug!("No block for {}: {}", hash, block_err);
                match self.client.transaction_by_hash(hash).await {
                    Ok((tx, pending)) => {
                        self.show_with_pending_notice(View::transaction(tx, pending), true);
                        Ok(())
                    }
                    Err(tx_err) => {
                        debug!("No transaction for {}: {}", hash, tx_err);
                        Err(CommandError::Input(format!(
                            "unknown search type for '{}'",
                            text.trim()
                        )))
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// History is only dropped once the summary has loaded.
    async fn go_home(&mut self) -> Result<(), CommandError> {
        let view = self.load(&ViewTarget::ChainSummary).await?;
        self.history.clear();
        self.show(view, false);
        Ok(())
    }

    /// Forward navigation: the current view goes on the history stack.
    async fn open(&mut self, target: ViewTarget) -> Result<(), CommandError> {
        let view = self.load(&target).await?;
        self.show_with_pending_notice(view, true);
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), CommandError> {
        let target = self.current_target().unwrap_or(ViewTarget::ChainSummary);
        let view = self.load(&target).await?;
        self.show_with_pending_notice(view, false);
        Ok(())
    }

    async fn back(&mut self) -> Result<(), CommandError> {
        let target = self
            .history
            .pop()
            .ok_or_else(|| CommandError::Input("nothing to go back to".to_string()))?;
        match self.load(&target).await {
            Ok(view) => {
                self.show(view, false);
                Ok(())
            }
            Err(e) => {
                self.history.push(target);
                Err(e)
            }
        }
    }

    /// Fetch whatever `target` names and build its view.
    async fn load(&self, target: &ViewTarget) -> Result<View, CommandError> {
        debug!("Loading {:?}", target);
        let view = match target {
            ViewTarget::ChainSummary => View::chain_summary(self.client.latest_header().await?),
            ViewTarget::Block(id) => {
                let block = match id {
                    BlockId::Number(n) => self.client.block_by_number(*n).await?,
                    BlockId::Hash(h) => self.client.block_by_hash(h).await?,
                };
                View::block(id.clone(), block)
            }
            ViewTarget::Transaction(hash) => {
                let (tx, pending) = self.client.transaction_by_hash(hash).await?;
                View::transaction(tx, pending)
            }
        };
        Ok(view)
    }

    /// Like `show`, but a pending transaction leaves a notice in the status
    /// line as well.
    fn show_with_pending_notice(&mut self, view: View, remember: bool) {
        let pending = match &view {
            View::Transaction(tx) if tx.pending => Some(tx.transaction.hash.clone()),
            _ => None,
        };
        self.show(view, remember);
        if let Some(hash) = pending {
            self.set_status(Status::Info(format!("Transaction {hash} is pending")));
        }
    }

    fn show(&mut self, view: View, remember: bool) {
        if remember && let Some(current) = self.current_target() {
            self.history.push(current);
        }
        info!("Showing {:?}", view.target());
        self.status = None;
        self.lifecycle.update(view);
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------

    fn report(&mut self, e: CommandError) {
        warn!("{}", e);
        self.set_status(Status::Error(e.to_string()));
    }

    fn set_status(&mut self, status: Status) {
        self.status = Some(status);
        self.lifecycle.surface_mut().request_redraw();
    }
}
