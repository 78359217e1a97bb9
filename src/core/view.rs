//! # Views
//!
//! The explorer shows exactly one `View` at a time. The set of views is
//! closed, so it is a sum type rather than a trait object:
//!
//! ```text
//! View
//! ├── ChainSummary(ChainSummaryView)   // latest header
//! ├── Block(BlockView)                 // one block + tx table
//! └── Transaction(TransactionView)     // one transaction
//! ```
//!
//! Each view can produce its display output (`ViewOutput`), report the key
//! bindings it wants, and release itself. `release` takes `self` by value so a
//! released view cannot be rendered again.

use chrono::DateTime;
use log::debug;

use crate::chain::{Block, Header, Transaction};
use crate::core::controls::{Command, ControlBinding, NamedKey};

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Rows moved by PgUp / PgDn in the transaction table.
pub const TX_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    ChainSummary,
    Block,
    Transaction,
}

/// How a block was asked for. Refresh repeats the same lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockId {
    Number(u64),
    Hash(String),
}

/// Something the controller knows how to fetch and show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    ChainSummary,
    Block(BlockId),
    Transaction(String),
}

/// A selectable list of rows inside a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTable {
    pub title: String,
    pub rows: Vec<String>,
    pub selected: usize,
}

/// Everything the display surface needs to paint the main area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOutput {
    pub kind: ViewKind,
    pub title: String,
    /// Label/value pairs, rendered top to bottom.
    pub fields: Vec<(String, String)>,
    /// Shown in place of (or below) the fields, e.g. "No transactions".
    pub notice: Option<String>,
    pub table: Option<RowTable>,
}

// ============================================================================
// Chain summary
// ============================================================================

#[derive(Debug, Clone)]
pub struct ChainSummaryView {
    pub header: Header,
}

impl ChainSummaryView {
    fn output(&self) -> ViewOutput {
        let h = &self.header;
        let mut fields = vec![
            (
                "Latest block".to_string(),
                format!("{} | {}", h.number, h.hash),
            ),
            ("Time".to_string(), format_timestamp(h.timestamp)),
            (
                "Gas".to_string(),
                format!("{} / {}", h.gas_used, h.gas_limit),
            ),
        ];
        if let Some(base_fee) = h.base_fee_per_gas {
            fields.push(("Base fee".to_string(), format_gwei(base_fee)));
        }
        ViewOutput {
            kind: ViewKind::ChainSummary,
            title: "Chain Summary".to_string(),
            fields,
            notice: None,
            table: None,
        }
    }

    fn bindings(&self) -> Vec<ControlBinding> {
        vec![ControlBinding::char('r', "Refresh", 10, Command::Refresh)]
    }
}

// ============================================================================
// Block
// ============================================================================

#[derive(Debug, Clone)]
pub struct BlockView {
    pub id: BlockId,
    pub block: Block,
    selected: usize,
}

impl BlockView {
    pub fn new(id: BlockId, block: Block) -> Self {
        Self {
            id,
            block,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.block.transactions.len() {
            self.selected += 1;
        }
    }

    pub fn page_previous(&mut self) {
        self.selected = self.selected.saturating_sub(TX_PAGE);
    }

    pub fn page_next(&mut self) {
        let last = self.block.transactions.len().saturating_sub(1);
        self.selected = (self.selected + TX_PAGE).min(last);
    }

    /// Hash of the highlighted transaction row.
    pub fn selected_hash(&self) -> Option<&str> {
        self.block
            .transactions
            .get(self.selected)
            .map(|tx| tx.hash.as_str())
    }

    fn output(&self) -> ViewOutput {
        let b = &self.block;
        let fields = vec![
            ("Time".to_string(), format_timestamp(b.header.timestamp)),
            ("Withdrawals".to_string(), b.withdrawal_count().to_string()),
            ("Gas Used".to_string(), b.header.gas_used.to_string()),
            ("Uncles".to_string(), b.uncles.len().to_string()),
        ];

        let (notice, table) = if b.transactions.is_empty() {
            (Some("No transactions".to_string()), None)
        } else {
            let table = RowTable {
                title: format!("{} Transactions", b.transactions.len()),
                rows: b.transactions.iter().map(|tx| tx.hash.clone()).collect(),
                selected: self.selected,
            };
            (None, Some(table))
        };

        ViewOutput {
            kind: ViewKind::Block,
            title: format!("Block {} | {}", b.number(), b.hash()),
            fields,
            notice,
            table,
        }
    }

    fn bindings(&self) -> Vec<ControlBinding> {
        let mut bindings = vec![
            ControlBinding::char('r', "Refresh", 10, Command::Refresh),
            ControlBinding::key(NamedKey::Esc, "Back", 11, Command::Back),
        ];
        if !self.block.transactions.is_empty() {
            bindings.extend([
                ControlBinding::key(NamedKey::Up, "Scroll up tx list", 12, Command::SelectPrevious),
                ControlBinding::key(NamedKey::Down, "Scroll down tx list", 13, Command::SelectNext),
                ControlBinding::key(NamedKey::PageUp, "Page up tx list", 14, Command::PagePrevious),
                ControlBinding::key(NamedKey::PageDown, "Page down tx list", 15, Command::PageNext),
                ControlBinding::key(
                    NamedKey::Enter,
                    "Show transaction",
                    16,
                    Command::OpenSelectedTransaction,
                ),
            ]);
        }
        bindings
    }
}

// ============================================================================
// Transaction
// ============================================================================

#[derive(Debug, Clone)]
pub struct TransactionView {
    pub transaction: Transaction,
    pub pending: bool,
}

impl TransactionView {
    pub fn new(transaction: Transaction, pending: bool) -> Self {
        Self {
            transaction,
            pending,
        }
    }

    fn output(&self) -> ViewOutput {
        let tx = &self.transaction;
        let title = format!("Transaction: {}", tx.hash);

        if self.pending {
            return ViewOutput {
                kind: ViewKind::Transaction,
                title,
                fields: Vec::new(),
                notice: Some(format!("Transaction {} is pending", tx.hash)),
                table: None,
            };
        }

        let block = tx
            .block_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let to = tx
            .to
            .clone()
            .unwrap_or_else(|| "contract creation".to_string());
        let gas_price = tx
            .gas_price
            .map(format_gwei)
            .unwrap_or_else(|| "-".to_string());

        ViewOutput {
            kind: ViewKind::Transaction,
            title,
            fields: vec![
                ("Block".to_string(), block),
                ("From".to_string(), tx.from.clone()),
                ("To".to_string(), to),
                ("Value".to_string(), format_ether(tx.value)),
                ("Nonce".to_string(), tx.nonce.to_string()),
                ("Gas".to_string(), tx.gas.to_string()),
                ("Gas Price".to_string(), gas_price),
                ("Input".to_string(), format!("{} bytes", tx.input_len())),
            ],
            notice: None,
            table: None,
        }
    }

    fn bindings(&self) -> Vec<ControlBinding> {
        let mut bindings = vec![
            ControlBinding::char('r', "Refresh", 10, Command::Refresh),
            ControlBinding::key(NamedKey::Esc, "Back", 11, Command::Back),
        ];
        if !self.pending {
            bindings.push(ControlBinding::char('b', "Open block", 12, Command::OpenContainingBlock));
        }
        bindings
    }
}

// ============================================================================
// View
// ============================================================================

#[derive(Debug, Clone)]
pub enum View {
    ChainSummary(ChainSummaryView),
    Block(BlockView),
    Transaction(TransactionView),
}

impl View {
    pub fn chain_summary(header: Header) -> Self {
        View::ChainSummary(ChainSummaryView { header })
    }

    pub fn block(id: BlockId, block: Block) -> Self {
        View::Block(BlockView::new(id, block))
    }

    pub fn transaction(transaction: Transaction, pending: bool) -> Self {
        View::Transaction(TransactionView::new(transaction, pending))
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            View::ChainSummary(_) => ViewKind::ChainSummary,
            View::Block(_) => ViewKind::Block,
            View::Transaction(_) => ViewKind::Transaction,
        }
    }

    /// What to fetch to show this view again.
    pub fn target(&self) -> ViewTarget {
        match self {
            View::ChainSummary(_) => ViewTarget::ChainSummary,
            View::Block(v) => ViewTarget::Block(v.id.clone()),
            View::Transaction(v) => ViewTarget::Transaction(v.transaction.hash.clone()),
        }
    }

    pub fn output(&self) -> ViewOutput {
        match self {
            View::ChainSummary(v) => v.output(),
            View::Block(v) => v.output(),
            View::Transaction(v) => v.output(),
        }
    }

    pub fn bindings(&self) -> Vec<ControlBinding> {
        match self {
            View::ChainSummary(v) => v.bindings(),
            View::Block(v) => v.bindings(),
            View::Transaction(v) => v.bindings(),
        }
    }

    /// Tear the view down. Consumes it; nothing survives past this call.
    pub fn release(self) {
        debug!("Releasing {:?} view", self.kind());
    }
}

// ============================================================================
// Formatting
// ============================================================================

fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// `1_500_000_000_000_000_000` → `"1.5 ETH"`.
fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let frac = wei % WEI_PER_ETHER;
    if frac == 0 {
        return format!("{whole} ETH");
    }
    let frac = format!("{frac:018}");
    format!("{whole}.{} ETH", frac.trim_end_matches('0'))
}

fn format_gwei(wei: u128) -> String {
    let whole = wei / WEI_PER_GWEI;
    let frac = wei % WEI_PER_GWEI;
    if frac == 0 {
        return format!("{whole} gwei");
    }
    let frac = format!("{frac:09}");
    format!("{whole}.{} gwei", frac.trim_end_matches('0'))
}
