//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::chain::{Block, ChainClient, ChainError, Header, Transaction};
use crate::core::controls::ControlEntry;
use crate::core::lifecycle::DisplaySurface;
use crate::core::view::{ViewKind, ViewOutput};

// ============================================================================
// Sample data
// ============================================================================

pub fn sample_header(number: u64) -> Header {
    Header {
        number,
        hash: format!("0xb10c{number:060x}"),
        parent_hash: format!("0xb10c{:060x}", number.saturating_sub(1)),
        timestamp: 1_700_000_000 + number * 12,
        gas_used: 15_000_000,
        gas_limit: 30_000_000,
        base_fee_per_gas: Some(12_000_000_000),
        miner: Some(format!("0x{:040x}", 0xfee)),
    }
}

/// A mined transaction that is not part of any sample block.
pub fn sample_tx(index: u64) -> Transaction {
    Transaction {
        hash: format!("0x7a{:030x}{index:032x}", 0xfff_u64),
        block_number: Some(1),
        block_hash: Some(sample_header(1).hash),
        from: format!("0x{:040x}", 0xa11ce),
        to: Some(format!("0x{:040x}", 0xb0b)),
        value: 1_000_000_000_000_000_000,
        nonce: index,
        gas: 21_000,
        gas_price: Some(20_000_000_000),
        input: "0x".to_string(),
    }
}

/// Block `number` holding `tx_count` transactions with distinct hashes.
pub fn sample_block(number: u64, tx_count: u64) -> Block {
    let header = sample_header(number);
    let transactions = (0..tx_count)
        .map(|i| Transaction {
            hash: format!("0x7a{number:030x}{i:032x}"),
            block_number: Some(number),
            block_hash: Some(header.hash.clone()),
            ..sample_tx(i)
        })
        .collect();
    Block {
        header,
        transactions,
        uncles: Vec::new(),
        withdrawals: Some(Vec::new()),
    }
}

// ============================================================================
// StubChain
// ============================================================================

/// In-memory chain. Unknown lookups fail with `NotFound`, and every call is
/// recorded.
pub struct StubChain {
    header: Header,
    blocks: Vec<Block>,
    transactions: HashMap<String, (Transaction, bool)>,
    /// Make `latest_header` fail.
    pub fail_header: bool,
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl StubChain {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            blocks: Vec::new(),
            transactions: HashMap::new(),
            fail_header: false,
            offline: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Adds the block and registers its transactions as mined.
    pub fn add_block(&mut self, block: Block) {
        for tx in &block.transactions {
            self.transactions
                .insert(tx.hash.clone(), (tx.clone(), false));
        }
        self.blocks.push(block);
    }

    pub fn add_transaction(&mut self, tx: Transaction, pending: bool) {
        self.transactions.insert(tx.hash.clone(), (tx, pending));
    }

    pub fn block(&self, number: u64) -> &Block {
        self.blocks
            .iter()
            .find(|b| b.number() == number)
            .expect("block was added")
    }

    /// Every subsequent call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ChainError> {
        self.calls.lock().unwrap().push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ChainError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainClient for StubChain {
    fn endpoint(&self) -> &str {
        "http://stub"
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        self.record("chain_id".to_string())?;
        Ok(1)
    }

    async fn latest_header(&self) -> Result<Header, ChainError> {
        self.record("latest_header".to_string())?;
        if self.fail_header {
            return Err(ChainError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        Ok(self.header.clone())
    }

    async fn block_by_number(&self, number: u64) -> Result<Block, ChainError> {
        self.record(format!("block_by_number({number})"))?;
        self.blocks
            .iter()
            .find(|b| b.number() == number)
            .cloned()
            .ok_or_else(|| ChainError::NotFound(format!("block {number}")))
    }

    async fn block_by_hash(&self, hash: &str) -> Result<Block, ChainError> {
        self.record(format!("block_by_hash({hash})"))?;
        self.blocks
            .iter()
            .find(|b| b.hash() == hash)
            .cloned()
            .ok_or_else(|| ChainError::NotFound(format!("block {hash}")))
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<(Transaction, bool), ChainError> {
        self.record(format!("transaction_by_hash({hash})"))?;
        self.transactions
            .get(hash)
            .cloned()
            .ok_or_else(|| ChainError::NotFound(format!("transaction {hash}")))
    }
}

// ============================================================================
// RecordingSurface
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Main(ViewKind),
    Teardown(ViewKind),
    /// Number of entries in the published listing.
    Controls(usize),
    Redraw,
}

/// A `DisplaySurface` that remembers what it was told.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub last_main: Option<ViewOutput>,
    pub last_controls: Vec<ControlEntry>,
}

impl DisplaySurface for RecordingSurface {
    fn show_main(&mut self, output: ViewOutput) {
        self.calls.push(SurfaceCall::Main(output.kind));
        self.last_main = Some(output);
    }

    fn teardown(&mut self, kind: ViewKind) {
        self.calls.push(SurfaceCall::Teardown(kind));
        self.last_main = None;
    }

    fn show_controls(&mut self, controls: &[ControlEntry]) {
        self.calls.push(SurfaceCall::Controls(controls.len()));
        self.last_controls = controls.to_vec();
    }

    fn request_redraw(&mut self) {
        self.calls.push(SurfaceCall::Redraw);
    }
}
