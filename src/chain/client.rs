use std::fmt;

use async_trait::async_trait;

use super::types::{Block, Header, Transaction};

/// Errors that can occur while talking to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Connection-level failure (DNS, refused, reset).
    Network(String),
    /// The node answered with a non-success HTTP status.
    Http { status: u16, message: String },
    /// The node answered with a JSON-RPC error object.
    Rpc { code: i64, message: String },
    /// The response body did not have the expected shape.
    Parse(String),
    /// The node has no record of the requested block or transaction.
    NotFound(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Network(msg) => write!(f, "network error: {msg}"),
            ChainError::Http { status, message } => write!(f, "HTTP {status}: {message}"),
            ChainError::Rpc { code, message } => write!(f, "RPC error {code}: {message}"),
            ChainError::Parse(msg) => write!(f, "parse error: {msg}"),
            ChainError::NotFound(what) => write!(f, "{what} not found"),
        }
    }
}

impl std::error::Error for ChainError {}

/// Read access to a blockchain node.
///
/// Each call is a single request; nothing is retried or cached.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The URL this client talks to.
    fn endpoint(&self) -> &str;

    async fn chain_id(&self) -> Result<u64, ChainError>;

    /// Header of the most recent block.
    async fn latest_header(&self) -> Result<Header, ChainError>;

    async fn block_by_number(&self, number: u64) -> Result<Block, ChainError>;

    async fn block_by_hash(&self, hash: &str) -> Result<Block, ChainError>;

    /// Returns the transaction and whether it is still pending.
    async fn transaction_by_hash(&self, hash: &str) -> Result<(Transaction, bool), ChainError>;
}
