pub mod client;
pub mod rpc;
pub mod types;

pub use client::{ChainClient, ChainError};
pub use rpc::JsonRpcClient;
pub use types::{Block, Header, Transaction, Withdrawal};
