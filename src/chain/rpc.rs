//! Ethereum JSON-RPC client over HTTP.
//!
//! Speaks the standard `eth_*` methods of any execution-layer node:
//!
//! | call                 | method                                  |
//! |----------------------|-----------------------------------------|
//! | `chain_id`           | `eth_chainId`                           |
//! | `latest_header`      | `eth_getBlockByNumber("latest", false)` |
//! | `block_by_number`    | `eth_getBlockByNumber(0x…, true)`       |
//! | `block_by_hash`      | `eth_getBlockByHash(0x…, true)`         |
//! | `transaction_by_hash`| `eth_getTransactionByHash(0x…)`         |
//!
//! A `null` result means the node does not know the object and becomes
//! `ChainError::NotFound`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::client::{ChainClient, ChainError};
use super::types::{Block, Header, Transaction, quantity};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize, Debug)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize, Debug)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize, Debug)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

// ============================================================================
// Client
// ============================================================================

pub struct JsonRpcClient {
    endpoint: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Issue one JSON-RPC call. `Ok(None)` means the node returned `null`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, ChainError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("RPC request: id={} method={} params={}", request.id, method, request.params);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("RPC {} failed with HTTP {}: {}", method, status, message);
            return Err(ChainError::Http { status, message });
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Parse(e.to_string()))?;

        if let Some(error) = body.error {
            warn!("RPC {} returned error {}: {}", method, error.code, error.message);
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        match body.result {
            None | Some(Value::Null) => {
                debug!("RPC {} returned null", method);
                Ok(None)
            }
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ChainError::Parse(format!("{method}: {e}"))),
        }
    }

    async fn fetch_block(&self, method: &str, id: Value, what: String) -> Result<Block, ChainError> {
        self.call::<Block>(method, json!([id, true]))
            .await?
            .ok_or(ChainError::NotFound(what))
    }
}

#[async_trait]
impl ChainClient for JsonRpcClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        let raw: String = self
            .call("eth_chainId", json!([]))
            .await?
            .ok_or_else(|| ChainError::Parse("eth_chainId returned null".to_string()))?;
        let id = quantity::parse_u64(&raw).map_err(ChainError::Parse)?;
        info!("Chain id for {} is {}", self.endpoint, id);
        Ok(id)
    }

    async fn latest_header(&self) -> Result<Header, ChainError> {
        self.call::<Header>("eth_getBlockByNumber", json!(["latest", false]))
            .await?
            .ok_or_else(|| ChainError::NotFound("latest block".to_string()))
    }

    async fn block_by_number(&self, number: u64) -> Result<Block, ChainError> {
        info!("Fetching block {}", number);
        self.fetch_block(
            "eth_getBlockByNumber",
            json!(format!("0x{number:x}")),
            format!("block {number}"),
        )
        .await
    }

    async fn block_by_hash(&self, hash: &str) -> Result<Block, ChainError> {
        info!("Fetching block {}", hash);
        self.fetch_block("eth_getBlockByHash", json!(hash), format!("block {hash}"))
            .await
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<(Transaction, bool), ChainError> {
        info!("Fetching transaction {}", hash);
        let tx: Transaction = self
            .call("eth_getTransactionByHash", json!([hash]))
            .await?
            .ok_or_else(|| ChainError::NotFound(format!("transaction {hash}")))?;
        let pending = tx.is_pending();
        Ok((tx, pending))
    }
}
