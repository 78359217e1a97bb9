//! Chain data as returned by an Ethereum JSON-RPC node.
//!
//! Only the fields the explorer displays are decoded; everything else in the
//! node's response is ignored. Quantities arrive as `0x`-prefixed hex strings
//! and are decoded into integers here.

use serde::Deserialize;

/// Block header fields, also the common part of a full block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub number: u64,
    pub hash: String,
    pub parent_hash: String,
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub timestamp: u64,
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub gas_used: u64,
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub gas_limit: u64,
    #[serde(default, deserialize_with = "quantity::deserialize_opt_u128")]
    pub base_fee_per_gas: Option<u128>,
    #[serde(default)]
    pub miner: Option<String>,
}

/// A block fetched with full transaction objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub header: Header,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub uncles: Vec<String>,
    /// Absent before the Shanghai upgrade.
    #[serde(default)]
    pub withdrawals: Option<Vec<Withdrawal>>,
}

impl Block {
    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn hash(&self) -> &str {
        &self.header.hash
    }

    pub fn withdrawal_count(&self) -> usize {
        self.withdrawals.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub index: u64,
    pub address: String,
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    /// `None` while the transaction is pending.
    #[serde(default, deserialize_with = "quantity::deserialize_opt_u64")]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<String>,
    pub from: String,
    /// `None` for contract creation.
    #[serde(default)]
    pub to: Option<String>,
    #[serde(deserialize_with = "quantity::deserialize_u128")]
    pub value: u128,
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub nonce: u64,
    #[serde(deserialize_with = "quantity::deserialize_u64")]
    pub gas: u64,
    #[serde(default, deserialize_with = "quantity::deserialize_opt_u128")]
    pub gas_price: Option<u128>,
    #[serde(default)]
    pub input: String,
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        self.block_number.is_none()
    }

    /// Calldata length in bytes.
    pub fn input_len(&self) -> usize {
        self.input.strip_prefix("0x").unwrap_or(&self.input).len() / 2
    }
}

/// Hex quantity decoding (`"0x1b4"` → 436).
pub mod quantity {
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Result<u128, String> {
        let digits = raw
            .strip_prefix("0x")
            .ok_or_else(|| format!("quantity '{raw}' is missing the 0x prefix"))?;
        if digits.is_empty() {
            return Err(format!("quantity '{raw}' has no digits"));
        }
        u128::from_str_radix(digits, 16).map_err(|e| format!("quantity '{raw}': {e}"))
    }

    pub fn parse_u64(raw: &str) -> Result<u64, String> {
        let value = parse(raw)?;
        u64::try_from(value).map_err(|_| format!("quantity '{raw}' does not fit in 64 bits"))
    }

    pub fn deserialize_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_u64(&raw).map_err(serde::de::Error::custom)
    }

    pub fn deserialize_u128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn deserialize_opt_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_u64(&raw).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }

    pub fn deserialize_opt_u128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u128>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx_json(block_number: serde_json::Value) -> serde_json::Value {
        json!({
            "hash": "0xaa",
            "blockNumber": block_number,
            "blockHash": null,
            "from": "0xfrom",
            "to": null,
            "value": "0xde0b6b3a7640000",
            "nonce": "0x7",
            "gas": "0x5208",
            "gasPrice": "0x3b9aca00",
            "input": "0xa9059cbb0000"
        })
    }

    #[test]
    fn test_quantity_parse() {
        assert_eq!(quantity::parse("0x0"), Ok(0));
        assert_eq!(quantity::parse("0x1b4"), Ok(436));
        assert!(quantity::parse("1b4").is_err());
        assert!(quantity::parse("0x").is_err());
        assert!(quantity::parse("0xzz").is_err());
    }

    #[test]
    fn test_quantity_u64_overflow() {
        assert!(quantity::parse_u64("0x10000000000000000").is_err());
        assert_eq!(quantity::parse_u64("0xffffffffffffffff"), Ok(u64::MAX));
    }

    #[test]
    fn test_header_decodes_and_ignores_unknown_fields() {
        let header: Header = serde_json::from_value(json!({
            "number": "0x10",
            "hash": "0xabc",
            "parentHash": "0xdef",
            "timestamp": "0x6553f100",
            "gasUsed": "0x5208",
            "gasLimit": "0x1c9c380",
            "baseFeePerGas": "0x7",
            "miner": "0xminer",
            "extraData": "0x",
            "transactions": ["0x01"]
        }))
        .unwrap();
        assert_eq!(header.number, 16);
        assert_eq!(header.gas_used, 21000);
        assert_eq!(header.base_fee_per_gas, Some(7));
    }

    #[test]
    fn test_header_without_base_fee() {
        let header: Header = serde_json::from_value(json!({
            "number": "0x1",
            "hash": "0xabc",
            "parentHash": "0xdef",
            "timestamp": "0x0",
            "gasUsed": "0x0",
            "gasLimit": "0x0"
        }))
        .unwrap();
        assert_eq!(header.base_fee_per_gas, None);
        assert_eq!(header.miner, None);
    }

    #[test]
    fn test_block_with_transactions_and_withdrawals() {
        let block: Block = serde_json::from_value(json!({
            "number": "0x5",
            "hash": "0xb5",
            "parentHash": "0xb4",
            "timestamp": "0x0",
            "gasUsed": "0x5208",
            "gasLimit": "0x1c9c380",
            "uncles": [],
            "transactions": [tx_json(json!("0x5"))],
            "withdrawals": [
                { "index": "0x1", "validatorIndex": "0x2", "address": "0xw", "amount": "0x3" }
            ]
        }))
        .unwrap();
        assert_eq!(block.number(), 5);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.withdrawal_count(), 1);
    }

    #[test]
    fn test_pre_shanghai_block_has_no_withdrawals() {
        let block: Block = serde_json::from_value(json!({
            "number": "0x5",
            "hash": "0xb5",
            "parentHash": "0xb4",
            "timestamp": "0x0",
            "gasUsed": "0x0",
            "gasLimit": "0x0",
            "transactions": []
        }))
        .unwrap();
        assert_eq!(block.withdrawal_count(), 0);
        assert!(block.uncles.is_empty());
    }

    #[test]
    fn test_pending_transaction() {
        let tx: Transaction = serde_json::from_value(tx_json(serde_json::Value::Null)).unwrap();
        assert!(tx.is_pending());
        assert_eq!(tx.to, None);
        assert_eq!(tx.value, 1_000_000_000_000_000_000);
        assert_eq!(tx.input_len(), 6);
    }

    #[test]
    fn test_mined_transaction() {
        let tx: Transaction = serde_json::from_value(tx_json(json!("0x12"))).unwrap();
        assert!(!tx.is_pending());
        assert_eq!(tx.block_number, Some(18));
        assert_eq!(tx.gas_price, Some(1_000_000_000));
    }
}
