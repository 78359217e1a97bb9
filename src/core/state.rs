//! # Application State
//!
//! The pieces of state that outlive any single view.
//!
//! ```text
//! ChainContext              // endpoint + chain id, fixed at startup
//! Status                    // transient line under the context
//! ```

use std::fmt;

/// Which chain the explorer is connected to. Immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainContext {
    pub endpoint: String,
    pub chain_id: u64,
}

impl ChainContext {
    pub fn new(endpoint: impl Into<String>, chain_id: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            chain_id,
        }
    }

    /// The permanent lines of the context panel.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("URL: {}", self.endpoint),
            format!("ID: {}", self.chain_id),
        ]
    }
}

/// Transient status text shown below the chain context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(text) | Status::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
