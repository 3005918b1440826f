//! Request and response bodies.

use pl_02_activity_log::{LogEntry, LogKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub agent_ready: bool,
}

/// `POST /api/generate`
///
/// Parsed leniently: a missing body, invalid JSON and a missing prompt are
/// all the same 400.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub user_address: Option<String>,
}

/// `POST /api/log`
#[derive(Debug, Clone, PartialEq)]
pub struct LogRequest {
    pub message: String,
    pub metadata: Value,
    pub user_address: Option<String>,
}

/// Response to `POST /api/log`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogResponse {
    pub key: String,
    pub identity: String,
    pub sequence: u64,
}

impl From<LogKey> for LogResponse {
    fn from(key: LogKey) -> Self {
        Self {
            key: key.as_key(),
            identity: key.identity,
            sequence: key.sequence,
        }
    }
}

/// `GET /api/transactions/:walletAddress`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub wallet_address: String,
    pub transaction_count: usize,
    pub transactions: Vec<LogEntry>,
}

impl TransactionsResponse {
    pub fn new(wallet_address: String, transactions: Vec<LogEntry>) -> Self {
        Self {
            wallet_address,
            transaction_count: transactions.len(),
            transactions,
        }
    }
}
