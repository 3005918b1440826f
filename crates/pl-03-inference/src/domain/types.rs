use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw output of the text-generation capability.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub content: String,
    /// Opaque proof of inference. Never inspected.
    pub proof: Option<Value>,
}

impl Generation {
    pub fn has_proof(&self) -> bool {
        matches!(&self.proof, Some(p) if !p.is_null())
    }
}

/// What the façade returns for a prompt.
///
/// On success `content` is the parsed model JSON. On any failure it is the
/// raw (possibly empty) model text as a string and `proof` is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableResponse {
    pub content: Value,
    pub proof: Value,
}

impl VerifiableResponse {
    pub fn degraded(raw: impl Into<String>) -> Self {
        Self {
            content: Value::String(raw.into()),
            proof: Value::Null,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.proof.is_null() && self.content.is_string()
    }
}
