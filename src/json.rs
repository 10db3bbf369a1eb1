use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::args::OpArgs;
use crate::edit::{Outcome, Payload};
use crate::error::{EditError, ErrorKind};

/// Outcome of one invocation as seen by an external caller
///
/// Serializes as `{"ok": true, "payload": …, "status_message": …}` on
/// success and `{"ok": false, "error_kind": …, "status_message": …}` on
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub status_message: String,
}

impl InvokeResult {
    pub fn success(outcome: Outcome) -> Self {
        Self {
            ok: true,
            payload: Some(outcome.payload),
            error_kind: None,
            status_message: outcome.status,
        }
    }

    pub fn failure(error: &EditError) -> Self {
        Self {
            ok: false,
            payload: None,
            error_kind: Some(error.kind()),
            status_message: error.to_string(),
        }
    }

    /// Raw bytes of a binary payload, suitable for writing to a file
    pub fn binary(&self) -> Option<&[u8]> {
        self.payload.as_ref().and_then(Payload::binary)
    }

    /// Plain-text rendering of the payload, or the status line on failure
    pub fn text(&self) -> String {
        match &self.payload {
            Some(payload) => payload.text(),
            None => self.status_message.clone(),
        }
    }
}

/// One operation in a batch request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRequest {
    /// Operation name, e.g. `"edit"`
    pub op: String,
    #[serde(default)]
    pub args: OpArgs,
}

/// Batch of operations applied in order to one mounted binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// `"auto"` asks for a generated id
    #[serde(default = "auto_execution_id")]
    pub execution_id: String,
    pub operations: Vec<OperationRequest>,
}

fn auto_execution_id() -> String {
    "auto".to_string()
}

/// Result of running a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub execution_id: String,
    /// True when every operation succeeded
    pub success: bool,
    pub results: Vec<InvokeResult>,
    pub applied_count: usize,
    pub failed_count: usize,
    /// Working buffer length after the batch
    pub final_length: usize,
    /// BLAKE3 of the working buffer after the batch
    pub final_fingerprint: String,
    /// Set when the batch could not run at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResponse {
    pub fn new(
        execution_id: String,
        results: Vec<InvokeResult>,
        final_length: usize,
        final_fingerprint: String,
    ) -> Self {
        let applied_count = results.iter().filter(|r| r.ok).count();
        let failed_count = results.len() - applied_count;
        Self {
            execution_id,
            success: failed_count == 0,
            results,
            applied_count,
            failed_count,
            final_length,
            final_fingerprint,
            error: None,
        }
    }

    pub fn failure(execution_id: String, error: String) -> Self {
        Self {
            execution_id,
            success: false,
            results: Vec::new(),
            applied_count: 0,
            failed_count: 0,
            final_length: 0,
            final_fingerprint: String::new(),
            error: Some(error),
        }
    }
}

/// Generate a fresh execution id (uuid v4)
pub fn generate_execution_id() -> String {
    Uuid::new_v4().to_string()
}
