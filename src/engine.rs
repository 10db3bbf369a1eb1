use parking_lot::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::args::OpArgs;
use crate::config::EngineConfig;
use crate::edit::{Operation, Outcome, Session};
use crate::error::EditError;
use crate::json::InvokeResult;
use crate::transcode::bit_expand;

#[derive(Debug, Default)]
struct Mounted {
    session: Option<Session>,
    id: Option<Uuid>,
}

/// Shared entry point for mounting a binary and running operations on it
///
/// Buffer, history and clipboard sit behind one lock, so each call
/// (including `mount`) runs to completion before the next one starts.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    state: Mutex<Mounted>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: Mutex::new(Mounted::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mount `bytes`, discarding any previous session, history and clipboard
    ///
    /// Returns the id of the new session.
    pub fn mount(&self, bytes: &[u8]) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock();
        state.session = Some(Session::mount(bytes, &self.config));
        state.id = Some(id);

        info!(session = %id, len = bytes.len(), "buffer mounted");
        id
    }

    /// Id of the mounted session, if any
    pub fn session_id(&self) -> Option<Uuid> {
        self.state.lock().id
    }

    /// Run `op` against the mounted session
    pub fn apply(&self, op: Operation, args: &OpArgs) -> Result<Outcome, EditError> {
        let mut state = self.state.lock();
        let id = state.id;
        let session = state.session.as_mut().ok_or(EditError::NoActiveBuffer)?;

        session.apply(op, args).inspect_err(|e| {
            warn!(
                session = ?id,
                op = %op,
                kind = %e.kind(),
                error = %e,
                "operation rejected"
            );
        })
    }

    /// Run an operation named by string, folding any failure into the result
    pub fn invoke(&self, op: &str, args: &OpArgs) -> InvokeResult {
        let outcome = op
            .parse::<Operation>()
            .and_then(|op| self.apply(op, args));

        match outcome {
            Ok(outcome) => InvokeResult::success(outcome),
            Err(e) => InvokeResult::failure(&e),
        }
    }

    /// Read-only access to the mounted session
    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.state.lock().session.as_ref().map(f)
    }

    /// Bit-expand `bytes`; needs no mounted session
    pub fn transcode(bytes: &[u8]) -> Vec<u8> {
        bit_expand(bytes)
    }
}
