// Error types
pub mod error;

// Mounted buffer, undo log and clipboard
pub mod buffer;
pub mod history;
pub mod clipboard;

// Codec utilities
pub mod parse;
pub mod dump;
pub mod checksum;
pub mod diff;
pub mod transcode;

// Operation arguments
pub mod args;

// Editing engine
pub mod edit;
pub mod engine;

// JSON request/response types
pub mod json;

// Configuration, logging and file plumbing
pub mod config;
pub mod logging;
pub mod file;

// Re-exports
pub use error::{CodecError, EditError, ErrorKind};
pub use buffer::ByteBuffer;
pub use history::{HistoryStack, DEFAULT_HISTORY_CAPACITY};
pub use clipboard::Clipboard;
pub use parse::{parse_hex_bytes, parse_hex_usize, PatternMode};
pub use dump::hex_dump;
pub use checksum::{ChecksumReport, DigestValue};
pub use diff::{DiffEntry, DiffReport};
pub use transcode::{bit_collapse, bit_expand};
pub use args::OpArgs;
pub use edit::{Operation, Outcome, Payload, Session};
pub use engine::Engine;
pub use json::{
    BatchRequest, BatchResponse, InvokeResult, OperationRequest, generate_execution_id,
};
pub use config::{ConfigError, EngineConfig};
pub use logging::init_logging;
pub use file::{FileError, read_blob, write_blob};
