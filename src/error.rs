use serde::{Deserialize, Serialize};

/// Coarse error category reported to callers for programmatic branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or unparsable argument
    InvalidArgument,
    /// Offset or range outside the working buffer
    OutOfRange,
    /// Odd-length or non-hex byte string
    MalformedHex,
    /// Paste attempted before any copy
    EmptyClipboard,
    /// Undo attempted with no snapshots left
    EmptyHistory,
    /// Buffer operation attempted before mount
    NoActiveBuffer,
}

impl ErrorKind {
    /// Stable snake_case name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::MalformedHex => "malformed_hex",
            ErrorKind::EmptyClipboard => "empty_clipboard",
            ErrorKind::EmptyHistory => "empty_history",
            ErrorKind::NoActiveBuffer => "no_active_buffer",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for buffer operations
///
/// Every variant is recoverable: the session is left exactly as it was
/// before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Argument missing entirely
    #[error("missing argument '{name}'")]
    MissingArgument { name: String },

    /// Argument present but unusable
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Operation name not recognized
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// Range does not fit inside the working buffer
    #[error("range 0x{offset:X}+0x{length:X} out of range (buffer length: 0x{buffer_len:X})")]
    OutOfRange {
        offset: usize,
        length: usize,
        buffer_len: usize,
    },

    /// Hex text could not be parsed into bytes
    #[error("malformed hex: {reason}")]
    MalformedHex { reason: String },

    #[error("clipboard is empty, copy something first")]
    EmptyClipboard,

    #[error("nothing to undo")]
    EmptyHistory,

    #[error("no buffer mounted")]
    NoActiveBuffer,
}

impl EditError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditError::MissingArgument { .. }
            | EditError::InvalidArgument { .. }
            | EditError::UnknownOperation(_) => ErrorKind::InvalidArgument,
            EditError::OutOfRange { .. } => ErrorKind::OutOfRange,
            EditError::MalformedHex { .. } => ErrorKind::MalformedHex,
            EditError::EmptyClipboard => ErrorKind::EmptyClipboard,
            EditError::EmptyHistory => ErrorKind::EmptyHistory,
            EditError::NoActiveBuffer => ErrorKind::NoActiveBuffer,
        }
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        EditError::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors from decoding a bit-expanded stream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Expanded streams always hold an even number of bytes
    #[error("expanded stream has odd length {0}")]
    OddLength(usize),

    /// A bit pair other than `01` or `10`
    #[error("invalid bit pair {pair:02b} in byte 0x{offset:X}")]
    InvalidBitPair { offset: usize, pair: u8 },
}
