use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::args::OpArgs;
use crate::buffer::ByteBuffer;
use crate::checksum::ChecksumReport;
use crate::clipboard::Clipboard;
use crate::config::EngineConfig;
use crate::diff::DiffReport;
use crate::dump::hex_dump;
use crate::error::EditError;
use crate::history::HistoryStack;
use crate::parse::{find_all, resolve_pattern};

/// Buffer operations understood by [`Session::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Dump,
    Edit,
    Overwrite,
    Insert,
    Delete,
    Search,
    Copy,
    Paste,
    Checksum,
    Diff,
    Undo,
    Save,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::Dump,
        Operation::Edit,
        Operation::Overwrite,
        Operation::Insert,
        Operation::Delete,
        Operation::Search,
        Operation::Copy,
        Operation::Paste,
        Operation::Checksum,
        Operation::Diff,
        Operation::Undo,
        Operation::Save,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Dump => "dump",
            Operation::Edit => "edit",
            Operation::Overwrite => "overwrite",
            Operation::Insert => "insert",
            Operation::Delete => "delete",
            Operation::Search => "search",
            Operation::Copy => "copy",
            Operation::Paste => "paste",
            Operation::Checksum => "checksum",
            Operation::Diff => "diff",
            Operation::Undo => "undo",
            Operation::Save => "save",
        }
    }

    /// Operations that push a history snapshot before changing the buffer
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Operation::Edit
                | Operation::Overwrite
                | Operation::Insert
                | Operation::Delete
                | Operation::Paste
        )
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Operation {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| EditError::UnknownOperation(s.to_string()))
    }
}

/// Data produced by a successful operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Hex dump text
    Text { text: String },
    /// Single byte changed
    Edited { offset: usize, old: u8, new: u8 },
    /// Bytes overwritten in place
    Written { offset: usize, count: usize },
    /// New working length after a resize
    Length { len: usize },
    /// Search hits, ascending
    Matches { offsets: Vec<usize> },
    /// Bytes placed on the clipboard
    Yanked { count: usize },
    Checksums { report: ChecksumReport },
    Diff { report: DiffReport },
    /// Exportable copy of the working buffer
    Saved {
        #[serde(with = "hex_bytes")]
        bytes: Vec<u8>,
        undo_count: usize,
        history_depth: usize,
    },
}

impl Payload {
    /// Raw bytes, for payloads that carry binary output
    pub fn binary(&self) -> Option<&[u8]> {
        match self {
            Payload::Saved { bytes, .. } => Some(bytes),
            _ => None,
        }
    }

    /// Plain-text rendering of any payload
    pub fn text(&self) -> String {
        match self {
            Payload::Text { text } => text.clone(),
            Payload::Edited { offset, old, new } => {
                format!("{:08X}: {:02X} -> {:02X}", offset, old, new)
            }
            Payload::Written { offset, count } => {
                format!("wrote 0x{:X} bytes at {:08X}", count, offset)
            }
            Payload::Length { len } => format!("length 0x{:X}", len),
            Payload::Matches { offsets } if offsets.is_empty() => "no matches".to_string(),
            Payload::Matches { offsets } => offsets
                .iter()
                .map(|o| format!("{:08X}", o))
                .collect::<Vec<_>>()
                .join("\n"),
            Payload::Yanked { count } => format!("yanked 0x{:X} bytes", count),
            Payload::Checksums { report } => report.to_string(),
            Payload::Diff { report } => report.to_string(),
            Payload::Saved { bytes, undo_count, history_depth } => format!(
                "0x{:X} bytes, {} undo(s) applied, {} snapshot(s) held",
                bytes.len(),
                undo_count,
                history_depth
            ),
        }
    }
}

/// Successful operation result: payload plus a one-line status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub payload: Payload,
    pub status: String,
}

impl Outcome {
    fn new(payload: Payload, status: impl Into<String>) -> Self {
        Self {
            payload,
            status: status.into(),
        }
    }
}

/// One mounted binary with its undo history and clipboard
///
/// Not synchronized; see [`crate::Engine`] for the shared, serialized form.
#[derive(Debug, Clone)]
pub struct Session {
    buffer: ByteBuffer,
    history: HistoryStack,
    clipboard: Clipboard,
    undo_count: usize,
    dump_length: usize,
}

impl Session {
    /// Mount `bytes` as a fresh session with empty history and clipboard
    pub fn mount(bytes: &[u8], config: &EngineConfig) -> Self {
        Self {
            buffer: ByteBuffer::mount(bytes),
            history: HistoryStack::new(config.history_capacity),
            clipboard: Clipboard::new(),
            undo_count: 0,
            dump_length: config.dump_length,
        }
    }

    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Number of successful undos since mount
    pub fn undo_count(&self) -> usize {
        self.undo_count
    }

    /// Run one operation
    ///
    /// Arguments and bounds are fully validated before anything changes, so
    /// an `Err` leaves the session untouched.
    pub fn apply(&mut self, op: Operation, args: &OpArgs) -> Result<Outcome, EditError> {
        debug!(op = %op, ?args, len = self.buffer.len(), "applying operation");

        match op {
            Operation::Dump => self.dump(args),
            Operation::Edit => self.edit(args),
            Operation::Overwrite => self.overwrite(args),
            Operation::Insert => self.insert(args),
            Operation::Delete => self.delete(args),
            Operation::Search => self.search(args),
            Operation::Copy => self.copy(args),
            Operation::Paste => self.paste(args),
            Operation::Checksum => Ok(self.checksum()),
            Operation::Diff => Ok(self.diff()),
            Operation::Undo => self.undo(),
            Operation::Save => Ok(self.save()),
        }
    }

    // Snapshot, then mutate. Callers must have validated everything already.
    fn commit<R>(&mut self, mutate: impl FnOnce(&mut Vec<u8>) -> R) -> R {
        if self.history.snapshot(self.buffer.working()) {
            warn!(
                capacity = self.history.capacity(),
                "history full, oldest snapshot evicted"
            );
        }
        mutate(self.buffer.working_mut())
    }

    fn check_range(&self, offset: usize, length: usize) -> Result<(), EditError> {
        if self.buffer.contains_range(offset, length) {
            Ok(())
        } else {
            Err(EditError::OutOfRange {
                offset,
                length,
                buffer_len: self.buffer.len(),
            })
        }
    }

    // insertion points may sit one past the last byte
    fn check_insert_point(&self, offset: usize) -> Result<(), EditError> {
        self.check_range(offset, 0)
    }

    fn dump(&self, args: &OpArgs) -> Result<Outcome, EditError> {
        let offset = args.offset_or("offset", 0)?;
        let length = args.offset_or("length", self.dump_length)?;

        let text = hex_dump(self.buffer.working(), offset, length);
        let shown = self
            .buffer
            .len()
            .saturating_sub(offset)
            .min(length);
        let status = if text.is_empty() {
            format!("Nothing to dump at 0x{:08X}", offset)
        } else {
            format!("Dumped 0x{:X} bytes from 0x{:08X}", shown, offset)
        };
        Ok(Outcome::new(Payload::Text { text }, status))
    }

    fn edit(&mut self, args: &OpArgs) -> Result<Outcome, EditError> {
        let offset = args.offset("offset")?;
        let value = args.byte("value")?;
        self.check_range(offset, 1)?;

        let old = self.commit(|working| std::mem::replace(&mut working[offset], value));

        info!(offset, old, new = value, "byte edited");
        Ok(Outcome::new(
            Payload::Edited { offset, old, new: value },
            format!("Edited 0x{:08X}: {:02X} -> {:02X}", offset, old, value),
        ))
    }

    fn overwrite(&mut self, args: &OpArgs) -> Result<Outcome, EditError> {
        let offset = args.offset("offset")?;
        let bytes = args.bytes("bytes")?;
        self.check_range(offset, bytes.len())?;

        let count = bytes.len();
        self.commit(|working| working[offset..offset + count].copy_from_slice(&bytes));

        info!(offset, count, "bytes overwritten");
        Ok(Outcome::new(
            Payload::Written { offset, count },
            format!("Overwrote {} byte(s) at 0x{:08X}", count, offset),
        ))
    }

    fn insert(&mut self, args: &OpArgs) -> Result<Outcome, EditError> {
        let offset = args.offset("offset")?;
        let bytes = args.bytes("bytes")?;
        self.check_insert_point(offset)?;

        let count = bytes.len();
        let len = self.commit(|working| {
            working.splice(offset..offset, bytes);
            working.len()
        });

        info!(offset, count, len, "bytes inserted");
        Ok(Outcome::new(
            Payload::Length { len },
            format!(
                "Inserted {} byte(s) at 0x{:08X}, new length 0x{:X}",
                count, offset, len
            ),
        ))
    }

    fn delete(&mut self, args: &OpArgs) -> Result<Outcome, EditError> {
        let offset = args.offset("offset")?;
        let length = args.length("length")?;
        self.check_range(offset, length)?;

        let len = self.commit(|working| {
            working.drain(offset..offset + length);
            working.len()
        });

        info!(offset, length, len, "bytes deleted");
        Ok(Outcome::new(
            Payload::Length { len },
            format!(
                "Deleted {} byte(s) at 0x{:08X}, new length 0x{:X}",
                length, offset, len
            ),
        ))
    }

    fn search(&self, args: &OpArgs) -> Result<Outcome, EditError> {
        let pattern_text = args.text("pattern")?;
        let pattern = resolve_pattern(pattern_text, args.pattern_mode()?)?;

        let offsets = find_all(self.buffer.working(), &pattern);
        debug!(pattern = pattern_text, hits = offsets.len(), "search finished");

        let status = match offsets.first() {
            None => format!("Pattern '{}' not found", pattern_text),
            Some(first) => format!(
                "Found {} match(es) for '{}', first at 0x{:08X}",
                offsets.len(),
                pattern_text,
                first
            ),
        };
        Ok(Outcome::new(Payload::Matches { offsets }, status))
    }

    fn copy(&mut self, args: &OpArgs) -> Result<Outcome, EditError> {
        let offset = args.offset("offset")?;
        let length = args.length("length")?;
        self.check_range(offset, length)?;

        self.clipboard
            .yank(&self.buffer.working()[offset..offset + length]);

        debug!(offset, length, "range yanked");
        Ok(Outcome::new(
            Payload::Yanked { count: length },
            format!("Copied {} byte(s) from 0x{:08X}", length, offset),
        ))
    }

    fn paste(&mut self, args: &OpArgs) -> Result<Outcome, EditError> {
        let offset = args.offset("offset")?;
        let bytes = self
            .clipboard
            .contents()
            .ok_or(EditError::EmptyClipboard)?
            .to_vec();
        self.check_insert_point(offset)?;

        let count = bytes.len();
        let len = self.commit(|working| {
            working.splice(offset..offset, bytes);
            working.len()
        });

        info!(offset, count, len, "clipboard pasted");
        Ok(Outcome::new(
            Payload::Length { len },
            format!(
                "Pasted {} byte(s) at 0x{:08X}, new length 0x{:X}",
                count, offset, len
            ),
        ))
    }

    fn checksum(&self) -> Outcome {
        let report = ChecksumReport::compute(self.buffer.working());
        let status = format!("Checksums over 0x{:X} bytes", report.len);
        Outcome::new(Payload::Checksums { report }, status)
    }

    fn diff(&self) -> Outcome {
        let report = DiffReport::compute(self.buffer.original(), self.buffer.working());

        let status = if report.is_identical() {
            "No differences from original".to_string()
        } else if report.length_mismatch() {
            format!(
                "{} byte(s) differ, length 0x{:X} -> 0x{:X}",
                report.entries.len(),
                report.original_len,
                report.working_len
            )
        } else {
            format!("{} byte(s) differ", report.entries.len())
        };
        Outcome::new(Payload::Diff { report }, status)
    }

    fn undo(&mut self) -> Result<Outcome, EditError> {
        let snapshot = self.history.pop().ok_or(EditError::EmptyHistory)?;
        self.buffer.restore(snapshot);
        self.undo_count += 1;

        let len = self.buffer.len();
        info!(len, remaining = self.history.len(), "change undone");
        Ok(Outcome::new(
            Payload::Length { len },
            format!(
                "Undid last change, length 0x{:X} ({} undo(s) left)",
                len,
                self.history.len()
            ),
        ))
    }

    fn save(&self) -> Outcome {
        let bytes = self.buffer.working().to_vec();
        let status = format!(
            "Exported 0x{:X} bytes ({} undo(s) applied)",
            bytes.len(),
            self.undo_count
        );
        Outcome::new(
            Payload::Saved {
                bytes,
                undo_count: self.undo_count,
                history_depth: self.history.len(),
            },
            status,
        )
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text).map_err(serde::de::Error::custom)
    }
}
