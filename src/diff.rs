use serde::{Deserialize, Serialize};

/// One differing byte within the common prefix of two buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub offset: usize,
    pub original: u8,
    pub working: u8,
}

/// Byte-level comparison of a baseline against the current buffer
///
/// Only the overlapping range is compared byte by byte; a length difference
/// is reported through [`DiffReport::length_mismatch`], never as entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Mismatches in ascending offset order
    pub entries: Vec<DiffEntry>,
    pub original_len: usize,
    pub working_len: usize,
}

impl DiffReport {
    /// Compare `original` against `working`
    pub fn compute(original: &[u8], working: &[u8]) -> Self {
        let entries = original
            .iter()
            .zip(working.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(offset, (&original, &working))| DiffEntry {
                offset,
                original,
                working,
            })
            .collect();

        Self {
            entries,
            original_len: original.len(),
            working_len: working.len(),
        }
    }

    pub fn length_mismatch(&self) -> bool {
        self.original_len != self.working_len
    }

    /// True when there are no byte mismatches and the lengths agree
    pub fn is_identical(&self) -> bool {
        self.entries.is_empty() && !self.length_mismatch()
    }
}

impl std::fmt::Display for DiffReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_identical() {
            return f.write_str("no differences");
        }

        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{:08X}: {:02X} -> {:02X}", e.offset, e.original, e.working))
            .collect();

        if self.length_mismatch() {
            lines.push(format!(
                "length differs: original 0x{:X} bytes, working 0x{:X} bytes",
                self.original_len, self.working_len
            ));
        }

        f.write_str(&lines.join("\n"))
    }
}
