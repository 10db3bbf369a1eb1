/// Bytes rendered per dump row
pub const BYTES_PER_ROW: usize = 16;

// "XX " per byte, minus the trailing space
const HEX_COLUMN_WIDTH: usize = BYTES_PER_ROW * 3 - 1;

/// Render `buffer[start..start + length]` as a hex dump
///
/// Each row holds up to 16 bytes: an 8-digit uppercase offset, the byte
/// values, then the printable-ASCII projection between `|` bars. The range is
/// clamped to the buffer; a `start` past the end yields an empty string.
///
/// # Example
/// ```
/// use blob_transform::hex_dump;
/// let dump = hex_dump(b"Hi\x00", 0, 16);
/// assert_eq!(
///     dump,
///     "00000000  48 69 00                                         |Hi.|"
/// );
/// ```
pub fn hex_dump(buffer: &[u8], start: usize, length: usize) -> String {
    if start >= buffer.len() {
        return String::new();
    }
    let end = start.saturating_add(length).min(buffer.len());

    buffer[start..end]
        .chunks(BYTES_PER_ROW)
        .enumerate()
        .map(|(row, chunk)| format_row(start + row * BYTES_PER_ROW, chunk))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row(offset: usize, chunk: &[u8]) -> String {
    let hex = chunk
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ");
    let ascii: String = chunk.iter().map(|&b| printable(b)).collect();

    format!(
        "{:08X}  {:<width$}  |{}|",
        offset,
        hex,
        ascii,
        width = HEX_COLUMN_WIDTH
    )
}

fn printable(byte: u8) -> char {
    if (0x20..=0x7E).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}
