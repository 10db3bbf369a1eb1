//! Parsing of hex byte payloads, numeric arguments and search patterns

use crate::error::EditError;

/// Parse hex text such as `"DE AD be,ef"` into bytes
///
/// Whitespace and commas are ignored. The remaining digits must come in
/// pairs; digits are case-insensitive.
///
/// # Example
/// ```
/// use blob_transform::parse_hex_bytes;
/// assert_eq!(parse_hex_bytes("DE AD BE EF").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
/// assert!(parse_hex_bytes("ABC").is_err());
/// ```
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, EditError> {
    let digits: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(EditError::MalformedHex {
            reason: format!("odd number of hex digits ({})", digits.len()),
        });
    }

    hex::decode(&digits).map_err(|e| EditError::MalformedHex {
        reason: e.to_string(),
    })
}

/// Parse a hexadecimal integer argument, with or without a `0x` prefix
pub fn parse_hex_usize(name: &str, text: &str) -> Result<usize, EditError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(EditError::invalid(name, "empty value"));
    }
    // from_str_radix alone would accept a leading '+'
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EditError::invalid(name, format!("'{}' is not a hex number", text)));
    }

    usize::from_str_radix(digits, 16)
        .map_err(|e| EditError::invalid(name, format!("'{}' is not a hex number: {}", text, e)))
}

/// How a search pattern should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMode {
    /// Hex if it parses as non-empty hex, literal text otherwise
    Auto,
    Hex,
    Text,
}

impl std::str::FromStr for PatternMode {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(PatternMode::Auto),
            "hex" => Ok(PatternMode::Hex),
            "text" => Ok(PatternMode::Text),
            other => Err(EditError::invalid(
                "mode",
                format!("expected auto, hex or text, got '{}'", other),
            )),
        }
    }
}

/// Resolve a search pattern to the bytes to look for
pub fn resolve_pattern(pattern: &str, mode: PatternMode) -> Result<Vec<u8>, EditError> {
    let bytes = match mode {
        PatternMode::Hex => parse_hex_bytes(pattern)?,
        PatternMode::Text => pattern.as_bytes().to_vec(),
        PatternMode::Auto => match parse_hex_bytes(pattern) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            _ => pattern.as_bytes().to_vec(),
        },
    };

    if bytes.is_empty() {
        return Err(EditError::invalid("pattern", "empty pattern"));
    }
    Ok(bytes)
}

/// All start offsets of `pattern` in `haystack`, overlapping matches included
pub fn find_all(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_hex_bytes_spaced() {
        assert_eq!(
            parse_hex_bytes("DE AD BE EF").unwrap(),
            vec![0xDE, 0xAD, 0xBE, 0xEF]
        );
    }

    #[test]
    fn test_parse_hex_bytes_commas_and_case() {
        assert_eq!(parse_hex_bytes("de,Ad,\nbE ef").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(parse_hex_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_parse_hex_bytes_odd_length() {
        let err = parse_hex_bytes("ABC").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHex);
    }

    #[test]
    fn test_parse_hex_bytes_bad_digit() {
        let err = parse_hex_bytes("0G").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHex);
    }

    #[test]
    fn test_parse_hex_usize() {
        assert_eq!(parse_hex_usize("offset", "10").unwrap(), 16);
        assert_eq!(parse_hex_usize("offset", " 0xff ").unwrap(), 255);
        assert_eq!(parse_hex_usize("offset", "0XA").unwrap(), 10);

        for bad in ["", "0x", "zz", "-1", "+1", "0x+AA", "1 2"] {
            let err = parse_hex_usize("offset", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "input {:?}", bad);
        }
    }

    #[test]
    fn test_resolve_pattern_auto() {
        assert_eq!(resolve_pattern("FF10", PatternMode::Auto).unwrap(), vec![0xFF, 0x10]);
        // not hex, falls back to text
        assert_eq!(resolve_pattern("hello", PatternMode::Auto).unwrap(), b"hello".to_vec());
        // forced text
        assert_eq!(resolve_pattern("AB", PatternMode::Text).unwrap(), b"AB".to_vec());
    }

    #[test]
    fn test_resolve_pattern_errors() {
        assert_eq!(
            resolve_pattern("ABC", PatternMode::Hex).unwrap_err().kind(),
            ErrorKind::MalformedHex
        );
        assert_eq!(
            resolve_pattern("", PatternMode::Auto).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            "binary".parse::<PatternMode>().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_find_all_overlapping() {
        assert_eq!(find_all(b"aaaa", b"aa"), vec![0, 1, 2]);
        assert_eq!(find_all(b"abcabc", b"bc"), vec![1, 4]);
        assert!(find_all(b"ab", b"abc").is_empty());
    }
}
