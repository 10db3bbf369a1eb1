use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Label reported in place of an MD5 digest
pub const MD5_UNAVAILABLE: &str = "unavailable (MD5 not supported in this build)";

/// A digest value, or a labeled marker when the algorithm is not available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum DigestValue {
    /// Lowercase hex digest
    Hex(String),
    /// Algorithm unavailable; the string says so
    Unavailable(String),
}

impl DigestValue {
    pub fn is_available(&self) -> bool {
        matches!(self, DigestValue::Hex(_))
    }
}

impl std::fmt::Display for DigestValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestValue::Hex(h) => f.write_str(h),
            DigestValue::Unavailable(label) => f.write_str(label),
        }
    }
}

/// Digests over an entire buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumReport {
    pub sha256: DigestValue,
    pub sha1: DigestValue,
    pub md5: DigestValue,
    pub blake3: DigestValue,
    /// Number of bytes hashed
    pub len: usize,
}

impl ChecksumReport {
    /// Hash `data` with every supported algorithm
    ///
    /// Never fails: an algorithm that is not available degrades to a
    /// [`DigestValue::Unavailable`] marker.
    pub fn compute(data: &[u8]) -> Self {
        Self {
            sha256: DigestValue::Hex(hex::encode(Sha256::digest(data))),
            sha1: DigestValue::Hex(hex::encode(Sha1::digest(data))),
            md5: DigestValue::Unavailable(MD5_UNAVAILABLE.to_string()),
            blake3: DigestValue::Hex(blake3::hash(data).to_hex().to_string()),
            len: data.len(),
        }
    }
}

impl std::fmt::Display for ChecksumReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SHA256: {}", self.sha256)?;
        writeln!(f, "SHA1:   {}", self.sha1)?;
        writeln!(f, "MD5:    {}", self.md5)?;
        write!(f, "BLAKE3: {}", self.blake3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests_of_abc() {
        let report = ChecksumReport::compute(b"abc");

        assert_eq!(
            report.sha256,
            DigestValue::Hex(
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad".to_string()
            )
        );
        assert_eq!(
            report.sha1,
            DigestValue::Hex("a9993e364706816aba3e25717850c26c9cd0d89d".to_string())
        );
        assert_eq!(report.len, 3);
    }

    #[test]
    fn test_md5_is_labeled_placeholder() {
        let report = ChecksumReport::compute(b"");

        assert!(!report.md5.is_available());
        assert!(report.md5.to_string().contains("unavailable"));
        assert!(report.sha256.is_available());
        assert!(report.blake3.is_available());
    }

    #[test]
    fn test_display_lists_every_algorithm() {
        let text = ChecksumReport::compute(b"xyz").to_string();

        for label in ["SHA256:", "SHA1:", "MD5:", "BLAKE3:"] {
            assert!(text.contains(label), "missing {}", label);
        }
    }
}
