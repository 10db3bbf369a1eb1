/// Binary payload under edit
///
/// `original` is captured once at mount time and never written again; it is
/// the baseline for diffs. All edits land in `working`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    original: Vec<u8>,
    working: Vec<u8>,
}

impl ByteBuffer {
    /// Mount a new payload, taking independent copies for baseline and working state
    pub fn mount(bytes: &[u8]) -> Self {
        Self {
            original: bytes.to_vec(),
            working: bytes.to_vec(),
        }
    }

    pub fn original(&self) -> &[u8] {
        &self.original
    }

    pub fn working(&self) -> &[u8] {
        &self.working
    }

    /// Length of the working buffer
    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Check that `offset..offset + length` lies inside the working buffer
    pub fn contains_range(&self, offset: usize, length: usize) -> bool {
        offset
            .checked_add(length)
            .is_some_and(|end| end <= self.working.len())
    }

    /// Mutable access for in-place edits and resizes
    pub(crate) fn working_mut(&mut self) -> &mut Vec<u8> {
        &mut self.working
    }

    /// Replace the working buffer wholesale (undo)
    pub(crate) fn restore(&mut self, snapshot: Vec<u8>) {
        self.working = snapshot;
    }

    /// BLAKE3 hash of the working buffer (hex-encoded)
    pub fn fingerprint(&self) -> String {
        blake3::hash(&self.working).to_hex().to_string()
    }
}
