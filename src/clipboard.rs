/// Single-slot holder for a yanked byte range
///
/// Pasting does not consume the contents; each copy replaces them.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    contents: Option<Vec<u8>>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a copy of `bytes`
    pub fn yank(&mut self, bytes: &[u8]) {
        self.contents = Some(bytes.to_vec());
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }
}
