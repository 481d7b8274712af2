//! Resource caps applied to attacker-controlled input.

/// Default maximum length of a single encoded segment (4 MiB).
pub const DEFAULT_MAX_SEGMENT_LEN: usize = 4 * 1024 * 1024;

/// Default maximum size of a key-descriptor document (4 MiB).
pub const DEFAULT_MAX_KEY_DOCUMENT_LEN: usize = 4 * 1024 * 1024;

/// Input size limits for decoding and key extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest encoded segment (or key component) accepted for decoding, in bytes.
    pub max_segment_len: usize,
    /// Largest key-descriptor JSON document accepted for parsing, in bytes.
    pub max_key_document_len: usize,
}

impl Limits {
    /// Replace the segment length cap.
    #[must_use]
    pub fn with_max_segment_len(mut self, max: usize) -> Self {
        self.max_segment_len = max;
        self
    }

    /// Replace the key document size cap.
    #[must_use]
    pub fn with_max_key_document_len(mut self, max: usize) -> Self {
        self.max_key_document_len = max;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_segment_len: DEFAULT_MAX_SEGMENT_LEN,
            max_key_document_len: DEFAULT_MAX_KEY_DOCUMENT_LEN,
        }
    }
}
