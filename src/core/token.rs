//! Compact-serialization token shapes.

use std::fmt;

/// Character joining the segments of a compact-serialization token.
pub const SEPARATOR: char = '.';

/// The two supported compact-serialization layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenShape {
    /// Signed token: header, payload, signature.
    Jws,
    /// Encrypted token: header, encrypted key, IV, ciphertext, tag.
    Jwe,
}

impl TokenShape {
    /// All shapes, in detection order.
    pub const ALL: [TokenShape; 2] = [TokenShape::Jws, TokenShape::Jwe];

    /// Number of segments a well-formed token of this shape has.
    pub fn segment_count(self) -> usize {
        self.segment_names().len()
    }

    /// Semantic names of the segments, in wire order.
    pub fn segment_names(self) -> &'static [&'static str] {
        match self {
            TokenShape::Jws => &["header", "payload", "signature"],
            TokenShape::Jwe => &["header", "encrypted_key", "iv", "ciphertext", "tag"],
        }
    }

    /// Indexes of the segments that hold JSON and are shown decoded for editing.
    pub fn decoded_segments(self) -> &'static [usize] {
        match self {
            TokenShape::Jws => &[0, 1],
            TokenShape::Jwe => &[0],
        }
    }
}

impl fmt::Display for TokenShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenShape::Jws => f.write_str("JWS"),
            TokenShape::Jwe => f.write_str("JWE"),
        }
    }
}
