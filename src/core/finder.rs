//! Structural token detection.
//!
//! Decides whether a string looks like a compact-serialization token
//! without decoding anything, and finds the first configured request
//! parameter that holds one. The checks run once per candidate parameter
//! per message, so they are a single byte scan with no allocation.

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::core::token::TokenShape;

/// Named-parameter lookup provided by the host's request abstraction.
pub trait ParameterSource {
    /// Raw value of the parameter called `name`, if present.
    fn parameter_value(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> ParameterSource for HashMap<String, String, S> {
    fn parameter_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// A parameter whose value looks like a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParameter<'a> {
    /// The configured parameter name that matched.
    pub name: &'a str,
    /// The parameter's raw value.
    pub value: &'a str,
}

/// Whether `value` structurally matches a token of `expected_segments` segments.
///
/// True iff the value holds exactly `expected_segments - 1` separators and
/// every other byte is in the base64url alphabet. Empty segments are
/// allowed. Never panics, whatever the input.
pub fn looks_like_token(value: &str, expected_segments: usize) -> bool {
    let Some(expected_separators) = expected_segments.checked_sub(1) else {
        return false;
    };

    let mut separators = 0usize;
    for byte in value.bytes() {
        match byte {
            b'.' => {
                separators += 1;
                if separators > expected_separators {
                    return false;
                }
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => {}
            _ => return false,
        }
    }
    separators == expected_separators
}

/// The shape `value` looks like, checking JWS before JWE.
pub fn detect_shape(value: &str) -> Option<TokenShape> {
    TokenShape::ALL
        .into_iter()
        .find(|shape| looks_like_token(value, shape.segment_count()))
}

/// First parameter, in `names` order, whose value looks like a `shape` token.
pub fn find_token_parameter<'a, P, N>(
    source: &'a P,
    names: &'a [N],
    shape: TokenShape,
) -> Option<TokenParameter<'a>>
where
    P: ParameterSource + ?Sized,
    N: AsRef<str>,
{
    names.iter().find_map(|name| {
        let name = name.as_ref();
        source
            .parameter_value(name)
            .filter(|value| looks_like_token(value, shape.segment_count()))
            .map(|value| TokenParameter { name, value })
    })
}
