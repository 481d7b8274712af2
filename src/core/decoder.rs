//! Token splitting, base64url segment coding, and display rendering.
//!
//! Handles splitting a raw compact-serialization token into its segments,
//! decoding each segment permissively (missing padding is repaired), and
//! rendering JSON segments for an operator to read and edit. Nothing here
//! asserts that a token is well formed: operators routinely craft broken
//! tokens on purpose.

use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::de::IgnoredAny;
use tracing::debug;

use crate::core::limits::Limits;
use crate::core::token::{SEPARATOR, TokenShape};
use crate::error::JoseError;

/// URL-safe decoder that expects padding restored by [`repair_padding`].
///
/// Non-zero trailing bits are accepted so that non-canonical segments
/// produced by other tooling still decode.
const URL_SAFE_REPAIRED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// Split a token on the separator.
///
/// Never fails: a segment count different from `expected_segments` is
/// only logged. Leading, trailing, or doubled separators yield empty
/// segments.
pub fn split(token: &str, expected_segments: usize) -> Vec<&str> {
    let segments: Vec<&str> = token.split(SEPARATOR).collect();
    if segments.len() != expected_segments {
        debug!(
            expected = expected_segments,
            found = segments.len(),
            "token segment count differs from expected"
        );
    }
    segments
}

/// Join segments with the separator. Inverse of [`split`].
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let capacity = segments.iter().map(|s| s.as_ref().len() + 1).sum();
    let mut token = String::with_capacity(capacity);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            token.push(SEPARATOR);
        }
        token.push_str(segment.as_ref());
    }
    token
}

/// Decode a base64url segment using the default [`Limits`].
///
/// # Errors
///
/// Returns [`JoseError::DecodeError`] if the segment is too long or holds
/// characters outside the URL-safe alphabet.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, JoseError> {
    decode_segment_with_limits(segment, &Limits::default())
}

/// Decode a base64url segment, repairing missing padding first.
///
/// Any trailing `=` is stripped and the padding is re-derived from the
/// remaining length, so padded and unpadded input decode identically.
///
/// # Errors
///
/// Returns [`JoseError::DecodeError`] if the segment exceeds
/// `limits.max_segment_len`, has a length no padding can repair, or holds
/// characters outside the URL-safe alphabet.
pub fn decode_segment_with_limits(segment: &str, limits: &Limits) -> Result<Vec<u8>, JoseError> {
    if segment.len() > limits.max_segment_len {
        return Err(JoseError::DecodeError {
            reason: format!(
                "segment of {} bytes exceeds the maximum of {} bytes",
                segment.len(),
                limits.max_segment_len
            ),
        });
    }

    let padded = repair_padding(segment.trim_end_matches('='))?;
    URL_SAFE_REPAIRED
        .decode(padded.as_bytes())
        .map_err(|e| JoseError::DecodeError {
            reason: e.to_string(),
        })
}

/// Append the `=` padding a standard decoder requires.
fn repair_padding(unpadded: &str) -> Result<Cow<'_, str>, JoseError> {
    match unpadded.len() % 4 {
        0 => Ok(Cow::Borrowed(unpadded)),
        2 => Ok(Cow::Owned(format!("{unpadded}=="))),
        3 => Ok(Cow::Owned(format!("{unpadded}="))),
        _ => Err(JoseError::DecodeError {
            reason: format!(
                "length {} leaves a dangling character that padding cannot repair",
                unpadded.len()
            ),
        }),
    }
}

/// Encode bytes as an unpadded base64url segment.
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Render decoded segment bytes for display.
///
/// Valid JSON is re-indented with two spaces, token by token: member
/// order, duplicate members, number literals and string escapes are kept
/// exactly as encoded. Anything else is returned as (lossy) text unchanged.
pub fn pretty_print_json(decoded: &[u8]) -> String {
    if serde_json::from_slice::<IgnoredAny>(decoded).is_ok() {
        if let Ok(text) = std::str::from_utf8(decoded) {
            return reindent_json(text);
        }
    }
    String::from_utf8_lossy(decoded).into_owned()
}

/// Re-indent syntactically valid JSON without interpreting any value.
fn reindent_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut depth = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push(c);
                copy_string_tail(&mut chars, &mut out);
            }
            '{' | '[' => {
                let close = if c == '{' { '}' } else { ']' };
                out.push(c);
                while chars.next_if(|c| c.is_ascii_whitespace()).is_some() {}
                if chars.next_if_eq(&close).is_some() {
                    out.push(close);
                } else {
                    depth += 1;
                    push_newline(&mut out, depth);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                push_newline(&mut out, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                push_newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            c if c.is_ascii_whitespace() => {}
            c => out.push(c),
        }
    }
    out
}

/// Copy the rest of a string literal, up to and including its closing quote.
fn copy_string_tail(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => return,
            _ => {}
        }
    }
}

fn push_newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// One segment of a [`TokenView`].
#[derive(Clone, PartialEq, Eq)]
pub struct SegmentView {
    name: &'static str,
    raw: String,
    text: String,
    decoded: bool,
    edited: bool,
}

impl SegmentView {
    /// Semantic name of the segment (`header`, `payload`, `iv`, ...).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Encoded segment as it appeared in the token.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Display text: decoded and pretty-printed, or the raw segment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether [`SegmentView::text`] holds decoded content.
    pub fn is_decoded(&self) -> bool {
        self.decoded
    }

    /// Whether the text was replaced since decoding.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Encoded form of the segment as it will be written back.
    ///
    /// Unedited segments keep their original encoding byte for byte.
    pub fn encoded(&self) -> Cow<'_, str> {
        match (self.edited, self.decoded) {
            (false, _) => Cow::Borrowed(&self.raw),
            (true, true) => Cow::Owned(encode_segment(self.text.as_bytes())),
            (true, false) => Cow::Borrowed(&self.text),
        }
    }
}

/// Redacts segment contents, which may carry claims or key material.
impl fmt::Debug for SegmentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentView")
            .field("name", &self.name)
            .field("text", &"[REDACTED]")
            .field("decoded", &self.decoded)
            .field("edited", &self.edited)
            .finish()
    }
}

/// A token split into named segments for display and editing.
///
/// JSON segments of the shape are shown decoded; the rest are shown as
/// their raw encoding. Saving re-encodes only what was edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenView {
    shape: TokenShape,
    segments: Vec<SegmentView>,
}

impl TokenView {
    /// Split `token` and decode the segments `shape` shows decoded.
    ///
    /// A segment that cannot be decoded, or that decodes to bytes that are
    /// not UTF-8, is shown raw instead. Segments beyond the shape's count
    /// are kept and named `extra`.
    pub fn decode(token: &str, shape: TokenShape, limits: &Limits) -> Self {
        let names = shape.segment_names();
        let segments = split(token, shape.segment_count())
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let name = names.get(i).copied().unwrap_or("extra");
                let display = shape
                    .decoded_segments()
                    .contains(&i)
                    .then(|| decode_for_display(name, raw, limits))
                    .flatten();
                SegmentView {
                    name,
                    raw: raw.to_string(),
                    decoded: display.is_some(),
                    text: display.unwrap_or_else(|| raw.to_string()),
                    edited: false,
                }
            })
            .collect();

        Self { shape, segments }
    }

    /// Build a view from segment texts alone, as typed by an operator.
    ///
    /// Every segment counts as edited: the shape's JSON segments are
    /// encoded from their text on save and the rest are written verbatim.
    pub fn compose<I, S>(shape: TokenShape, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = shape.segment_names();
        let segments = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| SegmentView {
                name: names.get(i).copied().unwrap_or("extra"),
                raw: String::new(),
                text: text.into(),
                decoded: shape.decoded_segments().contains(&i),
                edited: true,
            })
            .collect();

        Self { shape, segments }
    }

    /// The shape this view was decoded as.
    pub fn shape(&self) -> TokenShape {
        self.shape
    }

    /// The segments in wire order.
    pub fn segments(&self) -> &[SegmentView] {
        &self.segments
    }

    /// Replace the display text of one segment.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.segments.get_mut(index) {
            Some(segment) => {
                segment.text = text.into();
                segment.edited = true;
                true
            }
            None => false,
        }
    }

    /// Whether any segment was edited.
    pub fn is_modified(&self) -> bool {
        self.segments.iter().any(SegmentView::is_edited)
    }

    /// Re-encode edited segments and join everything back into a token.
    pub fn to_token(&self) -> String {
        let encoded: Vec<Cow<'_, str>> = self.segments.iter().map(SegmentView::encoded).collect();
        join(&encoded)
    }
}

fn decode_for_display(name: &str, raw: &str, limits: &Limits) -> Option<String> {
    let bytes = match decode_segment_with_limits(raw, limits) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(segment = name, error = %e, "showing segment undecoded");
            return None;
        }
    };
    if std::str::from_utf8(&bytes).is_err() {
        debug!(segment = name, "decoded segment is not UTF-8, showing it undecoded");
        return None;
    }
    Some(pretty_print_json(&bytes))
}
