//! Core analysis engine for JOSE tokens and key material.
//!
//! This module contains the domain logic separated from CLI concerns.
//! Nothing here performs I/O or holds shared state, so every function
//! can be called concurrently from any number of threads.

pub mod decoder;
pub mod finder;
pub mod jwk;
pub mod limits;
pub mod token;

pub use decoder::{
    SegmentView, TokenView, decode_segment, decode_segment_with_limits, encode_segment, join,
    pretty_print_json, split,
};
pub use finder::{
    ParameterSource, TokenParameter, detect_shape, find_token_parameter, looks_like_token,
};
pub use jwk::{
    KeyDescriptor, KeyDocument, KeyExtractor, RsaPublicKeyMaterial, SkipReason,
    extract_rsa_public_keys, extract_rsa_public_keys_from_str,
};
pub use limits::Limits;
pub use token::{SEPARATOR, TokenShape};
