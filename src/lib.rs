//! jose-probe: structural analysis of JOSE compact-serialization tokens.
//!
//! The engine locates tokens inside request parameters, splits them into
//! their segments and decodes them losslessly, and reconstructs RSA public
//! keys from JSON Web Key documents. Every operation is a pure function of
//! its input and never panics on attacker-controlled data.

#![forbid(unsafe_code)]

pub mod core;
pub mod error;

pub use crate::core::{
    KeyExtractor, Limits, RsaPublicKeyMaterial, TokenShape, decode_segment, encode_segment,
    extract_rsa_public_keys, extract_rsa_public_keys_from_str, join, looks_like_token,
    pretty_print_json, split,
};
pub use crate::error::JoseError;
