//! Domain error types for jose-probe.
//!
//! All engine and host-layer errors are defined here using `thiserror`.
//! Per-candidate key skips are not errors and live in `core::jwk`.

use thiserror::Error;

/// Errors that can occur while decoding tokens or extracting key material.
#[derive(Debug, Error)]
pub enum JoseError {
    /// A segment could not be decoded as base64url, or exceeded the length cap.
    #[error("failed to decode segment: {reason}")]
    DecodeError {
        /// Description of the decoding failure.
        reason: String,
    },

    /// The key-descriptor input is not valid JSON at the top level.
    #[error("failed to parse key material: {reason}")]
    KeyParseError {
        /// Description of the parsing failure.
        reason: String,
    },

    /// Extracted RSA components were rejected when building a key object.
    #[error("invalid RSA key material: {reason}")]
    InvalidKeyMaterial {
        /// Description of the rejection.
        reason: String,
    },

    /// The value does not structurally match the requested token shape.
    #[error("invalid token format: expected {expected}")]
    InvalidTokenFormat {
        /// Human-readable description of the expected shape.
        expected: String,
    },

    /// The number of segment texts does not match the token shape.
    #[error("expected {expected} segments for {shape}, got {actual}")]
    SegmentCountMismatch {
        /// Token shape name.
        shape: String,
        /// Number of segments the shape requires.
        expected: usize,
        /// Number of segments supplied.
        actual: usize,
    },

    /// No token was provided via any input method.
    #[error("no token provided: pass a token as an argument, via --token-env, or through stdin")]
    NoTokenProvided,

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The environment variable name cannot be used for a lookup.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },

    /// Failed to read an input file.
    #[error("failed to read '{path}': {reason}")]
    InputFileError {
        /// Path of the input file.
        path: String,
        /// Description of the read failure.
        reason: String,
    },

    /// None of the configured parameters holds a token.
    #[error("no parameter among [{names}] holds a {shape} token")]
    NoTokenParameter {
        /// Comma-separated list of the parameter names that were checked.
        names: String,
        /// Token shape that was searched for.
        shape: String,
    },

    /// Failed to fetch a key set from the remote endpoint.
    #[error("failed to fetch JWKS from '{url}': {reason}")]
    JwksFetchError {
        /// The sanitized endpoint URL.
        url: String,
        /// Description of the fetch failure.
        reason: String,
    },
}
