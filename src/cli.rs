//! CLI argument definitions for jose-probe.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing.
//!
//! # Security
//!
//! Argument structs that can carry tokens implement a custom `Debug`
//! that redacts them, preventing leakage through debug formatting,
//! error chains, or logging.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jose_probe::core::limits::{DEFAULT_MAX_KEY_DOCUMENT_LEN, DEFAULT_MAX_SEGMENT_LEN};
use jose_probe::{Limits, TokenShape};

/// Parameter names scanned for tokens when no `--param` is given.
pub const DEFAULT_PARAMETER_NAMES: &[&str] = &[
    "access_token",
    "id_token",
    "token",
    "jwt",
    "jws",
    "jwe",
    "assertion",
];

/// Inspect, locate, and re-assemble JOSE compact-serialization tokens,
/// and extract RSA public keys from JSON Web Keys.
#[derive(Debug, Parser)]
#[command(name = "jose-probe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug details (skipped keys, undecodable segments) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Maximum accepted length of one encoded segment or key component, in bytes.
    #[arg(
        long,
        global = true,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_SEGMENT_LEN
    )]
    pub max_segment_len: usize,

    /// Maximum accepted size of a key document, in bytes.
    #[arg(
        long,
        global = true,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_KEY_DOCUMENT_LEN
    )]
    pub max_document_len: usize,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Input limits selected on the command line.
    pub fn limits(&self) -> Limits {
        Limits::default()
            .with_max_segment_len(self.max_segment_len)
            .with_max_key_document_len(self.max_document_len)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split a token into its segments and decode the JSON ones.
    Inspect(InspectArgs),

    /// Find the first configured parameter of a query string that holds a token.
    Scan(ScanArgs),

    /// Join segment texts back into a token, encoding the JSON segments.
    Assemble(AssembleArgs),

    /// Extract RSA public keys from a JWK or JWK set.
    Keys(KeysArgs),
}

/// Token shape selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeChoice {
    /// Signed token with 3 segments.
    Jws,
    /// Encrypted token with 5 segments.
    Jwe,
}

impl From<ShapeChoice> for TokenShape {
    fn from(choice: ShapeChoice) -> Self {
        match choice {
            ShapeChoice::Jws => TokenShape::Jws,
            ShapeChoice::Jwe => TokenShape::Jwe,
        }
    }
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// The token to inspect. If omitted, reads from stdin.
    pub token: Option<String>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,

    /// Expected token shape. Detected from the segment count when omitted.
    #[arg(long, value_enum)]
    pub shape: Option<ShapeChoice>,

    /// Output JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Custom `Debug` that redacts the token field to prevent accidental leakage.
impl fmt::Debug for InspectArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectArgs")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .field("shape", &self.shape)
            .field("json", &self.json)
            .finish()
    }
}

/// Arguments for the `scan` subcommand.
#[derive(clap::Args)]
pub struct ScanArgs {
    /// URL-encoded parameter string, e.g. `page=2&access_token=eyJ...`.
    #[arg(long, value_name = "QUERY")]
    pub query: String,

    /// Parameter name to check, in priority order. Repeatable.
    #[arg(long = "param", value_name = "NAME")]
    pub params: Vec<String>,

    /// Token shape to look for. Both are tried (JWS first) when omitted.
    #[arg(long, value_enum)]
    pub shape: Option<ShapeChoice>,

    /// Output JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

impl ScanArgs {
    /// The configured parameter names, falling back to the defaults.
    pub fn parameter_names(&self) -> Vec<String> {
        if self.params.is_empty() {
            DEFAULT_PARAMETER_NAMES.iter().map(|s| s.to_string()).collect()
        } else {
            self.params.clone()
        }
    }

    /// The shapes to search for, in order.
    pub fn shapes(&self) -> Vec<TokenShape> {
        match self.shape {
            Some(choice) => vec![choice.into()],
            None => TokenShape::ALL.to_vec(),
        }
    }
}

/// Custom `Debug` that redacts the query, which may carry tokens.
impl fmt::Debug for ScanArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanArgs")
            .field("query", &"[REDACTED]")
            .field("params", &self.params)
            .field("shape", &self.shape)
            .field("json", &self.json)
            .finish()
    }
}

/// Arguments for the `assemble` subcommand.
#[derive(clap::Args)]
pub struct AssembleArgs {
    /// Shape of the token to assemble.
    #[arg(long, value_enum)]
    pub shape: ShapeChoice,

    /// Segment texts in wire order. JSON segments are given decoded,
    /// the others in their encoded form.
    #[arg(required = true, allow_hyphen_values = true, value_name = "SEGMENT")]
    pub segments: Vec<String>,
}

/// Custom `Debug` that redacts segment contents.
impl fmt::Debug for AssembleArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssembleArgs")
            .field("shape", &self.shape)
            .field("segments", &format_args!("[{} REDACTED]", self.segments.len()))
            .finish()
    }
}

/// Arguments for the `keys` subcommand.
#[derive(Debug, clap::Args)]
pub struct KeysArgs {
    /// Path to a JWK or JWK set document. If omitted, reads from stdin.
    #[arg(value_name = "FILE", conflicts_with = "jwks_url")]
    pub file: Option<PathBuf>,

    /// URL of a JWKS endpoint to fetch the key set from. Must be HTTPS.
    #[arg(long, value_name = "URL")]
    pub jwks_url: Option<String>,

    /// Output JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}
