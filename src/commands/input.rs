//! Input resolution shared by the subcommands.
//!
//! Tokens come from a positional argument, an environment variable, or
//! stdin, in that order. Values read from the environment or stdin are
//! held in `Zeroizing` buffers so they are wiped on drop.

use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use jose_probe::{JoseError, Limits};
use zeroize::Zeroizing;

/// Upper bound on a token read from stdin: five maximal segments plus separators.
fn max_token_len(limits: &Limits) -> u64 {
    let len = limits.max_segment_len.saturating_mul(5).saturating_add(4);
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Resolve the token to operate on.
///
/// # Errors
///
/// Returns [`JoseError::InvalidEnvVarName`] or [`JoseError::EnvVarNotFound`]
/// for a bad `--token-env`, and [`JoseError::NoTokenProvided`] when no
/// source yields a non-empty token.
pub fn resolve_token(
    token: Option<&str>,
    token_env: Option<&str>,
    limits: &Limits,
) -> Result<Zeroizing<String>, JoseError> {
    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(Zeroizing::new(token.to_string()));
    }

    let raw = match token_env {
        Some(name) => read_env(name)?,
        None => read_stdin_text(max_token_len(limits))?,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(JoseError::NoTokenProvided);
    }
    Ok(Zeroizing::new(trimmed.to_string()))
}

fn read_env(name: &str) -> Result<Zeroizing<String>, JoseError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(JoseError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    std::env::var(name)
        .map(Zeroizing::new)
        .map_err(|_| JoseError::EnvVarNotFound {
            name: name.to_string(),
        })
}

/// Read stdin as text, unless it is an interactive terminal.
fn read_stdin_text(max_len: u64) -> Result<Zeroizing<String>, JoseError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Zeroizing::new(String::new()));
    }

    let mut text = Zeroizing::new(String::new());
    stdin
        .lock()
        .take(max_len)
        .read_to_string(&mut text)
        .map_err(|e| JoseError::InputFileError {
            path: "<stdin>".to_string(),
            reason: e.to_string(),
        })?;
    Ok(text)
}

/// Read a key document from `path`, or from stdin when `path` is `None`.
///
/// At most one byte more than the document limit is read, so oversized
/// input is rejected by the extractor without buffering all of it.
///
/// # Errors
///
/// Returns [`JoseError::InputFileError`] if the source cannot be read.
pub fn read_key_document(path: Option<&Path>, limits: &Limits) -> Result<Vec<u8>, JoseError> {
    let max_len = u64::try_from(limits.max_key_document_len)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut bytes = Vec::new();

    match path {
        Some(path) => {
            let display = path.display().to_string();
            File::open(path)
                .and_then(|file| file.take(max_len).read_to_end(&mut bytes))
                .map_err(|e| JoseError::InputFileError {
                    path: display,
                    reason: e.to_string(),
                })?;
        }
        None => {
            let stdin = io::stdin();
            if !stdin.is_terminal() {
                stdin
                    .lock()
                    .take(max_len)
                    .read_to_end(&mut bytes)
                    .map_err(|e| JoseError::InputFileError {
                        path: "<stdin>".to_string(),
                        reason: e.to_string(),
                    })?;
            }
        }
    }

    Ok(bytes)
}
