//! Handler for the `keys` subcommand.
//!
//! Reads a JWK or JWK set from a file, stdin, or an HTTPS endpoint and
//! lists the RSA public keys that could be built from it. Entries that
//! are not usable RSA keys are skipped (run with `--verbose` to see why).

use anyhow::Result;
use jose_probe::{KeyExtractor, Limits};

use crate::cli::KeysArgs;
use crate::commands::input::read_key_document;
use crate::display::key_list::{print_keys, print_keys_json};
use crate::jwks_fetch::fetch_key_document;

/// Execute the `keys` subcommand with the given arguments.
pub fn execute(args: &KeysArgs, limits: &Limits) -> Result<()> {
    let document = match &args.jwks_url {
        Some(url) => fetch_key_document(url, limits)?,
        None => read_key_document(args.file.as_deref(), limits)?,
    };

    let keys = KeyExtractor::new(*limits).rsa_public_keys_from_slice(&document)?;
    if args.json {
        print_keys_json(&keys);
    } else {
        print_keys(&keys);
    }
    Ok(())
}
