//! Handler for the `inspect` subcommand.
//!
//! Splits a token into its segments and prints the header (and the
//! payload of a JWS) decoded, with the remaining segments as encoded.
//! The token is read from a CLI argument, an environment variable, or
//! stdin.

use anyhow::Result;
use jose_probe::core::{TokenView, detect_shape};
use jose_probe::{JoseError, Limits, TokenShape, looks_like_token};

use crate::cli::InspectArgs;
use crate::commands::input::resolve_token;
use crate::display::token_view::{print_view, print_view_json};

/// Execute the `inspect` subcommand with the given arguments.
pub fn execute(args: &InspectArgs, limits: &Limits) -> Result<()> {
    let token = resolve_token(args.token.as_deref(), args.token_env.as_deref(), limits)?;
    let shape = shape_of(&token, args.shape.map(Into::into))?;

    let view = TokenView::decode(&token, shape, limits);
    if args.json {
        print_view_json(&view);
    } else {
        print_view(&view);
    }
    Ok(())
}

/// The shape to decode `token` as: the requested one if it matches, or the detected one.
fn shape_of(token: &str, requested: Option<TokenShape>) -> Result<TokenShape, JoseError> {
    match requested {
        Some(shape) if looks_like_token(token, shape.segment_count()) => Ok(shape),
        Some(shape) => Err(JoseError::InvalidTokenFormat {
            expected: format!("a {}-segment {shape}", shape.segment_count()),
        }),
        None => detect_shape(token).ok_or_else(|| JoseError::InvalidTokenFormat {
            expected: "a 3-segment JWS or 5-segment JWE".to_string(),
        }),
    }
}
