//! Handler for the `assemble` subcommand.
//!
//! Joins segment texts into a compact token. The shape's JSON segments
//! are taken as decoded text and encoded; the others are written as given.

use anyhow::Result;
use jose_probe::JoseError;
use jose_probe::TokenShape;
use jose_probe::core::TokenView;

use crate::cli::AssembleArgs;

/// Execute the `assemble` subcommand with the given arguments.
pub fn execute(args: &AssembleArgs) -> Result<()> {
    println!("{}", assemble(args.shape.into(), &args.segments)?);
    Ok(())
}

fn assemble(shape: TokenShape, segments: &[String]) -> Result<String, JoseError> {
    if segments.len() != shape.segment_count() {
        return Err(JoseError::SegmentCountMismatch {
            shape: shape.to_string(),
            expected: shape.segment_count(),
            actual: segments.len(),
        });
    }
    Ok(TokenView::compose(shape, segments.iter().map(String::as_str)).to_token())
}
