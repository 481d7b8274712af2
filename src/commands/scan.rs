//! Handler for the `scan` subcommand.
//!
//! Parses a URL-encoded parameter string and reports the first
//! configured parameter whose value looks like a token, decoded.

use anyhow::Result;
use jose_probe::core::{TokenParameter, TokenView, find_token_parameter};
use jose_probe::{JoseError, Limits, TokenShape};
use serde_json::Value;

use crate::cli::ScanArgs;
use crate::display::json_printer::print_json;
use crate::display::token_view::{print_view, view_to_json};
use crate::params::QueryParameters;

/// Execute the `scan` subcommand with the given arguments.
pub fn execute(args: &ScanArgs, limits: &Limits) -> Result<()> {
    let params = QueryParameters::parse(&args.query);
    let names = args.parameter_names();
    let shapes = args.shapes();

    let Some((found, shape)) = first_match(&params, &names, &shapes) else {
        return Err(JoseError::NoTokenParameter {
            names: names.join(", "),
            shape: shapes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or "),
        }
        .into());
    };

    let view = TokenView::decode(found.value, shape, limits);
    if args.json {
        let mut value = view_to_json(&view);
        if let Value::Object(map) = &mut value {
            map.insert("parameter".to_string(), Value::from(found.name));
        }
        print_json(&value);
    } else {
        println!("Parameter: {}", found.name);
        print_view(&view);
    }
    Ok(())
}

/// The first shape, in order, for which some parameter holds a token.
fn first_match<'a>(
    params: &'a QueryParameters,
    names: &'a [String],
    shapes: &[TokenShape],
) -> Option<(TokenParameter<'a>, TokenShape)> {
    shapes.iter().find_map(|&shape| {
        find_token_parameter(params, names, shape).map(|found| (found, shape))
    })
}
