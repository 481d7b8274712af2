//! JSON output for `--json` mode.

use serde_json::Value;

/// Print a JSON value with 2-space indentation.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}
