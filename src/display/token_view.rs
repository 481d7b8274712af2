//! Rendering of decoded token segments.

use jose_probe::core::TokenView;
use serde_json::{Value, json};

use super::json_printer::print_json;

/// Section title for a segment name.
fn section_title(name: &str) -> &'static str {
    match name {
        "header" => "Header",
        "payload" => "Payload",
        "signature" => "Signature",
        "encrypted_key" => "Encrypted Key",
        "iv" => "Initialization Vector",
        "ciphertext" => "Ciphertext",
        "tag" => "Authentication Tag",
        _ => "Extra Segment",
    }
}

/// Print every segment of `view` under its own section heading.
pub fn print_view(view: &TokenView) {
    let shape = view.shape();
    println!("Token type: {shape} ({} segments)", shape.segment_count());

    for (index, segment) in view.segments().iter().enumerate() {
        println!();
        println!("--- {} ---", section_title(segment.name()));
        if shape.decoded_segments().contains(&index) && !segment.is_decoded() {
            println!("(not decodable, shown as encoded)");
        }
        if segment.text().is_empty() {
            println!("(empty)");
        } else {
            println!("{}", segment.text());
        }
    }
}

/// JSON representation of `view`.
///
/// Decoded segments that hold JSON are embedded as JSON values, other
/// decoded segments as strings. JSON that a value cannot represent
/// faithfully (duplicate members, for one) is embedded as its text.
pub fn view_to_json(view: &TokenView) -> Value {
    let segments: Vec<Value> = view
        .segments()
        .iter()
        .map(|segment| {
            let content = if segment.is_decoded() {
                faithful_json(segment.text())
                    .unwrap_or_else(|| Value::String(segment.text().to_string()))
            } else {
                Value::Null
            };
            json!({
                "name": segment.name(),
                "encoded": segment.raw(),
                "decoded": segment.is_decoded(),
                "content": content,
            })
        })
        .collect();

    json!({
        "type": view.shape().to_string(),
        "segments": segments,
    })
}

/// `text` as a JSON value, if rendering the value gives `text` back.
fn faithful_json(text: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(text).ok()?;
    let rendered = serde_json::to_string_pretty(&value).ok()?;
    (rendered == text).then_some(value)
}

/// Print `view` as JSON.
pub fn print_view_json(view: &TokenView) {
    print_json(&view_to_json(view));
}
