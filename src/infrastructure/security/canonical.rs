//! Canonical JSON encoding of signed transcripts
//!
//! Signatures are only comparable if signer and verifier produce the same
//! bytes, so the layout is written out here instead of relying on a
//! serializer's defaults:
//!
//! - object keys sorted by code point at every level
//! - `", "` between items and `": "` between key and value
//! - strings escaped to ASCII: `\"`, `\\`, `\b`, `\f`, `\n`, `\r`, `\t`,
//!   everything else outside `' '..='~'` as lowercase `\uXXXX`, with
//!   surrogate pairs above U+FFFF
//! - numbers in their shortest round-trip decimal form

use std::fmt::Write;

use serde_json::{Map, Value};

#[cfg(test)]
fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Canonical form of a sequence, identical to that of the equivalent array
pub fn to_canonical_json_seq(items: &[Value]) -> String {
    let mut out = String::new();
    write_array(&mut out, items);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::String(text) => write_string(out, text),
        Value::Array(items) => write_array(out, items),
        Value::Object(fields) => write_object(out, fields),
    }
}

fn write_array(out: &mut String, items: &[Value]) {
    out.push('[');

    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        write_value(out, item);
    }

    out.push(']');
}

fn write_object(out: &mut String, fields: &Map<String, Value>) {
    let mut keys: Vec<&String> = fields.keys().collect();
    keys.sort_unstable();

    out.push('{');

    for (position, key) in keys.into_iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        write_string(out, key);
        out.push_str(": ");
        write_value(out, &fields[key.as_str()]);
    }

    out.push('}');
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');

    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // Writing to a String cannot fail.
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }

    out.push('"');
}
