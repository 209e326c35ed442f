//! # Canonical JSON
//!
//! Values are first lowered to a `serde_json::Value` tree, then written by
//! hand so that key order, number text and spacing never depend on the
//! serializer's defaults.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use shared_types::{EventDraft, SealedEvent};

use super::errors::CanonicalizationError;

/// Canonical bytes of an event draft: the hash-chain input.
pub fn canonicalize_draft(draft: &EventDraft) -> Result<Vec<u8>, CanonicalizationError> {
    if let Some(field) = draft.non_finite_field() {
        return Err(CanonicalizationError::NonCanonicalizableValue {
            field: field.to_string(),
        });
    }
    canonicalize(draft)
}

/// Canonical bytes of a sealed event (draft plus hashes): the Merkle leaf input.
pub fn canonicalize_sealed(sealed: &SealedEvent) -> Result<Vec<u8>, CanonicalizationError> {
    if let Some(field) = sealed.draft.non_finite_field() {
        return Err(CanonicalizationError::NonCanonicalizableValue {
            field: field.to_string(),
        });
    }
    canonicalize(sealed)
}

/// Canonical bytes of any serializable value.
///
/// serde_json lowers non-finite floats to `null`; callers holding floats
/// must reject them first, as [`canonicalize_draft`] does.
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CanonicalizationError> {
    canonical_string(value).map(String::into_bytes)
}

pub fn canonical_string<T: Serialize + ?Sized>(value: &T) -> Result<String, CanonicalizationError> {
    let tree = serde_json::to_value(value)?;
    let mut out = String::new();
    write_value(&mut out, &tree, "$")?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value, path: &str) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(number) => write_number(out, number, path)?,
        Value::String(text) => write_string(out, text)?,
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item, &format!("{}[{}]", path, i))?;
            }
            out.push(']');
        }
        Value::Object(map) => write_object(out, map, path)?,
    }
    Ok(())
}

fn write_object(
    out: &mut String,
    map: &Map<String, Value>,
    path: &str,
) -> Result<(), CanonicalizationError> {
    // Sort by UTF-16 code units; identical to byte order for the ASCII keys
    // the event document uses, and correct for anything else.
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));

    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(out, key)?;
        out.push(':');
        write_value(out, value, &format!("{}.{}", path, key))?;
    }
    out.push('}');
    Ok(())
}

fn write_string(out: &mut String, text: &str) -> Result<(), CanonicalizationError> {
    // serde_json escapes exactly `"`, `\` and C0 controls, lowercase `\u00xx`.
    out.push_str(&serde_json::to_string(text)?);
    Ok(())
}

fn write_number(out: &mut String, number: &Number, path: &str) -> Result<(), CanonicalizationError> {
    if let Some(n) = number.as_u64() {
        out.push_str(&n.to_string());
    } else if let Some(n) = number.as_i64() {
        out.push_str(&n.to_string());
    } else {
        let n = number
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| CanonicalizationError::NonCanonicalizableValue {
                field: path.to_string(),
            })?;
        out.push_str(&format_float(n));
    }
    Ok(())
}

/// Shortest round-trip decimal, never in exponent form.
fn format_float(n: f64) -> String {
    if n == 0.0 {
        // Covers -0.0.
        return "0".to_string();
    }
    format!("{}", n)
}
