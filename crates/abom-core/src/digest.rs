//! Canonical JSON and SHA-256 digests of submitted documents.
//!
//! Object keys are ordered by UTF-16 code units and integer-valued floats are
//! written as integers, so two documents that differ only in key order or in
//! `1` versus `1.0` share a digest.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

fn write_canonical(value: &Value, out: &mut String) -> Result<()> {
    match value {
        // `Map` orders keys by bytes, so the UTF-16 order is applied while writing.
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));

            out.push('{');
            for (i, (key, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(v, out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        Value::Number(n) => match n.as_f64() {
            Some(f)
                if !(n.is_i64() || n.is_u64())
                    && f.fract() == 0.0
                    && f >= i64::MIN as f64
                    && f <= i64::MAX as f64 =>
            {
                out.push_str(&(f as i64).to_string());
            }
            _ => out.push_str(&n.to_string()),
        },
        other => out.push_str(&serde_json::to_string(other)?),
    }
    Ok(())
}

/// Compact canonical JSON text of `value`.
pub fn canonical_json(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

/// Hex-encoded SHA-256 of the canonical JSON of `value`.
pub fn compute_digest(value: &Value) -> Result<String> {
    let canonical = canonical_json(value)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}
