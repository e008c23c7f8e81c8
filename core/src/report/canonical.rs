use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use serde_json::Value;

// Report bytes are stable for a given report value:
// - UTF-8 JSON, no BOM, trailing newline
// - object keys sorted lexicographically at every depth
// - two-space indentation
// - numbers must be finite
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> CoreResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    let normalized = normalize_value(v)?;
    let mut bytes = serde_json::to_vec_pretty(&normalized)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn normalize_value(v: Value) -> CoreResult<Value> {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut out = serde_json::Map::new();
            for (k, vv) in entries {
                out.insert(k, normalize_value(vv)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(arr) => arr
            .into_iter()
            .map(normalize_value)
            .collect::<CoreResult<Vec<_>>>()
            .map(Value::Array),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !f.is_finite() => Err(CoreError::InvalidInput(
                "report numbers must be finite".to_string(),
            )),
            _ => Ok(Value::Number(n)),
        },
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::to_canonical_bytes;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_and_output_is_stable() {
        let a = json!({"b": 1, "a": {"z": [1, 2], "c": 33.33}});
        let first = to_canonical_bytes(&a).unwrap();
        let second = to_canonical_bytes(&a).unwrap();
        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());
        assert!(text.find("\"c\"").unwrap() < text.find("\"z\"").unwrap());
        assert!(text.ends_with("}\n"));
    }
}
