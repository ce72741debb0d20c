//! Compatibility shims for pipeline artifacts written by other exporter
//! versions.
//!
//! A shim is looked up by the signature of the deserialization error it
//! answers. It rewrites the untyped JSON document into the form this reader
//! understands; the loader then retries deserialization exactly once. The
//! table is static, so applying a shim never touches shared state.

use serde_json::Value;

/// One known incompatibility and its rewrite.
#[derive(Debug)]
pub struct CompatShim {
    pub name: &'static str,
    /// Substring of the deserialization error this shim answers.
    pub signature: &'static str,
    /// Rewrite the document in place; returns how many nodes changed.
    pub apply: fn(&mut Value) -> usize,
}

/// Every shim this reader knows, checked in order.
pub static SHIMS: &[CompatShim] = &[CompatShim {
    name: "remainder-cols-list",
    signature: "unknown variant `_RemainderColsList`",
    apply: rename_remainder_cols_list,
}];

/// Find the shim whose signature appears in `error`.
#[must_use]
pub fn find_shim(error: &serde_json::Error) -> Option<&'static CompatShim> {
    let message = error.to_string();
    SHIMS.iter().find(|shim| message.contains(shim.signature))
}

/// Newer exporters tag remainder column lists with their own list subtype,
/// `_RemainderColsList`. It carries the same `names` payload as a plain list.
fn rename_remainder_cols_list(document: &mut Value) -> usize {
    match document {
        Value::Object(map) => {
            let mut changed = 0;
            if map.get("kind").and_then(Value::as_str) == Some("_RemainderColsList") {
                map.insert("kind".into(), Value::String("list".into()));
                changed += 1;
            }
            changed + map.values_mut().map(rename_remainder_cols_list).sum::<usize>()
        }
        Value::Array(items) => items.iter_mut().map(rename_remainder_cols_list).sum(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::pipeline::ColumnList;

    #[test]
    fn remainder_list_error_has_a_shim() {
        let error = serde_json::from_value::<ColumnList>(
            json!({"kind": "_RemainderColsList", "names": ["DailyRate"]}),
        )
        .unwrap_err();

        let shim = find_shim(&error).expect("shim should match");
        assert_eq!(shim.name, "remainder-cols-list");
    }

    #[test]
    fn unrelated_errors_have_no_shim() {
        let error =
            serde_json::from_value::<ColumnList>(json!({"kind": "tuple", "names": []})).unwrap_err();
        assert!(find_shim(&error).is_none());
    }

    #[test]
    fn rename_rewrites_nested_nodes_and_is_idempotent() {
        let mut document = json!({
            "preprocessor": {
                "remainder": {"columns": {"kind": "_RemainderColsList", "names": ["A"]}},
                "transformers": [{"columns": {"kind": "_RemainderColsList", "names": []}}]
            }
        });

        assert_eq!(rename_remainder_cols_list(&mut document), 2);
        assert_eq!(
            document["preprocessor"]["remainder"]["columns"]["kind"],
            "list"
        );
        assert_eq!(rename_remainder_cols_list(&mut document), 0);

        let list: ColumnList =
            serde_json::from_value(document["preprocessor"]["remainder"]["columns"].clone())
                .expect("shimmed list deserializes");
        assert_eq!(list.names(), ["A".to_string()]);
    }
}
