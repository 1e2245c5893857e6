use serde::{Deserialize, Serialize};

/// One mapping entry as persisted in the column.
///
/// Field names are fixed: previously written rows depend on them.
/// - `transformed = true`: `value` is a JSON string holding canonical text,
///   `kind` says how to parse it.
/// - `transformed = false`: `value` is the native JSON value, `kind` is
///   informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    #[serde(rename = "k")]
    pub key: String,
    #[serde(rename = "v")]
    pub value: serde_json::Value,
    #[serde(rename = "t")]
    pub kind: String,
    #[serde(rename = "b")]
    pub transformed: bool,
}

impl Record {
    /// Record holding canonical text.
    pub fn text(key: impl Into<String>, kind: &str, text: String) -> Self {
        Self {
            key: key.into(),
            value: serde_json::Value::String(text),
            kind: kind.to_string(),
            transformed: true,
        }
    }

    /// Record holding a native JSON value.
    pub fn native(key: impl Into<String>, kind: &str, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
            kind: kind.to_string(),
            transformed: false,
        }
    }
}
