//! A closed view of one field in a generic document tree.
//!
//! Both the JSON and TOML front-ends hand us loosely typed trees. Rather than probing
//! those trees ad hoc, a looked up field is first converted into a [`FieldValue`] and
//! then matched exhaustively by the decoders.

use std::fmt::Display;

/// A field value reduced to the variants the decoders care about.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// The key is absent, or the document is not a mapping at all.
    Missing,
    String(String),
    /// A JSON number. JSON does not distinguish integers from floats.
    Number(f64),
    /// A TOML integer.
    Integer(i64),
    /// A nested mapping, kept in rendered form for diagnostics.
    Object(String),
    /// Anything else: booleans, nulls, arrays, TOML floats and datetimes.
    Other { kind: &'static str, rendered: String },
}

impl FieldValue {
    /// Look up `key` in a JSON document.
    pub fn from_json(document: &serde_json::Value, key: &str) -> Self {
        match document.get(key) {
            None => FieldValue::Missing,
            Some(serde_json::Value::String(s)) => FieldValue::String(s.clone()),
            // Any finite JSON number is representable as f64
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Other {
                    kind: "number",
                    rendered: n.to_string(),
                },
            },
            Some(value @ serde_json::Value::Object(_)) => FieldValue::Object(value.to_string()),
            Some(value @ serde_json::Value::Bool(_)) => FieldValue::Other {
                kind: "boolean",
                rendered: value.to_string(),
            },
            Some(value @ serde_json::Value::Null) => FieldValue::Other {
                kind: "null",
                rendered: value.to_string(),
            },
            Some(value @ serde_json::Value::Array(_)) => FieldValue::Other {
                kind: "array",
                rendered: value.to_string(),
            },
        }
    }

    /// Look up `key` in a TOML document.
    pub fn from_toml(document: &toml::Value, key: &str) -> Self {
        let Some(table) = document.as_table() else {
            return FieldValue::Missing;
        };

        match table.get(key) {
            None => FieldValue::Missing,
            Some(toml::Value::String(s)) => FieldValue::String(s.clone()),
            Some(toml::Value::Integer(i)) => FieldValue::Integer(*i),
            Some(value @ toml::Value::Table(_)) => FieldValue::Object(value.to_string()),
            Some(value @ toml::Value::Float(_)) => FieldValue::Other {
                kind: "float",
                rendered: value.to_string(),
            },
            Some(value @ toml::Value::Boolean(_)) => FieldValue::Other {
                kind: "boolean",
                rendered: value.to_string(),
            },
            Some(value @ toml::Value::Datetime(_)) => FieldValue::Other {
                kind: "datetime",
                rendered: value.to_string(),
            },
            Some(value @ toml::Value::Array(_)) => FieldValue::Other {
                kind: "array",
                rendered: value.to_string(),
            },
        }
    }

    /// Name of the dynamic type, as reported in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Missing => "missing",
            FieldValue::String(_) => "string",
            FieldValue::Number(_) => "number",
            FieldValue::Integer(_) => "integer",
            FieldValue::Object(_) => "object",
            FieldValue::Other { kind, .. } => kind,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Missing => write!(f, "nothing"),
            FieldValue::String(s) => write!(f, "{s:?}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Object(rendered) | FieldValue::Other { rendered, .. } => {
                write!(f, "{rendered}")
            }
        }
    }
}
