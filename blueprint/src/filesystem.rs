use crate::error::{DecodeError, Format};
use crate::size::parse_size;
use crate::value::FieldValue;
use std::borrow::Cow;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

/// JSON and TOML blueprints name the size attribute differently. Existing files depend
/// on both names, so neither decoder accepts the other's key.
const JSON_SIZE_KEY: &str = "minsize";
const TOML_SIZE_KEY: &str = "size";

/// Declares a filesystem that must exist in the built image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilesystemCustomization {
    /// Where the filesystem is attached
    pub mountpoint: String,

    /// Minimum size of the filesystem in bytes
    pub min_size: u64,
}

/// The numeric representation a format uses for sizes.
#[derive(Clone, Copy)]
enum NumericSize {
    /// JSON numbers, which may carry a fraction
    Number,
    /// TOML integers
    Integer,
}

impl NumericSize {
    fn expected(self) -> &'static str {
        match self {
            NumericSize::Number => "number or string",
            NumericSize::Integer => "integer or string",
        }
    }
}

fn mismatch(
    format: Format,
    field: &'static str,
    expected: &'static str,
    value: &FieldValue,
) -> DecodeError {
    DecodeError::TypeMismatch {
        format,
        field,
        expected,
        value: value.to_string(),
        kind: value.kind(),
    }
}

fn expect_string(
    format: Format,
    field: &'static str,
    value: FieldValue,
) -> Result<String, DecodeError> {
    match value {
        FieldValue::String(s) => Ok(s),
        other => Err(mismatch(format, field, "string", &other)),
    }
}

fn expect_size(
    format: Format,
    field: &'static str,
    numeric: NumericSize,
    value: FieldValue,
) -> Result<u64, DecodeError> {
    let out_of_range = |value: &FieldValue| DecodeError::SizeOutOfRange {
        format,
        field,
        value: value.to_string(),
    };

    match (numeric, &value) {
        (_, FieldValue::String(s)) => {
            parse_size(s).map_err(|source| DecodeError::InvalidSizeFormat {
                format,
                field,
                source,
            })
        }
        (NumericSize::Number, FieldValue::Number(n)) => {
            // u64::MAX rounds up to 2^64 as a float, so that bound is exclusive
            if *n < 0.0 || *n >= u64::MAX as f64 {
                return Err(out_of_range(&value));
            }
            // Fractional bytes are truncated
            Ok(*n as u64)
        }
        (NumericSize::Integer, FieldValue::Integer(i)) => {
            u64::try_from(*i).map_err(|_| out_of_range(&value))
        }
        _ => Err(mismatch(format, field, numeric.expected(), &value)),
    }
}

impl FilesystemCustomization {
    /// Decode a customization from the raw bytes of a JSON object with `mountpoint`
    /// and `minsize` keys.
    pub fn decode_json(raw: &[u8]) -> Result<Self, DecodeError> {
        let document: serde_json::Value =
            serde_json::from_slice(raw).map_err(|source| DecodeError::MalformedInput {
                format: Format::Json,
                source: Box::new(source),
            })?;

        Self::decode_json_value(&document)
    }

    /// Decode a customization from an already parsed JSON document.
    pub fn decode_json_value(document: &serde_json::Value) -> Result<Self, DecodeError> {
        let mountpoint = expect_string(
            Format::Json,
            "mountpoint",
            FieldValue::from_json(document, "mountpoint"),
        )?;
        let min_size = expect_size(
            Format::Json,
            JSON_SIZE_KEY,
            NumericSize::Number,
            FieldValue::from_json(document, JSON_SIZE_KEY),
        )?;

        debug!(mountpoint = %mountpoint, min_size, "Decoded filesystem customization from JSON");
        Ok(Self {
            mountpoint,
            min_size,
        })
    }

    /// Decode a customization from a TOML table with `mountpoint` and `size` keys.
    pub fn decode_toml(document: &toml::Value) -> Result<Self, DecodeError> {
        let mountpoint = expect_string(
            Format::Toml,
            "mountpoint",
            FieldValue::from_toml(document, "mountpoint"),
        )?;
        let min_size = expect_size(
            Format::Toml,
            TOML_SIZE_KEY,
            NumericSize::Integer,
            FieldValue::from_toml(document, TOML_SIZE_KEY),
        )?;

        debug!(mountpoint = %mountpoint, min_size, "Decoded filesystem customization from TOML");
        Ok(Self {
            mountpoint,
            min_size,
        })
    }

    /// Parse TOML text and decode it with [`FilesystemCustomization::decode_toml`].
    pub fn decode_toml_str(text: &str) -> Result<Self, DecodeError> {
        let document: toml::Value =
            toml::from_str(text).map_err(|source| DecodeError::MalformedInput {
                format: Format::Toml,
                source: Box::new(source),
            })?;

        Self::decode_toml(&document)
    }

    /// Decode with whichever decoder matches `format`.
    pub fn decode(format: Format, raw: &[u8]) -> Result<Self, DecodeError> {
        match format {
            Format::Json => Self::decode_json(raw),
            Format::Toml => {
                let text = std::str::from_utf8(raw).map_err(|source| DecodeError::MalformedInput {
                    format: Format::Toml,
                    source: Box::new(source),
                })?;
                Self::decode_toml_str(text)
            }
        }
    }

    /// Encode as a JSON object using the JSON key names.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "mountpoint": self.mountpoint,
            JSON_SIZE_KEY: self.min_size,
        })
    }

    /// Encode as a TOML table using the TOML key names.
    pub fn to_toml(&self) -> toml::Table {
        let mut table = toml::Table::new();
        table.insert(
            "mountpoint".to_string(),
            toml::Value::String(self.mountpoint.clone()),
        );

        // TOML integers are signed, so the largest sizes are written as a byte string
        let size = match i64::try_from(self.min_size) {
            Ok(size) => toml::Value::Integer(size),
            Err(_) => toml::Value::String(self.min_size.to_string()),
        };
        table.insert(TOML_SIZE_KEY.to_string(), size);
        table
    }
}

impl Validate for FilesystemCustomization {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let problem = if !self.mountpoint.starts_with('/') {
            Some("Mountpoint must be an absolute path")
        } else if self.mountpoint != "/" && self.mountpoint.ends_with('/') {
            Some("Mountpoint must not end with a slash")
        } else if self
            .mountpoint
            .split('/')
            .skip(1)
            .any(|component| matches!(component, "." | ".."))
        {
            Some("Mountpoint must not contain relative components")
        } else if self.mountpoint.contains("//") {
            Some("Mountpoint must not contain empty components")
        } else {
            None
        };

        match problem {
            Some(message) => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "mountpoint",
                    ValidationError::new("mountpoint").with_message(Cow::Borrowed(message)),
                );
                Err(errors)
            }
            None => Ok(()),
        }
    }
}
