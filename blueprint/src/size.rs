use byte_unit::{Byte, UnitType};
use std::fmt::Display;
use thiserror::Error;

/// A size string that does not match the size grammar.
#[derive(Debug, Error)]
#[error("invalid data size {input:?}: {source}")]
pub struct SizeError {
    input: String,
    #[source]
    source: byte_unit::ParseError,
}

impl SizeError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Resolve a human readable size such as "10GiB" or "500 MB" to a byte count.
///
/// Binary units (KiB, MiB, GiB, ...) are powers of 1024 and decimal units (kB, MB,
/// GB, ...) are powers of 1000. Units are case insensitive and always count bytes. A
/// bare number is a count of bytes. Fractional bytes are truncated.
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let trimmed = input.trim();
    let error = |source: byte_unit::ParseError| SizeError {
        input: input.to_string(),
        source,
    };

    // byte-unit rounds a fractional byte count up
    let rounded = Byte::parse_str(trimmed, true).map_err(error)?.as_u64();

    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let Some((whole, fraction)) = number.split_once('.') else {
        return Ok(rounded);
    };

    let unit_bytes = Byte::parse_str(&format!("1{}", unit.trim()), true)
        .map_err(error)?
        .as_u64() as u128;
    let fraction = &fraction[..fraction.len().min(12)];
    let scale = 10u128.pow(fraction.len() as u32);

    let whole = whole.parse::<u128>().unwrap_or(0);
    let fraction = fraction.parse::<u128>().unwrap_or(0);
    let truncated = whole * unit_bytes + fraction * unit_bytes / scale;

    Ok(u64::try_from(truncated).unwrap_or(rounded).min(rounded))
}

/// A byte count rendered in the largest binary unit that fits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size(pub u64);

impl Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let adjusted = Byte::from_u64(self.0).get_appropriate_unit(UnitType::Binary);
        write!(f, "{adjusted:.2}")
    }
}
