//! Conversion of a raw quote into InfluxDB tags and fields.

use serde_json::Value;
use stockdata_api::types::QuoteRecord;

use crate::error::StockDataError;
use crate::normalize::camel_to_snake;

/// The kind of a single quote value.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteValue {
    /// Text that does not parse as a finite number becomes a tag.
    Text(String),
    /// Numbers, numeric text, and booleans become fields. `true`/`false` map
    /// to `1.0`/`0.0`.
    Number(f64),
    /// Null values and empty text are dropped.
    Null,
}

impl QuoteValue {
    /// Classifies `value`. Arrays and nested objects have no place in a flat
    /// quote and are rejected.
    pub fn classify(key: &str, value: &Value) -> Result<Self, StockDataError> {
        match value {
            Value::Null => Ok(QuoteValue::Null),
            Value::String(s) if s.is_empty() => Ok(QuoteValue::Null),
            Value::String(s) => Ok(match s.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => QuoteValue::Number(number),
                _ => QuoteValue::Text(s.clone()),
            }),
            Value::Bool(b) => Ok(QuoteValue::Number(if *b { 1.0 } else { 0.0 })),
            Value::Number(n) => n
                .as_f64()
                .map(QuoteValue::Number)
                .ok_or_else(|| StockDataError::Conversion {
                    key: key.to_string(),
                    kind: "number",
                }),
            Value::Array(_) => Err(StockDataError::Conversion {
                key: key.to_string(),
                kind: "array",
            }),
            Value::Object(_) => Err(StockDataError::Conversion {
                key: key.to_string(),
                kind: "object",
            }),
        }
    }
}

/// A quote split into line-protocol tags and fields.
///
/// Keys are normalized to snake case and escaped; tag values are escaped.
/// Both lists keep the order of the source record and never share a key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedRecord {
    pub tags: Vec<(String, String)>,
    pub fields: Vec<(String, f64)>,
}

impl ConvertedRecord {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, key: &str) -> Option<f64> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    fn remove(&mut self, key: &str) {
        self.tags.retain(|(k, _)| k != key);
        self.fields.retain(|(k, _)| k != key);
    }

    fn insert_tag(&mut self, key: String, value: String) {
        self.remove(&key);
        self.tags.push((key, value));
    }

    fn insert_field(&mut self, key: String, value: f64) {
        self.remove(&key);
        self.fields.push((key, value));
    }
}

/// Converts one quote record. Two source keys that normalize to the same name
/// collapse into one entry, the later one winning.
pub fn convert_record(record: &QuoteRecord) -> Result<ConvertedRecord, StockDataError> {
    let mut converted = ConvertedRecord::default();
    for (key, value) in record {
        let normalized = escape_tag(&camel_to_snake(key));
        match QuoteValue::classify(key, value)? {
            QuoteValue::Text(text) => converted.insert_tag(normalized, escape_tag(&text)),
            QuoteValue::Number(number) => converted.insert_field(normalized, number),
            QuoteValue::Null => {}
        }
    }
    Ok(converted)
}

/// Escapes a tag key, tag value, or field key for line protocol: commas,
/// equals signs, and spaces get a backslash. Line breaks cannot be escaped
/// and are replaced by an escaped space.
pub fn escape_tag(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if matches!(c, '\n' | '\r') { ' ' } else { c };
        if matches!(c, ',' | '=' | ' ') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
