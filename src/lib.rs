//! A two stage parser for a loose JSON dialect. The [lexer] turns a complete input into a flat
//! sequence of tokens, and the [parser] builds a [JsonValue] tree from them by recursive descent.
//!
//! ```
//! use rd_json::{parse, scan, JsonValue};
//!
//! let tokens = scan(r#"[{"a": 1}]"#).unwrap();
//! let (value, remainder) = parse(&tokens, true).unwrap();
//! assert!(remainder.is_empty());
//! assert_eq!(value.as_array().unwrap()[0].get("a"), Some(&JsonValue::Number(1.0)));
//! ```

pub mod coords;
pub mod decoders;
pub mod errors;
pub mod lexer;
pub mod parser;
mod scanner;
#[cfg(test)]
mod test_macros;

pub use lexer::{scan, scan_bytes};
pub use parser::{parse, Parser};

/// Basic enumeration of different Json values
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// Ordered list of pairs. Keys are unique.
    Object(Vec<(String, JsonValue)>),
    /// Array of values
    Array(Vec<JsonValue>),
    /// Raw string value
    String(String),
    /// Floating point numeric value
    Number(f64),
    /// Canonical boolean value
    Boolean(bool),
    /// Canonical null value
    Null,
}

impl JsonValue {
    /// Look up the value for a key, if this is an object
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// The pairs, if this is an object
    pub fn as_object(&self) -> Option<&[(String, JsonValue)]> {
        match self {
            JsonValue::Object(pairs) => Some(pairs.as_slice()),
            _ => None,
        }
    }

    /// The elements, if this is an array
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// The contents, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The flag, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// True if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use crate::{JsonValue, Parser};

    #[test]
    fn should_access_parsed_values() {
        let parsed = Parser::default()
            .parse_str(r#"{"name": "widget", "size": 2.5, "tags": ["a"], "ok": true, "x": null}"#)
            .unwrap();
        assert_eq!(parsed.get("name").and_then(JsonValue::as_str), Some("widget"));
        assert_eq!(parsed.get("size").and_then(JsonValue::as_f64), Some(2.5));
        assert_eq!(parsed.get("tags").and_then(JsonValue::as_array).map(|a| a.len()), Some(1));
        assert_eq!(parsed.get("ok").and_then(JsonValue::as_bool), Some(true));
        assert!(parsed.get("x").unwrap().is_null());
        assert!(parsed.get("missing").is_none());
        assert_eq!(parsed.as_object().unwrap()[1].0, "size");
        assert!(parsed.as_array().is_none());
        assert!(JsonValue::Null.get("name").is_none());
    }
}
