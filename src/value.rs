//! The typed scalar behind every parameter.
//!
//! A parameter file is plain text, so every value starts life as a string.
//! [`Value::infer`] decides once which of the four classes a default belongs
//! to; after that, new input is [`coerce`](Value::coerce)d into the same class
//! so a numeric parameter stays numeric across edits and overrides.
//!
//! Inference order:
//!
//! 1. `t`, `f`, `true`, `false` (any case, surrounding whitespace ignored) → [`Value::Boolean`]
//! 2. a decimal integer with optional sign → [`Value::Integer`]
//! 3. a finite floating-point literal (`5.0`, `.5`, `1e3`) → [`Value::Float`]
//! 4. anything else → [`Value::Text`]

use std::fmt;

use serde::Serialize;

/// A parameter value. Serializes as the bare scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Infer the value class from raw text.
    pub fn infer(raw: &str) -> Value {
        if let Some(b) = bool_token(raw) {
            return Value::Boolean(b);
        }
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Some(f) = parse_float(trimmed) {
            return Value::Float(f);
        }
        Value::Text(raw.to_string())
    }

    /// Parse `raw` into the same class as `self`.
    ///
    /// Returns `None` when `raw` is not a valid representation of that class.
    /// Text accepts anything.
    pub fn coerce(&self, raw: &str) -> Option<Value> {
        match self {
            Value::Integer(_) => raw.trim().parse::<i64>().ok().map(Value::Integer),
            Value::Float(_) => parse_float(raw.trim()).map(Value::Float),
            Value::Boolean(_) => bool_token(raw).map(Value::Boolean),
            Value::Text(_) => Some(Value::Text(raw.to_string())),
        }
    }

    /// Human name of the value class, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Text(_) => "string",
        }
    }

    /// True if both values belong to the same class.
    pub fn same_class(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(String::new())
    }
}

/// Rendering used both for display and for the file's value column.
///
/// Floats always keep a fractional part or exponent so that `5.0` is written
/// back as `5.0` and re-infers as a float on the next load.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Match the boolean tokens `t`, `f`, `true`, `false`, ignoring case and
/// surrounding whitespace.
pub(crate) fn bool_token(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "t" | "true" => Some(true),
        "f" | "false" => Some(false),
        _ => None,
    }
}

// "inf" and "nan" parse as f64 but are words, not numbers.
fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_reference_inputs() {
        assert_eq!(Value::infer("5"), Value::Integer(5));
        assert_eq!(Value::infer("5.0"), Value::Float(5.0));
        assert_eq!(Value::infer("true"), Value::Boolean(true));
        assert_eq!(Value::infer("False"), Value::Boolean(false));
        assert_eq!(Value::infer("hello"), Value::Text("hello".into()));
        assert_eq!(Value::infer("-3"), Value::Integer(-3));
    }

    #[test]
    fn infer_single_letter_booleans() {
        assert_eq!(Value::infer("t"), Value::Boolean(true));
        assert_eq!(Value::infer(" F "), Value::Boolean(false));
    }

    #[test]
    fn infer_float_forms() {
        assert_eq!(Value::infer("-2.5"), Value::Float(-2.5));
        assert_eq!(Value::infer("1e3"), Value::Float(1000.0));
        assert_eq!(Value::infer(".5"), Value::Float(0.5));
    }

    #[test]
    fn infer_words_that_rust_parses_as_float_stay_text() {
        assert_eq!(Value::infer("inf"), Value::Text("inf".into()));
        assert_eq!(Value::infer("NaN"), Value::Text("NaN".into()));
    }

    #[test]
    fn infer_empty_is_text() {
        assert_eq!(Value::infer(""), Value::Text(String::new()));
    }

    #[test]
    fn infer_dotted_version_is_text() {
        assert_eq!(Value::infer("1.2.3"), Value::Text("1.2.3".into()));
    }

    #[test]
    fn coerce_keeps_class() {
        assert_eq!(Value::Float(1.0).coerce("3"), Some(Value::Float(3.0)));
        assert_eq!(Value::Integer(1).coerce(" 42 "), Some(Value::Integer(42)));
        assert_eq!(Value::Text("a".into()).coerce("7"), Some(Value::Text("7".into())));
        assert_eq!(Value::Boolean(false).coerce("T"), Some(Value::Boolean(true)));
    }

    #[test]
    fn coerce_rejects_wrong_representation() {
        assert_eq!(Value::Integer(1).coerce("2.5"), None);
        assert_eq!(Value::Integer(1).coerce("abc"), None);
        assert_eq!(Value::Float(1.0).coerce("abc"), None);
        assert_eq!(Value::Boolean(true).coerce("maybe"), None);
    }

    #[test]
    fn float_display_round_trips_as_float() {
        for f in [5.0, 0.1, -3.25, 1e20] {
            let shown = Value::Float(f).to_string();
            assert_eq!(Value::infer(&shown), Value::Float(f), "{shown}");
        }
    }

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Integer(30).to_string(), "30");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Text("fast".into()).to_string(), "fast");
    }

    #[test]
    fn serializes_as_bare_scalar() {
        let json = serde_json::to_string(&vec![
            Value::Integer(1),
            Value::Float(1.5),
            Value::Boolean(false),
            Value::Text("x".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"[1,1.5,false,"x"]"#);
    }

    #[test]
    fn as_f64_widens_integers() {
        assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
        assert_eq!(Value::Text("2".into()).as_f64(), None);
    }
}
