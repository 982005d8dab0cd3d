//! A single named, typed, defaulted parameter.

use std::fmt;

use tracing::warn;

use crate::error::ParafileError;
use crate::value::{Value, bool_token};

/// Token written in the fourth column for flag parameters.
pub const FLAG_TOKEN: &str = "flag";

/// One parameter: the unit of a parameter file line.
///
/// The default fixes the value class. New input is parsed into that class,
/// and when an options list is present, anything outside it silently falls
/// back to the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    key: String,
    name: String,
    default: Value,
    flag: bool,
    values: Vec<String>,
    value: Value,
}

impl Param {
    /// Build a parameter, inferring the class of `default_raw`.
    ///
    /// The key is lowercased. Never fails: text that is not a boolean or a
    /// number is kept as a string.
    pub fn new(
        key: impl AsRef<str>,
        name: impl Into<String>,
        default_raw: &str,
        flag: bool,
        values: Vec<String>,
    ) -> Self {
        let key = key.as_ref().to_lowercase();
        let default = Value::infer(default_raw);
        let param = Self {
            key,
            name: name.into(),
            value: default.clone(),
            default,
            flag,
            values,
        };
        if param.has_options() && !param.values.iter().any(|v| v == default_raw) {
            warn!(
                key = %param.key,
                default = default_raw,
                "default is not one of the allowed options"
            );
        }
        param
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Inert metadata: recorded and written back, never interpreted.
    pub fn is_flag(&self) -> bool {
        self.flag
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// True when assignments are restricted to [`values`](Self::values).
    ///
    /// A list holding a single empty string (what an empty options column
    /// decodes to) means unconstrained.
    pub fn has_options(&self) -> bool {
        self.values.first().is_some_and(|first| !first.is_empty())
    }

    /// Parse new textual input into the current value.
    ///
    /// - With options: an exact member is accepted in the default's class,
    ///   anything else reverts to the default without an error.
    /// - Without options: an empty string reverts to the default, a boolean
    ///   token becomes a boolean, and anything else is coerced into the
    ///   default's class. A failed coercion is a [`ParafileError::Parse`] and
    ///   leaves the current value unchanged.
    ///
    /// Text containing `|` or a line break cannot be stored in a column and
    /// is rejected with [`ParafileError::Parse`] in either mode.
    pub fn parse(&mut self, raw: &str) -> Result<&Value, ParafileError> {
        check_cell(&self.key, raw)?;

        if self.has_options() {
            self.value = if self.values.iter().any(|v| v == raw) {
                self.option_value(raw)
            } else {
                self.default.clone()
            };
            return Ok(&self.value);
        }

        if raw.is_empty() {
            self.value = self.default.clone();
        } else if let Some(b) = bool_token(raw) {
            self.value = Value::Boolean(b);
        } else {
            self.value = self
                .default
                .coerce(raw)
                .ok_or_else(|| ParafileError::Parse {
                    key: self.key.clone(),
                    raw: raw.to_string(),
                    expected: self.default.type_name(),
                })?;
        }
        Ok(&self.value)
    }

    /// Assign a value directly, under the same options policy as
    /// [`parse`](Self::parse).
    pub fn set_value(&mut self, value: Value) -> Result<(), ParafileError> {
        let rendered = value.to_string();
        check_cell(&self.key, &rendered)?;

        if self.has_options() {
            self.value = if self.values.iter().any(|v| *v == rendered) {
                self.option_value(&rendered)
            } else {
                self.default.clone()
            };
            return Ok(());
        }
        self.value = value;
        Ok(())
    }

    // An option listed in the file may not fit the default's class (`auto`
    // among integers); it is then stored as inferred.
    fn option_value(&self, raw: &str) -> Value {
        self.default.coerce(raw).unwrap_or_else(|| Value::infer(raw))
    }

    /// Reset the current value to the default.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    /// The five file columns: key, name, value, flag token, options.
    pub fn render(&self) -> [String; 5] {
        [
            self.key.clone(),
            self.name.clone(),
            self.value.to_string(),
            if self.flag {
                FLAG_TOKEN.to_string()
            } else {
                String::new()
            },
            self.values.join(", "),
        ]
    }
}

/// Reject text that would split or break a file line.
pub(crate) fn check_cell(key: &str, raw: &str) -> Result<(), ParafileError> {
    if raw.contains(['|', '\n', '\r']) {
        return Err(ParafileError::Parse {
            key: key.to_string(),
            raw: raw.to_string(),
            expected: "single-line value without '|'",
        });
    }
    Ok(())
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: {}   Name: {}   Default: {}   Flag: {}   Options: {:?}   Value: {}",
            self.key, self.name, self.default, self.flag, self.values, self.value
        )
    }
}
