//! Parameter operations behind the CLI subcommands, and the `ParamResult` enum
//! callers use to display results.

use std::fmt;
use std::path::PathBuf;

use crate::error::ParafileError;
use crate::params::Params;

/// Result of a parameter operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamResult {
    /// Every parameter with its resolved value, in file order.
    Listing { entries: Vec<(String, String)> },
    /// Stored values as a JSON object.
    Json(String),
    /// One parameter's resolved value, display name and allowed values.
    KeyValue {
        key: String,
        name: String,
        value: String,
        options: Vec<String>,
    },
    /// Confirmation that a value was parsed and saved.
    ValueSet { key: String, value: String },
    /// Confirmation that a parameter was added to the file.
    ParamAdded { key: String },
    /// Summary of an edit session.
    Edited { path: PathBuf, count: usize },
}

impl fmt::Display for ParamResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ParamResult::Json(json) => write!(f, "{json}"),
            ParamResult::KeyValue {
                key,
                name,
                value,
                options,
            } => {
                writeln!(f, "# {name}")?;
                if !options.is_empty() {
                    writeln!(f, "# options: {}", options.join(", "))?;
                }
                write!(f, "{key} = {value}")
            }
            ParamResult::ValueSet { key, value } => write!(f, "Set {key} = {value}"),
            ParamResult::ParamAdded { key } => write!(f, "Added {key}"),
            ParamResult::Edited { path, count } => {
                write!(f, "Updated {count} value(s) in {}", path.display())
            }
        }
    }
}

/// List every stored parameter with its resolved value.
///
/// Values go through the same lookup as [`Params::get`], so overrides show.
pub fn list_values(params: &Params) -> ParamResult {
    let entries = params
        .list_keys()
        .into_iter()
        .map(|key| {
            let value = params
                .get(&key)
                .map(|v| v.to_string())
                .unwrap_or_default();
            (key, value)
        })
        .collect();
    ParamResult::Listing { entries }
}

/// Look up one stored parameter.
pub fn get_value(params: &Params, key: &str) -> Result<ParamResult, ParafileError> {
    let param = params
        .param(key)
        .ok_or_else(|| ParafileError::KeyNotFound(key.into()))?;
    Ok(ParamResult::KeyValue {
        key: param.key().to_string(),
        name: param.name().to_string(),
        value: params.get(key)?.to_string(),
        options: param.values().to_vec(),
    })
}
