//! Turn process arguments into key → raw value overrides.
//!
//! The convention is `-key value` pairs:
//!
//! - A token starting with `-` names a key. Leading dashes are stripped and the
//!   key is lowercased, so `--Timeout` and `-timeout` are the same key.
//! - The token after a key is its value, unless it also starts with `-` and is
//!   not a number. Then the first key is a boolean switch (`"true"`) and the
//!   token starts the next key. `-offset -5` sets `offset` to `-5`;
//!   `-verbose -debug` sets both to `true`.
//! - A key with nothing after it is a switch as well.
//!
//! Values are kept as raw text. Typing happens later, against the stored
//! parameter the override applies to.

use indexmap::IndexMap;
use tracing::warn;

use crate::error::ParafileError;

/// Raw value recorded for a key given without a value.
pub const SWITCH_VALUE: &str = "true";

/// Parsed overrides in first-seen order. Later occurrences of a key win.
pub type Overrides = IndexMap<String, String>;

/// Parse argument tokens (without the program name) into overrides.
///
/// A value token with no key before it is skipped with a warning, or rejected
/// with [`ParafileError::UnexpectedArgument`] when `strict` is set.
pub fn parse_args<I, S>(args: I, strict: bool) -> Result<Overrides, ParafileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut overrides = Overrides::new();
    let mut pending: Option<String> = None;

    for arg in args {
        let arg = arg.as_ref();
        match pending.take() {
            None => {
                if arg.starts_with('-') {
                    pending = key_from(arg);
                } else if strict {
                    return Err(ParafileError::UnexpectedArgument(arg.into()));
                } else {
                    warn!(argument = arg, "ignoring argument without a preceding -key");
                }
            }
            Some(key) => {
                if arg.starts_with('-') && !is_number(arg) {
                    overrides.insert(key, SWITCH_VALUE.to_string());
                    pending = key_from(arg);
                } else {
                    overrides.insert(key, arg.to_string());
                }
            }
        }
    }

    if let Some(key) = pending {
        overrides.insert(key, SWITCH_VALUE.to_string());
    }

    Ok(overrides)
}

/// `--Some-Key` → `some-key`. A token of only dashes names nothing.
fn key_from(token: &str) -> Option<String> {
    let key = token.trim_start_matches('-');
    if key.is_empty() {
        None
    } else {
        Some(key.to_lowercase())
    }
}

fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}
