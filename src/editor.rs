//! Interactive editing of stored parameter values.
//!
//! The editor asks for a replacement value per parameter and feeds the answer
//! to [`Param::parse`]. An empty answer keeps the default, `-q` ends the
//! session early, and input that does not fit the parameter's type is
//! reported and asked again. Console I/O goes through the [`Prompter`] trait
//! so sessions can be scripted.

use std::io::{BufRead, Write};

use crate::error::ParafileError;
use crate::param::Param;
use crate::store::ParamStore;
use crate::style;
use crate::types::EditTarget;

/// Answer that ends an edit session.
pub const QUIT: &str = "-q";

/// Line-oriented console access.
pub trait Prompter {
    /// Show `message` and read one line. `None` means input is exhausted.
    /// The line terminator is not included.
    fn ask(&mut self, message: &str) -> Result<Option<String>, ParafileError>;

    /// Show a line of output.
    fn say(&mut self, message: &str);
}

/// [`Prompter`] over the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn ask(&mut self, message: &str) -> Result<Option<String>, ParafileError> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{message}").map_err(ParafileError::Prompt)?;
        stdout.flush().map_err(ParafileError::Prompt)?;

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(ParafileError::Prompt)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Prompt for new values of the targeted parameters.
///
/// `title` names the file being edited in the session banner. Returns how
/// many parameters received an answer.
pub fn edit<P: Prompter + ?Sized>(
    store: &mut ParamStore,
    target: &EditTarget,
    title: &str,
    prompter: &mut P,
) -> Result<usize, ParafileError> {
    if let EditTarget::Key(key) = target
        && !store.exists(&key.to_lowercase())
    {
        return Err(ParafileError::KeyNotFound(key.clone()));
    }

    prompter.say(style::RULE);
    prompter.say(&style::header(&format!("EDITING {title}")));
    prompter.say(style::RULE);

    let mut answered = 0;
    'params: for param in store.iter_mut() {
        if let EditTarget::Key(key) = target
            && param.key() != key.to_lowercase()
        {
            continue;
        }

        loop {
            let Some(answer) = prompter.ask(&question(param))? else {
                break 'params;
            };
            if answer.eq_ignore_ascii_case(QUIT) {
                break 'params;
            }
            match param.parse(&answer) {
                Ok(_) => {
                    answered += 1;
                    break;
                }
                Err(e) => prompter.say(&style::error(&e.to_string())),
            }
        }
    }

    prompter.say(style::RULE);
    Ok(answered)
}

fn question(param: &Param) -> String {
    let options = if param.has_options() {
        format!("\n\tOptions = {}", param.values().join(", "))
    } else {
        String::new()
    };
    format!(
        "\nEnter value for {} ({}){options}\n\tDefault = {}: ",
        style::param(param.name()),
        style::param(param.key()),
        style::value(&param.value().to_string()),
    )
}

/// Ask for the definitions of new parameters until an empty key is entered.
pub fn create_entries<P: Prompter + ?Sized>(prompter: &mut P) -> Result<Vec<Param>, ParafileError> {
    prompter.say(style::RULE);
    prompter.say(&style::header("NEW PARAMETER FILE"));
    prompter.say(&style::muted("Leave the key empty to finish."));
    prompter.say(style::RULE);

    let mut params = Vec::new();
    loop {
        let key = match prompter.ask("\nKey: ")? {
            Some(k) if !k.trim().is_empty() => k.trim().to_string(),
            _ => break,
        };
        let name = prompter.ask("Name: ")?.unwrap_or_default();
        let name = if name.trim().is_empty() {
            key.clone()
        } else {
            name.trim().to_string()
        };
        let default = prompter.ask("Default value: ")?.unwrap_or_default();
        let flag = prompter
            .ask("Flag? [y/N]: ")?
            .is_some_and(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes"));
        let options = prompter
            .ask("Options (comma separated, empty for any): ")?
            .unwrap_or_default();
        let values = options.split(',').map(|o| o.trim().to_string()).collect();

        let param = Param::new(&key, name, default.trim(), flag, values);
        prompter.say(&style::success(&format!("Added {}", param.key())));
        params.push(param);
    }

    prompter.say(style::RULE);
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::fixtures::test::{SAMPLE, ScriptedPrompter};
    use crate::value::Value;

    #[test]
    fn edit_all_parses_each_answer() {
        let mut store = decode(SAMPLE);
        let mut prompter = ScriptedPrompter::new(&["60", "slow", "", "t"]);
        let answered = edit(&mut store, &EditTarget::All, "sample.para", &mut prompter).unwrap();

        assert_eq!(answered, 4);
        assert_eq!(store.get("timeout").unwrap().value(), &Value::Integer(60));
        assert_eq!(store.get("mode").unwrap().value(), &Value::Text("slow".into()));
        assert_eq!(store.get("rate").unwrap().value(), &Value::Float(0.5));
        assert_eq!(store.get("verbose").unwrap().value(), &Value::Boolean(true));
    }

    #[test]
    fn edit_single_key_only_asks_once() {
        let mut store = decode(SAMPLE);
        let mut prompter = ScriptedPrompter::new(&["fast"]);
        let target = EditTarget::Key("MODE".into());
        let answered = edit(&mut store, &target, "sample.para", &mut prompter).unwrap();

        assert_eq!(answered, 1);
        assert_eq!(prompter.questions().len(), 1);
        assert!(prompter.questions()[0].contains("Options = fast, slow"));
    }

    #[test]
    fn edit_unknown_key_errors_before_prompting() {
        let mut store = decode(SAMPLE);
        let mut prompter = ScriptedPrompter::new(&[]);
        let target = EditTarget::Key("ghost".into());
        let result = edit(&mut store, &target, "sample.para", &mut prompter);

        assert!(matches!(result, Err(ParafileError::KeyNotFound(_))));
        assert!(prompter.questions().is_empty());
    }

    #[test]
    fn quit_stops_the_session() {
        let mut store = decode(SAMPLE);
        let mut prompter = ScriptedPrompter::new(&["90", "-Q", "slow"]);
        let answered = edit(&mut store, &EditTarget::All, "sample.para", &mut prompter).unwrap();

        assert_eq!(answered, 1);
        assert_eq!(store.get("timeout").unwrap().value(), &Value::Integer(90));
        assert_eq!(store.get("mode").unwrap().value(), &Value::Text("fast".into()));
    }

    #[test]
    fn exhausted_input_stops_the_session() {
        let mut store = decode(SAMPLE);
        let mut prompter = ScriptedPrompter::new(&["90"]);
        let answered = edit(&mut store, &EditTarget::All, "sample.para", &mut prompter).unwrap();
        assert_eq!(answered, 1);
    }

    #[test]
    fn bad_input_is_asked_again() {
        let mut store = decode(SAMPLE);
        let mut prompter = ScriptedPrompter::new(&["soon", "75", "-q"]);
        edit(&mut store, &EditTarget::All, "sample.para", &mut prompter).unwrap();

        assert_eq!(store.get("timeout").unwrap().value(), &Value::Integer(75));
        assert!(prompter.said().iter().any(|line| line.contains("soon")));
        assert!(prompter.questions()[0].contains("timeout"));
        assert!(prompter.questions()[1].contains("timeout"));
    }

    #[test]
    fn empty_answer_restores_default_not_current() {
        let mut store = decode(SAMPLE);
        store.get_mut("timeout").unwrap().parse("90").unwrap();
        let mut prompter = ScriptedPrompter::new(&["", "-q"]);
        edit(&mut store, &EditTarget::All, "sample.para", &mut prompter).unwrap();

        assert_eq!(store.get("timeout").unwrap().value(), &Value::Integer(30));
    }

    #[test]
    fn separator_in_answer_is_asked_again() {
        let mut store = decode(SAMPLE);
        let target = EditTarget::Key("mode".into());
        let mut prompter = ScriptedPrompter::new(&["fast|slow", "slow"]);
        let answered = edit(&mut store, &target, "sample.para", &mut prompter).unwrap();

        assert_eq!(answered, 1);
        assert_eq!(prompter.questions().len(), 2);
        assert_eq!(store.get("mode").unwrap().value(), &Value::Text("slow".into()));
    }

    #[test]
    fn option_typo_falls_back_silently() {
        let mut store = decode(SAMPLE);
        let mut prompter = ScriptedPrompter::new(&["", "slw", "-q"]);
        edit(&mut store, &EditTarget::All, "sample.para", &mut prompter).unwrap();

        assert_eq!(store.get("mode").unwrap().value(), &Value::Text("fast".into()));
        assert!(!prompter.said().iter().any(|line| line.contains("slw")));
    }

    #[test]
    fn create_entries_until_empty_key() {
        let mut prompter = ScriptedPrompter::new(&[
            "Timeout", "Request timeout", "30", "", "",
            "mode", "", "fast", "y", "fast, slow",
            "",
        ]);
        let params = create_entries(&mut prompter).unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].key(), "timeout");
        assert_eq!(params[0].name(), "Request timeout");
        assert_eq!(params[0].value(), &Value::Integer(30));
        assert!(!params[0].has_options());
        assert_eq!(params[1].name(), "mode");
        assert!(params[1].is_flag());
        assert_eq!(params[1].values(), ["fast", "slow"]);
    }

    #[test]
    fn create_entries_stops_at_end_of_input() {
        let mut prompter = ScriptedPrompter::new(&["a", "A", "1", "n", ""]);
        let params = create_entries(&mut prompter).unwrap();
        assert_eq!(params.len(), 1);
    }
}
