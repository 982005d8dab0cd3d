//! Console styling for the interactive editor and the CLI.
//!
//! Plain functions from text to styled text. `colored` decides per call
//! whether to emit escape codes (`NO_COLOR`, `CLICOLOR`, tty detection), so
//! nothing here holds state.

use colored::Colorize;

/// Horizontal rule framing an edit session.
pub const RULE: &str = "------------------------------";

pub fn header(text: &str) -> String {
    text.bold().magenta().to_string()
}

/// A parameter name or key.
pub fn param(text: &str) -> String {
    text.cyan().to_string()
}

/// A current or default value.
pub fn value(text: &str) -> String {
    text.yellow().to_string()
}

pub fn error(text: &str) -> String {
    text.red().to_string()
}

pub fn success(text: &str) -> String {
    text.green().to_string()
}

pub fn muted(text: &str) -> String {
    text.dimmed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_text_keeps_content() {
        assert!(header("EDITING").contains("EDITING"));
        assert!(param("timeout").contains("timeout"));
        assert!(value("30").contains("30"));
        assert!(error("bad").contains("bad"));
        assert!(success("ok").contains("ok"));
        assert!(muted("hint").contains("hint"));
    }
}
