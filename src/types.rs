//! Public enums shared by the facade, the locator and the CLI adapter.

use std::path::PathBuf;

/// Where to look for a parameter file.
///
/// Lists of search paths are **priority-ascending**: the last entry that
/// contains the file wins.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
    /// A directory and everything below it, searched top-down.
    Tree(PathBuf),
}

/// Which parameters an edit session prompts for.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    All,
    Key(String),
}

/// A parameter operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamAction {
    /// Show every stored parameter with its resolved value, optionally as
    /// a JSON object.
    List { json: bool },
    /// Show one parameter.
    Get { key: String },
    /// Parse a new value into a parameter and save the file.
    Set { key: String, value: String },
    /// Add a new parameter and save the file.
    Add {
        key: String,
        name: String,
        default: String,
        flag: bool,
        options: Vec<String>,
    },
    /// Prompt for new values and save the file.
    Edit { target: EditTarget },
}
