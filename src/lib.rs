//! Typed parameter files for scripts and command line tools.
//!
//! A parameter file (`*.para`) is a plain text table. Each data line holds
//! five `|`-separated columns:
//!
//! ```text
//! # key   | name          | default | flag | options
//! timeout | Timeout       | 30      |      |
//! mode    | Mode          | fast    |      | fast, slow
//! verbose | Verbose mode  | false   | flag |
//! ```
//!
//! The form of the default decides the parameter's type for good: `30` makes
//! an integer, `0.5` a float, `true`/`f` a boolean, anything else text. A
//! non-empty options column restricts the parameter to those values.
//! Lines starting with `#` or `/`, blank lines and lines that do not have
//! exactly five columns are ignored on read and kept verbatim on write, so
//! user annotations survive every save.
//!
//! ```ignore
//! let params = Params::builder()
//!     .args(std::env::args())
//!     .load()?;
//! let timeout = params.get("timeout")?;
//! let sizes = params.get_array("sizes", None, false)?;
//! ```
//!
//! That call finds `<script>.para` (or the file named by `-para`) below the
//! working directory, decodes it, and collects `-key value` overrides from
//! the command line.
//!
//! # Layer precedence
//!
//! ```text
//! Caller default        params.get_or(key, Some(..))
//!        ↑ overridden by
//! Stored value          the file's default column
//!        ↑ overridden by
//! Environment vars      PREFIX__KEY
//!        ↑ overridden by
//! Command line          -key value
//!        ↑ overridden by
//! Injected overrides    .override_value()
//! ```
//!
//! An override for a key the file defines is parsed the way an edit of that
//! parameter would be: the type and the options still apply. When it does
//! not parse, the stored value wins and a warning is logged.
//!
//! # Discovery
//!
//! [`search_paths()`](ParamsBuilder::search_paths) takes [`SearchPath`]
//! entries in **priority-ascending** order. `Tree(dir)` searches a directory
//! and everything below it, which is the default rooted at the working
//! directory. The first match in the highest-priority entry wins.
//!
//! # Editing
//!
//! `-edit` on the command line (or [`ParamAction::Edit`]) starts an
//! interactive session through a [`Prompter`]. Empty answers keep the default,
//! `-q` stops early, and answers that do not fit the parameter's type
//! are asked again. [`StdioPrompter`] talks to the terminal; tests script
//! their own.
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default), [`ParamArgs`] adds
//! `params list|get|set|add|edit` subcommands to an application. Everything
//! they do goes through [`Params::handle()`], which takes the clap-free
//! [`ParamAction`].
//!
//! # Error handling
//!
//! Every fallible operation returns [`ParafileError`]. Decoding itself never
//! fails: malformed lines are skipped and reported through `tracing`.

pub mod codec;
pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod editor;
mod env;
mod file;
mod ops;
mod overrides;
mod param;
mod params;
mod store;
mod style;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::{DEFAULT_FILE_NAME, EDIT_KEY, FILE_KEY, ParamsBuilder};
#[cfg(feature = "clap")]
pub use cli::{ParamArgs, ParamSubcommand};
pub use editor::{Prompter, QUIT, StdioPrompter};
pub use error::ParafileError;
pub use file::{FILE_EXTENSION, locate};
pub use ops::ParamResult;
pub use overrides::{Overrides, parse_args};
pub use param::{FLAG_TOKEN, Param};
pub use params::Params;
pub use store::ParamStore;
pub use types::{EditTarget, ParamAction, SearchPath};
pub use value::Value;
