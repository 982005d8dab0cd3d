//! Clap adapter for parafile.
//!
//! This module is the optional integration layer between the clap-free core
//! and the [clap](https://docs.rs/clap) CLI parser. It is compiled only when
//! the `clap` Cargo feature is enabled (on by default).
//!
//! [`ParamArgs`] and [`ParamSubcommand`] can be embedded in an application's
//! `#[derive(Parser)]` to get `params list|get|set|add|edit` subcommands. The
//! only bridge to the core is [`ParamArgs::into_action()`], which produces a
//! [`ParamAction`](crate::ParamAction) for
//! [`Params::handle()`](crate::Params::handle).

use clap::{Args, Subcommand};

use crate::types::{EditTarget, ParamAction};

/// Clap-derived args for the `params` subcommand group.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Params(ParamArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ParamArgs {
    #[command(subcommand)]
    pub action: Option<ParamSubcommand>,
}

/// Available parameter subcommands.
#[derive(Debug, Subcommand)]
pub enum ParamSubcommand {
    /// Show every parameter with its resolved value.
    List {
        /// Print the stored values as a JSON object.
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved value, name and options of a parameter.
    Get {
        key: String,
    },
    /// Parse a new value into a parameter and save the file.
    Set {
        key: String,
        value: String,
    },
    /// Append a new parameter to the file.
    Add {
        key: String,
        /// Display name shown in prompts.
        name: String,
        /// Default value; its form decides the parameter's type.
        default: String,
        /// Mark the parameter with the flag column.
        #[arg(long)]
        flag: bool,
        /// Comma separated list of allowed values.
        #[arg(long, value_delimiter = ',')]
        options: Vec<String>,
    },
    /// Prompt for new values interactively.
    Edit {
        /// Only edit this parameter.
        key: Option<String>,
    },
}

impl ParamArgs {
    /// Convert clap-parsed args into a framework-agnostic `ParamAction`.
    ///
    /// Bare `params` (no subcommand) maps to a plain listing.
    pub fn into_action(self) -> ParamAction {
        match self.action {
            None => ParamAction::List { json: false },
            Some(ParamSubcommand::List { json }) => ParamAction::List { json },
            Some(ParamSubcommand::Get { key }) => ParamAction::Get { key },
            Some(ParamSubcommand::Set { key, value }) => ParamAction::Set { key, value },
            Some(ParamSubcommand::Add {
                key,
                name,
                default,
                flag,
                options,
            }) => ParamAction::Add {
                key,
                name,
                default,
                flag,
                options: options.into_iter().map(|o| o.trim().to_string()).collect(),
            },
            Some(ParamSubcommand::Edit { key }) => ParamAction::Edit {
                target: key.map_or(EditTarget::All, EditTarget::Key),
            },
        }
    }
}
