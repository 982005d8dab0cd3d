//! # parafile demo application
//!
//! A small CLI that reads a parameter file the way a training script would.
//! It exists to demonstrate and manually verify parafile's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example para_demo -- run --create
//! cargo run --example para_demo -- params add mode Mode fast --options fast,slow
//! cargo run --example para_demo -- run -timeout 45 -mode slow
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature               | How to exercise it                                              |
//! |-----------------------|-----------------------------------------------------------------|
//! | File discovery        | Put `para-demo.para` anywhere below the working directory       |
//! | Command line override | `cargo run --example para_demo -- run -timeout 45`              |
//! | Env var override      | `PARA_DEMO__TIMEOUT=60 cargo run --example para_demo -- run`    |
//! | Interactive edit      | `cargo run --example para_demo -- run -edit`                    |
//! | Create on first use   | `cargo run --example para_demo -- run --create` with no file    |
//! | `params list`         | `cargo run --example para_demo -- params list --json`           |
//! | `params set`          | `cargo run --example para_demo -- params set timeout 90`        |
//! | Debug logging         | `RUST_LOG=parafile=debug cargo run --example para_demo -- run`  |

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parafile::{ParafileError, ParamArgs, Params, ParamsBuilder, StdioPrompter};

/// parafile demo: a sample script reading typed parameters.
#[derive(Parser, Debug)]
#[command(name = "para-demo")]
struct Cli {
    /// Parameter file to use instead of `para-demo.para`.
    #[arg(long, global = true)]
    file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve parameters with `-key value` overrides and print them.
    Run {
        /// Ask for parameter definitions when no file is found.
        #[arg(long)]
        create: bool,

        /// Overrides, e.g. `-timeout 45 -mode slow`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        overrides: Vec<String>,
    },
    /// Manage the parameter file (list, get, set, add, edit).
    Params(ParamArgs),
}

fn make_builder(file: Option<&str>, overrides: &[String]) -> ParamsBuilder {
    let mut builder = Params::builder()
        .app_name("para-demo")
        .args(std::iter::once("para-demo".to_string()).chain(overrides.iter().cloned()));
    if let Some(file) = file {
        builder = builder.file_name(file);
    }
    builder
}

fn run(file: Option<&str>, create: bool, overrides: &[String]) -> Result<(), ParafileError> {
    let mut prompter = StdioPrompter;
    let builder = make_builder(file, overrides);
    let mut params = if create {
        builder.load_or_create(&mut prompter)?
    } else {
        builder.load()?
    };

    if params.run_requested_edit(&mut prompter)? {
        println!("Saved {}", params.path().display());
    }

    println!("# {}", params.path().display());
    for key in params.list_keys() {
        println!("{key} = {}", params.get(&key)?);
    }
    Ok(())
}

fn manage(file: Option<&str>, args: ParamArgs) -> Result<(), ParafileError> {
    let mut prompter = StdioPrompter;
    let mut params = make_builder(file, &[]).load()?;
    let result = params.handle(&args.into_action(), &mut prompter)?;
    println!("{result}");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = cli.file.as_deref();

    let result = match cli.command {
        Commands::Run { create, overrides } => run(file, create, &overrides),
        Commands::Params(args) => manage(file, args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
