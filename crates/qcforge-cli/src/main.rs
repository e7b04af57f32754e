//! qcforge - input file generation for quantum-chemistry engines.
//!
//! The host application drives this binary: `--print-options` serves the
//! engine's option schema, `--generate-input` turns a JSON job request on
//! stdin into a response envelope on stdout, and `--display-name` prints
//! the engine's human-readable name. Job data never arrives through
//! positional arguments.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use qcforge_cli::commands;
use qcforge_cli::dispatch::Backend;

/// qcforge - generate engine input files from a JSON job description
#[derive(Parser)]
#[command(name = "qcforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine to target
    #[arg(value_enum)]
    backend: Backend,

    /// Print the engine's option schema as JSON
    #[arg(long)]
    print_options: bool,

    /// Read a job request on stdin and print the response envelope on stdout
    #[arg(long)]
    generate_input: bool,

    /// Print the engine's human-readable name
    #[arg(long)]
    display_name: bool,

    /// Echo the verbatim request as an extra debug_info file in the response
    #[arg(long)]
    debug: bool,

    /// Locale hint (accepted and reserved)
    #[arg(long, default_value = "en")]
    #[allow(dead_code)]
    lang: String,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // The display name combines with the other operations; those two are
    // mutually exclusive, schema printing first.
    if cli.display_name {
        commands::display_name::run(cli.backend)?;
    }
    if cli.print_options {
        commands::print_options::run(cli.backend)?;
    } else if cli.generate_input {
        commands::generate_input::run(cli.backend, cli.debug)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}
