//! A linter for Cypher scripts.
//!
//! Reads Cypher from standard input, reports parse errors on standard
//! error, and optionally dumps the AST to standard output.

use anyhow::{Context, Result};
use clap::Parser;
use cypher_parser::Colorization;
use std::io;
use std::io::IsTerminal;
use std::io::Write;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "cypher-lint",
    about = "Validate Cypher scripts read from standard input.",
    disable_version_flag = true
)]
struct Options {
    /// Dump the AST to stdout.
    #[arg(short = 'a', long)]
    ast: bool,

    /// Colorize output using ANSI escape sequences.
    #[arg(long)]
    colorize: bool,

    /// Attempt to limit output to the specified width.
    #[arg(long, value_name = "N", default_value_t = 0)]
    output_width: usize,

    /// Output the version of cypher-lint and cypher-parser.
    #[arg(long)]
    version: bool,
}

fn main() -> ExitCode {
    let options = Options::parse();

    if options.version {
        println!("cypher-lint: {}", env!("CARGO_PKG_VERSION"));
        println!("cypher-parser: {}", cypher_parser::version());
        return ExitCode::SUCCESS;
    }

    match process(&options) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("cypher-lint: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn process(options: &Options) -> Result<ExitCode> {
    // Colorization defaults to on when the corresponding stream is a
    // terminal.
    let colorize_errors = options.colorize || io::stderr().is_terminal();
    let colorize_output = options.colorize || io::stdout().is_terminal();

    let stdin = io::stdin();
    let result = cypher_parser::Parser::from_reader(stdin.lock())
        .parse()
        .context("failed to read standard input")?;

    let error_colorization = if colorize_errors {
        Colorization::ansi()
    } else {
        Colorization::none()
    };
    for error in result.errors() {
        eprintln!("{}", error.format(&error_colorization));
    }

    if options.ast {
        let colorization = if colorize_output {
            Colorization::ansi()
        } else {
            Colorization::none()
        };
        let mut rendered = String::new();
        result
            .fprint(&mut rendered, options.output_width, &colorization)
            .context("failed to render the AST")?;
        io::stdout()
            .write_all(rendered.as_bytes())
            .context("failed to write to standard output")?;
    }

    if result.ndirectives() > 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
