use std::{fs, num::NonZeroU32, process::ExitCode};

use calkit::{Calculator, interpreter::value::core::MathContext};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// calkit is an arbitrary-precision decimal expression calculator.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the contents as a path and evaluate each line of that file.
    /// Empty lines and lines starting with '#' are skipped.
    #[arg(short, long)]
    file: bool,

    /// Number of significant digits kept by inexact operations.
    #[arg(short, long, default_value = "20")]
    precision: NonZeroU32,

    /// Print the parsed expression tree instead of evaluating it.
    #[arg(long)]
    ast: bool,

    contents: String,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();
    let math = MathContext::new(args.precision);

    let expressions: Vec<String> = if args.file {
        let Ok(script) = fs::read_to_string(&args.contents) else {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            return ExitCode::FAILURE;
        };
        script.lines()
              .map(str::trim)
              .filter(|line| !line.is_empty() && !line.starts_with('#'))
              .map(str::to_string)
              .collect()
    } else {
        vec![args.contents]
    };

    let mut status = ExitCode::SUCCESS;
    for expression in expressions {
        let calculator = Calculator::with_context(expression, math);
        let output = if args.ast {
            calculator.parse().map(|expr| expr.to_string())
        } else {
            calculator.evaluate()
        };
        match output {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                status = ExitCode::FAILURE;
            },
        }
    }
    status
}
