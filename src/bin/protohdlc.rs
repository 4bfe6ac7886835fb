//! Command-line front end: parse .proto files and print the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use protohdl::{parser, validate, LogSink, SchemaFile};

#[derive(Parser, Debug)]
#[command(name = "protohdlc", version, about = "Parse proto3 schema files")]
struct Args {
    /// Schema files to parse, in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Also check field numbers and name uniqueness
    #[arg(long)]
    validate: bool,

    /// Print the parsed schema as JSON
    #[cfg(feature = "serde")]
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    for path in &args.files {
        let schema = match parser::parse_file(path, &mut LogSink) {
            Ok(schema) => schema,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };

        if args.validate {
            if let Err(e) = validate::validate(&schema) {
                eprintln!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }

        if let Err(e) = print_schema(&args, &schema) {
            eprintln!("{}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

#[cfg(feature = "serde")]
fn print_schema(args: &Args, schema: &SchemaFile) -> Result<(), serde_json::Error> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(schema)?);
    } else {
        print!("{}", schema);
    }
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_schema(_args: &Args, schema: &SchemaFile) -> Result<(), std::convert::Infallible> {
    print!("{}", schema);
    Ok(())
}
