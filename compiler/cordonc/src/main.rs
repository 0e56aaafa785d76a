//! Cordon CLI
//!
//! Vet untrusted expressions, run them, and inspect the name policy.

use std::process::ExitCode;

use cordonc::commands::{
    check_source, display_name, eval_source, list_names, parse_definition, read_input,
    CommandOptions, Definition,
};
use cordonc::Mode;

/// Install the tracing subscriber once.
///
/// Filtered by `RUST_LOG` (default `warn`). `CORDON_LOG_TREE=1` switches to
/// indented span-tree output.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var_os("CORDON_LOG_TREE").is_some_and(|v| v == "1") {
        registry
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn print_usage() {
    eprintln!("Cordon - vetting compiler for untrusted expressions");
    eprintln!();
    eprintln!("Usage: cordon <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check [--exec] [--trusted] <file|->        Vet a source without running it");
    eprintln!("  eval [--exec] [--trusted] [-D name=value]... <source>");
    eprintln!("                                             Vet and run a source");
    eprintln!("  names [--allowed]                          Print the forbidden builtin names");
    eprintln!("  help                                       Show this message");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --exec       Parse as a statement sequence instead of one expression");
    eprintln!("  --trusted    Skip the safety guard (parse errors are still reported)");
    eprintln!("  -D n=v       Bind n to the value of expression v (itself vetted)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG=cordon_guard=debug   Log rejections");
    eprintln!("  CORDON_LOG_TREE=1             Hierarchical log output");
}

/// Arguments after the command name.
struct Parsed {
    options: CommandOptions,
    definitions: Vec<Definition>,
    allowed: bool,
    positional: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Parsed, String> {
    let mut parsed = Parsed {
        options: CommandOptions::default(),
        definitions: Vec::new(),
        allowed: false,
        positional: None,
    };
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--exec" => parsed.options.mode = Mode::Statements,
            "--trusted" => parsed.options.trusted = true,
            "--allowed" => parsed.allowed = true,
            "-D" => {
                i += 1;
                let Some(definition) = args.get(i) else {
                    return Err("-D needs a name=value argument".to_owned());
                };
                parsed.definitions.push(parse_definition(definition)?);
            }
            _ => {
                if let Some(definition) = arg.strip_prefix("-D") {
                    parsed.definitions.push(parse_definition(definition)?);
                } else if arg.starts_with('-') && arg != "-" {
                    return Err(format!("unknown option '{arg}'"));
                } else if parsed.positional.is_none() {
                    parsed.positional = Some(arg.to_owned());
                } else {
                    return Err(format!("unexpected argument '{arg}'"));
                }
            }
        }
        i += 1;
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let parsed = match parse_args(&args[2..]) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    match command.as_str() {
        "check" => {
            let Some(path) = parsed.positional else {
                eprintln!("Usage: cordon check [--exec] [--trusted] <file|->");
                return ExitCode::FAILURE;
            };
            match read_input(&path) {
                Ok(text) => check_source(&text, display_name(&path), parsed.options),
                Err(message) => {
                    eprintln!("{message}");
                    ExitCode::FAILURE
                }
            }
        }
        "eval" => {
            let Some(text) = parsed.positional else {
                eprintln!("Usage: cordon eval [--exec] [--trusted] [-D name=value]... <source>");
                return ExitCode::FAILURE;
            };
            let (text, filename) = if text == "-" {
                match read_input(&text) {
                    Ok(input) => (input, display_name("-")),
                    Err(message) => {
                        eprintln!("{message}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                (text, "<command line>")
            };
            eval_source(&text, filename, parsed.options, &parsed.definitions)
        }
        "names" => list_names(parsed.allowed),
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            ExitCode::FAILURE
        }
    }
}
