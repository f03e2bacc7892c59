// Command-line interface for mdtidy
//
// Formats Markdown files into canonical Markdown using the mdtidy library.
//
// Usage:
//  mdtidy                       - Format stdin to stdout
//  mdtidy <file>...             - Print the formatted files to stdout
//  mdtidy -w <file>...          - Rewrite files in place
//  mdtidy -l <file>...          - List files whose formatting differs
//
// Settings come from the embedded defaults, then ./mdtidy.toml, then --config,
// then the command-line flags.
//
// Logging goes to stderr and is controlled with MDTIDY_LOG (an env-filter
// directive, default "warn").

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdtidy::{process, Options};
use mdtidy_config::{Loader, MdtidyConfig};
use std::fs;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("mdtidy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reformat Markdown files into canonical Markdown")
        .long_about(
            "mdtidy parses Markdown and writes it back in one consistent style:\n\
            `-` bullets, renumbered ordered lists, `*emphasis*`, `**strong**`,\n\
            fenced code blocks and single blank lines between blocks.\n\n\
            Fenced Rust code blocks are reformatted with rustfmt when it is installed.\n\n\
            Examples:\n  \
            mdtidy README.md                 # Print formatted README to stdout\n  \
            mdtidy -w docs/*.md              # Rewrite files in place\n  \
            mdtidy -l docs/*.md              # List files that need formatting\n  \
            cat notes.md | mdtidy --terminal # Format stdin with bold highlighting"
        )
        .arg(
            Arg::new("input")
                .help("Markdown files to format (reads stdin when omitted)")
                .num_args(0..)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("write")
                .long("write")
                .short('w')
                .help("Write the result back to the source file instead of stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .short('l')
                .help("List files whose formatting differs from mdtidy's")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("terminal")
                .long("terminal")
                .help("Emit ANSI bold escapes around strong text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("heading-style")
                .long("heading-style")
                .help("Heading style for levels 1 and 2")
                .value_parser(["atx", "setext"])
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("no-code-format")
                .long("no-code-format")
                .help("Leave fenced code blocks untouched")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mdtidy.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
}

fn main() {
    init_logging();

    let matches = build_cli().get_matches();
    let config = load_cli_config(&matches);
    let options = config.to_options();

    let inputs: Vec<&String> = matches
        .get_many::<String>("input")
        .map(|values| values.collect())
        .unwrap_or_default();
    let write = matches.get_flag("write");
    let list = matches.get_flag("list");

    if inputs.is_empty() {
        if write || list {
            eprintln!("Error: --write and --list need file arguments");
            std::process::exit(1);
        }
        handle_stdin(&options);
        return;
    }

    let mut failed = false;
    for input in inputs {
        let result = if write || list {
            handle_file_in_place(input, &options, write, list)
        } else {
            handle_file_to_stdout(input, &options)
        };
        if let Err(message) = result {
            eprintln!("{message}");
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MDTIDY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Handle formatting stdin to stdout
fn handle_stdin(options: &Options) {
    let mut source = Vec::new();
    io::stdin().read_to_end(&mut source).unwrap_or_else(|e| {
        eprintln!("Error reading stdin: {e}");
        std::process::exit(1);
    });

    let output = process("<stdin>", Some(&source), options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    write_stdout(&output).unwrap_or_else(|e| {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    });
}

fn handle_file_to_stdout(path: &str, options: &Options) -> Result<(), String> {
    let output = process(path, None, options).map_err(|e| e.to_string())?;
    write_stdout(&output).map_err(|e| format!("Error writing output: {e}"))
}

/// Handle --write / --list for one file
fn handle_file_in_place(
    path: &str,
    options: &Options,
    write: bool,
    list: bool,
) -> Result<(), String> {
    let original = fs::read(path).map_err(|e| format!("Error reading file '{path}': {e}"))?;
    let output = process(path, Some(&original), options).map_err(|e| e.to_string())?;

    if output == original {
        tracing::debug!(path, "already formatted");
        return Ok(());
    }

    if list {
        println!("{path}");
    }
    if write {
        fs::write(path, &output).map_err(|e| format!("Error writing file '{path}': {e}"))?;
        tracing::info!(path, "reformatted");
    }
    Ok(())
}

fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

fn load_cli_config(matches: &ArgMatches) -> MdtidyConfig {
    let loader = Loader::new().with_optional_file("mdtidy.toml");
    let loader = match matches.get_one::<String>("config") {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    apply_flag_overrides(loader, matches)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

/// Command-line flags win over every configuration file.
fn apply_flag_overrides(
    mut loader: Loader,
    matches: &ArgMatches,
) -> Result<Loader, mdtidy_config::ConfigError> {
    if matches.get_flag("terminal") {
        loader = loader.set_override("render.terminal", true)?;
    }
    if let Some(style) = matches.get_one::<String>("heading-style") {
        loader = loader.set_override("render.heading_style", style.as_str())?;
    }
    if matches.get_flag("no-code-format") {
        loader = loader.set_override("code.format", false)?;
    }
    Ok(loader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdtidy::HeadingStyle;

    fn config_for(args: &[&str]) -> MdtidyConfig {
        let matches = build_cli().try_get_matches_from(args).expect("args to parse");
        apply_flag_overrides(Loader::new(), &matches)
            .and_then(Loader::build)
            .expect("config to build")
    }

    #[test]
    fn defaults_without_flags() {
        let config = config_for(&["mdtidy", "doc.md"]);
        assert!(!config.render.terminal);
        assert!(config.code.format);
        assert_eq!(config.to_options().heading_style, HeadingStyle::Atx);
    }

    #[test]
    fn flags_override_config() {
        let config = config_for(&[
            "mdtidy",
            "--terminal",
            "--heading-style",
            "setext",
            "--no-code-format",
        ]);
        assert!(config.render.terminal);
        assert!(!config.code.format);
        assert_eq!(config.to_options().heading_style, HeadingStyle::Setext);
    }

    #[test]
    fn rejects_unknown_heading_style() {
        let result = build_cli().try_get_matches_from(["mdtidy", "--heading-style", "fancy"]);
        assert!(result.is_err());
    }

    #[test]
    fn accepts_many_inputs() {
        let matches = build_cli()
            .try_get_matches_from(["mdtidy", "-l", "a.md", "b.md"])
            .expect("args to parse");
        let inputs: Vec<&String> = matches.get_many::<String>("input").unwrap().collect();
        assert_eq!(inputs, ["a.md", "b.md"]);
        assert!(matches.get_flag("list"));
    }
}
