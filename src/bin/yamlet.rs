//! Command-line interface for yamlet
//! This binary parses yamlet documents, prints them in other formats and validates them.
//!
//! Usage:
//!   yamlet parse `<path>` [--format `<format>`]  - Print the parsed document
//!   yamlet check `<path>`...                   - Validate files and directories of documents
//!   yamlet formats                             - List available output formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use yamlet_parser::yamlet::config::{Settings, SettingsLoader};
use yamlet_parser::yamlet::formats::FormatRegistry;
use yamlet_parser::yamlet::loader::{DocumentLoader, LoadError};

fn main() {
    let matches = Command::new("yamlet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and validating yamlet documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Settings file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a document and print it")
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'json', 'treeviz')"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate documents; directories are scanned for known extensions")
                .arg(
                    Arg::new("paths")
                        .help("Files or directories to check")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let settings = load_settings(&matches, parse_matches.get_one::<String>("format"));
            let path = required(parse_matches, "path");
            handle_parse_command(path, &settings);
        }
        Some(("check", check_matches)) => {
            let settings = load_settings(&matches, None);
            let paths: Vec<PathBuf> = check_matches
                .get_many::<String>("paths")
                .map(|values| values.map(PathBuf::from).collect())
                .unwrap_or_default();
            handle_check_command(&paths, &settings);
        }
        Some(("formats", _)) => {
            handle_formats_command();
        }
        _ => unreachable!(),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn required<'m>(matches: &'m ArgMatches, name: &str) -> &'m str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => fail(&format!("missing argument <{}>", name)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

/// Defaults, then the `--config` file, then flags.
fn load_settings(matches: &ArgMatches, format: Option<&String>) -> Settings {
    let mut loader = SettingsLoader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = format {
        loader = loader
            .set_override("output.format", format.as_str())
            .unwrap_or_else(|e| fail(&format!("invalid format override: {}", e)));
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(&format!("failed to load settings: {}", e)))
}

fn report_load_error(err: &LoadError) {
    eprintln!("Error: {}", err);
    if let LoadError::Parse { context, .. } = err {
        eprint!("{}", context);
    }
}

/// Handle the parse command
fn handle_parse_command(path: &str, settings: &Settings) {
    let loader = DocumentLoader::from_settings(settings);
    let document = loader.load(path).unwrap_or_else(|e| {
        report_load_error(&e);
        std::process::exit(1);
    });

    let registry = FormatRegistry::with_defaults();
    let output = registry
        .serialize(&document.root, &settings.output.format)
        .unwrap_or_else(|e| fail(&e.to_string()));

    print!("{}", output);
}

/// Handle the check command
fn handle_check_command(paths: &[PathBuf], settings: &Settings) {
    let loader = DocumentLoader::from_settings(settings);

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            match loader.discover(path) {
                Ok(found) => files.extend(found),
                Err(e) => fail(&e.to_string()),
            }
        } else {
            files.push(path.clone());
        }
    }

    let failed = files
        .iter()
        .filter(|file| !check_file(&loader, file))
        .count();

    println!(
        "{} document(s) checked, {} failed",
        files.len(),
        failed
    );
    if failed > 0 {
        std::process::exit(1);
    }
}

fn check_file(loader: &DocumentLoader, path: &Path) -> bool {
    match loader.load(path) {
        Ok(_) => {
            println!("✓ {}: parsed successfully", path.display());
            true
        }
        Err(e) => {
            println!("✗ {}", path.display());
            report_load_error(&e);
            false
        }
    }
}

/// Handle the formats command
fn handle_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for (name, description) in registry.list_formats() {
        println!("  {}", name);
        println!("    {}", description);
    }
}
