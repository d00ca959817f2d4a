//! Command-line interface for lexfix
//! This binary runs the fixer engine over source files and reports what changed.
//!
//! Usage:
//!   lexfix fix `<paths>`... [--config `<file>`] [--dry-run] [--format `<format>`]  - Fix files in place
//!   lexfix check `<paths>`... [--config `<file>`] [--format `<format>`]          - Report files that would change
//!   lexfix list-rules                                                        - List rules in resolved order
//!   lexfix tokens `<path>`                                                     - Dump a file's lexemes as JSON

use clap::{Arg, ArgAction, Command};
use lexfix::fixer::{
    tokenize, FileReport, FixerConfig, FixerEngine, Processor, ProcessorMode, RuleRegistry,
};
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("lexfix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A fixed-point token-stream fixer engine for source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("fix")
                .about("Fix files in place")
                .arg(
                    Arg::new("paths")
                        .help("Files to fix")
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Path to a JSON configuration file"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Report what would change without writing files")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Report format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report files that would change, without writing")
                .arg(
                    Arg::new("paths")
                        .help("Files to check")
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Path to a JSON configuration file"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Report format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .subcommand(Command::new("list-rules").about("List registered rules in resolved order"))
        .subcommand(
            Command::new("tokens")
                .about("Dump a file's lexemes as JSON")
                .arg(
                    Arg::new("path")
                        .help("File to tokenize")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("fix", fix_matches)) => {
            let paths: Vec<PathBuf> = fix_matches
                .get_many::<PathBuf>("paths")
                .unwrap()
                .cloned()
                .collect();
            let config = fix_matches.get_one::<String>("config");
            let format = fix_matches.get_one::<String>("format").unwrap();
            let mode = if fix_matches.get_flag("dry-run") {
                ProcessorMode::Check
            } else {
                ProcessorMode::Write
            };
            handle_fix_command(&paths, config, mode, format, false);
        }
        Some(("check", check_matches)) => {
            let paths: Vec<PathBuf> = check_matches
                .get_many::<PathBuf>("paths")
                .unwrap()
                .cloned()
                .collect();
            let config = check_matches.get_one::<String>("config");
            let format = check_matches.get_one::<String>("format").unwrap();
            handle_fix_command(&paths, config, ProcessorMode::Check, format, true);
        }
        Some(("list-rules", _)) => {
            handle_list_rules_command();
        }
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<PathBuf>("path").unwrap();
            handle_tokens_command(path);
        }
        _ => unreachable!(),
    }
}

/// Load the configuration and build the engine; both failures are fatal
/// before any file is touched.
fn build_engine(config_path: Option<&String>) -> FixerEngine {
    let config = match config_path {
        Some(path) => {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error reading config '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            match FixerConfig::from_json(&text) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config '{}': {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => FixerConfig::default(),
    };

    let registry = RuleRegistry::with_defaults();
    match FixerEngine::from_registry(&registry, &config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error resolving rule set: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the fix and check commands
fn handle_fix_command(
    paths: &[PathBuf],
    config: Option<&String>,
    mode: ProcessorMode,
    format: &str,
    fail_on_change: bool,
) {
    let engine = build_engine(config);
    let processor = Processor::new(&engine, mode);
    let reports = processor.process(paths);

    match format {
        "json" => print_json_reports(&reports),
        "text" => print_text_reports(&reports, mode),
        other => {
            eprintln!("Error: unknown format '{}'", other);
            std::process::exit(1);
        }
    }

    let any_error = reports.iter().any(|report| !report.is_ok());
    let any_change = reports.iter().any(|report| report.changed);
    if any_error || (fail_on_change && any_change) {
        std::process::exit(1);
    }
}

fn print_text_reports(reports: &[FileReport], mode: ProcessorMode) {
    let verb = match mode {
        ProcessorMode::Write => "fixed",
        ProcessorMode::Check => "would fix",
    };

    for report in reports {
        match &report.error {
            Some(error) => println!("error: {}: {}", report.path.display(), error),
            None if report.changed => println!(
                "{}: {} ({} passes)",
                verb,
                report.path.display(),
                report.passes
            ),
            None => {}
        }
        if report.is_ok() && !report.converged {
            eprintln!(
                "warning: {} did not reach a fixed point within {} passes",
                report.path.display(),
                report.passes
            );
        }
    }

    let changed = reports.iter().filter(|r| r.changed).count();
    let errors = reports.iter().filter(|r| !r.is_ok()).count();
    println!(
        "{} files scanned, {} {}, {} errors",
        reports.len(),
        changed,
        verb,
        errors
    );
}

fn print_json_reports(reports: &[FileReport]) {
    match serde_json::to_string_pretty(reports) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing reports: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the list-rules command
fn handle_list_rules_command() {
    let registry = RuleRegistry::with_defaults();
    let rules = match registry.resolve(None) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error resolving rule set: {}", e);
            std::process::exit(1);
        }
    };

    for rule in rules {
        println!("{:<24} {}", rule.name(), rule.description());
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &Path) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let stream = match tokenize(&source) {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("Error tokenizing '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(stream.lexemes()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing lexemes: {}", e);
            std::process::exit(1);
        }
    }
}
