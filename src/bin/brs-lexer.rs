//! Command-line interface for brs-lexer
//! This binary runs the BrightScript lexer over a file the way the editor would, for inspection.
//!
//! Usage:
//!   brs-lexer tokens `<path>` [--format text|json]   - Print the classified tokens of every line
//!   brs-lexer indent `<path>`                        - Print the file re-indented
//!   brs-lexer check `<path>`                         - Print advisory diagnostics (exit 1 if any)
//!
//! Global options: `--config <file>` layers a TOML file over the defaults, `--strict-strings`
//! styles unterminated strings as errors.

use brs_lexer::brs::config::{BrsConfig, Loader};
use brs_lexer::brs::highlight::{self, HighlightedLine};
use brs_lexer::brs::lexing::Lexer;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;

fn main() {
    env_logger::init();

    let matches = Command::new("brs-lexer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect how BrightScript source is highlighted and indented")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("strict-strings")
                .long("strict-strings")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Style unterminated strings as errors"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the classified tokens of every line")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text' or 'json')")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("indent")
                .about("Print the file re-indented by the indentation engine")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Report unrecognized characters, unterminated strings and bad member access")
                .arg(path_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", sub)) => {
            let config = load_config(sub);
            let source = read_source(sub);
            let format = sub
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("text");
            handle_tokens_command(&config, &source, format);
        }
        Some(("indent", sub)) => {
            let config = load_config(sub);
            let source = read_source(sub);
            handle_indent_command(&config, &source);
        }
        Some(("check", sub)) => {
            let config = load_config(sub);
            let source = read_source(sub);
            handle_check_command(&config, &source, source_name(sub));
        }
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the BrightScript file")
        .required(true)
        .index(1)
}

fn source_name(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-")
}

fn read_source(matches: &ArgMatches) -> String {
    std::fs::read_to_string(source_name(matches)).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn load_config(matches: &ArgMatches) -> BrsConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("strict-strings") {
        loader = loader
            .strict_strings(true)
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            });
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

/// Run `f` with a lexer built from `config`.
fn with_lexer<R>(config: &BrsConfig, f: impl FnOnce(&Lexer<'_>) -> R) -> R {
    let tables = config.tables().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    let lexer = Lexer::new(&tables, config.lexer);
    f(&lexer)
}

#[derive(Serialize)]
struct JsonToken<'a> {
    style: &'static str,
    text: &'a str,
    column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    line: usize,
    indent: usize,
    tokens: Vec<JsonToken<'a>>,
}

fn to_json(lines: &[HighlightedLine]) -> Vec<JsonLine<'_>> {
    lines
        .iter()
        .map(|line| JsonLine {
            line: line.number + 1,
            indent: line.indent,
            tokens: line
                .tokens
                .iter()
                .map(|token| JsonToken {
                    style: token.style.as_str(),
                    text: &token.text,
                    column: token.column + 1,
                    error: token.error.as_ref().map(|e| e.to_string()),
                })
                .collect(),
        })
        .collect()
}

/// Handle the tokens command
fn handle_tokens_command(config: &BrsConfig, source: &str, format: &str) {
    let lines = with_lexer(config, |lexer| highlight::highlight(lexer, source));
    match format {
        "json" => match serde_json::to_string_pretty(&to_json(&lines)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            }
        },
        _ => {
            for line in &lines {
                let rendered: Vec<String> = line
                    .tokens
                    .iter()
                    .map(|token| {
                        let marker = if token.style.is_error() { "!" } else { "" };
                        format!("{}{}({:?})", token.style, marker, token.text)
                    })
                    .collect();
                println!("{:>4} [{}] {}", line.number + 1, line.indent, rendered.join(" "));
            }
        }
    }
}

/// Handle the indent command
fn handle_indent_command(config: &BrsConfig, source: &str) {
    let output = with_lexer(config, |lexer| highlight::reindent(lexer, source));
    print!("{}", output);
}

/// Handle the check command
fn handle_check_command(config: &BrsConfig, source: &str, name: &str) {
    let found = with_lexer(config, |lexer| {
        highlight::diagnostics(&highlight::highlight(lexer, source))
    });
    for diagnostic in &found {
        println!("{}:{}", name, diagnostic);
    }
    if !found.is_empty() {
        std::process::exit(1);
    }
}
