use std::{fs::read_to_string, path::{Path, PathBuf}, process::ExitCode, sync::Arc, time::Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clike::{
    errors::errors::{Error, ErrorTip},
    lexer::{lexer::tokenize, tokens::Token},
    line_at_position,
    parser::parser::parse,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clike", version, about = "Tokenizer and parser for a small C-like language")]
struct Cli {
    /// Log pipeline stages (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Subcommand)]
enum Command {
    /// Print the token stream of a file
    Tokenize { file: PathBuf },
    /// Parse and type check a file, printing its tree
    Parse { file: PathBuf },
    /// Parse the built-in sample programs
    Demo,
}

const DEMO_PROGRAMS: [(&str, &str); 5] = [
    (
        "declare",
        r#"
int nums = 5;
string hello = "hello, world!";
float fl = 3.14;
"#,
    ),
    (
        "arithmetic",
        r#"
int x = 10;
int y= 10;

int sum = x + y;
int diff = x - y;
int prod = x * y;
int quot = x / y;
"#,
    ),
    (
        "if",
        r#"
int x = 10;
int y;
if (x > 5) {
    y = x + 5;
} else {
    y = x - 5;
}
"#,
    ),
    (
        "for",
        r#"
for (int i = 0; i < 10; i = i + 1) {
    for (int j = 0; j < 10; j = j + 1) {
        int x = i + j * 2;
    }
}
"#,
    ),
    (
        "while",
        r#"
int x = 5;
int y = 0;
while (x > 0) {
    y = y + 1;
}
"#,
    ),
];

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let succeeded = match cli.command {
        Command::Tokenize { file } => {
            let (name, source) = read_source(&file)?;
            run_tokenize(&name, &source)
        }
        Command::Parse { file } => {
            let (name, source) = read_source(&file)?;
            run_parse(&name, &source)
        }
        Command::Demo => DEMO_PROGRAMS
            .iter()
            .map(|(name, source)| {
                println!("== {} ==", name);
                run_parse(name, source)
            })
            .fold(true, |all, ok| all && ok),
    };

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn read_source(path: &Path) -> anyhow::Result<(String, String)> {
    let source = read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok((name, source))
}

fn run_tokenize(name: &str, source: &str) -> bool {
    match tokenize(source, Some(name.to_string())) {
        Ok(tokens) => {
            for token in &tokens {
                println!("{}", token_line(token));
            }
            true
        }
        Err(error) => {
            display_error(error, name, source);
            false
        }
    }
}

fn run_parse(name: &str, source: &str) -> bool {
    let start = Instant::now();

    let tokens = match tokenize(source, Some(name.to_string())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(error, name, source);
            return false;
        }
    };
    debug!(elapsed = ?start.elapsed(), "tokenized");

    match parse(tokens, Arc::new(name.to_string())) {
        Ok(program) => {
            info!(file = name, elapsed = ?start.elapsed(), "parsed");
            print!("{}", program.pretty_print());
            true
        }
        Err(error) => {
            display_error(error, name, source);
            false
        }
    }
}

/// `KIND lexeme`, one per line of `tokenize` output.
fn token_line(token: &Token) -> String {
    format!("{} {}", token.kind, token.value)
}

/// `<Kind>: <name> (<tip>)`, dropping the tip when there is none.
fn error_header(error: &Error) -> String {
    match error.get_tip() {
        ErrorTip::None => format!("{}: {}", error.kind(), error.get_error_name()),
        tip => format!("{}: {} ({})", error.kind(), error.get_error_name(), tip),
    }
}

fn display_error(error: Error, name: &str, source: &str) {
    /*
        error: message
        -> final.c
           |
        20 | int a = @;
           | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = line_at_position(source, position.0);

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    eprintln!("{}", error_header(&error));
    eprintln!("-> {}", name);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (String::from(trimmed), string.len() - trimmed.len())
}
