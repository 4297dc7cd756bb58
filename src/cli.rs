//! # CLI
//!
//! Command-line argument parsing for the `loxi` driver, mirroring the
//! teacher's `Cli`/`LogLevel` split: a top-level struct holding the
//! verbosity flag plus the positional mode and file arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// The four pipeline entry points this driver exposes, one per CLI mode.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum Mode {
    /// Lex the file and print every token's wire form.
    Tokenize,
    /// Lex and parse a single expression, printing its parenthesized AST dump.
    Parse,
    /// Lex, parse, resolve, and evaluate a single expression, printing its value.
    Evaluate,
    /// Lex, parse, resolve, and execute the file as a full program.
    Run,
}

/// Top-level CLI configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "A tree-walking interpreter for the Lox programming language.")]
pub struct Cli {
    /// Which pipeline stage to run up to.
    #[arg(value_enum)]
    pub mode: Mode,

    /// The path to the Lox source file.
    pub file: PathBuf,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Log level, following the teacher's `LogLevel` `ValueEnum` convention:
/// numeric aliases so `-v 2` and `-v info` are equivalent.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log the exit-code dispatch decision for each error family.
    #[value(alias("1"))]
    Warn,

    /// Also log pipeline stage transitions (lex -> parse -> resolve -> interpret).
    #[value(alias("2"))]
    Info,

    /// Log recoverable per-token/per-statement detail.
    #[value(alias("3"))]
    Debug,

    /// Log everything.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
