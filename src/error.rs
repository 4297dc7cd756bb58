//! # Error
//!
//! Unifies every stage-specific error family behind one enum so the driver
//! has a single dispatch point from "something went wrong" to an exit code.

use crate::interpreter::RuntimeError;
use crate::parser::ParseError;
use crate::resolver::ResolveError;
use std::fmt::{self, Display};

/// The outcome of a failed pipeline stage. Exit code is a pure function of
/// the variant: `Lex`/`Parse`/`Resolve` all map to 65, `Runtime` to 70.
#[derive(Debug)]
pub enum CoreError {
    /// One or more `LEX_ERROR` tokens were produced while scanning.
    Lex(usize),
    Parse(Vec<ParseError>),
    Resolve(Vec<ResolveError>),
    Runtime(RuntimeError),
}

impl CoreError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::Lex(_) | CoreError::Parse(_) | CoreError::Resolve(_) => 65,
            CoreError::Runtime(_) => 70,
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Lex(count) => write!(f, "{count} lexical error(s)"),
            CoreError::Parse(errors) => {
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            CoreError::Resolve(errors) => {
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            CoreError::Runtime(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {}
