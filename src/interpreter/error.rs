//! The interpreter's error type.

use std::fmt::{self, Display};

/// A runtime error: unwinds evaluation to the interpreter's entry point and
/// is reported to the driver as exit code 70. Never confused with
/// [`super::Signal::Return`](super::Signal), which is control flow, not failure.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub line: usize,
    pub message: String,
}

impl RuntimeError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.line)
    }
}

impl std::error::Error for RuntimeError {}
