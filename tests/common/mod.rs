//! Shared black-box test harness: spawns the compiled `loxi` binary and
//! asserts stdout, stderr, and exit code together, in the spirit of the
//! teacher's `test-utils` crate's `Expected`/`check_compilation` pair.

use std::path::Path;
use std::process::{Command, Output};

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
    pub code: i32,
}

impl Expected<'_> {
    fn assert_matches(&self, output: &Output) {
        assert_eq!(
            std::str::from_utf8(&output.stdout).expect("stdout is not valid UTF-8"),
            self.stdout,
            "stdout mismatch"
        );
        assert_eq!(
            std::str::from_utf8(&output.stderr).expect("stderr is not valid UTF-8"),
            self.stderr,
            "stderr mismatch"
        );
        assert_eq!(output.status.code(), Some(self.code), "exit code mismatch");
    }
}

fn run(mode: &str, path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_loxi"))
        .arg(mode)
        .arg(path)
        .output()
        .expect("failed to spawn the loxi binary")
}

/// Runs `loxi <mode> <fixture>` and asserts the full `Expected` triple.
pub fn check(mode: &str, fixture: &str, expected: Expected) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(fixture);
    let output = run(mode, &path);
    expected.assert_matches(&output);
}
