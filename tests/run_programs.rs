mod common;

use common::{check, Expected};

#[test]
fn prints_every_statement_in_order() {
    check(
        "run",
        "hello.lox",
        Expected {
            stdout: "Hello, World!\n42\ntrue\n36\n",
            stderr: "",
            code: 0,
        },
    );
}

#[test]
fn block_scoped_variable_does_not_leak_out() {
    check(
        "run",
        "scope.lox",
        Expected {
            stdout: "before\n",
            stderr: "",
            code: 0,
        },
    );
}

#[test]
fn panic_mode_recovery_reports_every_syntax_error_in_one_run() {
    check(
        "run",
        "parse_errors.lox",
        Expected {
            stdout: "",
            stderr: "[line 1] Error at ';': Expect variable name.\n\
                     [line 3] Error at ';': Expect expression.\n",
            code: 65,
        },
    );
}
