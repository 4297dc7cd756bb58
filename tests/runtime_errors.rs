mod common;

use common::{check, Expected};

#[test]
fn reading_an_undefined_variable_exits_70() {
    check(
        "run",
        "undefined_variable.lox",
        Expected {
            stdout: "",
            stderr: "Undefined variable 'a'.\n[line 1]\n",
            code: 70,
        },
    );
}

#[test]
fn adding_a_number_and_a_string_is_a_type_error() {
    check(
        "run",
        "runtime_type_error.lox",
        Expected {
            stdout: "",
            stderr: "Operands must be two numbers or two strings.\n[line 1]\n",
            code: 70,
        },
    );
}
