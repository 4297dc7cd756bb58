mod common;

use common::{check, Expected};

#[test]
fn prints_the_parenthesized_ast() {
    check(
        "parse",
        "arithmetic_expr.lox",
        Expected {
            stdout: "(* (* (group (+ 2.0 3.0)) 5.0) (group (- 8.0 3.0)))\n",
            stderr: "",
            code: 0,
        },
    );
}
