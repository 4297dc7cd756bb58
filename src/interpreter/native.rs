//! Native functions pre-populated into the global environment.

use super::{Environment, NativeFunction, Value};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Installs every native function into `globals`.
pub fn install(globals: &Rc<Environment>) {
    globals.define(
        "clock",
        Value::Callable(Rc::new(NativeFunction {
            name: "clock",
            arity: 0,
            func: clock,
        })),
    );
}

fn clock(_args: &[Value]) -> Value {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_secs_f64();
    Value::Number(seconds)
}
