//! Shared helpers for the integration tests.

#![allow(dead_code)]

use deferred::{Lambda, Runtime, Value};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn runtime() -> Runtime {
    init_logging();
    Runtime::new()
}

/// Placeholder for argument `index` under the default naming convention.
pub fn arg(rt: &Runtime, index: usize) -> Value {
    rt.var(&format!("arg{index}"), &[])
        .unwrap_or_else(|e| panic!("arg{index}: {e}"))
}

pub fn lambda(value: &Value) -> &Lambda {
    value
        .as_lambda()
        .unwrap_or_else(|| panic!("expected a lambda, got {value:?}"))
}

/// Calls `value` as a lambda and unwraps the result.
pub fn call(value: &Value, args: &[Value]) -> Value {
    lambda(value)
        .call(args)
        .unwrap_or_else(|e| panic!("calling {value:?} failed: {e}"))
}

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::int).collect()
}
