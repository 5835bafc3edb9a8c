use crate::lambda::Lambda;
use crate::value::Value;

/// Returns lambdas unchanged and wraps anything else in a constant lambda
/// capturing it.
pub fn to_lambda(value: impl Into<Value>) -> Lambda {
    match value.into() {
        Value::Lambda(lambda) => lambda,
        other => Lambda::constant(other),
    }
}

impl Value {
    pub fn to_lambda(self) -> Lambda {
        to_lambda(self)
    }
}
