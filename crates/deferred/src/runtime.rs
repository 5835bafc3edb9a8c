//! Dispatch entry points.

use smallvec::SmallVec;

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};
use crate::lambda::Lambda;
use crate::ops::Operations;
use crate::placeholder::Placeholder;
use crate::value::Value;

/// Owns the configuration and the operation table that symbolic dispatch
/// resolves names against.
#[derive(Debug, Clone)]
pub struct Runtime {
    config: RuntimeConfig,
    operations: Operations,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Default configuration with the built-in operations.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self::with_operations(config, Operations::builtin())
    }

    pub fn with_operations(config: RuntimeConfig, operations: Operations) -> Self {
        Self { config, operations }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn operations(&self) -> &Operations {
        &self.operations
    }

    pub fn operations_mut(&mut self) -> &mut Operations {
        &mut self.operations
    }

    /// Sends an operation name to a value.
    ///
    /// A lambda receiver builds a new deferred lambda applying the operation
    /// to `[receiver, args...]`; nothing is evaluated. Direct operations
    /// (`call`) and any receiver that is not a lambda run immediately.
    /// Escape prefixes are only stripped on the deferred path.
    pub fn send(&self, receiver: &Value, name: &str, args: Vec<Value>) -> Result<Value> {
        match receiver {
            Value::Lambda(_) => {
                if let Some(operation) = self.operations.get(name).filter(|op| op.is_direct()) {
                    return operation.eval(receiver, &args);
                }
                let normalized = self.config.normalize(name);
                let operation = self.operations.get(normalized).ok_or_else(|| {
                    Error::UnknownOperation {
                        name: normalized.to_owned(),
                        receiver: receiver.type_name(),
                    }
                })?;
                log::trace!("deferring `{normalized}` on {receiver:?}");
                let mut operands = SmallVec::with_capacity(args.len() + 1);
                operands.push(receiver.clone());
                operands.extend(args);
                Ok(Value::Lambda(Lambda::apply(operation, operands)))
            }
            _ => {
                let operation = self.operations.get(name).ok_or_else(|| {
                    Error::UnknownOperation {
                        name: name.to_owned(),
                        receiver: receiver.type_name(),
                    }
                })?;
                operation.eval(receiver, &args)
            }
        }
    }

    pub fn placeholder(&self, name: &str) -> Placeholder {
        Placeholder::new(name, &self.config.placeholders)
    }

    /// Looks up a free name as an argument placeholder. Only valid argument
    /// names used without arguments resolve.
    pub fn var(&self, name: &str, args: &[Value]) -> Result<Value> {
        let placeholder = self.placeholder(name);
        if args.is_empty() && placeholder.is_argument() {
            return Ok(Value::Lambda(Lambda::placeholder(placeholder)));
        }
        Err(Error::InvalidPlaceholder {
            name: name.to_owned(),
            arguments: args.len(),
        })
    }

    /// Logical negation through dispatch: deferred for lambdas, eager for
    /// literals.
    pub fn negate(&self, value: &Value) -> Result<Value> {
        self.send(value, "^", vec![Value::Bool(true)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect::is_lambda;

    #[test]
    fn test_send_to_literal_is_eager() {
        let rt = Runtime::new();
        let sum = rt.send(&Value::int(2), "+", vec![Value::int(3)]).unwrap();
        assert_eq!(sum, Value::int(5));
    }

    #[test]
    fn test_send_to_lambda_defers() {
        let rt = Runtime::new();
        let x = rt.var("arg0", &[]).unwrap();
        let sum = rt.send(&x, "+", vec![Value::int(3)]).unwrap();
        assert!(is_lambda(&sum));
        assert_eq!(sum.as_lambda().unwrap().kind_name(), "apply");
    }

    #[test]
    fn test_escape_prefix_only_applies_to_lambdas() {
        let rt = Runtime::new();
        let x = rt.var("arg0", &[]).unwrap();
        assert!(rt.send(&x, "_add", vec![Value::int(1)]).is_ok());
        assert_eq!(
            rt.send(&Value::int(1), "_add", vec![Value::int(1)]),
            Err(Error::UnknownOperation {
                name: "_add".to_owned(),
                receiver: "int",
            })
        );
    }

    #[test]
    fn test_direct_operation_runs_on_lambda() {
        let rt = Runtime::new();
        let x = rt.var("arg0", &[]).unwrap();
        assert_eq!(rt.send(&x, "call", vec![Value::int(4)]).unwrap(), Value::int(4));
        let deferred = rt.send(&x, "_call", vec![Value::int(4)]).unwrap();
        assert!(is_lambda(&deferred));
    }

    #[test]
    fn test_var_rejects_non_arguments() {
        let rt = Runtime::new();
        assert!(matches!(
            rt.var("foo", &[]),
            Err(Error::InvalidPlaceholder { arguments: 0, .. })
        ));
        assert!(matches!(
            rt.var("arg0", &[Value::int(1)]),
            Err(Error::InvalidPlaceholder { arguments: 1, .. })
        ));
    }

    #[test]
    fn test_negate_literal() {
        let rt = Runtime::new();
        assert_eq!(rt.negate(&Value::bool(true)).unwrap(), Value::bool(false));
        assert_eq!(rt.negate(&Value::Nil).unwrap(), Value::bool(true));
    }
}
