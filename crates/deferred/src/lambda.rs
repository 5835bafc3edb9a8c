//! Deferred expressions.
//!
//! A [`Lambda`] is a handle to a shared node: building one never runs it,
//! only [`Lambda::call`] does. Nested lambdas form an implicit expression
//! tree where each node is itself callable.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::bind::fill;
use crate::conditional::Branches;
use crate::error::Result;
use crate::ops::Operation;
use crate::placeholder::Placeholder;
use crate::protect::{Protectable, ProtectionCounter};
use crate::value::Value;

pub type NativeFn = dyn Fn(&[Value]) -> Result<Value>;

pub(crate) type Operands = SmallVec<[Value; 4]>;

/// Capability: values that can be invoked with arguments.
pub trait Invocable {
    fn call(&self, actuals: &[Value]) -> Result<Value>;
}

#[derive(Clone)]
pub struct Lambda(Rc<Node>);

struct Node {
    protection: ProtectionCounter,
    kind: LambdaKind,
}

pub(crate) enum LambdaKind {
    /// Returns the actual argument at the placeholder's index.
    Placeholder(Placeholder),
    /// Ignores its arguments.
    Constant(Value),
    /// `operation(operands[0], operands[1..])` after binding the operands.
    Apply {
        operation: Rc<Operation>,
        operands: Operands,
    },
    /// User block.
    Native(Box<NativeFn>),
    Conditional(Branches),
}

impl Lambda {
    fn from_kind(kind: LambdaKind) -> Self {
        Lambda(Rc::new(Node {
            protection: ProtectionCounter::new(),
            kind,
        }))
    }

    /// Wraps a block that receives the call arguments.
    pub fn native(f: impl Fn(&[Value]) -> Result<Value> + 'static) -> Self {
        Self::from_kind(LambdaKind::Native(Box::new(f)))
    }

    pub fn constant(value: Value) -> Self {
        Self::from_kind(LambdaKind::Constant(value))
    }

    pub(crate) fn placeholder(placeholder: Placeholder) -> Self {
        Self::from_kind(LambdaKind::Placeholder(placeholder))
    }

    pub(crate) fn apply(operation: Rc<Operation>, operands: Operands) -> Self {
        Self::from_kind(LambdaKind::Apply {
            operation,
            operands,
        })
    }

    pub(crate) fn conditional(branches: Branches) -> Self {
        Self::from_kind(LambdaKind::Conditional(branches))
    }

    pub fn call(&self, actuals: &[Value]) -> Result<Value> {
        match &self.0.kind {
            LambdaKind::Placeholder(placeholder) => Ok(placeholder.resolve(actuals)),
            LambdaKind::Constant(value) => Ok(value.clone()),
            LambdaKind::Apply {
                operation,
                operands,
            } => {
                let filled = fill(operands, actuals)?;
                operation.apply(filled.into_iter().collect())
            }
            LambdaKind::Native(f) => f(actuals),
            LambdaKind::Conditional(branches) => branches.evaluate(actuals),
        }
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        match &self.0.kind {
            LambdaKind::Placeholder(placeholder) => placeholder.argument_index(),
            _ => None,
        }
    }

    /// The branch table of an `if_`/`unless_` lambda.
    pub fn branches(&self) -> Option<Branches> {
        match &self.0.kind {
            LambdaKind::Conditional(branches) => Some(branches.clone()),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.0.kind {
            LambdaKind::Placeholder(_) => "placeholder",
            LambdaKind::Constant(_) => "constant",
            LambdaKind::Apply { .. } => "apply",
            LambdaKind::Native(_) => "native",
            LambdaKind::Conditional(_) => "conditional",
        }
    }

    pub fn ptr_eq(&self, other: &Lambda) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Invocable for Lambda {
    fn call(&self, actuals: &[Value]) -> Result<Value> {
        Lambda::call(self, actuals)
    }
}

impl Protectable for Lambda {
    fn counter(&self) -> &ProtectionCounter {
        &self.0.protection
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (&self.0.kind, &other.0.kind) {
            (LambdaKind::Placeholder(a), LambdaKind::Placeholder(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = self.0.protection.level();
        match &self.0.kind {
            LambdaKind::Placeholder(placeholder) => {
                write!(f, "Lambda(placeholder {}", placeholder.name())?;
            }
            LambdaKind::Constant(value) => write!(f, "Lambda(constant {value:?}")?,
            LambdaKind::Apply {
                operation,
                operands,
            } => write!(f, "Lambda(apply `{}` {:?}", operation.name(), operands.as_slice())?,
            LambdaKind::Native(_) => f.write_str("Lambda(native")?,
            LambdaKind::Conditional(_) => f.write_str("Lambda(conditional")?,
        }
        if level > 0 {
            write!(f, ", protected {level}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaceholderConvention;
    use crate::protect::{is_bound, protect};

    fn arg(name: &str) -> Lambda {
        Lambda::placeholder(Placeholder::new(name, &PlaceholderConvention::default()))
    }

    #[test]
    fn test_placeholder_call() {
        let x = arg("arg1");
        assert_eq!(x.call(&[Value::int(1), Value::int(2)]).unwrap(), Value::int(2));
        assert_eq!(x.placeholder_index(), Some(1));
    }

    #[test]
    fn test_constant_ignores_arguments() {
        let c = Lambda::constant(Value::string("k"));
        assert_eq!(c.call(&[]).unwrap(), Value::string("k"));
        assert_eq!(c.call(&[Value::int(9)]).unwrap(), Value::string("k"));
    }

    #[test]
    fn test_native_receives_arguments() {
        let sum = Lambda::native(|args| Ok(Value::int(args.iter().filter_map(Value::as_int).sum())));
        assert_eq!(sum.call(&[Value::int(2), Value::int(3)]).unwrap(), Value::int(5));
    }

    #[test]
    fn test_clones_share_protection() {
        let x = arg("arg0");
        let alias = Value::Lambda(x.clone());
        protect(Value::Lambda(x.clone()));
        assert!(!is_bound(&alias));
        assert!(x.ptr_eq(alias.as_lambda().unwrap()));
    }

    #[test]
    fn test_placeholder_equality_ignores_identity() {
        assert_eq!(arg("arg3"), arg("arg3"));
        assert_ne!(arg("arg3"), arg("arg4"));
        assert_ne!(Lambda::constant(Value::int(1)), Lambda::constant(Value::int(1)));
    }

    #[test]
    fn test_debug_shows_protection() {
        let x = arg("arg0");
        protect(Value::Lambda(x.clone()));
        assert_eq!(format!("{x:?}"), "Lambda(placeholder arg0, protected 1)");
    }
}
