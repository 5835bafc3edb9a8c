//! Runtime values flowing through deferred expressions.
//!
//! Aggregates are `Rc`-wrapped so cloning a value is O(1). Lambdas are
//! handles: cloning one shares the node, including its protection counter.

use std::fmt;
use std::rc::Rc;

use crate::lambda::{Invocable, Lambda};
use crate::protect::Protectable;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    /// Plain symbolic name. Never an argument placeholder; see [`crate::Placeholder`].
    Symbol(Rc<str>),
    List(Rc<Vec<Value>>),
    Lambda(Lambda),
}

impl Value {
    pub fn nil() -> Self {
        Value::Nil
    }

    pub fn int(v: i64) -> Self {
        Value::Int(v)
    }

    pub fn float(v: f64) -> Self {
        Value::Float(v)
    }

    pub fn bool(v: bool) -> Self {
        Value::Bool(v)
    }

    pub fn string(v: impl Into<String>) -> Self {
        Value::Str(v.into().into())
    }

    pub fn symbol(v: impl Into<String>) -> Self {
        Value::Symbol(v.into().into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(Rc::new(items.into_iter().collect()))
    }

    /// `Nil` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Lambda(_) => "lambda",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_lambda(&self) -> Option<&Lambda> {
        match self {
            Value::Lambda(l) => Some(l),
            _ => None,
        }
    }

    /// Capability probe for the protection counter.
    pub fn as_protectable(&self) -> Option<&dyn Protectable> {
        match self {
            Value::Lambda(l) => Some(l),
            _ => None,
        }
    }

    /// Capability probe for invocation.
    pub fn as_invocable(&self) -> Option<&dyn Invocable> {
        match self {
            Value::Lambda(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => f.write_str(s),
            Value::Symbol(s) => write!(f, ":{s}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Lambda(l) => write!(f, "{l:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(Rc::new(v))
    }
}

impl From<Lambda> for Value {
    fn from(v: Lambda) -> Self {
        Value::Lambda(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::bool(false).is_truthy());
        assert!(Value::bool(true).is_truthy());
        assert!(Value::int(0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(Value::list([]).is_truthy());
    }

    #[test]
    fn test_display() {
        let list = Value::list([Value::int(1), Value::string("a"), Value::float(2.5)]);
        assert_eq!(list.to_string(), "[1, a, 2.5]");
        assert_eq!(Value::symbol("x").to_string(), ":x");
        assert_eq!(Value::Nil.to_string(), "");
    }

    #[test]
    fn test_plain_values_lack_capabilities() {
        assert!(Value::int(3).as_protectable().is_none());
        assert!(Value::symbol("arg0").as_invocable().is_none());
    }
}
