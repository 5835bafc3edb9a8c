//! Operation table.
//!
//! Operations are looked up by symbolic name when a name is sent to a value.
//! Each one evaluates eagerly on concrete operands; deferral is handled by
//! [`crate::Runtime::send`] and by [`Operation::apply`].

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::lambda::{Lambda, Operands};
use crate::value::Value;

pub type EvalFn = dyn Fn(&Value, &[Value]) -> Result<Value>;

pub struct Operation {
    name: Rc<str>,
    eval: Box<EvalFn>,
    direct: bool,
}

impl Operation {
    pub fn new(name: &str, eval: impl Fn(&Value, &[Value]) -> Result<Value> + 'static) -> Self {
        Self {
            name: name.into(),
            eval: Box::new(eval),
            direct: false,
        }
    }

    /// An operation defined directly on lambdas: it runs even when the
    /// receiver is a lambda instead of being deferred. Reach the deferred
    /// form through the escape prefix (`_call`).
    pub fn direct(name: &str, eval: impl Fn(&Value, &[Value]) -> Result<Value> + 'static) -> Self {
        Self {
            direct: true,
            ..Self::new(name, eval)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_direct(&self) -> bool {
        self.direct
    }

    /// Runs the operation on a concrete receiver.
    pub fn eval(&self, receiver: &Value, args: &[Value]) -> Result<Value> {
        (self.eval)(receiver, args)
    }

    /// Applies the operation to already bound operands. A receiver that is
    /// still a lambda (it was protected) defers the application again,
    /// unless the operation is direct.
    pub(crate) fn apply(self: &Rc<Self>, operands: Operands) -> Result<Value> {
        if !self.direct && matches!(operands.first(), Some(Value::Lambda(_))) {
            log::trace!("re-deferring `{}`", self.name);
            return Ok(Value::Lambda(Lambda::apply(Rc::clone(self), operands)));
        }
        match operands.split_first() {
            Some((receiver, args)) => self.eval(receiver, args),
            None => Err(Error::operand(&self.name, "missing receiver")),
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operation").field(&self.name).finish()
    }
}

/// Operations keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct Operations {
    table: FxHashMap<Rc<str>, Rc<Operation>>,
}

impl Operations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arithmetic, comparison, logic, indexing and `call`.
    pub fn builtin() -> Self {
        let mut ops = Self::new();

        ops.register_with_aliases(&["+", "add"], |a, args| {
            arith("+", a, unary("+", args)?, i64::checked_add, |x, y| x + y, Concat::Yes)
        });
        ops.register_with_aliases(&["-", "sub"], |a, args| {
            arith("-", a, unary("-", args)?, i64::checked_sub, |x, y| x - y, Concat::No)
        });
        ops.register_with_aliases(&["*", "mul"], |a, args| {
            arith("*", a, unary("*", args)?, i64::checked_mul, |x, y| x * y, Concat::No)
        });
        ops.register_with_aliases(&["/", "div"], |a, args| {
            arith("/", a, unary("/", args)?, floor_div, |x, y| x / y, Concat::No)
        });
        ops.register_with_aliases(&["%", "rem"], |a, args| {
            let float_rem = |x: f64, y: f64| x - y * (x / y).floor();
            arith("%", a, unary("%", args)?, floor_rem, float_rem, Concat::No)
        });
        ops.register_with_aliases(&["-@", "neg"], |a, args| {
            nullary("-@", args)?;
            match a {
                Value::Int(i) => i
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or_else(|| Error::operand("-@", "integer overflow")),
                Value::Float(x) => Ok(Value::Float(-x)),
                other => Err(Error::operand("-@", format!("cannot negate {}", other.type_name()))),
            }
        });

        ops.register_with_aliases(&["==", "eq"], |a, args| {
            Ok(Value::Bool(equal(a, unary("==", args)?)))
        });
        ops.register_with_aliases(&["!=", "ne"], |a, args| {
            Ok(Value::Bool(!equal(a, unary("!=", args)?)))
        });
        ops.register_with_aliases(&["<", "lt"], |a, args| compare("<", a, args, Ordering::is_lt));
        ops.register_with_aliases(&["<=", "le"], |a, args| compare("<=", a, args, Ordering::is_le));
        ops.register_with_aliases(&[">", "gt"], |a, args| compare(">", a, args, Ordering::is_gt));
        ops.register_with_aliases(&[">=", "ge"], |a, args| compare(">=", a, args, Ordering::is_ge));

        ops.register_with_aliases(&["^", "xor"], |a, args| {
            logic("^", a, unary("^", args)?, |x, y| x ^ y, |x, y| x != y)
        });
        ops.register_with_aliases(&["&", "and"], |a, args| {
            logic("&", a, unary("&", args)?, |x, y| x & y, |x, y| x && y)
        });
        ops.register_with_aliases(&["|", "or"], |a, args| {
            logic("|", a, unary("|", args)?, |x, y| x | y, |x, y| x || y)
        });
        ops.register_with_aliases(&["!", "not"], |a, args| {
            nullary("!", args)?;
            Ok(Value::Bool(!a.is_truthy()))
        });

        ops.register_with_aliases(&["[]", "at"], |a, args| index(a, unary("[]", args)?));
        ops.register_with_aliases(&["size", "len"], |a, args| {
            nullary("size", args)?;
            match a {
                Value::List(items) => Ok(Value::Int(items.len() as i64)),
                Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
                other => Err(Error::operand(
                    "size",
                    format!("{} has no size", other.type_name()),
                )),
            }
        });
        ops.register("to_s", |a, args| {
            nullary("to_s", args)?;
            Ok(Value::string(a.to_string()))
        });
        ops.register_direct("call", |a, args| match a {
            Value::Lambda(l) => l.call(args),
            other => Ok(other.clone()),
        });

        ops
    }

    pub fn register(
        &mut self,
        name: &str,
        eval: impl Fn(&Value, &[Value]) -> Result<Value> + 'static,
    ) -> &mut Self {
        self.table.insert(name.into(), Rc::new(Operation::new(name, eval)));
        self
    }

    pub fn register_direct(
        &mut self,
        name: &str,
        eval: impl Fn(&Value, &[Value]) -> Result<Value> + 'static,
    ) -> &mut Self {
        self.table.insert(name.into(), Rc::new(Operation::direct(name, eval)));
        self
    }

    /// Registers one operation under several names.
    pub fn register_with_aliases(
        &mut self,
        names: &[&str],
        eval: impl Fn(&Value, &[Value]) -> Result<Value> + 'static,
    ) -> &mut Self {
        let Some((primary, aliases)) = names.split_first() else {
            return self;
        };
        let operation = Rc::new(Operation::new(primary, eval));
        self.table.insert((*primary).into(), Rc::clone(&operation));
        for alias in aliases {
            self.table.insert((*alias).into(), Rc::clone(&operation));
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Rc<Operation>> {
        self.table.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Rc<Operation>> {
        self.table.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn nullary(operation: &str, args: &[Value]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(Error::operand(operation, format!("expected no arguments, got {}", args.len())))
    }
}

fn unary<'a>(operation: &str, args: &'a [Value]) -> Result<&'a Value> {
    match args {
        [arg] => Ok(arg),
        _ => Err(Error::operand(operation, format!("expected 1 argument, got {}", args.len()))),
    }
}

fn mismatch(operation: &str, a: &Value, b: &Value) -> Error {
    Error::operand(operation, format!("{} and {}", a.type_name(), b.type_name()))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Concat {
    Yes,
    No,
}

fn arith(
    operation: &str,
    a: &Value,
    b: &Value,
    int: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
    concat: Concat,
) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => int(*x, *y)
            .map(Value::Int)
            .ok_or_else(|| Error::operand(operation, "integer overflow or division by zero")),
        (Value::Int(x), Value::Float(y)) => Ok(Value::Float(float(*x as f64, *y))),
        (Value::Float(x), Value::Int(y)) => Ok(Value::Float(float(*x, *y as f64))),
        (Value::Float(x), Value::Float(y)) => Ok(Value::Float(float(*x, *y))),
        (Value::Str(x), Value::Str(y)) if concat == Concat::Yes => Ok(Value::string(format!("{x}{y}"))),
        (Value::List(x), Value::List(y)) if concat == Concat::Yes => {
            Ok(Value::list(x.iter().chain(y.iter()).cloned()))
        }
        _ => Err(mismatch(operation, a, b)),
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(x: i64, y: i64) -> Option<i64> {
    let q = x.checked_div(y)?;
    if x % y != 0 && (x < 0) != (y < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Remainder taking the sign of the divisor.
fn floor_rem(x: i64, y: i64) -> Option<i64> {
    let r = x.checked_rem(y)?;
    if r != 0 && (r < 0) != (y < 0) {
        Some(r + y)
    } else {
        Some(r)
    }
}

fn numeric_order(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            numeric_order(a, b) == Some(Ordering::Equal)
        }
        _ => a == b,
    }
}

fn compare(operation: &str, a: &Value, args: &[Value], test: fn(Ordering) -> bool) -> Result<Value> {
    let b = unary(operation, args)?;
    numeric_order(a, b)
        .map(|ordering| Value::Bool(test(ordering)))
        .ok_or_else(|| mismatch(operation, a, b))
}

/// Bitwise on integers; on anything else the receiver must be a boolean or
/// nil and the argument is read for truthiness.
fn logic(
    operation: &str,
    a: &Value,
    b: &Value,
    int: fn(i64, i64) -> i64,
    boolean: fn(bool, bool) -> bool,
) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(int(*x, *y))),
        (Value::Bool(_) | Value::Nil, _) => Ok(Value::Bool(boolean(a.is_truthy(), b.is_truthy()))),
        _ => Err(mismatch(operation, a, b)),
    }
}

fn index(a: &Value, i: &Value) -> Result<Value> {
    let Value::Int(i) = i else {
        return Err(Error::operand("[]", format!("index must be int, got {}", i.type_name())));
    };
    let position = |len: usize| -> Option<usize> {
        let i = if *i < 0 { len as i64 + i } else { *i };
        usize::try_from(i).ok().filter(|&i| i < len)
    };
    match a {
        Value::List(items) => Ok(position(items.len())
            .map(|i| items[i].clone())
            .unwrap_or(Value::Nil)),
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            Ok(position(chars.len())
                .map(|i| Value::string(chars[i].to_string()))
                .unwrap_or(Value::Nil))
        }
        other => Err(Error::operand("[]", format!("{} is not indexable", other.type_name()))),
    }
}
