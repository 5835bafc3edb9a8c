//! Lazy conditionals with back-patchable branches.
//!
//! The branch table is shared between the conditional lambda and every
//! [`Branches`] handle. Invocation reads the table each time, so an `else`
//! branch attached after the conditional was handed out is still seen.
//! Only one writer at a time; there is no locking.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::coerce::to_lambda;
use crate::error::{Error, Result};
use crate::lambda::Lambda;
use crate::runtime::Runtime;
use crate::value::Value;

#[derive(Debug)]
pub struct BranchTable {
    pub cond: Lambda,
    pub then: Lambda,
    pub otherwise: Option<Lambda>,
}

#[derive(Clone)]
pub struct Branches(Rc<RefCell<BranchTable>>);

impl Branches {
    fn new(cond: Lambda, then: Lambda) -> Self {
        Branches(Rc::new(RefCell::new(BranchTable {
            cond,
            then,
            otherwise: None,
        })))
    }

    pub fn cond(&self) -> Lambda {
        self.0.borrow().cond.clone()
    }

    pub fn then(&self) -> Lambda {
        self.0.borrow().then.clone()
    }

    pub fn otherwise(&self) -> Option<Lambda> {
        self.0.borrow().otherwise.clone()
    }

    /// Installs the else branch, returning the one it replaces.
    pub fn set_otherwise(&self, block: Lambda) -> Option<Lambda> {
        log::debug!("patching else branch with {block:?}");
        self.0.borrow_mut().otherwise.replace(block)
    }

    pub fn clear_otherwise(&self) -> Option<Lambda> {
        self.0.borrow_mut().otherwise.take()
    }

    pub(crate) fn evaluate(&self, actuals: &[Value]) -> Result<Value> {
        // Borrows are released before calling out so branches may patch the table.
        let cond = self.cond();
        if cond.call(actuals)?.is_truthy() {
            let then = self.then();
            return then.call(actuals);
        }
        match self.otherwise() {
            Some(otherwise) => otherwise.call(actuals),
            None => Ok(Value::Nil),
        }
    }
}

impl fmt::Debug for Branches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(table) => fmt::Debug::fmt(&*table, f),
            Err(_) => f.write_str("BranchTable(<borrowed>)"),
        }
    }
}

/// Builds a conditional: `cond` and `then` are coerced to lambdas and both
/// receive the call arguments. Without an else branch a false condition
/// yields `Nil`.
pub fn if_(cond: impl Into<Value>, then: impl Into<Value>) -> Lambda {
    Lambda::conditional(Branches::new(to_lambda(cond), to_lambda(then)))
}

impl Runtime {
    pub fn if_(&self, cond: impl Into<Value>, then: impl Into<Value>) -> Lambda {
        if_(cond, then)
    }

    /// `if_(cond ^ true, block)`, with the negation going through dispatch so
    /// a lambda condition stays lazy.
    pub fn unless_(&self, cond: impl Into<Value>, block: impl Into<Value>) -> Result<Lambda> {
        let negated = self.negate(&cond.into())?;
        Ok(if_(negated, block))
    }
}

impl Lambda {
    /// Attaches the else branch of a conditional and returns the conditional.
    pub fn else_(&self, block: impl Into<Value>) -> Result<Lambda> {
        let branches = self.branches().ok_or(Error::NotConditional)?;
        branches.set_otherwise(to_lambda(block));
        Ok(self.clone())
    }

    /// Chains a nested conditional into the else slot and returns the nested
    /// one, so a following `else_` attaches to the innermost branch.
    pub fn elsif_(&self, cond: impl Into<Value>, block: impl Into<Value>) -> Result<Lambda> {
        let nested = if_(cond, block);
        self.else_(nested.clone())?;
        Ok(nested)
    }
}
