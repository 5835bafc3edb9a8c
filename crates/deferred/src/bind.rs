//! Substitution of actual arguments into formal parameters.

use crate::error::Result;
use crate::protect::{is_bound, unprotect};
use crate::value::Value;

/// Resolves `formals` against `actuals`.
///
/// Each bound formal (an unprotected lambda) is invoked with `actuals`;
/// every other formal is passed through with one layer of protection
/// removed. Formals are processed left to right and the first error is
/// returned as is: protection already consumed by earlier formals stays
/// consumed.
pub fn fill(formals: &[Value], actuals: &[Value]) -> Result<Vec<Value>> {
    formals
        .iter()
        .map(|formal| match formal.as_invocable() {
            Some(invocable) if is_bound(formal) => invocable.call(actuals),
            _ => Ok(unprotect(formal.clone())),
        })
        .inspect(|filled| log::trace!("fill -> {filled:?}"))
        .collect()
}
