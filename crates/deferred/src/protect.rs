//! Protection counters.
//!
//! A protected lambda is passed through [`crate::fill`] as a value instead
//! of being invoked; every pass consumes one layer of protection.

use std::cell::Cell;

use crate::value::Value;

/// Per-lambda layer count. Absent until the first protect/unprotect.
#[derive(Debug, Default)]
pub struct ProtectionCounter {
    count: Cell<Option<i32>>,
}

impl ProtectionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protect(&self) {
        let count = self.count.get().unwrap_or(0);
        self.count.set(Some(count.saturating_add(1)));
    }

    /// Floor to 1, then decrement: an unprotected counter stays at 0 and a
    /// negative one heals to 0.
    pub fn unprotect(&self) {
        let count = match self.count.get() {
            Some(count) if count >= 1 => count,
            _ => 1,
        };
        self.count.set(Some(count - 1));
    }

    pub fn is_protected(&self) -> bool {
        matches!(self.count.get(), Some(count) if count > 0)
    }

    pub fn level(&self) -> u32 {
        self.count.get().map_or(0, |count| count.max(0) as u32)
    }

    /// Whether protect/unprotect has ever touched this counter.
    pub fn is_allocated(&self) -> bool {
        self.count.get().is_some()
    }

    #[cfg(test)]
    pub(crate) fn with_count(count: i32) -> Self {
        Self {
            count: Cell::new(Some(count)),
        }
    }
}

/// Capability: values carrying a [`ProtectionCounter`].
pub trait Protectable {
    fn counter(&self) -> &ProtectionCounter;

    fn protect(&self) {
        self.counter().protect();
    }

    fn unprotect(&self) {
        self.counter().unprotect();
    }

    fn is_protected(&self) -> bool {
        self.counter().is_protected()
    }
}

/// Adds one layer of protection and returns the value. No-op for values
/// that are not protectable.
pub fn protect(value: Value) -> Value {
    if let Some(p) = value.as_protectable() {
        p.protect();
    }
    value
}

/// Removes one layer of protection and returns the value. No-op for values
/// that are not protectable.
pub fn unprotect(value: Value) -> Value {
    if let Some(p) = value.as_protectable() {
        p.unprotect();
    }
    value
}

pub fn is_protected(value: &Value) -> bool {
    value.as_protectable().is_some_and(|p| p.is_protected())
}

pub fn is_lambda(value: &Value) -> bool {
    value.as_invocable().is_some()
}

/// An unprotected lambda, eligible for invocation during [`crate::fill`].
pub fn is_bound(value: &Value) -> bool {
    is_lambda(value) && !is_protected(value)
}

pub fn protection_level(value: &Value) -> u32 {
    value.as_protectable().map_or(0, |p| p.counter().level())
}
