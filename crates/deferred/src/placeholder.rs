//! Argument placeholders.

use std::rc::Rc;

use crate::config::PlaceholderConvention;
use crate::value::Value;

/// A named stand-in for a positional argument.
///
/// Instances are not interned; two placeholders resolving to the same
/// argument index compare equal.
#[derive(Debug, Clone)]
pub struct Placeholder {
    name: Rc<str>,
    index: Option<usize>,
}

impl Placeholder {
    pub fn new(name: &str, convention: &PlaceholderConvention) -> Self {
        Self {
            name: name.into(),
            index: convention.argument_index(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn argument_index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_argument(&self) -> bool {
        self.index.is_some()
    }

    /// Missing arguments resolve to `Nil`.
    pub fn resolve(&self, actuals: &[Value]) -> Value {
        self.index
            .and_then(|i| actuals.get(i))
            .cloned()
            .unwrap_or(Value::Nil)
    }
}

impl PartialEq for Placeholder {
    fn eq(&self, other: &Self) -> bool {
        match (self.index, other.index) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.name == other.name,
            _ => false,
        }
    }
}

impl Eq for Placeholder {}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> PlaceholderConvention {
        PlaceholderConvention::Letters {
            alphabet: "xyz".to_owned(),
        }
    }

    #[test]
    fn test_resolve() {
        let y = Placeholder::new("y", &letters());
        assert_eq!(y.resolve(&[Value::int(1), Value::int(2)]), Value::int(2));
        assert_eq!(y.resolve(&[Value::int(1)]), Value::Nil);
    }

    #[test]
    fn test_equality_by_index() {
        let convention = PlaceholderConvention::default();
        assert_eq!(
            Placeholder::new("arg1", &convention),
            Placeholder::new("arg01", &convention)
        );
        assert_ne!(
            Placeholder::new("arg1", &convention),
            Placeholder::new("arg2", &convention)
        );
    }

    #[test]
    fn test_non_argument_names() {
        let foo = Placeholder::new("foo", &letters());
        assert!(!foo.is_argument());
        assert_eq!(foo.resolve(&[Value::int(1)]), Value::Nil);
    }
}
