//! Runtime configuration (TOML).
//!
//! ```toml
//! escape_prefix = "_"
//!
//! [placeholders]
//! style = "letters"
//! alphabet = "xyz"
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Stripped once from an operation name sent to a lambda, so operations
    /// that collide with lambda methods (`call`, `protect`, ...) can still be
    /// deferred: `_call` dispatches to `call`.
    pub escape_prefix: String,

    /// How names map to argument positions.
    pub placeholders: PlaceholderConvention,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            escape_prefix: "_".to_owned(),
            placeholders: PlaceholderConvention::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Strips the escape prefix once, if present.
    pub fn normalize<'a>(&self, name: &'a str) -> &'a str {
        if self.escape_prefix.is_empty() {
            return name;
        }
        name.strip_prefix(self.escape_prefix.as_str()).unwrap_or(name)
    }
}

/// Naming convention for argument placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum PlaceholderConvention {
    /// `<prefix><digits>`: `arg0`, `arg1`, ...
    Indexed { prefix: String },
    /// A single character, indexed by its position in `alphabet`.
    Letters { alphabet: String },
}

impl Default for PlaceholderConvention {
    fn default() -> Self {
        PlaceholderConvention::Indexed {
            prefix: "arg".to_owned(),
        }
    }
}

impl PlaceholderConvention {
    pub fn argument_index(&self, name: &str) -> Option<usize> {
        match self {
            PlaceholderConvention::Indexed { prefix } => {
                let digits = name.strip_prefix(prefix.as_str())?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse().ok()
            }
            PlaceholderConvention::Letters { alphabet } => {
                let mut chars = name.chars();
                let letter = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                alphabet.chars().position(|c| c == letter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.escape_prefix, "_");
        assert_eq!(config.placeholders.argument_index("arg0"), Some(0));
        assert_eq!(config.placeholders.argument_index("arg12"), Some(12));
    }

    #[test]
    fn test_indexed_rejects_malformed_names() {
        let convention = PlaceholderConvention::default();
        assert_eq!(convention.argument_index("arg"), None);
        assert_eq!(convention.argument_index("arg+1"), None);
        assert_eq!(convention.argument_index("argx"), None);
        assert_eq!(convention.argument_index("x0"), None);
    }

    #[test]
    fn test_letters() {
        let convention = PlaceholderConvention::Letters {
            alphabet: "xyz".to_owned(),
        };
        assert_eq!(convention.argument_index("x"), Some(0));
        assert_eq!(convention.argument_index("z"), Some(2));
        assert_eq!(convention.argument_index("w"), None);
        assert_eq!(convention.argument_index("xy"), None);
        assert_eq!(convention.argument_index(""), None);
    }

    #[test]
    fn test_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            escape_prefix = "__"

            [placeholders]
            style = "letters"
            alphabet = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(config.escape_prefix, "__");
        assert_eq!(config.placeholders.argument_index("b"), Some(1));
        assert_eq!(config.normalize("__call"), "call");
        assert_eq!(config.normalize("_call"), "_call");
    }

    #[test]
    fn test_from_toml_uses_defaults_for_missing_keys() {
        let config = RuntimeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_from_toml_reports_errors() {
        let err = RuntimeConfig::from_toml_str("[placeholders]\nstyle = \"roman\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_normalize_strips_once() {
        let config = RuntimeConfig::default();
        assert_eq!(config.normalize("_add"), "add");
        assert_eq!(config.normalize("__add"), "_add");
        assert_eq!(config.normalize("add"), "add");
    }
}
