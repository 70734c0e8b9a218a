//! Opaque locator specification passed through to the driver.
//!
//! A [`Selector`] is an ordered key/value bag (strategy -> value). The core
//! never interprets its contents; the driver collaborator decides what the
//! pairs mean. Convenience constructors cover the common strategies but
//! impose no schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An opaque key/value locator specification.
///
/// # Example
///
/// ```
/// use pagina::Selector;
///
/// let by_css = Selector::css("input[name='q']");
/// let custom = Selector::new().with("aria-label", "Search");
/// assert_eq!(by_css.get("css"), Some("input[name='q']"));
/// assert_eq!(custom.get("aria-label"), Some("Search"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Selector {
    pairs: BTreeMap<String, String>,
}

impl Selector {
    /// Create an empty selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a strategy/value pair.
    #[must_use]
    pub fn with(mut self, strategy: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.pairs.insert(strategy.into(), value.into());
        self
    }

    /// Create a CSS selector.
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::new().with("css", value)
    }

    /// Create an element-id selector.
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::new().with("id", value)
    }

    /// Create a name-attribute selector.
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::new().with("name", value)
    }

    /// Create an XPath selector.
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new().with("xpath", value)
    }

    /// Look up the value for a strategy.
    #[must_use]
    pub fn get(&self, strategy: &str) -> Option<&str> {
        self.pairs.get(strategy).map(String::as_str)
    }

    /// Iterate the strategy/value pairs in key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of strategy/value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the selector carries no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.pairs {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod constructor_tests {
        use super::*;

        #[test]
        fn test_css_selector() {
            let selector = Selector::css("button.primary");
            assert_eq!(selector.get("css"), Some("button.primary"));
            assert_eq!(selector.len(), 1);
        }

        #[test]
        fn test_id_selector() {
            let selector = Selector::id("submit");
            assert_eq!(selector.get("id"), Some("submit"));
        }

        #[test]
        fn test_custom_strategy() {
            let selector = Selector::new().with("data-testid", "score");
            assert_eq!(selector.get("data-testid"), Some("score"));
            assert_eq!(selector.get("css"), None);
        }

        #[test]
        fn test_empty_selector() {
            let selector = Selector::new();
            assert!(selector.is_empty());
        }
    }

    mod pair_tests {
        use super::*;

        #[test]
        fn test_with_replaces_existing_strategy() {
            let selector = Selector::css("a").with("css", "b");
            assert_eq!(selector.get("css"), Some("b"));
            assert_eq!(selector.len(), 1);
        }

        #[test]
        fn test_pairs_ordered_by_strategy() {
            let selector = Selector::new().with("xpath", "//a").with("css", "a");
            let strategies: Vec<&str> = selector.pairs().map(|(k, _)| k).collect();
            assert_eq!(strategies, vec!["css", "xpath"]);
        }

        #[test]
        fn test_display() {
            let selector = Selector::new().with("css", "#q").with("index", "2");
            assert_eq!(selector.to_string(), "css=#q, index=2");
        }
    }
}
