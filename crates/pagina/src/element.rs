//! Element kinds and the driver-side handle interface.
//!
//! [`ElementKind`] is the closed set of form/content element categories a
//! field can be declared as; it drives which operations the accessor layer
//! generates for the field (see [`ElementKind::operations`]).
//!
//! [`Element`] is the explicit interface a driver's element handles must
//! satisfy. Handles are shared as [`ElementHandle`] trait objects; every
//! method reflects the live node, so a handle held across page mutation may
//! start failing with driver-reported errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::result::PaginaResult;

/// A shared, driver-owned element handle.
pub type ElementHandle = Arc<dyn Element>;

/// The closed set of element kinds a field can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Single-line text input
    TextField,
    /// Multi-line text input
    TextArea,
    /// Hidden form input
    HiddenField,
    /// Generic block container
    Div,
    /// Form label
    Label,
    /// File upload input
    FileField,
    /// Clickable button
    Button,
    /// Two-state toggle input
    Checkbox,
    /// Drop-down selection list
    SelectList,
    /// Hyperlink
    Link,
    /// Inline text container
    Span,
    /// Unordered list
    UnorderedList,
    /// Table
    Table,
    /// Table cell
    Cell,
}

impl ElementKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::TextField,
        Self::TextArea,
        Self::HiddenField,
        Self::Div,
        Self::Label,
        Self::FileField,
        Self::Button,
        Self::Checkbox,
        Self::SelectList,
        Self::Link,
        Self::Span,
        Self::UnorderedList,
        Self::Table,
        Self::Cell,
    ];

    /// Snake-case name, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextField => "text_field",
            Self::TextArea => "text_area",
            Self::HiddenField => "hidden_field",
            Self::Div => "div",
            Self::Label => "label",
            Self::FileField => "file_field",
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::SelectList => "select_list",
            Self::Link => "link",
            Self::Span => "span",
            Self::UnorderedList => "unordered_list",
            Self::Table => "table",
            Self::Cell => "cell",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interface a driver's element handles must satisfy.
///
/// One method per interaction primitive the accessor layer delegates to.
/// Implementations report failures (stale node, driver fault) as
/// [`crate::PaginaError::Resolution`]; `exists` is the only infallible
/// query.
pub trait Element: fmt::Debug + Send + Sync {
    /// Current form value.
    fn value(&self) -> PaginaResult<String>;

    /// Replace the form value.
    fn set_value(&self, value: &str) -> PaginaResult<()>;

    /// Text content.
    fn text(&self) -> PaginaResult<String>;

    /// Activate the element.
    fn click(&self) -> PaginaResult<()>;

    /// Checked state of a toggle element.
    fn checked(&self) -> PaginaResult<bool>;

    /// Set the checked state on.
    fn check(&self) -> PaginaResult<()>;

    /// Set the checked state off.
    fn uncheck(&self) -> PaginaResult<()>;

    /// Select the option whose label matches `option_text`.
    fn select_option(&self, option_text: &str) -> PaginaResult<()>;

    /// Option handles in DOM order (each exposing `text`).
    fn options(&self) -> PaginaResult<Vec<ElementHandle>>;

    /// Whether the node is currently present and queryable.
    fn exists(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod kind_tests {
        use super::*;

        #[test]
        fn test_all_covers_every_kind() {
            assert_eq!(ElementKind::ALL.len(), 14);
        }

        #[test]
        fn test_as_str_round_trip_via_serde() {
            for kind in ElementKind::ALL {
                let json = serde_json::to_string(&kind).unwrap();
                assert_eq!(json, format!("\"{}\"", kind.as_str()));
                let back: ElementKind = serde_json::from_str(&json).unwrap();
                assert_eq!(back, kind);
            }
        }

        #[test]
        fn test_display() {
            assert_eq!(ElementKind::SelectList.to_string(), "select_list");
            assert_eq!(ElementKind::Button.to_string(), "button");
        }
    }
}
