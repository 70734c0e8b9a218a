//! The descriptor-to-behavior compiler.
//!
//! Every [`ElementKind`] maps to a fixed row of generated [`Operation`]s —
//! the template table in [`ElementKind::operations`]. An [`Accessor`] is
//! the compiled bundle for one declared field: one method per operation,
//! each gated on the field's row, resolving a fresh element through the
//! scoped resolver and delegating to the driver handle.
//!
//! Error policy: every operation except [`Accessor::exists`] propagates
//! resolution failures unchanged. `exists` is the single deliberate
//! recovery point, converting a resolution failure into `false`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::element::{ElementHandle, ElementKind};
use crate::registry::FieldDescriptor;
use crate::resolver;
use crate::result::{PaginaError, PaginaResult};

/// The closed set of operations the compiler can generate for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read the current form value
    Value,
    /// Replace the form value
    SetValue,
    /// Read the text content
    Text,
    /// Activate the element
    Click,
    /// Read the checked state
    Checked,
    /// Write the checked state from a boolean
    SetChecked,
    /// Turn the checked state on
    Check,
    /// Turn the checked state off
    Uncheck,
    /// Read alias of `Checked`
    Selected,
    /// Select an option by label
    Select,
    /// List option labels in DOM order
    Options,
    /// Return the raw resolved handle
    Element,
    /// Whether resolution currently succeeds
    Exists,
}

impl Operation {
    /// Snake-case name, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::SetValue => "set_value",
            Self::Text => "text",
            Self::Click => "click",
            Self::Checked => "checked",
            Self::SetChecked => "set_checked",
            Self::Check => "check",
            Self::Uncheck => "uncheck",
            Self::Selected => "selected",
            Self::Select => "select",
            Self::Options => "options",
            Self::Element => "element",
            Self::Exists => "exists",
        }
    }

    /// Whether this operation writes into the element.
    #[must_use]
    pub const fn is_setter(self) -> bool {
        matches!(self, Self::SetValue | Self::SetChecked)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ElementKind {
    /// The template table: the exact operation row generated for each kind.
    #[must_use]
    pub const fn operations(self) -> &'static [Operation] {
        use Operation as Op;
        match self {
            Self::TextField | Self::TextArea => {
                &[Op::Value, Op::SetValue, Op::Element, Op::Exists]
            }
            Self::HiddenField => &[Op::Value, Op::Element, Op::Exists],
            Self::Div | Self::Label | Self::Span | Self::Cell => {
                &[Op::Text, Op::Element, Op::Exists]
            }
            Self::FileField => &[Op::SetValue, Op::Element, Op::Exists],
            Self::Button | Self::Link => &[Op::Click, Op::Element, Op::Exists],
            Self::Checkbox => &[
                Op::Checked,
                Op::SetChecked,
                Op::Check,
                Op::Uncheck,
                Op::Selected,
                Op::Element,
                Op::Exists,
            ],
            Self::SelectList => &[Op::Value, Op::Select, Op::Options, Op::Element, Op::Exists],
            Self::UnorderedList | Self::Table => &[Op::Element, Op::Exists],
        }
    }

    /// Whether the kind's row contains a setter operation.
    #[must_use]
    pub fn is_settable(self) -> bool {
        self.operations().iter().any(|op| op.is_setter())
    }
}

/// The compiled operation bundle for one declared field.
///
/// Borrowed from the owning [`crate::Page`] or [`crate::Region`]; resolves
/// a fresh element on every call and never caches the handle.
///
/// # Example
///
/// ```
/// use pagina::{MockDriver, MockElement, Page, Registry, Selector};
/// use std::sync::Arc;
///
/// let driver = Arc::new(MockDriver::new());
/// let _ = driver.install(Selector::id("q"), MockElement::new("input"));
/// let registry = Registry::builder()
///     .text_field("search", Selector::id("q"))
///     .build()
///     .unwrap();
///
/// let page = Page::new(driver, registry);
/// let search = page.field("search").unwrap();
/// search.set_value("pagina").unwrap();
/// assert_eq!(search.value().unwrap(), "pagina");
/// ```
#[derive(Clone, Copy)]
pub struct Accessor<'a> {
    driver: &'a dyn Driver,
    scope: Option<&'a ElementHandle>,
    descriptor: &'a FieldDescriptor,
}

impl fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("field", &self.descriptor.name())
            .field("kind", &self.descriptor.kind())
            .field("scoped", &self.scope.is_some())
            .finish()
    }
}

impl<'a> Accessor<'a> {
    pub(crate) const fn new(
        driver: &'a dyn Driver,
        scope: Option<&'a ElementHandle>,
        descriptor: &'a FieldDescriptor,
    ) -> Self {
        Self {
            driver,
            scope,
            descriptor,
        }
    }

    /// The field's descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &FieldDescriptor {
        self.descriptor
    }

    /// The operation row generated for this field's kind.
    #[must_use]
    pub const fn operations(&self) -> &'static [Operation] {
        self.descriptor.kind().operations()
    }

    /// Whether this field's kind generates `operation`.
    #[must_use]
    pub fn supports(&self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }

    fn require(&self, operation: Operation) -> PaginaResult<()> {
        if self.supports(operation) {
            Ok(())
        } else {
            Err(PaginaError::UnsupportedOperation {
                field: self.descriptor.name().to_string(),
                kind: self.descriptor.kind(),
                operation,
            })
        }
    }

    fn resolve(&self) -> PaginaResult<ElementHandle> {
        resolver::resolve(self.driver, self.scope, self.descriptor)
    }

    /// Read the current form value.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for kinds without a value; `Resolution` when
    /// the element cannot be found.
    pub fn value(&self) -> PaginaResult<String> {
        self.require(Operation::Value)?;
        self.resolve()?.value()
    }

    /// Coerce `value` to text and write it into the element.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for non-settable kinds; `Resolution` when the
    /// element cannot be found.
    pub fn set_value(&self, value: impl fmt::Display) -> PaginaResult<()> {
        self.require(Operation::SetValue)?;
        self.resolve()?.set_value(&value.to_string())
    }

    /// Read the text content.
    pub fn text(&self) -> PaginaResult<String> {
        self.require(Operation::Text)?;
        self.resolve()?.text()
    }

    /// Activate the element. No return value.
    pub fn click(&self) -> PaginaResult<()> {
        self.require(Operation::Click)?;
        self.resolve()?.click()
    }

    /// Read the checked state.
    pub fn checked(&self) -> PaginaResult<bool> {
        self.require(Operation::Checked)?;
        self.resolve()?.checked()
    }

    /// Map a boolean onto the `check`/`uncheck` driver calls.
    pub fn set_checked(&self, on: bool) -> PaginaResult<()> {
        self.require(Operation::SetChecked)?;
        let element = self.resolve()?;
        if on {
            element.check()
        } else {
            element.uncheck()
        }
    }

    /// Turn the checked state on.
    pub fn check(&self) -> PaginaResult<()> {
        self.require(Operation::Check)?;
        self.resolve()?.check()
    }

    /// Turn the checked state off.
    pub fn uncheck(&self) -> PaginaResult<()> {
        self.require(Operation::Uncheck)?;
        self.resolve()?.uncheck()
    }

    /// Read alias of [`Accessor::checked`].
    pub fn selected(&self) -> PaginaResult<bool> {
        self.require(Operation::Selected)?;
        self.resolve()?.checked()
    }

    /// Select the option whose label matches `option_text`.
    pub fn select(&self, option_text: &str) -> PaginaResult<()> {
        self.require(Operation::Select)?;
        self.resolve()?.select_option(option_text)
    }

    /// Option labels in DOM order. Order is not guaranteed stable across
    /// page reloads.
    pub fn options(&self) -> PaginaResult<Vec<String>> {
        self.require(Operation::Options)?;
        let element = self.resolve()?;
        element
            .options()?
            .iter()
            .map(|option| option.text())
            .collect()
    }

    /// Resolve and return the raw element handle.
    pub fn element(&self) -> PaginaResult<ElementHandle> {
        self.require(Operation::Element)?;
        self.resolve()
    }

    /// Whether resolution currently succeeds and the node reports presence.
    ///
    /// The only operation that swallows a resolution failure: a failed
    /// `find` becomes `false` instead of an error.
    #[must_use]
    pub fn exists(&self) -> bool {
        match self.resolve() {
            Ok(element) => element.exists(),
            Err(_) => false,
        }
    }
}
