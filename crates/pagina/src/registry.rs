//! Descriptor registry: the per-type map from field name to descriptor.
//!
//! A page-object type declares its fields once through [`RegistryBuilder`]
//! and freezes the result behind `Arc<Registry>`; every instance of that
//! type shares the same registry and the registry is never mutated after
//! `build()`. Registering a name twice is a definition bug and fails fast
//! with [`PaginaError::DuplicateField`].
//!
//! Extension across types is explicit: [`RegistryBuilder::extend`] copies a
//! parent registry's descriptors into the child being built. There is no
//! implicit inheritance merge.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::ElementKind;
use crate::result::{PaginaError, PaginaResult};
use crate::selector::Selector;

/// The static (name, kind, selector) triple declared for one field.
///
/// Created at registration time and immutable afterwards. The selector is
/// taken by value, so after registration no external alias to it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,
    kind: ElementKind,
    selector: Selector,
}

impl FieldDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ElementKind, selector: Selector) -> Self {
        Self {
            name: name.into(),
            kind,
            selector,
        }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared element kind.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The locator selector, passed to the driver verbatim.
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }
}

/// Map from field name to [`FieldDescriptor`] for one page-object type.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Registry {
    fields: BTreeMap<String, FieldDescriptor>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a chainable builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Register a field.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::DuplicateField`] if `name` is already
    /// registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        kind: ElementKind,
        selector: Selector,
    ) -> PaginaResult<()> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(PaginaError::DuplicateField { name });
        }
        debug!(field = %name, kind = %kind, selector = %selector, "registered field");
        let descriptor = FieldDescriptor::new(name.clone(), kind, selector);
        let _ = self.fields.insert(name, descriptor);
        Ok(())
    }

    /// Look up a descriptor by name. Absence is not an error here; the
    /// accessor layer converts it into [`PaginaError::UnknownField`].
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Registered field names, in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Descriptors, in name order.
    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Declaration entry queued by the builder, checked at `build()`.
#[derive(Debug, Clone)]
struct PendingField {
    name: String,
    kind: ElementKind,
    selector: Selector,
}

macro_rules! kind_methods {
    ($(($method:ident, $kind:ident, $doc:literal)),+ $(,)?) => {
        $(
            #[doc = $doc]
            #[must_use]
            pub fn $method(self, name: impl Into<String>, selector: Selector) -> Self {
                self.field(name, ElementKind::$kind, selector)
            }
        )+
    };
}

/// Chainable declaration surface for building a [`Registry`].
///
/// One method per [`ElementKind`]; each queues a registration that is
/// checked (duplicates fail fast) when [`RegistryBuilder::build`] runs.
///
/// # Example
///
/// ```
/// use pagina::{Registry, Selector};
///
/// let registry = Registry::builder()
///     .text_field("username", Selector::id("username"))
///     .text_field("password", Selector::id("password"))
///     .button("login", Selector::css("button[type='submit']"))
///     .build()
///     .unwrap();
/// assert_eq!(registry.len(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RegistryBuilder {
    pending: Vec<PendingField>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a field of an explicit kind.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: ElementKind, selector: Selector) -> Self {
        self.pending.push(PendingField {
            name: name.into(),
            kind,
            selector,
        });
        self
    }

    kind_methods! {
        (text_field, TextField, "Declare a single-line text input field."),
        (text_area, TextArea, "Declare a multi-line text input field."),
        (hidden_field, HiddenField, "Declare a hidden form input field."),
        (div, Div, "Declare a generic block container field."),
        (label, Label, "Declare a form label field."),
        (file_field, FileField, "Declare a file upload input field."),
        (button, Button, "Declare a button field."),
        (checkbox, Checkbox, "Declare a checkbox field."),
        (select_list, SelectList, "Declare a drop-down selection field."),
        (link, Link, "Declare a hyperlink field."),
        (span, Span, "Declare an inline text container field."),
        (unordered_list, UnorderedList, "Declare an unordered-list field."),
        (table, Table, "Declare a table field."),
        (cell, Cell, "Declare a table-cell field."),
    }

    /// Copy every descriptor from a parent registry into this builder.
    ///
    /// This is the explicit extension step for sharing a base definition
    /// across page-object types; collisions with fields queued here fail at
    /// [`RegistryBuilder::build`] like any other duplicate.
    #[must_use]
    pub fn extend(mut self, parent: &Registry) -> Self {
        for descriptor in parent.descriptors() {
            self.pending.push(PendingField {
                name: descriptor.name().to_string(),
                kind: descriptor.kind(),
                selector: descriptor.selector().clone(),
            });
        }
        self
    }

    /// Perform the queued registrations and freeze the registry.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::DuplicateField`] on the first name collision.
    pub fn build(self) -> PaginaResult<Arc<Registry>> {
        let mut registry = Registry::new();
        for field in self.pending {
            registry.register(field.name, field.kind, field.selector)?;
        }
        Ok(Arc::new(registry))
    }
}
