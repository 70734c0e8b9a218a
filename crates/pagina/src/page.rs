//! Page-object instances: document-scoped pages and container-scoped
//! regions.
//!
//! A [`Page`] pairs a driver with a frozen registry; its accessors resolve
//! against the whole document. A [`Region`] additionally owns a container
//! handle — a previously-resolved element, typically one of N repeated
//! fragments — and its accessors resolve inside that container. Both hand
//! out [`Accessor`] bundles through [`Page::field`]/[`Region::field`].
//!
//! Region construction is validated: the enclosing context, the container
//! element, and the registry are all mandatory, and a missing one fails
//! with [`PaginaError::Construction`]. An optional typed `on_attach`
//! callback runs after the required fields are set.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::accessor::{Accessor, Operation};
use crate::driver::Driver;
use crate::element::ElementHandle;
use crate::registry::Registry;
use crate::result::{PaginaError, PaginaResult};

/// A document-scoped page object: driver + frozen registry.
pub struct Page {
    driver: Arc<dyn Driver>,
    registry: Arc<Registry>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("fields", &self.registry.len())
            .finish()
    }
}

impl Page {
    /// Create a page over `driver` with the type's field registry.
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, registry: Arc<Registry>) -> Self {
        Self { driver, registry }
    }

    /// The compiled accessor bundle for a registered field.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::UnknownField`] for an unregistered name.
    pub fn field(&self, name: &str) -> PaginaResult<Accessor<'_>> {
        let descriptor = self
            .registry
            .lookup(name)
            .ok_or_else(|| PaginaError::UnknownField {
                name: name.to_string(),
            })?;
        Ok(Accessor::new(self.driver.as_ref(), None, descriptor))
    }

    /// The shared registry this page was built from.
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The driver this page resolves through.
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Registered names whose kind generates a setter.
    #[must_use]
    pub fn settable_fields(&self) -> BTreeSet<&str> {
        settable_fields(&self.registry)
    }

    /// Fill settable fields from (name, value) pairs. See [`Region::populate`].
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::UnknownField`] for an unregistered name;
    /// setter failures propagate unchanged.
    pub fn populate<I, K, V>(&self, values: I) -> PaginaResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        populate(self.driver.as_ref(), None, &self.registry, values)
    }
}

/// Post-construction callback a region definition may supply.
pub type AttachHook = Box<dyn FnOnce(&Region) -> PaginaResult<()> + Send>;

/// A container-scoped page object over one dynamic fragment.
///
/// Holds a borrowed-from-the-page container element for its whole lifetime
/// and never re-acquires it; every accessor resolves fresh *within* that
/// container. Build one per fragment with [`Region::builder`] — two regions
/// over different containers resolve the same field name to different
/// concrete elements.
pub struct Region {
    driver: Arc<dyn Driver>,
    container: ElementHandle,
    registry: Arc<Registry>,
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("container", &self.container)
            .field("fields", &self.registry.len())
            .finish()
    }
}

impl Region {
    /// Start building a region.
    #[must_use]
    pub fn builder() -> RegionBuilder {
        RegionBuilder::new()
    }

    /// The compiled accessor bundle for a registered field, scoped to this
    /// region's container.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::UnknownField`] for an unregistered name.
    pub fn field(&self, name: &str) -> PaginaResult<Accessor<'_>> {
        let descriptor = self
            .registry
            .lookup(name)
            .ok_or_else(|| PaginaError::UnknownField {
                name: name.to_string(),
            })?;
        Ok(Accessor::new(
            self.driver.as_ref(),
            Some(&self.container),
            descriptor,
        ))
    }

    /// The container element this region is scoped to.
    #[must_use]
    pub fn container(&self) -> &ElementHandle {
        &self.container
    }

    /// The shared registry this region was built from.
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Registered names whose kind generates a setter.
    #[must_use]
    pub fn settable_fields(&self) -> BTreeSet<&str> {
        settable_fields(&self.registry)
    }

    /// Fill settable fields from (name, value) pairs.
    ///
    /// Fields whose kind generates `set_checked` parse the value as a
    /// boolean (`true`/`yes`/`on`/`1`, case-insensitive); fields with
    /// `set_value` receive the text as-is; names without a setter are
    /// skipped with a debug event.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::UnknownField`] for an unregistered name;
    /// setter failures propagate unchanged.
    pub fn populate<I, K, V>(&self, values: I) -> PaginaResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        populate(
            self.driver.as_ref(),
            Some(&self.container),
            &self.registry,
            values,
        )
    }
}

/// Builder for [`Region`] with mandatory-reference validation.
///
/// # Example
///
/// ```
/// use pagina::{MockDriver, MockElement, Page, Region, Registry, Selector};
/// use std::sync::Arc;
///
/// let driver = Arc::new(MockDriver::new());
/// let row = driver.install(Selector::css("div.row"), MockElement::new("div"));
/// let registry = Registry::builder()
///     .text_field("question", Selector::name("q"))
///     .build()
///     .unwrap();
/// let page = Page::new(driver, Arc::clone(&registry));
///
/// let region = Region::builder()
///     .context(&page)
///     .container(row)
///     .registry(registry)
///     .build()
///     .unwrap();
/// assert!(region.settable_fields().contains("question"));
/// ```
#[derive(Default)]
pub struct RegionBuilder {
    driver: Option<Arc<dyn Driver>>,
    container: Option<ElementHandle>,
    registry: Option<Arc<Registry>>,
    on_attach: Option<AttachHook>,
}

impl fmt::Debug for RegionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionBuilder")
            .field("has_context", &self.driver.is_some())
            .field("has_container", &self.container.is_some())
            .field("has_registry", &self.registry.is_some())
            .field("has_attach_hook", &self.on_attach.is_some())
            .finish()
    }
}

impl RegionBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the enclosing context from an existing page.
    #[must_use]
    pub fn context(mut self, page: &Page) -> Self {
        self.driver = Some(Arc::clone(page.driver()));
        self
    }

    /// Supply the enclosing context as a bare driver.
    #[must_use]
    pub fn driver(mut self, driver: Arc<dyn Driver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Supply the container element the region is scoped to.
    #[must_use]
    pub fn container(mut self, container: ElementHandle) -> Self {
        self.container = Some(container);
        self
    }

    /// Supply the region type's field registry.
    #[must_use]
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Supply a post-construction hook, invoked once after the required
    /// references are validated and set.
    #[must_use]
    pub fn on_attach<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&Region) -> PaginaResult<()> + Send + 'static,
    {
        self.on_attach = Some(Box::new(hook));
        self
    }

    /// Validate and construct the region.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::Construction`] when the enclosing context,
    /// the container element, or the registry is missing; hook failures
    /// propagate unchanged.
    pub fn build(self) -> PaginaResult<Region> {
        let driver = self
            .driver
            .ok_or_else(|| PaginaError::construction("an enclosing context is required"))?;
        let container = self
            .container
            .ok_or_else(|| PaginaError::construction("a container element is required"))?;
        let registry = self
            .registry
            .ok_or_else(|| PaginaError::construction("a field registry is required"))?;

        let region = Region {
            driver,
            container,
            registry,
        };
        if let Some(hook) = self.on_attach {
            hook(&region)?;
        }
        Ok(region)
    }
}

fn settable_fields(registry: &Registry) -> BTreeSet<&str> {
    registry
        .descriptors()
        .filter(|descriptor| descriptor.kind().is_settable())
        .map(|descriptor| descriptor.name())
        .collect()
}

fn parse_checked(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

fn populate<I, K, V>(
    driver: &dyn Driver,
    scope: Option<&ElementHandle>,
    registry: &Registry,
    values: I,
) -> PaginaResult<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (name, value) in values {
        let name = name.as_ref();
        let descriptor = registry
            .lookup(name)
            .ok_or_else(|| PaginaError::UnknownField {
                name: name.to_string(),
            })?;
        let accessor = Accessor::new(driver, scope, descriptor);
        if accessor.supports(Operation::SetChecked) {
            accessor.set_checked(parse_checked(value.as_ref()))?;
        } else if accessor.supports(Operation::SetValue) {
            accessor.set_value(value.as_ref())?;
        } else {
            debug!(field = %name, kind = %descriptor.kind(), "skipping non-settable field");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use crate::selector::Selector;

    fn login_registry() -> Arc<Registry> {
        Registry::builder()
            .text_field("username", Selector::id("username"))
            .text_field("password", Selector::id("password"))
            .button("login", Selector::css("button[type='submit']"))
            .build()
            .unwrap()
    }

    mod page_tests {
        use super::*;

        #[test]
        fn test_field_for_unknown_name() {
            let page = Page::new(Arc::new(MockDriver::new()), login_registry());
            let err = page.field("missing").unwrap_err();
            assert!(matches!(err, PaginaError::UnknownField { name } if name == "missing"));
        }

        #[test]
        fn test_settable_fields_probe_setter_operations() {
            let page = Page::new(Arc::new(MockDriver::new()), login_registry());
            let settable = page.settable_fields();
            assert!(settable.contains("username"));
            assert!(settable.contains("password"));
            assert!(!settable.contains("login"));
        }

        #[test]
        fn test_page_accessor_resolves_unscoped() {
            let driver = Arc::new(MockDriver::new());
            let _ = driver.install(Selector::id("username"), MockElement::new("input"));
            let page = Page::new(Arc::clone(&driver) as Arc<dyn Driver>, login_registry());

            page.field("username").unwrap().set_value("ada").unwrap();
            assert_eq!(page.field("username").unwrap().value().unwrap(), "ada");
            assert!(driver.was_called("find:text_field"));
        }

        #[test]
        fn test_populate_fills_settable_and_skips_button() {
            let driver = Arc::new(MockDriver::new());
            let username = driver.install(Selector::id("username"), MockElement::new("input"));
            let _ = driver.install(Selector::id("password"), MockElement::new("input"));
            let page = Page::new(Arc::clone(&driver) as Arc<dyn Driver>, login_registry());

            page.populate([
                ("username", "ada"),
                ("password", "hunter2"),
                ("login", "ignored"),
            ])
            .unwrap();

            assert_eq!(username.value().unwrap(), "ada");
            // The button was skipped, so its selector was never resolved.
            assert!(!driver.was_called("find:button"));
        }

        #[test]
        fn test_populate_unknown_field_errors() {
            let page = Page::new(Arc::new(MockDriver::new()), login_registry());
            let err = page.populate([("nonexistent", "x")]).unwrap_err();
            assert!(matches!(err, PaginaError::UnknownField { .. }));
        }

        #[test]
        fn test_populate_checkbox_parses_boolean() {
            let driver = Arc::new(MockDriver::new());
            let remember = driver.install(Selector::id("remember"), MockElement::new("input"));
            let registry = Registry::builder()
                .checkbox("remember", Selector::id("remember"))
                .build()
                .unwrap();
            let page = Page::new(Arc::clone(&driver) as Arc<dyn Driver>, registry);

            page.populate([("remember", "yes")]).unwrap();
            assert!(remember.checked().unwrap());
            page.populate([("remember", "false")]).unwrap();
            assert!(!remember.checked().unwrap());
        }
    }

    mod region_builder_tests {
        use super::*;

        #[test]
        fn test_missing_container_fails() {
            let page = Page::new(Arc::new(MockDriver::new()), login_registry());
            let err = Region::builder()
                .context(&page)
                .registry(login_registry())
                .build()
                .unwrap_err();
            assert!(matches!(err, PaginaError::Construction { .. }));
        }

        #[test]
        fn test_missing_context_fails() {
            let err = Region::builder()
                .container(MockElement::new("div").into_handle())
                .registry(login_registry())
                .build()
                .unwrap_err();
            assert!(matches!(err, PaginaError::Construction { .. }));
        }

        #[test]
        fn test_missing_registry_fails() {
            let page = Page::new(Arc::new(MockDriver::new()), login_registry());
            let err = Region::builder()
                .context(&page)
                .container(MockElement::new("div").into_handle())
                .build()
                .unwrap_err();
            assert!(matches!(err, PaginaError::Construction { .. }));
        }

        #[test]
        fn test_attach_hook_runs_after_construction() {
            let driver = Arc::new(MockDriver::new());
            let container = driver.install(Selector::css("div.row"), MockElement::new("div"));
            let page = Page::new(Arc::clone(&driver) as Arc<dyn Driver>, login_registry());

            let region = Region::builder()
                .context(&page)
                .container(container)
                .registry(login_registry())
                .on_attach(|region| {
                    // Required fields are already set when the hook runs.
                    assert_eq!(region.registry().len(), 3);
                    Ok(())
                })
                .build()
                .unwrap();
            assert_eq!(region.registry().len(), 3);
        }

        #[test]
        fn test_attach_hook_failure_propagates() {
            let driver = Arc::new(MockDriver::new());
            let container = driver.install(Selector::css("div.row"), MockElement::new("div"));
            let page = Page::new(Arc::clone(&driver) as Arc<dyn Driver>, login_registry());

            let err = Region::builder()
                .context(&page)
                .container(container)
                .registry(login_registry())
                .on_attach(|_| Err(PaginaError::construction("setup refused")))
                .build()
                .unwrap_err();
            assert!(matches!(err, PaginaError::Construction { message } if message == "setup refused"));
        }
    }

    mod parse_checked_tests {
        use super::*;

        #[test]
        fn test_truthy_values() {
            for value in ["true", "TRUE", "yes", "on", "1"] {
                assert!(parse_checked(value), "{value} should parse as checked");
            }
        }

        #[test]
        fn test_falsy_values() {
            for value in ["false", "no", "off", "0", ""] {
                assert!(!parse_checked(value), "{value} should parse as unchecked");
            }
        }
    }
}
