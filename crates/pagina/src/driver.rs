//! Driver boundary and in-memory test doubles.
//!
//! The browser binding is an external collaborator; [`Driver`] is the
//! capability set this crate requires of it: locate an element by (kind,
//! selector), optionally scoped within a previously-resolved container.
//! Everything else (clicks, values, options) happens through the handles
//! the driver returns (see [`Element`]).
//!
//! [`MockDriver`] and [`MockElement`] implement the boundary in memory for
//! unit tests: nodes are installed per scope, interaction state is held
//! behind a mutex so setters are observable, and every lookup is recorded
//! in a call history for verification.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::element::{Element, ElementHandle, ElementKind};
use crate::result::{PaginaError, PaginaResult};
use crate::selector::Selector;

/// Element lookup capability the accessor layer delegates to.
pub trait Driver: Send + Sync {
    /// Find an element of `kind` matching `selector` in the document.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::Resolution`] when no element matches.
    fn find(&self, kind: ElementKind, selector: &Selector) -> PaginaResult<ElementHandle>;

    /// Find an element of `kind` matching `selector` inside `container`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginaError::Resolution`] when no element matches within
    /// the container.
    fn find_within(
        &self,
        kind: ElementKind,
        selector: &Selector,
        container: &ElementHandle,
    ) -> PaginaResult<ElementHandle>;
}

/// Mutable interaction state of a [`MockElement`].
#[derive(Debug, Default, Clone)]
struct MockState {
    value: String,
    text: String,
    checked: bool,
    options: Vec<String>,
    present: bool,
    clicks: u32,
}

/// In-memory element for unit testing.
///
/// Built with chainable setters, then turned into an [`ElementHandle`] via
/// [`MockElement::into_handle`]. Interaction state lives behind a mutex so
/// `set_value`/`check`/`select_option` round-trips are observable, and
/// every trait call is recorded.
#[derive(Debug)]
pub struct MockElement {
    tag: String,
    state: Mutex<MockState>,
    calls: Mutex<Vec<String>>,
}

impl MockElement {
    /// Create a present element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            state: Mutex::new(MockState {
                present: true,
                ..MockState::default()
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the initial form value.
    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.state.lock().unwrap().value = value.into();
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.state.lock().unwrap().text = text.into();
        self
    }

    /// Set the initial checked state.
    #[must_use]
    pub fn with_checked(self, checked: bool) -> Self {
        self.state.lock().unwrap().checked = checked;
        self
    }

    /// Set the option labels, in DOM order.
    #[must_use]
    pub fn with_options<I, S>(self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.lock().unwrap().options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the element as absent (`exists` reports `false`).
    #[must_use]
    pub fn absent(self) -> Self {
        self.state.lock().unwrap().present = false;
        self
    }

    /// Freeze into a shareable handle.
    #[must_use]
    pub fn into_handle(self) -> ElementHandle {
        Arc::new(self)
    }

    /// Tag name this element was created with.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of times `click` was invoked.
    #[must_use]
    pub fn clicks(&self) -> u32 {
        self.state.lock().unwrap().clicks
    }

    /// Recorded trait calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl Element for MockElement {
    fn value(&self) -> PaginaResult<String> {
        self.record("value");
        Ok(self.state.lock().unwrap().value.clone())
    }

    fn set_value(&self, value: &str) -> PaginaResult<()> {
        self.record(format!("set_value:{value}"));
        self.state.lock().unwrap().value = value.to_string();
        Ok(())
    }

    fn text(&self) -> PaginaResult<String> {
        self.record("text");
        Ok(self.state.lock().unwrap().text.clone())
    }

    fn click(&self) -> PaginaResult<()> {
        self.record("click");
        self.state.lock().unwrap().clicks += 1;
        Ok(())
    }

    fn checked(&self) -> PaginaResult<bool> {
        self.record("checked");
        Ok(self.state.lock().unwrap().checked)
    }

    fn check(&self) -> PaginaResult<()> {
        self.record("check");
        self.state.lock().unwrap().checked = true;
        Ok(())
    }

    fn uncheck(&self) -> PaginaResult<()> {
        self.record("uncheck");
        self.state.lock().unwrap().checked = false;
        Ok(())
    }

    fn select_option(&self, option_text: &str) -> PaginaResult<()> {
        self.record(format!("select_option:{option_text}"));
        let mut state = self.state.lock().unwrap();
        if state.options.iter().any(|o| o == option_text) {
            state.value = option_text.to_string();
            Ok(())
        } else {
            Err(PaginaError::resolution(
                format!("option[text='{option_text}']"),
                "no option with that label",
            ))
        }
    }

    fn options(&self) -> PaginaResult<Vec<ElementHandle>> {
        self.record("options");
        let labels = self.state.lock().unwrap().options.clone();
        Ok(labels
            .into_iter()
            .map(|label| MockElement::new("option").with_text(label).into_handle())
            .collect())
    }

    fn exists(&self) -> bool {
        self.state.lock().unwrap().present
    }
}

/// Nodes installed under one container scope.
#[derive(Debug, Default)]
struct ScopeNodes {
    nodes: HashMap<Selector, ElementHandle>,
}

/// In-memory [`Driver`] for unit testing.
///
/// Nodes are installed ahead of time, either at document scope
/// ([`MockDriver::install`]) or inside a container
/// ([`MockDriver::install_within`]); lookups for anything else fail with a
/// resolution error. Lookups are recorded for verification.
#[derive(Debug, Default)]
pub struct MockDriver {
    document: Mutex<ScopeNodes>,
    scopes: Mutex<Vec<(ElementHandle, ScopeNodes)>>,
    call_history: Mutex<Vec<String>>,
}

impl MockDriver {
    /// Create an empty mock driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a document-scoped node, returning its handle.
    pub fn install(&self, selector: Selector, element: MockElement) -> ElementHandle {
        let handle = element.into_handle();
        let _ = self
            .document
            .lock()
            .unwrap()
            .nodes
            .insert(selector, Arc::clone(&handle));
        handle
    }

    /// Install a node inside `container`, returning its handle.
    pub fn install_within(
        &self,
        container: &ElementHandle,
        selector: Selector,
        element: MockElement,
    ) -> ElementHandle {
        let handle = element.into_handle();
        let mut scopes = self.scopes.lock().unwrap();
        if let Some((_, nodes)) = scopes.iter_mut().find(|(c, _)| Arc::ptr_eq(c, container)) {
            let _ = nodes.nodes.insert(selector, Arc::clone(&handle));
        } else {
            let mut nodes = ScopeNodes::default();
            let _ = nodes.nodes.insert(selector, Arc::clone(&handle));
            scopes.push((Arc::clone(container), nodes));
        }
        handle
    }

    /// Recorded lookups, in order.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    /// Check whether a lookup with the given prefix was recorded.
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.starts_with(prefix))
    }
}

impl Driver for MockDriver {
    fn find(&self, kind: ElementKind, selector: &Selector) -> PaginaResult<ElementHandle> {
        self.call_history
            .lock()
            .unwrap()
            .push(format!("find:{kind}:{selector}"));
        self.document
            .lock()
            .unwrap()
            .nodes
            .get(selector)
            .cloned()
            .ok_or_else(|| {
                PaginaError::resolution(selector.to_string(), format!("no {kind} in document"))
            })
    }

    fn find_within(
        &self,
        kind: ElementKind,
        selector: &Selector,
        container: &ElementHandle,
    ) -> PaginaResult<ElementHandle> {
        self.call_history
            .lock()
            .unwrap()
            .push(format!("find_within:{kind}:{selector}"));
        self.scopes
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| Arc::ptr_eq(c, container))
            .and_then(|(_, nodes)| nodes.nodes.get(selector).cloned())
            .ok_or_else(|| {
                PaginaError::resolution(selector.to_string(), format!("no {kind} in container"))
            })
    }
}
