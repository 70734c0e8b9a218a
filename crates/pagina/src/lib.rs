//! Pagina: Declarative Page-Object Accessor Layer
//!
//! Pagina (Spanish: "page") generates the interaction surface of browser
//! page objects from declared field descriptors. A page-object type
//! declares its fields once — `(name, kind, selector)` — and the accessor
//! layer compiles each declaration into a fixed per-kind bundle of
//! operations (getters, setters, click triggers, existence checks, raw
//! handles), resolved fresh against the live page on every call.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PAGINA Architecture                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐     ┌────────────┐     ┌────────────┐          │
//! │   │ Registry   │     │ Accessor   │     │ Scoped     │          │
//! │   │ (declared  │────►│ Compiler   │────►│ Resolver   │──► driver│
//! │   │  fields)   │     │ (per-kind  │     │ (document  │          │
//! │   │            │     │  bundles)  │     │  or region)│          │
//! │   └────────────┘     └────────────┘     └────────────┘          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry is built once per page-object type and frozen; instances
//! share it. A [`Page`] resolves fields against the whole document; a
//! [`Region`] resolves the same registry inside its own container element,
//! which is how one definition serves N repeated page fragments.
//!
//! # Example
//!
//! ```
//! use pagina::{MockDriver, MockElement, Page, Registry, Selector};
//! use std::sync::Arc;
//!
//! let registry = Registry::builder()
//!     .text_field("username", Selector::id("username"))
//!     .text_field("password", Selector::id("password"))
//!     .button("login", Selector::css("button[type='submit']"))
//!     .build()
//!     .unwrap();
//!
//! let driver = Arc::new(MockDriver::new());
//! let _ = driver.install(Selector::id("username"), MockElement::new("input"));
//! let page = Page::new(driver, registry);
//!
//! page.field("username").unwrap().set_value("ada").unwrap();
//! assert!(page.field("username").unwrap().exists());
//! assert!(!page.settable_fields().contains("login"));
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod accessor;
mod driver;
mod element;
mod page;
mod registry;
mod resolver;
mod result;
mod selector;

pub use accessor::{Accessor, Operation};
pub use driver::{Driver, MockDriver, MockElement};
pub use element::{Element, ElementHandle, ElementKind};
pub use page::{AttachHook, Page, Region, RegionBuilder};
pub use registry::{FieldDescriptor, Registry, RegistryBuilder};
pub use result::{PaginaError, PaginaResult};
pub use selector::Selector;
