//! Scoped element resolution.
//!
//! A pure function of (driver, optional container, descriptor) -> handle.
//! Holding the container on the instance instead of in the registry is what
//! lets one registry serve N repeated fragments: each instance passes its
//! own container here, so the same field name resolves to a different
//! concrete element per instance. No caching; every call reflects the
//! page's current DOM state.

use tracing::trace;

use crate::driver::Driver;
use crate::element::ElementHandle;
use crate::registry::FieldDescriptor;
use crate::result::PaginaResult;

/// Resolve a descriptor to a live element, scoped to `container` when one
/// is given.
///
/// # Errors
///
/// Propagates the driver's [`crate::PaginaError::Resolution`] unchanged.
pub(crate) fn resolve(
    driver: &dyn Driver,
    container: Option<&ElementHandle>,
    descriptor: &FieldDescriptor,
) -> PaginaResult<ElementHandle> {
    trace!(
        field = %descriptor.name(),
        kind = %descriptor.kind(),
        scoped = container.is_some(),
        "resolving element"
    );
    match container {
        Some(container) => driver.find_within(descriptor.kind(), descriptor.selector(), container),
        None => driver.find(descriptor.kind(), descriptor.selector()),
    }
}
