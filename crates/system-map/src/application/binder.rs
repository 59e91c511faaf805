//! Dependency binder: resolves declared dependencies against the system
//! and injects them into the component before it transitions.
//!
//! Binding re-runs on every start, stop, and replace traversal, since
//! dependency targets may have changed. Plain-data entries are resolvable
//! as targets but are never bound themselves.

use crate::domain::entities::{ResolvedDependencies, SystemEntry, SystemValue};
use crate::domain::errors::SystemError;
use std::collections::HashMap;

/// Resolve the declared dependencies of `key` against the system.
///
/// Every `(local field, system key)` pair must resolve to a present entry;
/// an absent target fails with [`SystemError::MissingDependency`].
pub(crate) fn resolve_dependencies(
    entries: &HashMap<String, SystemEntry>,
    key: &str,
    entry: &SystemEntry,
) -> Result<ResolvedDependencies, SystemError> {
    entry.dependencies.validate(key)?;

    let mut resolved = ResolvedDependencies::default();
    for (field, target) in entry.dependencies.iter() {
        let dependency = entries
            .get(target)
            .ok_or_else(|| SystemError::MissingDependency {
                component: key.to_string(),
                field: field.to_string(),
                key: target.to_string(),
            })?;
        resolved.insert(field.to_string(), dependency.value.clone());
    }
    Ok(resolved)
}

/// Bind `key`: resolve its declaration and hand the values to the
/// component's `inject` hook. No-op for plain-data entries.
pub(crate) async fn bind(
    entries: &HashMap<String, SystemEntry>,
    key: &str,
) -> Result<(), SystemError> {
    let entry = entries.get(key).ok_or_else(|| SystemError::MissingComponent {
        key: key.to_string(),
    })?;

    let SystemValue::Component(handle) = &entry.value else {
        return Ok(());
    };

    let resolved = resolve_dependencies(entries, key, entry)?;
    let mut component = handle.write().await;
    component.inject(&resolved);
    Ok(())
}
