//! Value objects for system composition.

use crate::domain::errors::SystemError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Lifecycle state of a registered component.
///
/// Two-state machine: `Stopped --start--> Started`, `Started --stop-->
/// Stopped`. Both transitions are idempotent no-ops when the component is
/// already in the target state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentState {
    /// Not running. Initial state of every registration.
    #[default]
    Stopped,
    /// Running; its `start` completed successfully.
    Started,
}

/// The lifecycle transition being attempted on a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleOp {
    Start,
    Stop,
}

impl LifecycleOp {
    /// State a component reaches after this operation succeeds.
    pub fn target_state(self) -> ComponentState {
        match self {
            Self::Start => ComponentState::Started,
            Self::Stop => ComponentState::Stopped,
        }
    }
}

impl fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// A component's dependency declaration.
///
/// An ordered mapping from *local field name* (the name the component knows
/// the dependency by) to *system key* (the name the dependency is
/// registered under). Built either from an explicit mapping or from a list
/// of names used verbatim on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    pairs: Vec<(String, String)>,
}

impl DependencySpec {
    /// A declaration with no dependencies.
    pub fn empty() -> Self {
        Self::default()
    }

    /// List form: each name is used as both the local field and the system
    /// key.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pairs: names
                .into_iter()
                .map(|name| {
                    let name = name.into();
                    (name.clone(), name)
                })
                .collect(),
        }
    }

    /// Mapping form: explicit local field name to system key pairs.
    pub fn mapping<I, L, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, K)>,
        L: Into<String>,
        K: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(local, key)| (local.into(), key.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterate `(local field, system key)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(local, key)| (local.as_str(), key.as_str()))
    }

    /// Check declaration shape: names must be non-empty and local fields
    /// unique within one declaration.
    pub(crate) fn validate(&self, component: &str) -> Result<(), SystemError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for (local, key) in self.iter() {
            if local.is_empty() || key.is_empty() {
                return Err(SystemError::InvalidDeclaration {
                    component: component.to_string(),
                    reason: "empty local field or system key".to_string(),
                });
            }
            if !seen.insert(local) {
                return Err(SystemError::InvalidDeclaration {
                    component: component.to_string(),
                    reason: format!("duplicate local field '{local}'"),
                });
            }
        }
        Ok(())
    }
}

/// Restart scope for [`SystemMap::replace`](crate::SystemMap::replace).
///
/// Replacement never transitions components outside the requested set: a
/// leaf data value changing must not restart unrelated branches of the
/// graph unless explicitly listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
    /// Splice the new entries in and rebind dependencies; no component is
    /// started or stopped. For replacing plain-data dependencies without
    /// perturbing running components.
    #[default]
    None,
    /// Stop and restart exactly the keys being replaced.
    Replaced,
    /// Stop and restart the keys being replaced plus the listed extras
    /// (e.g. dependents that must observe the new value).
    ReplacedAnd(Vec<String>),
}
