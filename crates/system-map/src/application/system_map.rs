//! # SystemMap - The Lifecycle Orchestrator
//!
//! Owns the named component collection, computes and caches the build
//! order, drives start/stop transitions through the binder, and supports
//! targeted replacement with a minimal restart scope.
//!
//! Transitions are strictly sequential: components are started and stopped
//! one at a time in build order (or its reverse), each awaited to full
//! completion, even when two components share no dependency edge. The map
//! itself is not safe for concurrent `start`/`stop`/`replace` from
//! multiple callers; callers serialize their own access.

use crate::algorithms::{build_system_graph, kahns_build_order};
use crate::application::binder;
use crate::domain::entities::{Registration, SystemEntry, SystemValue};
use crate::domain::errors::SystemError;
use crate::domain::value_objects::{ComponentState, DependencySpec, LifecycleOp, RestartPolicy};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, error, info, warn};

/// Build order and its reverse, cached and invalidated as a pair.
#[derive(Debug, Clone)]
struct CachedOrder {
    forward: Vec<String>,
    reverse: Vec<String>,
}

/// Dependency-ordered collection of named components and plain values.
///
/// Keys are unique strings; insertion order is declaration order and feeds
/// the deterministic ordering of the graph builder.
#[derive(Debug, Default)]
pub struct SystemMap {
    /// Registered entries by system key.
    entries: HashMap<String, SystemEntry>,
    /// System keys in declaration order.
    insertion: Vec<String>,
    /// Cached order pair; rebuilt lazily, invalidated by mutation.
    cached: Option<CachedOrder>,
}

impl SystemMap {
    /// Create an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a system from `(key, registration)` pairs in declaration
    /// order.
    pub fn from_entries<K: Into<String>>(entries: Vec<(K, Registration)>) -> Self {
        let mut system = Self::new();
        for (key, registration) in entries {
            system.insert(key, registration);
        }
        system
    }

    /// Register a value under `key`.
    ///
    /// A new key is appended to the declaration order; re-registering an
    /// existing key replaces the value in place, keeping its position.
    /// Invalidates the cached build order.
    pub fn insert(&mut self, key: impl Into<String>, registration: Registration) {
        let key = key.into();
        if self.entries.contains_key(&key) {
            warn!("[SystemMap] key '{}' already registered, replacing", key);
        } else {
            self.insertion.push(key.clone());
        }
        self.entries.insert(key, SystemEntry::new(registration));
        self.cached = None;
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// System keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.insertion.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value registered under `key`.
    pub fn get(&self, key: &str) -> Option<&SystemValue> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// The lifecycle state of `key`. Plain-data entries report `Stopped`
    /// forever (they are never transitioned).
    pub fn state(&self, key: &str) -> Option<ComponentState> {
        self.entries.get(key).map(|entry| entry.state)
    }

    /// Start every component in build order.
    ///
    /// For each key: bind dependencies, then if the entry is a `Stopped`
    /// lifecycle component, await its `start` and mark it `Started`.
    /// Idempotent. On failure the traversal halts at the offending key;
    /// components already started stay started (callers compensate with
    /// [`stop`](Self::stop)).
    pub async fn start(&mut self) -> Result<(), SystemError> {
        let order = self.forward_order()?;
        info!(
            "[SystemMap] starting {} entries in dependency order",
            order.len()
        );
        self.update(&order, LifecycleOp::Start).await
    }

    /// Stop every component in reverse build order. Symmetric to
    /// [`start`](Self::start) in idempotence and failure policy.
    pub async fn stop(&mut self) -> Result<(), SystemError> {
        let order = self.reverse_order()?;
        info!("[SystemMap] stopping {} entries in reverse order", order.len());
        self.update(&order, LifecycleOp::Stop).await
    }

    /// Atomically swap a subset of system keys with new registrations.
    ///
    /// With [`RestartPolicy::None`] the new entries are spliced in and
    /// every component is rebound; nothing is started or stopped. With
    /// [`RestartPolicy::Replaced`] (or `ReplacedAnd`) the restart set —
    /// the replaced keys plus any listed extras — is stopped in the old
    /// reverse order, the entries are spliced in, the cached order is
    /// invalidated, every component is rebound, and the same set (filtered
    /// to keys still present) is started in the new order. Components
    /// outside the restart set are never transitioned.
    pub async fn replace(
        &mut self,
        entries: Vec<(String, Registration)>,
        restart: RestartPolicy,
    ) -> Result<(), SystemError> {
        let mut restart_set: HashSet<String> =
            entries.iter().map(|(key, _)| key.clone()).collect();

        match restart {
            RestartPolicy::None => {
                info!("[SystemMap] replacing {} entries without restart", entries.len());
                self.splice(entries);
                self.rebind_all().await
            }
            RestartPolicy::Replaced | RestartPolicy::ReplacedAnd(_) => {
                if let RestartPolicy::ReplacedAnd(extra) = restart {
                    restart_set.extend(extra);
                }
                info!(
                    "[SystemMap] replacing {} entries, restart scope of {}",
                    entries.len(),
                    restart_set.len()
                );

                // Stop the restart set in the old reverse order
                let stop_order: Vec<String> = self
                    .reverse_order()?
                    .into_iter()
                    .filter(|key| restart_set.contains(key))
                    .collect();
                self.update(&stop_order, LifecycleOp::Stop).await?;

                // Splice, invalidate (topology may have changed), rebind
                self.splice(entries);
                self.rebind_all().await?;

                // Start the restart set, filtered to keys still present,
                // in the new order
                let start_order: Vec<String> = self
                    .forward_order()?
                    .into_iter()
                    .filter(|key| restart_set.contains(key) && self.entries.contains_key(key))
                    .collect();
                self.update(&start_order, LifecycleOp::Start).await
            }
        }
    }

    /// Splice new registrations into the map. Replaced keys keep their
    /// declaration position; new keys are appended. Replacement entries
    /// always begin `Stopped`.
    fn splice(&mut self, entries: Vec<(String, Registration)>) {
        for (key, registration) in entries {
            if !self.entries.contains_key(&key) {
                self.insertion.push(key.clone());
            }
            self.entries.insert(key, SystemEntry::new(registration));
        }
        self.cached = None;
    }

    /// Rebind every component against the current system state, in
    /// declaration order. No transitions.
    async fn rebind_all(&mut self) -> Result<(), SystemError> {
        for key in &self.insertion {
            binder::bind(&self.entries, key).await?;
        }
        Ok(())
    }

    /// Drive one traversal: bind each key, then attempt the transition.
    async fn update(&mut self, order: &[String], op: LifecycleOp) -> Result<(), SystemError> {
        for key in order {
            binder::bind(&self.entries, key).await?;
            self.try_transition(key, op).await?;
        }
        Ok(())
    }

    /// Attempt `op` on `key`. Plain-data entries and idempotent no-op
    /// transitions are skipped; a component failure wraps the key and
    /// operation and halts the caller's traversal.
    async fn try_transition(&mut self, key: &str, op: LifecycleOp) -> Result<(), SystemError> {
        let (handle, state) = {
            let entry =
                self.entries
                    .get(key)
                    .ok_or_else(|| SystemError::MissingComponent {
                        key: key.to_string(),
                    })?;
            let SystemValue::Component(handle) = &entry.value else {
                return Ok(());
            };
            (handle.clone(), entry.state)
        };

        if state == op.target_state() {
            debug!("[SystemMap] '{}' already {:?}, skipping {}", key, state, op);
            return Ok(());
        }

        let result = {
            let mut component = handle.write().await;
            match op {
                LifecycleOp::Start => component.start().await,
                LifecycleOp::Stop => component.stop().await,
            }
        };

        match result {
            Ok(()) => {
                if let Some(entry) = self.entries.get_mut(key) {
                    entry.state = op.target_state();
                }
                debug!("[SystemMap] '{}' {} complete", key, op);
                Ok(())
            }
            Err(cause) => {
                error!("[SystemMap] '{}' failed during {}: {}", key, op, cause);
                Err(SystemError::Lifecycle {
                    key: key.to_string(),
                    op,
                    cause,
                })
            }
        }
    }

    /// Compute and cache the order pair if absent.
    fn ensure_order(&mut self) -> Result<(), SystemError> {
        if self.cached.is_some() {
            return Ok(());
        }

        let mut specs: Vec<(&str, &DependencySpec)> = Vec::with_capacity(self.insertion.len());
        for key in &self.insertion {
            let entry =
                self.entries
                    .get(key)
                    .ok_or_else(|| SystemError::MissingComponent {
                        key: key.clone(),
                    })?;
            specs.push((key.as_str(), &entry.dependencies));
        }

        let graph = build_system_graph(&specs)?;
        let forward = kahns_build_order(&graph)?;
        let reverse: Vec<String> = forward.iter().rev().cloned().collect();
        self.cached = Some(CachedOrder { forward, reverse });
        Ok(())
    }

    fn forward_order(&mut self) -> Result<Vec<String>, SystemError> {
        self.ensure_order()?;
        Ok(self
            .cached
            .as_ref()
            .map(|cached| cached.forward.clone())
            .unwrap_or_default())
    }

    fn reverse_order(&mut self) -> Result<Vec<String>, SystemError> {
        self.ensure_order()?;
        Ok(self
            .cached
            .as_ref()
            .map(|cached| cached.reverse.clone())
            .unwrap_or_default())
    }
}

impl fmt::Display for SystemMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemMap {{")?;
        for (i, key) in self.insertion.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {key}")?;
        }
        write!(f, " }}")
    }
}
