//! # Component Trait - The Lifecycle Contract
//!
//! Defines the contract that ALL lifecycle-capable collaborators must
//! implement to participate in dependency-ordered orchestration.
//!
//! ## Design
//!
//! - **No mandatory methods**: every method has a no-op default, so a
//!   pass-through component is a one-line impl
//! - **Sequential transitions**: `start`/`stop` are awaited to completion
//!   before the orchestrator touches the next component
//! - **Explicit injection**: resolved dependencies arrive through
//!   [`Component::inject`], never through hidden globals
//!
//! ## Example Implementation
//!
//! ```rust,ignore
//! use system_map::{Component, ResolvedDependencies, SharedComponent};
//! use async_trait::async_trait;
//!
//! pub struct Webapp {
//!     database: Option<SharedComponent>,
//! }
//!
//! #[async_trait]
//! impl Component for Webapp {
//!     fn inject(&mut self, deps: &ResolvedDependencies) {
//!         self.database = deps.component("database");
//!     }
//!
//!     async fn start(&mut self) -> anyhow::Result<()> {
//!         // open sockets, spawn workers, ...
//!         Ok(())
//!     }
//!
//!     async fn stop(&mut self) -> anyhow::Result<()> {
//!         // drain and close
//!         Ok(())
//!     }
//! }
//! ```

use crate::domain::entities::ResolvedDependencies;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The core trait implemented by every lifecycle-capable component.
///
/// Implementations report their own failures as [`anyhow::Error`]; the
/// orchestrator wraps them with the failing system key and the attempted
/// operation before surfacing them.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Begin operation of this component.
    ///
    /// Awaited to completion (including any internal I/O) before the next
    /// component in build order is started. Default is a no-op transition.
    async fn start(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Cease operation of this component.
    ///
    /// Awaited to completion before the next component in reverse build
    /// order is stopped. Default is a no-op transition.
    async fn stop(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Receive the dependencies resolved for this component, keyed by the
    /// local field names of its declaration.
    ///
    /// Called before every `start` and `stop` transition and after every
    /// replacement, since dependency targets may have changed. Default
    /// ignores the bag (components with no declaration never see a
    /// non-empty one).
    fn inject(&mut self, _dependencies: &ResolvedDependencies) {}
}

/// A type-erased component handle.
pub type DynComponent = Box<dyn Component>;

/// A shared, lockable component handle.
///
/// The same handle registered in the system is the one injected into every
/// dependent, so identity is preserved across binding.
pub type SharedComponent = Arc<RwLock<DynComponent>>;
