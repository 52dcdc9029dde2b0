//! Middleware trait for wrapping `TrattaConnector` implementations.
//!
//! Call origin is tracked with a Tokio task-local so that orchestrator
//! fan-outs (e.g. the board chunks behind a day-trip search) can be told
//! apart from end-user calls without threading a parameter through every
//! provider method.

use std::sync::Arc;

use async_trait::async_trait;

use crate::connector::TrattaConnector;
use tratta_types::{Capability, TrattaError};

tokio::task_local! {
    static CALL_ORIGIN: CallOrigin;
}

/// Who initiated the current provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOrigin {
    /// A direct end-user call through the public API.
    External,
    /// A call the orchestrator issued on its own behalf (fan-outs, retries).
    Internal,
}

impl CallOrigin {
    /// The origin of the current task, `External` when no scope is active.
    #[must_use]
    pub fn current() -> Self {
        CALL_ORIGIN.try_with(|o| *o).unwrap_or(Self::External)
    }

    /// Run `fut` with this origin set for the duration of the future.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "tratta::core", level = "trace", skip(self, fut), fields(origin = ?self))
    )]
    pub async fn scope<F>(self, fut: F) -> F::Output
    where
        F: Future,
    {
        CALL_ORIGIN.scope(self, fut).await
    }
}

/// Per-call context handed to middleware hooks.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    capability: Capability,
    origin: CallOrigin,
}

impl CallContext {
    /// Capture the context for a call about to be made, snapshotting the
    /// current task-local origin.
    #[must_use]
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            origin: CallOrigin::current(),
        }
    }

    /// The capability being invoked.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// Who initiated the call.
    #[must_use]
    pub const fn origin(&self) -> CallOrigin {
        self.origin
    }
}

/// Snapshot of one layer in a stack under validation.
#[derive(Debug, Clone)]
pub struct MiddlewareDescriptor {
    /// Layer name as reported by [`Middleware::name`].
    pub name: &'static str,
}

/// Context handed to [`Middleware::validate`] when a stack is built.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// All layers in the stack, outermost first.
    pub stack: Vec<MiddlewareDescriptor>,
    /// Index of the layer being validated within `stack`.
    pub index: usize,
}

impl ValidationContext {
    /// Whether the layer under validation is the outermost one.
    #[must_use]
    pub const fn is_outermost(&self) -> bool {
        self.index == 0
    }

    /// Names of layers wrapped by the one under validation, outermost first.
    #[must_use]
    pub fn inner_names(&self) -> Vec<&'static str> {
        self.stack[self.index + 1..].iter().map(|d| d.name).collect()
    }
}

/// Trait implemented by connector middleware layers.
///
/// A middleware consumes an inner `TrattaConnector` and returns a wrapped
/// connector that augments or restricts behavior (e.g., quotas, caching).
/// Wrapper connectors themselves also implement this trait to supply the
/// `pre_call`/`map_error` hooks used by the delegation macros.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner connector and return the wrapped connector.
    fn apply(self: Box<Self>, inner: Arc<dyn TrattaConnector>) -> Arc<dyn TrattaConnector>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;

    /// Check that this layer is acceptable at its position in the stack.
    ///
    /// # Errors
    /// Returns `InvalidMiddlewareStack` when the composition is rejected.
    fn validate(&self, _ctx: &ValidationContext) -> Result<(), TrattaError> {
        Ok(())
    }

    /// Hook invoked before the wrapped provider call.
    ///
    /// # Errors
    /// Returning an error aborts the call before it reaches the provider.
    async fn pre_call(&self, _ctx: &CallContext) -> Result<(), TrattaError> {
        Ok(())
    }

    /// Hook invoked on provider errors before they propagate outward.
    fn map_error(&self, err: TrattaError, _ctx: &CallContext) -> TrattaError {
        err
    }
}
