//! tratta-middleware
//!
//! Composable wrappers for `TrattaConnector` implementations: quota
//! enforcement and response caching, plus the builder that assembles them
//! into an ordered stack.
#![warn(missing_docs)]

mod builder;
mod cache;
mod quota;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{CacheMiddleware, CachingConnector};
pub use crate::quota::{QuotaAwareConnector, QuotaMiddleware};
