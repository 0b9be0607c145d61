//! synthmetrics core: resource identity, metric samples, quantities, label
//! selectors, and the shared error surface.
//!
//! This crate defines the data contracts shared by the metrics engine, the
//! HTTP surface, and any collaborator implementation. It carries no runtime or
//! transport dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod catalog;
pub mod error;
pub mod metric;
pub mod quantity;
pub mod resource;
pub mod selector;

/// Shared result type.
pub use error::{Result, MetricsError};
