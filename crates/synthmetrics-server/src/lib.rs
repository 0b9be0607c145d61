//! synthmetrics server library entry.
//!
//! This crate wires the config loader, the static inventory, the metrics
//! engine, and the HTTP surface into a serving stack. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod ops;
pub mod router;
