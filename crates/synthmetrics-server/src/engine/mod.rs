//! Synthetic metric engine.
//!
//! Query flow: normalize the identifier through the resolver, advance its
//! counter, then either build one sample (by name) or list matching instances
//! and split the total across them (by selector).

mod aggregate;
mod counter;
mod normalize;
mod provider;
mod sample;

pub use aggregate::{build_aggregate, even_share, instances_of};
pub use counter::CounterStore;
pub use normalize::normalize;
pub use provider::MetricsEngine;
pub use sample::{build_sample, scaled_quantity, VALUE_SCALE};
