//! Quay is an at-least-once message queue on Redis with a paired producer and consumer.
//!
//! This is an _umbrella crate_ for re-exporting different components of
//! the queue system from a single place according to the features enabled
//! like `consume` for the `quay_consume` crate to allow draining queues.
//!
//! Shared utilities from `core` will always be available, regardless of
//! the features enabled.
//!
//! Read documentation for each sub-crate for more information.

pub use quay_core as core;

#[cfg(feature = "produce")]
pub use quay_produce as produce;

#[cfg(feature = "consume")]
pub use quay_consume as consume;

pub mod prelude {
    pub use crate::core::prelude::*;

    #[cfg(feature = "produce")]
    pub use crate::produce::prelude::*;

    #[cfg(feature = "consume")]
    pub use crate::consume::prelude::*;
}
