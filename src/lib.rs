//! trendkit: click counting and top-K trending primitives.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;
pub mod store;
pub mod tracker;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
