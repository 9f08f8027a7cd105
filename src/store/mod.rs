pub mod counters;

pub use counters::{CounterMap, CounterSaturated};
