//! Snapshot sinks.
//!
//! Sinks consume captured frames in strictly increasing frame-number order.

pub(crate) mod sink;
