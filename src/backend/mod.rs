//! Frame backend boundary.
//!
//! The backend is a local HTTP service that exposes session configuration at
//! `/init` and precomputed per-frame expression sets at `/?frame=<n>`.

pub(crate) mod client;
pub(crate) mod wire;
