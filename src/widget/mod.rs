//! Graphing widget boundary.
//!
//! The widget owns rendering, expression state, and screenshot capability;
//! this crate only drives it through [`api::GraphingWidget`].

pub(crate) mod api;
pub(crate) mod headless;
