//! Session orchestration.
//!
//! [`export_session::ExportSession`] drives one widget lifetime; exports
//! restart with a fresh widget at batch boundaries and resume from
//! [`resume::ResumeStore`].

pub(crate) mod export_session;
pub(crate) mod resume;
