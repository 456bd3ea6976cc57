//! Plotshot automates frame-by-frame export of an animation rendered by an
//! embedded graphing-calculator widget.
//!
//! A local backend service precomputes per-frame expression sets; plotshot
//! polls it until it is up, then drives the widget through a linear capture
//! loop:
//!
//! 1. **Bootstrap**: poll `GET /init` until the session configuration arrives
//! 2. **Setup**: install control expressions, resume from the take-on-read
//!    [`ResumeStore`] or wait for the user's start signal
//! 3. **Fetch**: load a batch of expression sets when the buffer runs dry
//! 4. **Capture**: reset to the baseline state, apply one frame, restore the
//!    viewport, snapshot, and hand the frame to a [`SnapshotSink`]
//!
//! At each batch boundary the session persists a resume record and restarts
//! with a fresh widget, shedding the slowdown the widget accumulates over
//! long runs. [`run_export`] drives the whole export across those restarts.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backend;
mod capture;
mod foundation;
mod session;
mod widget;

pub use crate::backend::client::{FrameBackend, HttpBackend, ScriptedBackend, wait_for_config};
pub use crate::backend::wire::{
    BlockResponse, Expression, ExpressionSet, FrameBlock, InitResponse, SessionConfig,
    SliderBounds,
};
pub use crate::capture::sink::{DirectorySink, InMemorySink, SinkConfig, SnapshotSink};
pub use crate::foundation::core::{Canvas, FrameIndex, FrameNumber, Viewport};
pub use crate::foundation::error::{PlotshotError, PlotshotResult};
pub use crate::session::export_session::{
    ExportOpts, ExportSession, ExportStats, PassOutcome, run_export,
};
pub use crate::session::resume::{InMemoryResumeStore, ResumeState, ResumeStore};
pub use crate::widget::api::{
    GraphingWidget, MathBounds, Screenshot, ScreenshotMode, ScreenshotOpts, WidgetState,
};
pub use crate::widget::headless::HeadlessWidget;
