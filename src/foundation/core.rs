use crate::foundation::error::{PlotshotError, PlotshotResult};

/// 0-based frame index into the animation timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The 1-based frame number shown to users and used for file naming.
    pub fn number(self) -> FrameNumber {
        FrameNumber(self.0 + 1)
    }

    /// The next frame index.
    pub fn next(self) -> FrameIndex {
        FrameIndex(self.0 + 1)
    }
}

/// 1-based frame number, as displayed in the widget and used in output names.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameNumber(pub u64);

impl FrameNumber {
    /// 5-digit zero-padded output name for this frame, e.g. `frame-00001`.
    pub fn file_stem(self) -> String {
        format!("frame-{:05}", self.0)
    }

    /// The 0-based index of this frame.
    pub fn index(self) -> FrameIndex {
        FrameIndex(self.0.saturating_sub(1))
    }
}

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Construct a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> PlotshotResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlotshotError::validation("Canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// Widget viewport bounds in math coordinates.
///
/// The field names match the widget's wire representation and the resume
/// storage format exactly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Left bound.
    pub xmin: f64,
    /// Right bound.
    pub xmax: f64,
    /// Bottom bound.
    pub ymin: f64,
    /// Top bound.
    pub ymax: f64,
}

impl Viewport {
    /// Construct viewport bounds.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
