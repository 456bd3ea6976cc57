use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{PlotshotError, PlotshotResult};

/// Slider bounds attached to a slider-backed widget expression.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SliderBounds {
    /// Minimum slider value.
    pub min: f64,
    /// Maximum slider value.
    pub max: f64,
    /// Slider step.
    pub step: f64,
}

/// One widget expression definition, as carried on the wire and passed to the
/// widget verbatim.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Expression {
    /// Stable expression id; setting the same id again replaces the expression.
    pub id: String,
    /// LaTeX source of the expression.
    pub latex: String,
    /// Optional display color (hex string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Hide the expression from the widget's expression list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<bool>,
    /// Slider bounds, present only on slider-backed expressions.
    #[serde(
        rename = "sliderBounds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub slider_bounds: Option<SliderBounds>,
}

/// The full expression set constituting one animation frame.
pub type ExpressionSet = Vec<Expression>;

/// Response payload of `GET /init`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InitResponse {
    /// Output height in pixels.
    pub height: u32,
    /// Output width in pixels.
    pub width: u32,
    /// Total number of frames in the animation.
    pub total_frames: u64,
    /// Whether captured frames should be written to disk.
    pub download_images: bool,
    /// Whether the widget grid and axes stay visible during capture.
    pub show_grid: bool,
}

impl InitResponse {
    /// Validate and convert into a [`SessionConfig`].
    pub fn into_config(self) -> PlotshotResult<SessionConfig> {
        Ok(SessionConfig {
            canvas: Canvas::new(self.width, self.height)?,
            total_frames: self.total_frames,
            download_images: self.download_images,
            show_grid: self.show_grid,
        })
    }
}

/// Immutable per-session configuration, read once from the backend at
/// connection time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Total number of frames in the animation.
    pub total_frames: u64,
    /// Whether captured frames should be written to disk.
    pub download_images: bool,
    /// Whether the widget grid and axes stay visible during capture.
    pub show_grid: bool,
}

/// Response payload of `GET /?frame=<n>`.
///
/// `result` is null while the backend has nothing buffered for the requested
/// frame; in that case `number_of_frames` is omitted as well.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockResponse {
    /// Expression sets for frames `n`, `n+1`, ... or null.
    pub result: Option<Vec<ExpressionSet>>,
    /// Count of newly loaded frames (not the animation total).
    #[serde(default)]
    pub number_of_frames: u64,
}

impl BlockResponse {
    /// Convert into a [`FrameBlock`] anchored at `first`, or `None` for a
    /// null result.
    pub fn into_block(self, first: FrameIndex) -> Option<FrameBlock> {
        let sets = self.result?;
        if sets.len() as u64 != self.number_of_frames {
            tracing::debug!(
                reported = self.number_of_frames,
                actual = sets.len(),
                "block length differs from reported number_of_frames"
            );
        }
        Some(FrameBlock { first, sets })
    }
}

/// An ordered batch of per-frame expression sets covering frames
/// `[first, first + len)`. Replaced wholesale on each fetch; read-only during
/// consumption.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBlock {
    first: FrameIndex,
    sets: Vec<ExpressionSet>,
}

impl FrameBlock {
    /// Build a block anchored at `first`.
    pub fn new(first: FrameIndex, sets: Vec<ExpressionSet>) -> Self {
        Self { first, sets }
    }

    /// First covered frame index.
    pub fn first(&self) -> FrameIndex {
        self.first
    }

    /// One-past-the-last covered frame index.
    pub fn end(&self) -> FrameIndex {
        FrameIndex(self.first.0 + self.sets.len() as u64)
    }

    /// Number of buffered frames.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the block holds no frames.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Whether `frame` falls inside `[first, end)`.
    pub fn covers(&self, frame: FrameIndex) -> bool {
        self.first.0 <= frame.0 && frame.0 < self.end().0
    }

    /// Expression set for `frame`, if covered.
    pub fn get(&self, frame: FrameIndex) -> PlotshotResult<&ExpressionSet> {
        if !self.covers(frame) {
            return Err(PlotshotError::validation(format!(
                "frame {} outside fetched block [{}, {})",
                frame.0,
                self.first.0,
                self.end().0
            )));
        }
        Ok(&self.sets[(frame.0 - self.first.0) as usize])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/wire.rs"]
mod tests;
