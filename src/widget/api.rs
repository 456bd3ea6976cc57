use std::time::Duration;

use crate::backend::wire::Expression;
use crate::foundation::core::Viewport;
use crate::foundation::error::{PlotshotError, PlotshotResult};

/// Opaque snapshot of the widget's full configuration.
///
/// The payload is the widget's own JSON state blob; this crate only touches
/// the grid/axis visibility flags and the embedded viewport, everything else
/// is carried through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetState(serde_json::Value);

impl WidgetState {
    /// Wrap a raw widget state blob.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the raw state blob.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// The viewport embedded in the state, if present.
    pub fn viewport(&self) -> Option<Viewport> {
        let vp = self.0.pointer("/graph/viewport")?;
        serde_json::from_value(vp.clone()).ok()
    }

    /// Write `viewport` into the state blob.
    pub fn set_viewport(&mut self, viewport: Viewport) -> PlotshotResult<()> {
        let graph = self
            .0
            .get_mut("graph")
            .and_then(|g| g.as_object_mut())
            .ok_or_else(|| PlotshotError::widget("state blob has no graph object"))?;
        let vp = serde_json::to_value(viewport)
            .map_err(|e| PlotshotError::serde(format!("viewport: {e}")))?;
        graph.insert("viewport".to_owned(), vp);
        Ok(())
    }

    /// Toggle the grid, x-axis, and y-axis visibility flags together.
    pub fn set_grid_visible(&mut self, visible: bool) {
        if let Some(graph) = self.0.get_mut("graph").and_then(|g| g.as_object_mut()) {
            for key in ["showGrid", "showXAxis", "showYAxis"] {
                graph.insert(key.to_owned(), serde_json::Value::Bool(visible));
            }
        }
    }

    /// Whether the grid visibility flag is set.
    pub fn grid_visible(&self) -> bool {
        self.0
            .pointer("/graph/showGrid")
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }
}

/// How a snapshot maps math bounds onto the output pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenshotMode {
    /// Preserve aspect ratio, letterboxing as needed. The widget's own
    /// default; frame captures always override it with [`Stretch`] so the
    /// output matches the canvas pixel for pixel.
    Contain,
    /// Stretch the math bounds to fill the output exactly.
    Stretch,
}

/// Math-coordinate rectangle captured by a snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MathBounds {
    /// Left bound.
    pub left: f64,
    /// Bottom bound.
    pub bottom: f64,
    /// Right bound.
    pub right: f64,
    /// Top bound.
    pub top: f64,
}

/// Options for a rasterized widget snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenshotOpts {
    /// Bounds-to-pixels mapping mode.
    pub mode: ScreenshotMode,
    /// Math-coordinate rectangle to capture.
    pub math_bounds: MathBounds,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Device pixel ratio applied to the output size.
    pub target_pixel_ratio: f64,
}

/// A rasterized snapshot: tightly packed RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screenshot {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 pixel data, row-major, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// The widget API surface this crate consumes.
///
/// Implementations wrap the embedded graphing calculator instance. Setting
/// the full state replaces the expression list and resets the viewport to the
/// one stored in the state blob, so callers that want to keep the current
/// viewport must capture and restore it around `set_state`.
pub trait GraphingWidget {
    /// Capture the widget's full configuration.
    fn state(&self) -> PlotshotResult<WidgetState>;

    /// Replace the widget's full configuration.
    fn set_state(&mut self, state: &WidgetState) -> PlotshotResult<()>;

    /// Set or replace a single expression by id.
    fn set_expression(&mut self, expr: &Expression) -> PlotshotResult<()>;

    /// Set or replace a batch of expressions.
    fn set_expressions(&mut self, exprs: &[Expression]) -> PlotshotResult<()>;

    /// Current viewport bounds.
    fn viewport(&self) -> PlotshotResult<Viewport>;

    /// Set the viewport bounds.
    fn set_viewport(&mut self, viewport: Viewport) -> PlotshotResult<()>;

    /// Block until the observed numeric value of expression `id` becomes a
    /// positive number, wait out the `debounce` window, then return the value
    /// current after the window. This is the user-driven start signal; edits
    /// made during the window move the returned value.
    fn observe_positive_value(&mut self, id: &str, debounce: Duration) -> PlotshotResult<f64>;

    /// Request a rasterized snapshot.
    fn screenshot(&mut self, opts: &ScreenshotOpts) -> PlotshotResult<Screenshot>;
}
