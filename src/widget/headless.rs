use std::collections::BTreeMap;
use std::time::Duration;

use crate::backend::wire::Expression;
use crate::foundation::core::Viewport;
use crate::foundation::error::{PlotshotError, PlotshotResult};
use crate::widget::api::{GraphingWidget, Screenshot, ScreenshotOpts, WidgetState};

/// In-process widget stand-in for tests, debugging, and CLI dry runs.
///
/// It keeps the same observable state transitions as the real widget
/// (`set_state` clears the expression list and resets the viewport to the one
/// stored in the state blob) and records every mutating call so tests can
/// assert on the driving sequence. Snapshots are deterministic solid fills,
/// not real renders.
pub struct HeadlessWidget {
    state: WidgetState,
    viewport: Viewport,
    expressions: BTreeMap<String, Expression>,
    start_value: f64,
    debounced_value: Option<f64>,
    /// Every viewport installed through `set_viewport`, in order.
    pub viewports_set: Vec<Viewport>,
    /// Number of `set_state` calls observed.
    pub state_resets: usize,
    /// Batch size of every `set_expressions` call observed, in order.
    pub batches_applied: Vec<usize>,
    /// Number of snapshots produced.
    pub snapshots: usize,
}

impl HeadlessWidget {
    /// Fresh widget with the given start-signal value and a default viewport.
    pub fn new(start_value: f64) -> Self {
        let viewport = Viewport::new(-10.0, 10.0, -10.0, 10.0);
        let state = WidgetState::new(serde_json::json!({
            "version": 11,
            "graph": {
                "viewport": viewport,
                "showGrid": true,
                "showXAxis": true,
                "showYAxis": true,
            },
        }));
        Self {
            state,
            viewport,
            expressions: BTreeMap::new(),
            start_value,
            debounced_value: None,
            viewports_set: Vec::new(),
            state_resets: 0,
            batches_applied: Vec::new(),
            snapshots: 0,
        }
    }

    /// Script the start signal to read `value` after the debounce window, as
    /// if the user kept typing while the window ran.
    pub fn with_value_after_debounce(mut self, value: f64) -> Self {
        self.debounced_value = Some(value);
        self
    }

    /// Number of expressions currently installed.
    pub fn expression_count(&self) -> usize {
        self.expressions.len()
    }

    /// The installed expression with the given id, if any.
    pub fn expression(&self, id: &str) -> Option<&Expression> {
        self.expressions.get(id)
    }
}

impl GraphingWidget for HeadlessWidget {
    fn state(&self) -> PlotshotResult<WidgetState> {
        let mut state = self.state.clone();
        state.set_viewport(self.viewport)?;
        Ok(state)
    }

    fn set_state(&mut self, state: &WidgetState) -> PlotshotResult<()> {
        self.state_resets += 1;
        self.state = state.clone();
        self.expressions.clear();
        // Same transition as the real widget: the state's viewport wins.
        self.viewport = state
            .viewport()
            .ok_or_else(|| PlotshotError::widget("state blob has no viewport"))?;
        Ok(())
    }

    fn set_expression(&mut self, expr: &Expression) -> PlotshotResult<()> {
        self.expressions.insert(expr.id.clone(), expr.clone());
        Ok(())
    }

    fn set_expressions(&mut self, exprs: &[Expression]) -> PlotshotResult<()> {
        self.batches_applied.push(exprs.len());
        for expr in exprs {
            self.expressions.insert(expr.id.clone(), expr.clone());
        }
        Ok(())
    }

    fn viewport(&self) -> PlotshotResult<Viewport> {
        Ok(self.viewport)
    }

    fn set_viewport(&mut self, viewport: Viewport) -> PlotshotResult<()> {
        self.viewports_set.push(viewport);
        self.viewport = viewport;
        Ok(())
    }

    fn observe_positive_value(&mut self, id: &str, debounce: Duration) -> PlotshotResult<f64> {
        if !self.start_value.is_finite() || self.start_value <= 0.0 {
            return Err(PlotshotError::widget(format!(
                "observed value '{id}' never became positive"
            )));
        }
        std::thread::sleep(debounce);
        // The value read after the window wins over the one that triggered it.
        Ok(self.debounced_value.unwrap_or(self.start_value))
    }

    fn screenshot(&mut self, opts: &ScreenshotOpts) -> PlotshotResult<Screenshot> {
        self.snapshots += 1;
        let width = (f64::from(opts.width) * opts.target_pixel_ratio).round() as u32;
        let height = (f64::from(opts.height) * opts.target_pixel_ratio).round() as u32;
        if width == 0 || height == 0 {
            return Err(PlotshotError::widget("snapshot size must be > 0"));
        }
        // Deterministic fill keyed to the capture sequence so consecutive
        // snapshots are distinguishable.
        let shade = (self.snapshots % 256) as u8;
        let pixels = pixel_count(width, height);
        let mut data = Vec::with_capacity((pixels * 4) as usize);
        for _ in 0..pixels {
            data.extend_from_slice(&[shade, shade, shade, 255]);
        }
        Ok(Screenshot {
            width,
            height,
            data,
        })
    }
}

// u32 pixel products overflow on large-but-valid canvases.
fn pixel_count(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height)
}

#[cfg(test)]
#[path = "../../tests/unit/widget/headless.rs"]
mod tests;
