use std::time::{Duration, Instant};

use crate::backend::client::{FrameBackend, wait_for_config};
use crate::backend::wire::{Expression, FrameBlock, SessionConfig, SliderBounds};
use crate::capture::sink::{SinkConfig, SnapshotSink};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PlotshotError, PlotshotResult};
use crate::session::resume::{ResumeState, ResumeStore};
use crate::widget::api::{
    GraphingWidget, MathBounds, Screenshot, ScreenshotMode, ScreenshotOpts, WidgetState,
};

/// Accent color used for the two control expressions.
const ACCENT_COLOR: &str = "#2464b4";
/// Expression id of the frame-counter slider.
const FRAME_SLIDER_ID: &str = "frame";
/// Expression id of the diagnostic line-count display.
const LINE_COUNT_ID: &str = "lines";
/// Observed variable carrying the user's start signal.
const START_SIGNAL_ID: &str = "f";

/// Timing knobs of the export loop.
#[derive(Clone, Copy, Debug)]
pub struct ExportOpts {
    /// Interval between backend polls (bootstrap and null-block retries).
    pub poll_interval: Duration,
    /// Window between the start signal first turning positive and the final
    /// read of its value, absorbing further user edits.
    pub start_debounce: Duration,
    /// Delay between resetting widget state and applying a frame's
    /// expressions, letting the widget's display list settle.
    pub settle_delay: Duration,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            start_debounce: Duration::from_secs(3),
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// Aggregate export statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Frames captured and pushed to the sink.
    pub frames_captured: u64,
    /// Session restarts taken at batch boundaries.
    pub reloads: u64,
    /// Non-null frame blocks fetched from the backend.
    pub blocks_fetched: u64,
}

/// How a single session pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// The frame counter reached the configured total.
    Done,
    /// The buffered batch is exhausted; a resume record was persisted and the
    /// caller must restart with a fresh widget.
    Reload,
}

/// One widget lifetime of the export: setup, then a linear
/// fetch/render/capture loop until done or a restart is due.
pub struct ExportSession<'a> {
    cfg: SessionConfig,
    backend: &'a mut dyn FrameBackend,
    widget: &'a mut dyn GraphingWidget,
    store: &'a mut dyn ResumeStore,
    sink: &'a mut dyn SnapshotSink,
    opts: ExportOpts,
    baseline: Option<WidgetState>,
    block: Option<FrameBlock>,
    stats: ExportStats,
}

impl<'a> ExportSession<'a> {
    /// Build a session over borrowed collaborators.
    pub fn new(
        cfg: SessionConfig,
        backend: &'a mut dyn FrameBackend,
        widget: &'a mut dyn GraphingWidget,
        store: &'a mut dyn ResumeStore,
        sink: &'a mut dyn SnapshotSink,
        opts: ExportOpts,
    ) -> Self {
        Self {
            cfg,
            backend,
            widget,
            store,
            sink,
            opts,
            baseline: None,
            block: None,
            stats: ExportStats::default(),
        }
    }

    /// Statistics accumulated by this pass.
    pub fn stats(&self) -> ExportStats {
        self.stats
    }

    /// Run one pass to completion.
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> PlotshotResult<PassOutcome> {
        let mut frame = self.setup()?;
        loop {
            if frame.0 >= self.cfg.total_frames {
                tracing::debug!(total_frames = self.cfg.total_frames, "export complete");
                return Ok(PassOutcome::Done);
            }
            self.ensure_block(frame)?;

            let shot = self.render_frame(frame)?;
            let number = frame.number();
            self.sink.push(number, &shot)?;
            self.stats.frames_captured += 1;

            frame = frame.next();
            let buffered_end = self
                .block
                .as_ref()
                .map(|b| b.end())
                .unwrap_or(FrameIndex(0));
            if frame.0 >= buffered_end.0 {
                // Batch exhausted: persist resume state and restart the
                // session to shed accumulated widget slowdown.
                let viewport = self.widget.viewport()?;
                self.store.put(&ResumeState {
                    last_frame: number,
                    viewport,
                })?;
                tracing::debug!(last_frame = number.0, "batch exhausted, restarting session");
                return Ok(PassOutcome::Reload);
            }
        }
    }

    /// Setup stage: install control expressions, resolve the starting frame
    /// from the resume record or the user's start signal, and capture the
    /// baseline state.
    fn setup(&mut self) -> PlotshotResult<FrameIndex> {
        let last = self.store.take_last_frame()?.map(|n| n.0).unwrap_or(0);

        self.widget.set_expression(&Expression {
            id: FRAME_SLIDER_ID.to_owned(),
            latex: format!("f={last}"),
            color: Some(ACCENT_COLOR.to_owned()),
            secret: None,
            slider_bounds: Some(SliderBounds {
                min: 0.0,
                max: self.cfg.total_frames as f64,
                step: 1.0,
            }),
        })?;
        self.widget.set_expression(&Expression {
            id: LINE_COUNT_ID.to_owned(),
            latex: "l=0".to_owned(),
            color: Some(ACCENT_COLOR.to_owned()),
            secret: None,
            slider_bounds: None,
        })?;

        if last != 0 {
            let viewport = self.store.take_viewport()?.ok_or_else(|| {
                PlotshotError::validation("resume record has a frame but no viewport")
            })?;
            self.widget.set_viewport(viewport)?;
        }

        // Captured before the start signal resolves, so user edits to the
        // start slider never end up in the baseline.
        let mut baseline = self.widget.state()?;
        baseline.set_grid_visible(self.cfg.show_grid);
        self.baseline = Some(baseline);

        if last != 0 {
            tracing::debug!(last_frame = last, "resuming after restart");
            return Ok(FrameIndex(last));
        }

        // The value read after the debounce window wins, so keystrokes landing
        // during the window still move the start frame.
        let value = self
            .widget
            .observe_positive_value(START_SIGNAL_ID, self.opts.start_debounce)?;
        let start = (value as u64).max(1) - 1;
        tracing::debug!(start_frame = start, "start signal received");
        Ok(FrameIndex(start))
    }

    /// Fetch a new batch when `frame` is not covered by the current one.
    ///
    /// A null response means the backend has not buffered that far yet; it is
    /// retried at the poll interval until a batch arrives.
    fn ensure_block(&mut self, frame: FrameIndex) -> PlotshotResult<()> {
        if self.block.as_ref().is_some_and(|b| b.covers(frame)) {
            return Ok(());
        }
        loop {
            match self.backend.fetch_block(frame)? {
                Some(block) if !block.is_empty() => {
                    if !block.covers(frame) {
                        return Err(PlotshotError::backend(format!(
                            "fetched block [{}, {}) does not cover frame {}",
                            block.first().0,
                            block.end().0,
                            frame.0
                        )));
                    }
                    tracing::debug!(
                        first = block.first().0,
                        len = block.len(),
                        "frame block loaded"
                    );
                    self.stats.blocks_fetched += 1;
                    self.block = Some(block);
                    return Ok(());
                }
                _ => {
                    tracing::warn!(frame = frame.0, "frame block not ready, retrying");
                    std::thread::sleep(self.opts.poll_interval);
                }
            }
        }
    }

    /// Render and capture one frame already covered by the current block.
    #[tracing::instrument(skip(self), fields(frame = frame.0))]
    fn render_frame(&mut self, frame: FrameIndex) -> PlotshotResult<Screenshot> {
        let set = self
            .block
            .as_ref()
            .ok_or_else(|| PlotshotError::validation("render_frame called with no block"))?
            .get(frame)?;
        let baseline = self
            .baseline
            .as_ref()
            .ok_or_else(|| PlotshotError::validation("render_frame called before setup"))?;

        let started = Instant::now();
        let viewport = self.widget.viewport()?;
        self.widget.set_state(baseline)?;
        self.widget.set_expression(&Expression {
            id: FRAME_SLIDER_ID.to_owned(),
            latex: format!("f={}", frame.number().0),
            color: None,
            secret: None,
            slider_bounds: None,
        })?;
        self.widget.set_expression(&Expression {
            id: LINE_COUNT_ID.to_owned(),
            latex: format!("l={}", set.len()),
            color: None,
            secret: None,
            slider_bounds: None,
        })?;
        // The state reset clears the viewport; put it back.
        self.widget.set_viewport(viewport)?;
        tracing::debug!(
            lines = set.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "state reset"
        );

        std::thread::sleep(self.opts.settle_delay);
        self.widget.set_expressions(set)?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "expressions applied"
        );

        let shot = self.widget.screenshot(&ScreenshotOpts {
            mode: ScreenshotMode::Stretch,
            math_bounds: MathBounds {
                left: 0.0,
                bottom: 0.0,
                right: f64::from(self.cfg.canvas.width),
                top: f64::from(self.cfg.canvas.height),
            },
            width: self.cfg.canvas.width,
            height: self.cfg.canvas.height,
            target_pixel_ratio: 1.0,
        })?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot complete"
        );
        Ok(shot)
    }
}

/// Drive a full export across session restarts.
///
/// Each iteration models one widget lifetime: bootstrap the backend
/// configuration, build a fresh widget, and run one [`ExportSession`] pass.
/// A [`PassOutcome::Reload`] loops with the resume record left in `store`; a
/// [`PassOutcome::Done`] finalizes the sink and returns aggregate statistics.
pub fn run_export<W, F>(
    backend: &mut dyn FrameBackend,
    mut widget_factory: F,
    store: &mut dyn ResumeStore,
    sink: &mut dyn SnapshotSink,
    opts: ExportOpts,
) -> PlotshotResult<ExportStats>
where
    W: GraphingWidget,
    F: FnMut() -> PlotshotResult<W>,
{
    let mut totals = ExportStats::default();
    let mut started = false;
    loop {
        let cfg = wait_for_config(backend, opts.poll_interval)?;
        if !started {
            sink.begin(SinkConfig {
                canvas: cfg.canvas,
                download: cfg.download_images,
            })?;
            started = true;
        }

        let mut widget = widget_factory()?;
        let mut session = ExportSession::new(cfg, backend, &mut widget, store, sink, opts);
        let outcome = session.run()?;
        let pass = session.stats();
        totals.frames_captured += pass.frames_captured;
        totals.blocks_fetched += pass.blocks_fetched;

        match outcome {
            PassOutcome::Done => {
                sink.end()?;
                return Ok(totals);
            }
            PassOutcome::Reload => totals.reloads += 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/export_session.rs"]
mod tests;
