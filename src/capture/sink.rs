use std::path::PathBuf;

use crate::foundation::core::{Canvas, FrameNumber};
use crate::foundation::error::{PlotshotError, PlotshotResult};
use crate::widget::api::Screenshot;

/// Configuration provided to a [`SnapshotSink`] at the start of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Whether captured frames are written to disk.
    pub download: bool,
}

/// Sink contract for consuming captured frames.
///
/// Ordering contract: `push` is called with strictly increasing frame
/// numbers `1..=total_frames` across the whole export, including across
/// session restarts.
pub trait SnapshotSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PlotshotResult<()>;
    /// Push one captured frame.
    fn push(&mut self, frame: FrameNumber, shot: &Screenshot) -> PlotshotResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PlotshotResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Captured frames in push order.
    pub frames: Vec<(FrameNumber, Screenshot)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Output names of the captured frames, in push order.
    pub fn names(&self) -> Vec<String> {
        self.frames.iter().map(|(n, _)| n.file_stem()).collect()
    }
}

impl SnapshotSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PlotshotResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push(&mut self, frame: FrameNumber, shot: &Screenshot) -> PlotshotResult<()> {
        self.frames.push((frame, shot.clone()));
        Ok(())
    }

    fn end(&mut self) -> PlotshotResult<()> {
        Ok(())
    }
}

/// Sink that names every frame `frame-NNNNN` and writes it as a PNG under a
/// directory, but only when the session's download flag is set.
///
/// The name is always recorded ("linked") regardless of the flag, matching
/// the export contract: a disabled download still produces and exposes the
/// snapshot, it just never touches disk.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    /// Output names recorded so far, in push order.
    pub links: Vec<String>,
}

impl DirectorySink {
    /// Sink writing under `dir` (created on `begin` when downloads are on).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            links: Vec::new(),
        }
    }

    fn download_enabled(&self) -> bool {
        self.cfg.map(|c| c.download).unwrap_or(false)
    }
}

impl SnapshotSink for DirectorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PlotshotResult<()> {
        self.cfg = Some(cfg);
        self.links.clear();
        if cfg.download {
            std::fs::create_dir_all(&self.dir).map_err(|e| {
                PlotshotError::validation(format!(
                    "create output dir '{}': {e}",
                    self.dir.display()
                ))
            })?;
        }
        Ok(())
    }

    fn push(&mut self, frame: FrameNumber, shot: &Screenshot) -> PlotshotResult<()> {
        let stem = frame.file_stem();
        self.links.push(stem.clone());
        if !self.download_enabled() {
            return Ok(());
        }
        let path = self.dir.join(format!("{stem}.png"));
        image::save_buffer_with_format(
            &path,
            &shot.data,
            shot.width,
            shot.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| anyhow::anyhow!("write png '{}': {e}", path.display()))?;
        tracing::debug!(frame = frame.0, path = %path.display(), "frame written");
        Ok(())
    }

    fn end(&mut self) -> PlotshotResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sink.rs"]
mod tests;
