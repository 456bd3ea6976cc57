use crate::foundation::core::{FrameNumber, Viewport};
use crate::foundation::error::{PlotshotError, PlotshotResult};

/// Record persisted immediately before a session restart and consumed right
/// after it: the last captured frame number and the viewport to restore.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResumeState {
    /// 1-based number of the last frame captured before the restart.
    pub last_frame: FrameNumber,
    /// Viewport in effect when the restart was triggered.
    pub viewport: Viewport,
}

/// Ephemeral take-on-read storage for [`ResumeState`].
///
/// Both keys are deleted the moment they are read, regardless of whether the
/// read parses, so at most one record ever exists and a crashed resume cannot
/// replay stale state.
pub trait ResumeStore {
    /// Persist a resume record, replacing any existing one.
    fn put(&mut self, state: &ResumeState) -> PlotshotResult<()>;

    /// Take the last-frame key, clearing it.
    fn take_last_frame(&mut self) -> PlotshotResult<Option<FrameNumber>>;

    /// Take the viewport key, clearing it.
    fn take_viewport(&mut self) -> PlotshotResult<Option<Viewport>>;
}

/// In-memory [`ResumeStore`] holding the two keys as serialized strings, so
/// reads go through the same parsing path as any external key-value storage.
#[derive(Debug, Default)]
pub struct InMemoryResumeStore {
    last_frame: Option<String>,
    viewport: Option<String>,
}

impl InMemoryResumeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both keys are absent.
    pub fn is_empty(&self) -> bool {
        self.last_frame.is_none() && self.viewport.is_none()
    }
}

impl ResumeStore for InMemoryResumeStore {
    fn put(&mut self, state: &ResumeState) -> PlotshotResult<()> {
        self.last_frame = Some(state.last_frame.0.to_string());
        let viewport = serde_json::to_string(&state.viewport)
            .map_err(|e| PlotshotError::serde(format!("viewport: {e}")))?;
        self.viewport = Some(viewport);
        Ok(())
    }

    fn take_last_frame(&mut self) -> PlotshotResult<Option<FrameNumber>> {
        // take() first: the key must be gone even if parsing fails.
        let Some(raw) = self.last_frame.take() else {
            return Ok(None);
        };
        let n: u64 = raw
            .parse()
            .map_err(|e| PlotshotError::serde(format!("lastFrame '{raw}': {e}")))?;
        Ok(Some(FrameNumber(n)))
    }

    fn take_viewport(&mut self) -> PlotshotResult<Option<Viewport>> {
        let Some(raw) = self.viewport.take() else {
            return Ok(None);
        };
        let viewport = serde_json::from_str(&raw)
            .map_err(|e| PlotshotError::serde(format!("viewport '{raw}': {e}")))?;
        Ok(Some(viewport))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/resume.rs"]
mod tests;
