use std::time::Duration;

use crate::backend::wire::{BlockResponse, ExpressionSet, FrameBlock, InitResponse, SessionConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PlotshotError, PlotshotResult};

/// Source of session configuration and per-frame expression sets.
///
/// `poll_init` returns `Ok(None)` while the backend is unreachable, so a
/// caller can keep polling; a reachable backend that answers garbage is an
/// error. `fetch_block` returns `Ok(None)` when the backend has nothing
/// buffered yet for the requested frame.
pub trait FrameBackend {
    /// Attempt to read the session configuration once.
    fn poll_init(&mut self) -> PlotshotResult<Option<SessionConfig>>;

    /// Fetch the expression-set batch starting at `first`.
    fn fetch_block(&mut self, first: FrameIndex) -> PlotshotResult<Option<FrameBlock>>;
}

/// Poll the backend at a fixed interval until it yields a configuration.
///
/// Polling is unbounded, matching the backend contract: the service may take
/// arbitrarily long to finish precomputing frames before it starts listening.
pub fn wait_for_config(
    backend: &mut dyn FrameBackend,
    poll_interval: Duration,
) -> PlotshotResult<SessionConfig> {
    loop {
        if let Some(cfg) = backend.poll_init()? {
            tracing::debug!(
                width = cfg.canvas.width,
                height = cfg.canvas.height,
                total_frames = cfg.total_frames,
                "backend configuration received"
            );
            return Ok(cfg);
        }
        std::thread::sleep(poll_interval);
    }
}

/// HTTP implementation of [`FrameBackend`] talking to the local frame
/// service (`GET /init`, `GET /?frame=<n>`).
pub struct HttpBackend {
    base: String,
    http: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Build a client for the service rooted at `base`
    /// (e.g. `http://127.0.0.1:5000`).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_owned(),
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl FrameBackend for HttpBackend {
    fn poll_init(&mut self) -> PlotshotResult<Option<SessionConfig>> {
        let url = format!("{}/init", self.base);
        let resp = match self.http.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => {
                // Not up yet; the bootstrap loop keeps polling.
                tracing::debug!(error = %e, "backend not reachable");
                return Ok(None);
            }
        };
        let init: InitResponse = resp
            .json()
            .map_err(|e| PlotshotError::serde(format!("init response: {e}")))?;
        Ok(Some(init.into_config()?))
    }

    fn fetch_block(&mut self, first: FrameIndex) -> PlotshotResult<Option<FrameBlock>> {
        let url = format!("{}/?frame={}", self.base, first.0);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| PlotshotError::backend(format!("fetch block at {}: {e}", first.0)))?;
        let block: BlockResponse = resp
            .json()
            .map_err(|e| PlotshotError::serde(format!("block response: {e}")))?;
        Ok(block.into_block(first))
    }
}

/// Scripted in-process backend for tests and debugging.
///
/// Serves fixed-size blocks out of a precomputed expression-set list and can
/// simulate a slow startup (`init_failures`) and not-yet-buffered fetches
/// (`null_fetches`). Every call is recorded.
pub struct ScriptedBackend {
    cfg: SessionConfig,
    sets: Vec<ExpressionSet>,
    block_size: usize,
    init_failures: usize,
    null_fetches: usize,
    /// Number of `poll_init` calls observed.
    pub init_calls: usize,
    /// Frame index of every `fetch_block` call observed, in order.
    pub fetch_calls: Vec<u64>,
}

impl ScriptedBackend {
    /// Build a backend serving `sets` in blocks of `block_size`.
    pub fn new(cfg: SessionConfig, sets: Vec<ExpressionSet>, block_size: usize) -> Self {
        Self {
            cfg,
            sets,
            block_size: block_size.max(1),
            init_failures: 0,
            null_fetches: 0,
            init_calls: 0,
            fetch_calls: Vec::new(),
        }
    }

    /// Fail the first `n` `poll_init` calls (backend not up yet).
    pub fn with_init_failures(mut self, n: usize) -> Self {
        self.init_failures = n;
        self
    }

    /// Answer the first `n` `fetch_block` calls with a null result.
    pub fn with_null_fetches(mut self, n: usize) -> Self {
        self.null_fetches = n;
        self
    }
}

impl FrameBackend for ScriptedBackend {
    fn poll_init(&mut self) -> PlotshotResult<Option<SessionConfig>> {
        self.init_calls += 1;
        if self.init_failures > 0 {
            self.init_failures -= 1;
            return Ok(None);
        }
        Ok(Some(self.cfg))
    }

    fn fetch_block(&mut self, first: FrameIndex) -> PlotshotResult<Option<FrameBlock>> {
        self.fetch_calls.push(first.0);
        if self.null_fetches > 0 {
            self.null_fetches -= 1;
            return Ok(None);
        }
        let start = first.0 as usize;
        if start >= self.sets.len() {
            return Ok(None);
        }
        let end = (start + self.block_size).min(self.sets.len());
        Ok(Some(FrameBlock::new(
            first,
            self.sets[start..end].to_vec(),
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/client.rs"]
mod tests;
