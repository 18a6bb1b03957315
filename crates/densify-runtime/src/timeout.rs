//! Per-call deadlines for external capabilities.
//!
//! The pipeline is synchronous, so these wrappers hop onto the tokio
//! blocking pool for each call and wait with a timer. An expired call
//! becomes `CapabilityUnavailable`, which the controller treats as a skip
//! for that entity or iteration. The wrappers must be called from outside
//! async code, e.g. inside `spawn_blocking`.

use std::sync::Arc;
use std::time::Duration;

use densify_core::{EntityExtractor, Error, Result, SimilarityScorer};
use tokio::runtime::Handle;

/// Run `call` on the blocking pool and wait at most `limit` for it.
fn call_with_deadline<T, F>(handle: &Handle, limit: Duration, what: &str, call: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let task = handle.spawn_blocking(call);
    match handle.block_on(tokio::time::timeout(limit, task)) {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(Error::CapabilityUnavailable(format!(
            "{} task failed: {}",
            what, join_err
        ))),
        Err(_) => Err(Error::CapabilityUnavailable(format!(
            "{} timed out after {}ms",
            what,
            limit.as_millis()
        ))),
    }
}

fn current_handle() -> Result<Handle> {
    Handle::try_current()
        .map_err(|e| Error::Configuration(format!("capability timeouts need a tokio runtime: {}", e)))
}

/// [`EntityExtractor`] with a deadline on every call.
pub struct TimeoutExtractor {
    inner: Arc<dyn EntityExtractor>,
    limit: Duration,
    handle: Handle,
}

impl TimeoutExtractor {
    /// Must be created inside a tokio runtime.
    pub fn new(inner: Arc<dyn EntityExtractor>, limit: Duration) -> Result<Self> {
        Ok(Self {
            inner,
            limit,
            handle: current_handle()?,
        })
    }
}

impl EntityExtractor for TimeoutExtractor {
    fn extract(&self, text: &str) -> Result<Vec<String>> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_owned();
        call_with_deadline(&self.handle, self.limit, "entity extraction", move || {
            inner.extract(&text)
        })
    }
}

/// [`SimilarityScorer`] with a deadline on every call.
pub struct TimeoutScorer {
    inner: Arc<dyn SimilarityScorer>,
    limit: Duration,
    handle: Handle,
}

impl TimeoutScorer {
    /// Must be created inside a tokio runtime.
    pub fn new(inner: Arc<dyn SimilarityScorer>, limit: Duration) -> Result<Self> {
        Ok(Self {
            inner,
            limit,
            handle: current_handle()?,
        })
    }
}

impl SimilarityScorer for TimeoutScorer {
    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let inner = Arc::clone(&self.inner);
        let (a, b) = (a.to_owned(), b.to_owned());
        call_with_deadline(&self.handle, self.limit, "similarity", move || {
            inner.similarity(&a, &b)
        })
    }
}
