//! Latest-request-wins fetch slot.

use std::future::Future;
use tokio::task::JoinHandle;
use crate::catalog::CatalogError;
use crate::domain::Product;

pub(crate) type FetchResult = Result<Vec<Product>, CatalogError>;

/// Runs at most one fetch at a time for a view-model.
///
/// Issuing a new request aborts the previous task, so a slow stale response
/// can never be handed back. Results are awaited by the owner, which keeps
/// all state changes on the owner's own context.
#[derive(Debug, Default)]
pub(crate) struct LatestRequest {
    generation: u64,
    in_flight: Option<(u64, JoinHandle<FetchResult>)>,
}

impl LatestRequest {
    /// Spawn `fut` on the runtime, superseding any running request.
    pub fn issue<F>(&mut self, fut: F) -> u64
    where
        F: Future<Output = FetchResult> + Send + 'static,
    {
        if let Some((stale, handle)) = self.in_flight.take() {
            handle.abort();
            tracing::debug!(generation = stale, "Superseded in-flight fetch");
        }
        self.generation += 1;
        self.in_flight = Some((self.generation, tokio::spawn(fut)));
        self.generation
    }

    /// A request was issued and its result has not been taken yet.
    pub fn is_pending(&self) -> bool { self.in_flight.is_some() }

    /// Wait for the newest request. `None` if nothing is in flight.
    pub async fn settle(&mut self) -> Option<(u64, FetchResult)> {
        let (generation, handle) = self.in_flight.take()?;
        let result = match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(CatalogError::Cancelled),
            Err(e) => Err(CatalogError::unavailable(format!("fetch task failed: {e}"))),
        };
        Some((generation, result))
    }

    /// Abort whatever is running.
    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() { handle.abort(); }
    }
}

impl Drop for LatestRequest {
    fn drop(&mut self) { self.cancel(); }
}
