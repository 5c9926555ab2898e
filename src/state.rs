//! Shared application state.

use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::sync::Arc;

use crate::error::Result;
use crate::store::sqlite::AnalyticsStore;
use crate::telemetry::Metrics;

pub struct AppStateInner {
    pub store: AnalyticsStore,
    pub metrics: Metrics,
    pub request_count: AtomicU64,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn increment_requests(&self) {
        let n = self.request_count.fetch_add(1, Relaxed) + 1;
        if n % 1000 == 0 {
            tracing::info!(count = n, "request volume checkpoint");
        }
    }
}

fn wrap(store: AnalyticsStore) -> AppState {
    Arc::new(AppStateInner {
        store,
        metrics: Metrics::new(),
        request_count: AtomicU64::new(0),
    })
}

pub fn build_state(db_path: &str) -> Result<AppState> {
    Ok(wrap(AnalyticsStore::open(db_path)?))
}

pub fn build_test_state() -> Result<AppState> {
    Ok(wrap(AnalyticsStore::open_in_memory()?))
}
