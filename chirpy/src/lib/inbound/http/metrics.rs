use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Request counters owned by the router state.
#[derive(Debug, Default)]
pub struct ServerMetrics {
    file_server_hits: AtomicU64,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file_server_hit(&self) {
        self.file_server_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn file_server_hits(&self) -> u64 {
        self.file_server_hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.file_server_hits.store(0, Ordering::Relaxed);
    }
}
