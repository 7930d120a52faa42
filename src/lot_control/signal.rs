use crate::http_handler::http_response::response_common::ResponseError;
use chrono::{DateTime, Utc};

/// Per-cycle outcome delivered to the refresh observer.
#[derive(Debug)]
pub enum RefreshSignal {
    Rendered(RefreshStats),
    Failed(ResponseError),
}

/// Snapshot of a successfully rendered refresh cycle.
#[derive(Debug, Clone)]
pub struct RefreshStats {
    total: usize,
    occupied: usize,
    timestamp: DateTime<Utc>,
}

impl RefreshStats {
    pub(crate) fn new(total: usize, occupied: usize, timestamp: DateTime<Utc>) -> Self {
        Self {
            total,
            occupied,
            timestamp,
        }
    }

    pub fn total(&self) -> usize { self.total }
    pub fn occupied(&self) -> usize { self.occupied }
    pub fn available(&self) -> usize { self.total - self.occupied }
    pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }

    /// Occupied share of the lot, `None` while the feed reports no slots.
    #[allow(clippy::cast_precision_loss)]
    pub fn utilisation(&self) -> Option<f32> {
        (self.total > 0).then(|| self.occupied as f32 / self.total as f32)
    }
}
