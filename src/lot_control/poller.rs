use super::board::SlotBoard;
use super::signal::{RefreshSignal, RefreshStats};
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::request_common::NoBodyHTTPRequestType;
use crate::http_handler::http_request::status_get::StatusRequest;
use crate::http_handler::http_response::response_common::ResponseError;
use crate::http_handler::http_response::status::StatusResponse;
use crate::{event, log, warn};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tokio::sync::RwLock;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Anything that can produce a fresh [`StatusResponse`].
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<StatusResponse, ResponseError>;
}

#[async_trait]
impl StatusSource for HTTPClient {
    async fn fetch_status(&self) -> Result<StatusResponse, ResponseError> {
        StatusRequest {}.send_request(self).await
    }
}

/// Owns the refresh cycle: fetches the occupancy report from its source,
/// rebuilds the slot board, and reports every outcome to the observer
/// channel handed out at construction.
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    board: Arc<RwLock<SlotBoard>>,
    signal_tx: mpsc::Sender<RefreshSignal>,
    poll_interval: Duration,
}

impl StatusPoller {
    /// Fixed refresh interval of the deployed monitor.
    pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

    /// Creates a new poller plus the receiving end of its outcome channel.
    pub fn new(
        source: Arc<dyn StatusSource>,
        board: Arc<RwLock<SlotBoard>>,
        poll_interval: Duration,
    ) -> (StatusPoller, Receiver<RefreshSignal>) {
        let (tx, rx) = mpsc::channel(10);
        (
            Self {
                source,
                board,
                signal_tx: tx,
                poll_interval,
            },
            rx,
        )
    }

    /// Runs the poll loop until `c_tok` is cancelled. The first tick fires
    /// immediately; while a refresh is in flight elapsed ticks are skipped,
    /// so cycles never overlap and the board always holds the latest
    /// completed response.
    pub async fn run(self: Arc<Self>, c_tok: CancellationToken) {
        let mut tick = interval(self.poll_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                () = c_tok.cancelled() => {
                    log!("Status poller cancelled. Stopping refresh cycle.");
                    return;
                }
                _ = tick.tick() => {
                    let outcome = match self.refresh().await {
                        Ok(stats) => {
                            event!(
                                "Refresh cycle done: {}/{} slots occupied.",
                                stats.occupied(),
                                stats.total()
                            );
                            RefreshSignal::Rendered(stats)
                        }
                        Err(err) => {
                            warn!("Status refresh failed: {err}. Keeping previous render.");
                            RefreshSignal::Failed(err)
                        }
                    };
                    if self.signal_tx.send(outcome).await.is_err() {
                        log!("Refresh observer dropped. Stopping refresh cycle.");
                        return;
                    }
                }
            }
        }
    }

    /// One fetch-parse-render pass. The board is only touched once the
    /// response parsed successfully; on any error the previous tiles stay.
    pub async fn refresh(&self) -> Result<RefreshStats, ResponseError> {
        let response = self.source.fetch_status().await?;
        let mut board = self.board.write().await;
        board.replace_tiles(&response);
        Ok(RefreshStats::new(
            board.tiles().len(),
            board.occupied_count(),
            board.last_refresh().unwrap_or_else(Utc::now),
        ))
    }
}
