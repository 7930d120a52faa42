#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod http_handler;
mod keychain;
mod logger;
mod lot_control;

use crate::keychain::Keychain;
use crate::lot_control::{RefreshSignal, StatusPoller, StatusSource, UtilisationTracker};
use std::{env, sync::Arc};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let base_url_var = env::var("LOTWATCH_BASE_URL");
    let base_url = base_url_var.as_ref().map_or("http://localhost:8000", |v| v.as_str());
    info!(
        "Polling parking status at {base_url} every {}s.",
        StatusPoller::POLL_INTERVAL.as_secs()
    );

    let keychain = Keychain::new(base_url);
    let source: Arc<dyn StatusSource> = keychain.client();
    let (poller, mut signal_rx) =
        StatusPoller::new(source, keychain.board(), StatusPoller::POLL_INTERVAL);
    let poller = Arc::new(poller);
    let c_tok = CancellationToken::new();

    let poller_clone = Arc::clone(&poller);
    let poller_tok = c_tok.clone();
    tokio::spawn(async move {
        poller_clone.run(poller_tok).await;
    });

    let mut tracker = UtilisationTracker::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested. Stopping status poller.");
                c_tok.cancel();
                break;
            }
            signal = signal_rx.recv() => match signal {
                Some(RefreshSignal::Rendered(stats)) => {
                    tracker.record(&stats);
                    for line in keychain.board().read().await.render_lines() {
                        println!("{line}");
                    }
                }
                Some(RefreshSignal::Failed(err)) => {
                    warn!("Display not updated: {err}. Retrying on next tick.");
                }
                None => break,
            }
        }
    }

    if let Some(mean) = tracker.mean_utilisation() {
        info!(
            "Session utilisation over {} cycles: {:.1}% occupied.",
            tracker.sample_count(),
            mean * 100.0
        );
        for tip in tracker.pricing_tips() {
            log!("{tip}");
        }
    }
}
