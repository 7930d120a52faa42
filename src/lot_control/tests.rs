use super::board::{SlotBoard, SlotTile};
use super::poller::{StatusPoller, StatusSource};
use super::signal::{RefreshSignal, RefreshStats};
use super::slot_state::SlotOccupancy;
use super::utilisation::UtilisationTracker;
use crate::http_handler::http_response::response_common::ResponseError;
use crate::http_handler::http_response::status::StatusResponse;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

const TWO_SLOT_BODY: &str = r#"{"fields":[{"slot":1,"status":0},{"slot":2,"status":1}]}"#;
const EMPTY_BODY: &str = r#"{"fields":[]}"#;

const OCCUPIED_MARKER: &str = "\x1b[31m";

/// Serves the scripted bodies in order, then keeps serving the last one.
/// Bodies that fail to parse surface as `ResponseError::Decode`, the same
/// error the HTTP layer maps JSON failures to.
struct ScriptedSource {
    bodies: Vec<&'static str>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(bodies: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            bodies,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch_status(&self) -> Result<StatusResponse, ResponseError> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self.bodies[i.min(self.bodies.len() - 1)];
        serde_json::from_str(body).map_err(|_| ResponseError::Decode)
    }
}

fn new_board() -> Arc<RwLock<SlotBoard>> { Arc::new(RwLock::new(SlotBoard::new())) }

fn parse(body: &str) -> StatusResponse { serde_json::from_str(body).unwrap() }

fn labels(tiles: &[SlotTile]) -> Vec<&str> { tiles.iter().map(SlotTile::label).collect() }

#[test]
fn occupancy_codes_map_to_states() {
    assert_eq!(SlotOccupancy::from(1), SlotOccupancy::Occupied);
    assert_eq!(SlotOccupancy::from(0), SlotOccupancy::Available);
    // only 1 means occupied, any other code reads as free
    assert_eq!(SlotOccupancy::from(7), SlotOccupancy::Available);
    assert_eq!(<&str>::from(SlotOccupancy::Occupied), "Occupied");
    assert_eq!(<&str>::from(SlotOccupancy::Available), "Available");
}

#[test]
fn board_renders_all_fields_in_order() {
    let body =
        r#"{"fields":[{"slot":3,"status":0},{"slot":1,"status":1},{"slot":"A-2","status":0}]}"#;
    let mut board = SlotBoard::new();
    board.replace_tiles(&parse(body));
    assert_eq!(board.tiles().len(), 3);
    assert_eq!(labels(board.tiles()), vec!["Slot 3", "Slot 1", "Slot A-2"]);
    assert_eq!(board.occupied_count(), 1);
    assert_eq!(board.available_count(), 2);
}

#[test]
fn two_slot_scenario_renders_labels_and_marker() {
    let mut board = SlotBoard::new();
    board.replace_tiles(&parse(TWO_SLOT_BODY));

    assert_eq!(board.tiles().len(), 2);
    let first = &board.tiles()[0];
    assert_eq!(first.label(), "Slot 1");
    assert_eq!(first.occupancy(), SlotOccupancy::Available);
    assert!(!first.is_occupied());
    let second = &board.tiles()[1];
    assert_eq!(second.label(), "Slot 2");
    assert_eq!(second.occupancy(), SlotOccupancy::Occupied);
    assert!(second.is_occupied());

    let lines = board.render_lines();
    assert!(lines[0].contains("parking-slots"));
    assert!(lines[1].contains("Available"));
    assert!(!lines[1].contains(OCCUPIED_MARKER));
    assert!(lines[2].contains("Occupied"));
    assert!(lines[2].contains(OCCUPIED_MARKER));
    assert!(lines[3].contains("1 occupied / 1 available"));
}

#[test]
fn empty_fields_clear_the_board() {
    let mut board = SlotBoard::new();
    board.replace_tiles(&parse(TWO_SLOT_BODY));
    assert_eq!(board.tiles().len(), 2);
    board.replace_tiles(&parse(EMPTY_BODY));
    assert!(board.tiles().is_empty());
    // title rule and summary footer remain, nothing else
    assert_eq!(board.render_lines().len(), 2);
}

#[tokio::test]
async fn second_refresh_replaces_first_entirely() {
    let source = ScriptedSource::new(vec![
        r#"{"fields":[{"slot":1,"status":0},{"slot":2,"status":0},{"slot":3,"status":0}]}"#,
        r#"{"fields":[{"slot":9,"status":1}]}"#,
    ]);
    let board = new_board();
    let (poller, _signal_rx) =
        StatusPoller::new(source, Arc::clone(&board), Duration::from_secs(30));

    poller.refresh().await.unwrap();
    assert_eq!(labels(board.read().await.tiles()), vec!["Slot 1", "Slot 2", "Slot 3"]);

    poller.refresh().await.unwrap();
    let guard = board.read().await;
    assert_eq!(labels(guard.tiles()), vec!["Slot 9"]);
    assert_eq!(guard.occupied_count(), 1);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_render() {
    let source = ScriptedSource::new(vec![TWO_SLOT_BODY, "{not json"]);
    let board = new_board();
    let (poller, _signal_rx) =
        StatusPoller::new(source, Arc::clone(&board), Duration::from_secs(30));

    let stats = poller.refresh().await.unwrap();
    assert_eq!(stats.total(), 2);
    assert_eq!(stats.occupied(), 1);

    let err = poller.refresh().await.unwrap_err();
    assert!(matches!(err, ResponseError::Decode));
    assert_eq!(labels(board.read().await.tiles()), vec!["Slot 1", "Slot 2"]);
}

#[tokio::test(start_paused = true)]
async fn run_refreshes_immediately_then_per_tick() {
    let source = ScriptedSource::new(vec![TWO_SLOT_BODY]);
    let board = new_board();
    let (poller, mut signal_rx) = StatusPoller::new(
        Arc::clone(&source) as Arc<dyn StatusSource>,
        Arc::clone(&board),
        Duration::from_millis(200),
    );
    let c_tok = CancellationToken::new();
    let handle = tokio::spawn(Arc::new(poller).run(c_tok.clone()));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(source.calls(), 3);

    c_tok.cancel();
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(source.calls(), 3);
    assert!(handle.is_finished());

    let first = signal_rx.recv().await.unwrap();
    assert!(matches!(first, RefreshSignal::Rendered(ref stats) if stats.total() == 2));
    assert_eq!(board.read().await.tiles().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn run_signals_observer_on_failure() {
    let source = ScriptedSource::new(vec![TWO_SLOT_BODY, "<html>down</html>"]);
    let board = new_board();
    let (poller, mut signal_rx) = StatusPoller::new(
        Arc::clone(&source) as Arc<dyn StatusSource>,
        Arc::clone(&board),
        Duration::from_millis(100),
    );
    let c_tok = CancellationToken::new();
    tokio::spawn(Arc::new(poller).run(c_tok.clone()));

    let first = signal_rx.recv().await.unwrap();
    assert!(matches!(first, RefreshSignal::Rendered(_)));
    let second = signal_rx.recv().await.unwrap();
    assert!(matches!(second, RefreshSignal::Failed(ResponseError::Decode)));
    // the failed cycle left the previous render standing
    assert_eq!(board.read().await.tiles().len(), 2);
    c_tok.cancel();
}

fn stats_at_hour(hour: u32, total: usize, occupied: usize) -> RefreshStats {
    let ts = Utc.with_ymd_and_hms(2025, 5, 1, hour, 15, 0).unwrap();
    RefreshStats::new(total, occupied, ts)
}

#[test]
fn tracker_skips_empty_cycles_and_averages() {
    let mut tracker = UtilisationTracker::new();
    assert!(tracker.mean_utilisation().is_none());

    tracker.record(&stats_at_hour(9, 0, 0));
    assert_eq!(tracker.sample_count(), 0);

    tracker.record(&stats_at_hour(9, 8, 2));
    tracker.record(&stats_at_hour(10, 8, 6));
    assert_eq!(tracker.sample_count(), 2);
    let mean = tracker.mean_utilisation().unwrap();
    assert!((mean - 0.5).abs() < 1e-6);
}

#[test]
fn pricing_tips_fire_at_thresholds() {
    let mut tracker = UtilisationTracker::new();
    for _ in 0..4 {
        tracker.record(&stats_at_hour(9, 10, 9));
        tracker.record(&stats_at_hour(14, 10, 1));
        tracker.record(&stats_at_hour(11, 10, 5));
    }
    let tips = tracker.pricing_tips();
    assert_eq!(tips.len(), 2);
    assert!(tips[0].contains("Premium pricing between 09:00-10:00"));
    assert!(tips[1].contains("Early-bird discount around 14:00-15:00"));
}

#[test]
fn flat_pricing_without_strong_trends() {
    let mut tracker = UtilisationTracker::new();
    tracker.record(&stats_at_hour(9, 10, 5));
    tracker.record(&stats_at_hour(10, 10, 4));
    let tips = tracker.pricing_tips();
    assert_eq!(tips.len(), 1);
    assert!(tips[0].contains("flat pricing"));
}
