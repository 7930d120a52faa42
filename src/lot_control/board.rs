use super::slot_state::SlotOccupancy;
use crate::http_handler::http_response::status::StatusResponse;
use chrono::{DateTime, Utc};

/// Panel title, carried over from the `parking-slots` container the web
/// front end renders into.
pub const BOARD_TITLE: &str = "parking-slots";

const OCCUPIED_STYLE: &str = "\x1b[31m";
const AVAILABLE_STYLE: &str = "\x1b[32m";
const STYLE_RESET: &str = "\x1b[0m";

/// One rendered slot entry: the `Slot <id>` label plus its occupancy.
#[derive(Debug, Clone)]
pub struct SlotTile {
    label: String,
    occupancy: SlotOccupancy,
}

impl SlotTile {
    pub fn label(&self) -> &str { &self.label }
    pub fn occupancy(&self) -> SlotOccupancy { self.occupancy }
    pub fn is_occupied(&self) -> bool { self.occupancy == SlotOccupancy::Occupied }

    fn render(&self) -> String {
        let status_str: &str = self.occupancy.into();
        if self.is_occupied() {
            format!("  {OCCUPIED_STYLE}■ {:<10} {status_str}{STYLE_RESET}", self.label)
        } else {
            format!("  {AVAILABLE_STYLE}□ {:<10} {status_str}{STYLE_RESET}", self.label)
        }
    }
}

/// The render container. Each refresh replaces the tile list wholesale, so
/// the board never mixes readings from two cycles.
pub struct SlotBoard {
    tiles: Vec<SlotTile>,
    last_refresh: Option<DateTime<Utc>>,
}

impl Default for SlotBoard {
    fn default() -> Self { Self::new() }
}

impl SlotBoard {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            last_refresh: None,
        }
    }

    /// Drops every existing tile and rebuilds the board from `response`,
    /// one tile per reading, in received order.
    pub fn replace_tiles(&mut self, response: &StatusResponse) {
        self.tiles = response
            .fields()
            .iter()
            .map(|reading| SlotTile {
                label: format!("Slot {}", reading.slot()),
                occupancy: SlotOccupancy::from(reading.status()),
            })
            .collect();
        self.last_refresh = Some(response.timestamp().unwrap_or_else(Utc::now));
    }

    pub fn tiles(&self) -> &[SlotTile] { &self.tiles }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> { self.last_refresh }

    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_occupied()).count()
    }

    pub fn available_count(&self) -> usize { self.tiles.len() - self.occupied_count() }

    /// The full panel as ANSI terminal lines: title rule, one line per tile,
    /// occupancy summary footer.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.tiles.len() + 2);
        lines.push(format!("──[ {BOARD_TITLE} ]────────────────────"));
        for tile in &self.tiles {
            lines.push(tile.render());
        }
        let stamp = self
            .last_refresh
            .map_or_else(|| String::from("never"), |t| t.format("%H:%M:%S").to_string());
        lines.push(format!(
            "── {} occupied / {} available ── as of {stamp} ──",
            self.occupied_count(),
            self.available_count()
        ));
        lines
    }
}
