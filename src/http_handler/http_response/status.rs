use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;
use std::fmt;

/// One occupancy report from `GET /api/status`.
///
/// Only `fields` is guaranteed; the backend additionally reports the reading
/// timestamp and precomputed occupancy counts, which older feeds omit.
#[derive(serde::Deserialize, Debug)]
pub struct StatusResponse {
    #[serde(default)]
    timestamp: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    occupied: Option<u32>,
    #[serde(default)]
    available: Option<u32>,
    fields: Vec<SlotReading>,
}

impl SerdeJSONBodyHTTPResponseType for StatusResponse {}

impl StatusResponse {
    pub fn fields(&self) -> &[SlotReading] { &self.fields }
    pub fn timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> { self.timestamp }
    pub fn occupied(&self) -> Option<u32> { self.occupied }
    pub fn available(&self) -> Option<u32> { self.available }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SlotReading {
    slot: SlotId,
    status: u8,
}

impl SlotReading {
    pub fn slot(&self) -> &SlotId { &self.slot }
    pub fn status(&self) -> u8 { self.status }
}

/// Slot identifiers come as plain sensor indices from the feed, but named
/// bays ("A-3") appear once a lot map is configured upstream.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SlotId {
    Number(u64),
    Name(String),
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Number(n) => write!(f, "{n}"),
            SlotId::Name(s) => write!(f, "{s}"),
        }
    }
}
