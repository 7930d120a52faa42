#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SlotOccupancy {
    Available,
    Occupied,
}

impl From<u8> for SlotOccupancy {
    fn from(value: u8) -> Self {
        match value {
            1 => SlotOccupancy::Occupied,
            // the feed only defines 0 and 1; anything else reads as free
            _ => SlotOccupancy::Available,
        }
    }
}

impl From<SlotOccupancy> for &'static str {
    fn from(value: SlotOccupancy) -> Self {
        match value {
            SlotOccupancy::Available => "Available",
            SlotOccupancy::Occupied => "Occupied",
        }
    }
}
