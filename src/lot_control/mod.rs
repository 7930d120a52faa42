mod board;
mod poller;
mod signal;
mod slot_state;
mod utilisation;

#[cfg(test)]
mod tests;

pub use board::SlotBoard;
pub use poller::{StatusPoller, StatusSource};
pub use signal::{RefreshSignal, RefreshStats};
pub use slot_state::SlotOccupancy;
pub use utilisation::UtilisationTracker;
