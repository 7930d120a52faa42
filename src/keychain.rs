use crate::http_handler::http_client::HTTPClient;
use crate::lot_control::SlotBoard;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Struct representing the key components of the application, providing
/// access to the HTTP client for the status feed and the slot board every
/// refresh renders into.
#[derive(Clone)]
pub struct Keychain {
    /// The HTTP client for performing network requests.
    client: Arc<HTTPClient>,
    /// The slot board, behind a read-write lock for shared access.
    board: Arc<RwLock<SlotBoard>>,
}

impl Keychain {
    /// Creates a new instance of `Keychain`.
    ///
    /// The board exists before the first refresh cycle can run, so a render
    /// pass never has to handle a missing display target.
    ///
    /// # Arguments
    /// - `url`: The base URL to initialize the HTTP client.
    pub fn new(url: &str) -> Self {
        Self {
            client: Arc::new(HTTPClient::new(url)),
            board: Arc::new(RwLock::new(SlotBoard::new())),
        }
    }

    /// Provides a cloned reference to the HTTP client.
    pub fn client(&self) -> Arc<HTTPClient> { Arc::clone(&self.client) }

    /// Provides a cloned reference to the slot board.
    pub fn board(&self) -> Arc<RwLock<SlotBoard>> { Arc::clone(&self.board) }
}
