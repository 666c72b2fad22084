use crate::client::NotificationClient;

/// The core application state shared by all service handlers.
///
/// Handlers take a snapshot of what they need and release the lock before
/// doing any I/O, so requests never wait on each other.
#[derive(Debug, Clone)]
pub struct State {
    /// The effective application configuration.
    pub config: ticketbell_bridge::config::Config,
    /// Client for the notifications API, built from `config.api`.
    pub client: NotificationClient,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
