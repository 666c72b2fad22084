//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to frontend bridge requests.

use std::{sync::Arc, thread};

use ticketbell_bridge::{
    MessageFromBackend, MessageToBackend,
    config::{ApiConfig, Config},
    toast::ToastKind,
};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::AppContext;
use crate::client::NotificationClient;
use crate::state::State;

/// Builds the API client, falling back to the default API settings when the
/// configured ones are unusable. Returns the settings actually in use and a
/// warning for the user, if any.
fn build_client(mut config: Config) -> (Config, NotificationClient, Option<String>) {
    match NotificationClient::new(&config.api) {
        Ok(client) => (config, client, None),
        Err(error) => {
            log::error!("Invalid API configuration: {error}");
            config.api = ApiConfig::default();
            let client = NotificationClient::new(&config.api)
                .expect("failed to build the notifications client with default settings");
            let warning = format!("{error}. Using {} instead.", config.api.base_url);
            (config, client, Some(warning))
        }
    }
}

/// Initialize backend state and start processing frontend messages.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let (config, mut warning) = match crate::config::load_config().await {
        Ok(config) => (config, None),
        Err(error) => {
            log::error!("Failed to load configuration, using defaults: {error}");
            (
                Config::default(),
                Some(format!("Could not load settings ({error}). Using defaults.")),
            )
        }
    };

    let (config, client, client_warning) = build_client(config);
    warning = warning.or(client_warning);

    let state = Arc::new(RwLock::new(State { config, client }));
    let context = Arc::new(AppContext { state, tx });

    if let Some(warning) = warning {
        context.send_toast(ToastKind::Warning, warning).await;
    }

    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_backend(rx, tx).await });
    });
}
