fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    log::info!("Starting ticketbell {}", env!("CARGO_PKG_VERSION"));

    let channels = ticketbell_bridge::BridgeChannels::default();
    ticketbell_backend::run(channels.backend_rx, channels.backend_tx);
    ticketbell_frontend::run(channels.frontend_rx, channels.frontend_tx)
}
