pub mod actions;
pub mod command;
pub mod config;
pub mod dlive;
pub mod dlive_message;
pub mod error;
pub mod midi_transport;
pub mod mixer_control;
pub mod user_session;

use env_logger::Env;

use crate::{config::Config, dlive::topology::midi_channel_span_label, dlive_message::CommandEncoder};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("dLive control started");

    let config = match Config::resolve(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    let encoder = match CommandEncoder::new(config.midi_channel) {
        Ok(encoder) => encoder,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Mixrack {}:{}, MIDI channels {}",
        config.host,
        config.midi_port,
        midi_channel_span_label(config.midi_channel)
    );

    // Mixrack connection
    let (sink, transport_handle) = midi_transport::start(config.host.clone(), config.midi_port);

    // Command processing
    let (request_tx, mixer_handle) = mixer_control::start(encoder, sink);

    // User sessions
    let session_handle = match user_session::start(&config.listen_address, request_tx).await {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("Cannot listen on {}: {}", config.listen_address, e);
            std::process::exit(1);
        }
    };

    tokio::select! {
        _ = transport_handle => log::error!("Mixrack connection task stopped"),
        _ = mixer_handle => log::error!("Mixer control task stopped"),
        _ = session_handle => log::error!("Session listener stopped"),
    }
}
