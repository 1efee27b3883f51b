//! Duet real-time session server.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=... cargo run --bin duet-server
//! JWT_SECRET=... cargo run --bin duet-server -- --host 0.0.0.0 --port 4000
//! ```

use std::sync::Arc;

use clap::Parser;
use duet_server::{
    config::Config,
    infrastructure::{
        identity::JwtIdentityVerifier,
        message_pusher::WebSocketMessagePusher,
        registry::{InMemoryPresenceRegistry, InMemoryRoomRegistry},
        repository::{
            InMemoryCollaborationRequestRepository, InMemoryMessageStore, InMemoryUserDirectory,
        },
    },
    ui::{AppState, Dependencies, Server},
};
use duet_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Initialize dependencies in order:
    // 1. Stores and registries
    // 2. MessagePusher / IdentityVerifier
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Stores and registries (in-memory)
    let user_directory = match &config.users_file {
        Some(path) => match InMemoryUserDirectory::from_json_file(path) {
            Ok(directory) => {
                tracing::info!(
                    "Loaded {} user profiles from {}",
                    directory.len(),
                    path.display()
                );
                directory
            }
            Err(e) => {
                tracing::error!("Failed to load users file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => InMemoryUserDirectory::new(),
    };

    // 2. MessagePusher (WebSocket implementation) and IdentityVerifier (JWT)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let identity_verifier = Arc::new(JwtIdentityVerifier::new(&config.jwt_secret));

    // 3. UseCases
    let state = AppState::new(Dependencies {
        identity_verifier,
        message_store: Arc::new(InMemoryMessageStore::new()),
        collaboration_requests: Arc::new(InMemoryCollaborationRequestRepository::new()),
        user_directory: Arc::new(user_directory),
        presence: Arc::new(InMemoryPresenceRegistry::new()),
        rooms: Arc::new(InMemoryRoomRegistry::new()),
        message_pusher,
        clock: Arc::new(SystemClock),
        store_timeout: config.store_timeout(),
    });

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
