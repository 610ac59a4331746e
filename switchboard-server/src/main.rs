use anyhow::{Context, Result};
use axum::{Router, routing::get};
use clap::Parser;
use std::net::SocketAddr;
use switchboard_core::IceServerConfig;
use switchboard_server::{ServerConfig, SignalingService, ws_handler};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "switchboardd", about = "Room-based WebRTC signaling relay")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    listen: SocketAddr,

    /// STUN/TURN server URL handed to clients; repeatable. Defaults to a
    /// public STUN server when omitted.
    #[arg(long = "ice-server")]
    ice_servers: Vec<String>,

    /// Username for the TURN servers, if any.
    #[arg(long)]
    turn_username: Option<String>,

    /// Credential for the TURN servers, if any.
    #[arg(long)]
    turn_credential: Option<String>,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        if self.ice_servers.is_empty() {
            return ServerConfig {
                listen: self.listen,
                ..ServerConfig::default()
            };
        }

        ServerConfig {
            listen: self.listen,
            ice_servers: vec![IceServerConfig {
                urls: self.ice_servers,
                username: self.turn_username,
                credential: self.turn_credential,
            }],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();
    let service = SignalingService::new(config.ice_servers.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws/{connection_id}", get(ws_handler))
        .layer(cors)
        .with_state(service);

    info!("signaling server listening on http://{}", config.listen);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
