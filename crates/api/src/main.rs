use std::net::{IpAddr, SocketAddr};

use routemark_api::config::ServerConfig;
use routemark_api::{controllers, ApiError};
use routemark_registrar::{ConfigError, ControllerCatalog, RegistrarConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "routemark_api=debug,routemark_registrar=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    let registrar_config = RegistrarConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Routes ---
    let catalog = ControllerCatalog::discover();
    let table = routemark_api::register_routes(&registrar_config, &catalog)?;
    for route in table.routes() {
        let methods: Vec<&str> = route.methods.iter().map(|m| m.as_str()).collect();
        tracing::debug!(
            methods = %methods.join("|"),
            uri = %route.uri,
            name = route.name.as_deref().unwrap_or("-"),
            action = %route.action,
            middleware = ?route.middleware,
            "Route"
        );
    }

    let app = routemark_api::build_app(&controllers::binding(), &table, &config)?;

    // --- Start server ---
    let ip: IpAddr = config.host.parse().map_err(|_| ConfigError::Invalid {
        var: "HOST",
        expected: "an IP address",
        value: config.host.clone(),
    })?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
