use std::sync::Arc;

use tokio::signal;
use tracing_appender::non_blocking::WorkerGuard;

use shortkey::{
    api,
    config::{Config, LogConfig},
    state::AppState,
    store::UrlStore,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // read .env before anything else looks at the environment
    let dotenv = dotenvy::dotenv();
    let _guard = init_tracing(&LogConfig::load());
    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "Error loading .env file, using process environment");
    }

    let config = Config::load();
    tracing::info!(base_url = %config.base_url, port = %config.port, "Configuration loaded");

    let state = AppState::new(Arc::new(UrlStore::new()), &config);
    let app = api::routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.server_addr())
        .await
        .inspect_err(|e| tracing::error!(error = %e, addr = %config.server_addr(), "Failed to bind"))?;
    let addr = listener.local_addr()?;
    tracing::info!(addr = %addr, "URL shortener listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn init_tracing(log: &LogConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log.filter));

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
