//! `ewgx serve`: run the contact endpoint until Ctrl-C.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use ewgx_api::ContentClient;
use ewgx_config::Config;
use ewgx_web::{KONTAKT_ROUTE, build_router};

use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn handle(args: ServeArgs, config: &Config, content: ContentClient) -> Result<(), CliError> {
    let addr = match args.listen {
        Some(listen) => listen.parse::<SocketAddr>().map_err(|_| CliError::Validation {
            field: "listen".into(),
            reason: format!("expected host:port, got '{listen}'"),
        })?,
        None => config.listen_addr()?,
    };

    let listener = TcpListener::bind(addr).await.map_err(|source| CliError::Bind {
        addr: addr.to_string(),
        source,
    })?;
    let local = listener.local_addr()?;
    info!(addr = %local, route = KONTAKT_ROUTE, cms = %content.directus().base_url(), "listening");

    axum::serve(listener, build_router(content))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
