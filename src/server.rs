//! Web server

use crate::cli;

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use axum::ServiceExt;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use expanduser::expanduser;
use thiserror::Error;
use tokio::signal;

/// Errors preventing the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The host and port do not form a socket address
    #[error("invalid host name, IP address or port number: {0}")]
    InvalidAddress(String),

    /// A TLS file path could not be resolved
    #[error("TLS {what} file expected at '{path}' but not found")]
    TlsFileMissing {
        what: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The TLS certificate or key could not be loaded
    #[error("failed to load TLS certificate files")]
    TlsConfig(#[source] std::io::Error),

    /// The server failed while running
    #[error("server error")]
    Serve(#[source] std::io::Error),
}

/// Expand `~` and resolve a TLS file to an absolute path.
fn resolve_tls_file(what: &'static str, path: &str) -> Result<PathBuf, ServerError> {
    let missing = |source| ServerError::TlsFileMissing {
        what,
        path: path.to_string(),
        source,
    };
    expanduser(path).map_err(missing)?.canonicalize().map_err(missing)
}

/// Serve the decimator service
///
/// # Arguments
///
/// * `args`: Command line arguments
/// * `service`: The [crate::app::Service] to serve
pub async fn serve(
    args: &cli::CommandLineArgs,
    service: crate::app::Service,
) -> Result<(), ServerError> {
    let address = format!("{}:{}", args.host, args.port);
    let addr = SocketAddr::from_str(&address).map_err(|_| ServerError::InvalidAddress(address))?;

    // Catch ctrl+c and try to shutdown gracefully
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(
        handle.clone(),
        args.graceful_shutdown_timeout,
    ));

    if args.https {
        let cert_file = resolve_tls_file("certificate", &args.cert_file)?;
        let key_file = resolve_tls_file("key", &args.key_file)?;
        let tls_config = RustlsConfig::from_pem_file(cert_file, key_file)
            .await
            .map_err(ServerError::TlsConfig)?;
        tracing::info!("listening on https://{}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(service.into_make_service())
            .await
            .map_err(ServerError::Serve)
    } else {
        tracing::info!("listening on http://{}", addr);
        axum_server::bind(addr)
            .handle(handle)
            .serve(service.into_make_service())
            .await
            .map_err(ServerError::Serve)
    }
}

/// Graceful shutdown handler
///
/// Installs signal handlers to catch Ctrl-C or SIGTERM and trigger a graceful shutdown.
async fn shutdown_signal(handle: Handle, timeout: u64) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install signal handler: {}", err);
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

    tracing::info!("signal received, starting graceful shutdown");
    // Force shutdown if graceful shutdown takes longer than the timeout
    handle.graceful_shutdown(Some(Duration::from_secs(timeout)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_file_missing() {
        let err = resolve_tls_file("key", "/nonexistent/decimator/key.pem").unwrap_err();
        assert_eq!(
            "TLS key file expected at '/nonexistent/decimator/key.pem' but not found",
            err.to_string()
        );
    }

    #[test]
    fn tls_file_found() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(
            file.path().canonicalize().unwrap(),
            resolve_tls_file("certificate", path).unwrap()
        );
    }
}
