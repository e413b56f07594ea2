//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable host/port
//! and graceful shutdown.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use xray_core::XrayLibrary;

use crate::config::ServerConfig;
use crate::routes;

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance serving `library`
    pub fn new(config: ServerConfig, library: Arc<dyn XrayLibrary>) -> Self {
        let router = routes::build_router(library);

        Self {
            config: Arc::new(config),
            router,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server
    ///
    /// Binds to the configured host/port and serves until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.run_with_listener(listener, shutdown_signal()).await
    }

    /// Run the server on an already bound listener until `shutdown` resolves
    ///
    /// After `shutdown` resolves no new connections are accepted. In-flight
    /// requests get `shutdown_timeout_secs` to finish before the server
    /// returns anyway.
    pub async fn run_with_listener<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        let grace = Duration::from_secs(self.config.shutdown_timeout_secs);
        let triggered = Arc::new(Notify::new());
        let notifier = triggered.clone();
        let signal = async move {
            shutdown.await;
            tracing::info!("Shutdown signal received, draining connections");
            notifier.notify_one();
        };

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .into_future();
        let mut serve = std::pin::pin!(serve);

        tokio::select! {
            result = &mut serve => result,
            _ = async {
                triggered.notified().await;
                tokio::time::sleep(grace).await;
            } => {
                tracing::warn!(
                    timeout_secs = grace.as_secs(),
                    "Shutdown timeout elapsed, closing remaining connections"
                );
                Ok(())
            }
        }
    }

    /// Create a test server and return the bound address
    ///
    /// This binds to port 0 to get a random available port, starts the server
    /// in a background task, and returns the actual bound address.
    #[cfg(test)]
    pub async fn spawn_test_server(
        config: ServerConfig,
        library: Arc<dyn XrayLibrary>,
    ) -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = Self::new(config, library);
        let handle = tokio::spawn(async move {
            server
                .run_with_listener(listener, std::future::pending())
                .await
                .ok();
        });

        (addr, handle)
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
}
