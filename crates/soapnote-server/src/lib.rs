#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! HTTP front end for the note pipeline

mod error;
mod health;
mod note;
mod pipeline;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use soapnote_config::{Config, NoteConfig};
use soapnote_prompt::NoteTemplate;
use tower_http::trace::TraceLayer;

pub use error::{NoteFailure, PipelineError};
pub use pipeline::NotePipeline;

use note::NoteEndpoint;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Both clients are built once and shared by every note endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a client cannot be
    /// built, or a prompt template fails to load
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let transcriber = soapnote_stt::build_provider(&config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize transcription client: {e}"))?;
        let completer = soapnote_llm::build_provider(&config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize completion client: {e}"))?;

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Note endpoints
        for (name, note_config) in &config.notes {
            let template = load_template(name, note_config)?;

            let pipeline = NotePipeline::new(
                Arc::clone(&transcriber),
                Arc::clone(&completer),
                template,
                &config.transcription,
                &config.completion,
            );

            let endpoint = Arc::new(NoteEndpoint {
                path: Arc::from(note_config.path.as_str()),
                field: note_config.field.clone(),
                pipeline,
            });

            app = app.route(&note_config.path, note::method_router(endpoint));

            tracing::debug!(note = %name, path = %note_config.path, field = %note_config.field, "note endpoint mounted");
        }

        // Middleware
        app = app
            .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. In-flight requests
    /// are allowed to finish.
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Resolve the template for a note endpoint
fn load_template(name: &str, config: &NoteConfig) -> anyhow::Result<NoteTemplate> {
    let template = match (&config.template, &config.template_path) {
        (Some(inline), _) => NoteTemplate::parse(inline),
        (None, Some(path)) => NoteTemplate::from_file(path),
        (None, None) => Ok(NoteTemplate::soap_note()),
    };

    template.map_err(|e| anyhow::anyhow!("invalid template for note '{name}': {e}"))
}
