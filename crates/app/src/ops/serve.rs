use std::net::SocketAddr;
use std::str::FromStr;

use clap::Args;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use service::{Config, ServiceState};

use crate::state::AppState;

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Override the configured listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level for the request trace layer
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("state error: {0}")]
    State(#[from] crate::state::StateError),

    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),

    #[error("invalid listen address {0:?}")]
    InvalidListenAddr(String),

    #[error("http server error: {0}")]
    Http(#[from] service::http::HttpServerError),
}

/// Initialize logging. Returns guards that must stay alive for the
/// duration of the process.
fn init_logging(
    level: tracing::Level,
    log_dir: Option<&std::path::Path>,
) -> Vec<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::fmt::format::FmtSpan;

    let mut guards = Vec::new();

    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);

    let stdout_env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stdout_writer)
        .with_filter(stdout_env_filter);

    if let Some(log_dir) = log_dir {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
        }

        let file_appender = tracing_appender::rolling::daily(log_dir, "harbor.log");
        let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);

        let file_env_filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(file_env_filter);

        tracing_subscriber::registry()
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(stdout_layer).init();
    }

    guards
}

#[async_trait::async_trait]
impl crate::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;

        let log_level = tracing::Level::from_str(&self.log_level)
            .map_err(|_| ServeError::InvalidLogLevel(self.log_level.clone()))?;

        let port = self.port.unwrap_or(state.config.api_port);
        let listen_addr: SocketAddr = format!("{}:{}", state.config.bind_addr, port)
            .parse()
            .map_err(|_| {
                ServeError::InvalidListenAddr(format!("{}:{}", state.config.bind_addr, port))
            })?;

        let config = Config {
            listen_addr,
            log_level,
            public_url: state.config.public_url.clone(),
            debug_principals: state.config.debug_principals.iter().cloned().collect(),
            oauth: state.config.oauth.clone(),
            avatar_bucket: state.config.avatar_bucket.clone(),
        };

        let _guards = init_logging(log_level, state.config.log_dir.as_deref());

        let service_state = ServiceState::from_config(&config);

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
            let _ = shutdown_tx.send(());
        });

        service::http::run(&config, service_state, shutdown_rx).await?;

        Ok("directory service stopped".to_string())
    }
}
