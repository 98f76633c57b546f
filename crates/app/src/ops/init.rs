use clap::Args;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Directory API listen port
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Bind address for the directory API
    #[arg(long, default_value = "0.0.0.0")]
    pub bind_addr: String,

    /// Externally visible base URL, e.g. https://directory.example.com
    #[arg(long)]
    pub public_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            api_port: self.port,
            bind_addr: self.bind_addr.clone(),
            public_url: self.public_url.clone(),
            ..AppConfig::default()
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized harbor directory at: {}\n\
             - Config: {}\n\
             - Listen address: {}:{}",
            state.harbor_dir.display(),
            state.config_path.display(),
            state.config.bind_addr,
            state.config.api_port,
        );

        Ok(output)
    }
}
