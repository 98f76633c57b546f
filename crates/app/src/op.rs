use std::path::PathBuf;

/// Context shared by every CLI operation.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    /// override for the harbor state directory
    pub config_path: Option<PathBuf>,
}

#[async_trait::async_trait]
pub trait Op {
    type Error: std::error::Error;
    type Output: std::fmt::Display;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}
