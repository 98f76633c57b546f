use std::path::PathBuf;

use clap::Args;

use common::prelude::SecretKey;

#[derive(Args, Debug, Clone)]
pub struct Keygen {
    /// Write the secret key PEM here instead of printing it
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("failed to write key file: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Keygen {
    type Error = KeygenError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = SecretKey::generate();
        let public = key.public().to_base64();

        match &self.out {
            Some(path) => {
                std::fs::write(path, key.to_pem())?;
                Ok(format!(
                    "public key: {}\nsecret key written to: {}",
                    public,
                    path.display()
                ))
            }
            None => Ok(format!("public key: {}\n{}", public, key.to_pem())),
        }
    }
}
