// CLI modules
mod op;
mod ops;
mod state;

use clap::{Parser, Subcommand};

use op::{Op, OpContext};
use ops::{Init, Keygen, Serve, Version};

#[derive(Parser, Debug)]
#[command(
    name = "harbor",
    about = "Directory and rendezvous service for a peer-to-peer storage overlay"
)]
struct Args {
    /// Path to the harbor state directory (default: ~/.harbor)
    #[arg(long, global = true)]
    config_path: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize the state directory and default configuration
    Init(Init),
    /// Run the directory service
    Serve(Serve),
    /// Generate an identity keypair
    Keygen(Keygen),
    /// Print version information
    Version(Version),
}

impl Command {
    async fn execute(&self, ctx: &OpContext) -> Result<String, String> {
        match self {
            Command::Init(op) => op.execute(ctx).await.map_err(|e| e.to_string()),
            Command::Serve(op) => op.execute(ctx).await.map_err(|e| e.to_string()),
            Command::Keygen(op) => op.execute(ctx).await.map_err(|e| e.to_string()),
            Command::Version(op) => op.execute(ctx).await.map_err(|e| e.to_string()),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let ctx = OpContext {
        config_path: args.config_path.clone(),
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
