use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nevloh::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nevloh=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(host, port).await,
        Commands::Login {
            email,
            role,
            password,
        } => cli::commands::login(&email, &role, password).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Whoami { format } => cli::commands::whoami(format).await,
        Commands::Access { role } => cli::commands::access(role).await,
        Commands::Route { role } => cli::commands::route(&role).await,
        Commands::Identities => cli::commands::identities().await,
    }
}
