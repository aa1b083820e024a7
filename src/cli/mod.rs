//! CLI interface for Nevloh

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "nevloh")]
#[command(author = "Nevloh")]
#[command(version = "1.0.0")]
#[command(about = "Nevloh fuel delivery website and session gate", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new nevloh.toml configuration file
    Init,

    /// Start the website
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long, env = "NEVLOH_HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to server.port)
        #[arg(short, long, env = "NEVLOH_PORT")]
        port: Option<u16>,
    },

    /// Sign in to the local session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account type: admin, customer, or driver
        #[arg(short, long)]
        role: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Clear the local session
    Logout,

    /// Show the local session
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Check whether the local session may open a view
    Access {
        /// Role the view requires (omit for unguarded views)
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Show the dashboard path for a role label
    Route {
        /// Role label, any string
        role: String,
    },

    /// List the configured demo identities
    Identities,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
