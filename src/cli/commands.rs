//! CLI command implementations

use anyhow::{anyhow, Result};
use dialoguer::{theme::ColorfulTheme, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::Duration;

use crate::api;
use crate::auth::{
    self, check_access_with, dashboard_route_for, dashboard_route_for_label, DemoIdentities,
    FileStore, Role, SessionInfo,
};
use crate::cli::{
    error, format_decision, info, print_identity_table, print_session_table, success, warn,
    OutputFormat,
};
use crate::config::{self, Config};

/// Initialize a new nevloh.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("nevloh.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created nevloh.toml");
    info("Edit the configuration file and run 'nevloh serve' to start the website");

    Ok(())
}

/// Start the website
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config_or_default()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting website on http://{}:{}", host, port));
    api::run_server(config, &host, port).await?;
    Ok(())
}

/// Sign in to the local session
pub async fn login(email: &str, role: &str, password: Option<String>) -> Result<()> {
    let config = load_config_or_default()?;
    let identities = DemoIdentities::from_config(&config.identities)?;
    let mut store = FileStore::open(&config.session.file)?;

    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };

    let delay = config.server.login_delay_ms;
    if delay > 0 {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .map_err(|e| anyhow!(e.to_string()))?,
        );
        spinner.set_message("Signing in...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        tokio::time::sleep(Duration::from_millis(delay)).await;
        spinner.finish_and_clear();
    }

    let selected = Role::from_label(role);
    match auth::authenticate(&mut store, &identities, email, &password, selected) {
        Ok(session) => {
            store.save()?;
            success(&format!("Signed in as {} ({})", email, selected.title()));
            if let Some(role) = session.role {
                info(&format!("Dashboard: {}", dashboard_route_for(role)));
            }
            Ok(())
        }
        Err(e) => {
            error(&e.to_string());
            Err(e.into())
        }
    }
}

/// Clear the local session
pub async fn logout() -> Result<()> {
    let config = load_config_or_default()?;
    let mut store = FileStore::open_or_reset(&config.session.file);

    auth::logout(&mut store);
    store.save()?;

    success("Signed out");
    Ok(())
}

/// Show the local session
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let config = load_config_or_default()?;
    let store = FileStore::open(&config.session.file)?;
    let session = auth::load_session(&store);

    match format {
        OutputFormat::Table => print_session_table(&session),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&SessionInfo::from(session))?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&SessionInfo::from(session))?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// Check whether the local session may open a view
pub async fn access(role: Option<String>) -> Result<()> {
    let config = load_config_or_default()?;
    let store = FileStore::open(&config.session.file)?;
    let session = auth::load_session(&store);

    let required = role.as_deref().map(Role::from_label);
    let decision = check_access_with(config.gate.policy, &session, required);

    let target = role.as_deref().unwrap_or("any signed-in user");
    println!("{} -> {}", target, format_decision(&decision));
    Ok(())
}

/// Show the dashboard path for a role label
pub async fn route(role: &str) -> Result<()> {
    println!("{}", dashboard_route_for_label(role));
    Ok(())
}

/// List the configured demo identities
pub async fn identities() -> Result<()> {
    let config = load_config_or_default()?;
    let identities = DemoIdentities::from_config(&config.identities)?;
    print_identity_table(&identities);
    Ok(())
}

// Helper functions

fn load_config_or_default() -> Result<Config> {
    match config::load_config() {
        Ok(config) => Ok(config),
        Err(crate::error::Error::ConfigNotFound) => {
            warn("No nevloh.toml found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}
