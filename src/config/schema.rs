//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::{AccessPolicy, Role, DEFAULT_MAX_CLIENTS};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default = "default_identities")]
    pub identities: Vec<IdentityConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            gate: GateConfig::default(),
            session: SessionConfig::default(),
            identities: default_identities(),
        }
    }
}

/// Server configuration for the website
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Cosmetic pause before a login result is shown
    #[serde(default)]
    pub login_delay_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            login_delay_ms: 0,
        }
    }
}

/// Company details shown on every page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_tagline")]
    pub tagline: String,

    #[serde(default = "default_phone")]
    pub phone: String,

    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_address")]
    pub address: String,
}

fn default_site_name() -> String {
    "Nevloh".to_string()
}

fn default_tagline() -> String {
    "Fuel delivered where you work".to_string()
}

fn default_phone() -> String {
    "(555) 010-4400".to_string()
}

fn default_email() -> String {
    "info@nevloh.com".to_string()
}

fn default_address() -> String {
    "1200 Industrial Pkwy, Houston, TX".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            tagline: default_tagline(),
            phone: default_phone(),
            email: default_email(),
            address: default_address(),
        }
    }
}

/// Session gate behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GateConfig {
    #[serde(default)]
    pub policy: AccessPolicy,
}

/// Session storage: the CLI's local file and the server's client limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: PathBuf,

    /// Signed-in clients the server keeps; the oldest login is evicted past this
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,
}

fn default_session_file() -> PathBuf {
    PathBuf::from("./.nevloh/session.json")
}

fn default_max_clients() -> usize {
    DEFAULT_MAX_CLIENTS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
            max_clients: default_max_clients(),
        }
    }
}

/// One row of the demo identity table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityConfig {
    pub role: Role,
    pub email: String,
    pub password: String,
}

fn default_identities() -> Vec<IdentityConfig> {
    [
        (Role::Admin, "admin@nevloh.com", "admin123"),
        (Role::Customer, "customer@nevloh.com", "customer123"),
        (Role::Driver, "driver@nevloh.com", "driver123"),
    ]
    .into_iter()
    .map(|(role, email, password)| IdentityConfig {
        role,
        email: email.to_string(),
        password: password.to_string(),
    })
    .collect()
}

impl Config {
    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
