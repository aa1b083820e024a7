//! Configuration loading and environment variable interpolation

use crate::auth::DemoIdentities;
use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "nevloh.toml";

/// Load configuration from nevloh.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    parse_config(&content)
}

/// Parse configuration text, interpolating environment variables first
pub fn parse_config(content: &str) -> Result<Config> {
    let content = interpolate_env_vars(content);
    let config: Config = toml::from_str(&content)?;
    // Identity table must be valid at load time
    DemoIdentities::from_config(&config.identities)?;
    Ok(config)
}

/// Save configuration to a path
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Nevloh website configuration

[server]
host = "0.0.0.0"
port = 3000
# Pause before showing a login result, purely cosmetic
# login_delay_ms = 1000

[site]
name = "Nevloh"
tagline = "Fuel delivered where you work"
phone = "(555) 010-4400"
email = "info@nevloh.com"
address = "1200 Industrial Pkwy, Houston, TX"

[gate]
# "lenient": signed-in users without a recognized role may open unguarded pages
# "strict": such users are sent back to /login everywhere
policy = "lenient"

[session]
# Session area used by `nevloh login` / `logout` / `whoami`
file = "./.nevloh/session.json"
# Signed-in browsers the server keeps; the oldest login is evicted past this
max_clients = 10000

# Demo identities, one per role. Not a real identity provider.
[[identities]]
role = "admin"
email = "admin@nevloh.com"
password = "${NEVLOH_ADMIN_PASSWORD:-admin123}"

[[identities]]
role = "customer"
email = "customer@nevloh.com"
password = "${NEVLOH_CUSTOMER_PASSWORD:-customer123}"

[[identities]]
role = "driver"
email = "driver@nevloh.com"
password = "${NEVLOH_DRIVER_PASSWORD:-driver123}"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessPolicy;

    #[test]
    fn test_env_interpolation() {
        env::set_var("NEVLOH_TEST_VAR", "hello");
        let content = "value = \"${NEVLOH_TEST_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("NEVLOH_TEST_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_content_parses() {
        let config = parse_config(default_config_content()).expect("default config parses");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.gate.policy, AccessPolicy::Lenient);
        assert_eq!(config.identities.len(), 3);
        assert_eq!(config.session.max_clients, 10_000);
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let content = r#"
[[identities]]
role = "driver"
email = "a@nevloh.com"
password = "x"

[[identities]]
role = "driver"
email = "b@nevloh.com"
password = "y"
"#;
        assert!(matches!(parse_config(content), Err(Error::Config(_))));
    }
}
