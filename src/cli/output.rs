//! CLI output formatting utilities

use chrono::Utc;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{Decision, DemoIdentities, Session};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a gate decision as a colored string
pub fn format_decision(decision: &Decision) -> String {
    match decision {
        Decision::Allow => "allow".green().to_string(),
        Decision::Redirect(route) => format!("{} {}", "redirect".yellow(), route),
    }
}

/// Print the session as a two-column table
pub fn print_session_table(session: &Session) {
    if !session.authenticated {
        info("Not signed in. Use 'nevloh login --email <email> --role <role>'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let role = session
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let role_color = match session.role {
        Some(r) if r.is_known() => Color::Green,
        _ => Color::Yellow,
    };
    let login_time = session
        .established_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());
    let age = session
        .age_label(Utc::now())
        .unwrap_or_else(|| "-".to_string());

    table.add_row(vec![Cell::new("Email"), Cell::new(session.email.as_deref().unwrap_or("-"))]);
    table.add_row(vec![Cell::new("Role"), Cell::new(role).fg(role_color)]);
    table.add_row(vec![Cell::new("Signed in"), Cell::new(login_time)]);
    table.add_row(vec![Cell::new("Session age"), Cell::new(age)]);

    println!("{table}");
}

/// Print the identity table with passwords masked
pub fn print_identity_table(identities: &DemoIdentities) {
    if identities.is_empty() {
        warn("No identities configured");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Password").fg(Color::Cyan),
        ]);

    for (role, credential) in identities.rows() {
        table.add_row(vec![
            Cell::new(role.title()),
            Cell::new(&credential.email),
            Cell::new(mask(&credential.password)).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
}

/// Replace all but the first character with asterisks
pub fn mask(secret: &str) -> String {
    let mut chars = secret.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first, "*".repeat(chars.count())),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("admin123"), "a*******");
        assert_eq!(mask("x"), "x");
        assert_eq!(mask(""), "");
    }
}
