//! Authentication models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User roles for dashboard access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Operations staff - admin dashboard
    Admin,
    /// Fuel delivery customer - customer portal
    Customer,
    /// Delivery driver - driver dashboard
    Driver,
    /// Any stored label that is not one of the above
    Unknown,
}

impl Role {
    /// The three roles a login can select
    pub const KNOWN: [Role; 3] = [Role::Admin, Role::Customer, Role::Driver];

    /// Parse a stored role label. Total: unrecognized labels become `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "admin" => Role::Admin,
            "customer" => Role::Customer,
            "driver" => Role::Driver,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Driver => "driver",
            Role::Unknown => "unknown",
        }
    }

    /// Human readable name for page headers
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Customer => "Customer",
            Role::Driver => "Driver",
            Role::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown)
    }

    /// Whether this role meets a route's role requirement.
    /// `Unknown` never satisfies anything, including an `Unknown` requirement.
    pub fn satisfies(&self, required: Role) -> bool {
        self.is_known() && *self == required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        Role::from_label(&label)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Snapshot of the persisted authentication state of one client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub established_at: Option<DateTime<Utc>>,
}

impl Session {
    /// The state after logout, or before any login
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for a successful login at `now`
    pub fn established(role: Role, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            authenticated: true,
            role: Some(role),
            email: Some(email.into()),
            established_at: Some(now),
        }
    }

    /// Authenticated but without a role the gate recognizes
    pub fn has_unknown_role(&self) -> bool {
        self.authenticated && !self.role.is_some_and(|r| r.is_known())
    }

    /// Time elapsed since login. Informational only; no guard expires sessions.
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.established_at.map(|at| now.signed_duration_since(at))
    }

    /// Short "5m" / "2h 10m" style rendering of `age`
    pub fn age_label(&self, now: DateTime<Utc>) -> Option<String> {
        self.age(now).map(|age| {
            let minutes = age.num_minutes().max(0);
            if minutes < 60 {
                format!("{}m", minutes)
            } else {
                format!("{}h {}m", minutes / 60, minutes % 60)
            }
        })
    }
}

/// Login credentials
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// Login response with the landing route for the role
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub session: SessionInfo,
    pub redirect: String,
}

/// Session information in responses
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub role: Option<String>,
    pub email: Option<String>,
    pub login_time: Option<String>,
}

impl From<Session> for SessionInfo {
    fn from(session: Session) -> Self {
        Self {
            authenticated: session.authenticated,
            role: session.role.map(String::from),
            email: session.email,
            login_time: session.established_at.map(|t| t.to_rfc3339()),
        }
    }
}
