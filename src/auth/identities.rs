//! Credential verification
//!
//! The gate never looks at credentials itself. It asks a [`CredentialVerifier`],
//! and the demo identity table is the only verifier shipped.

use crate::auth::models::Role;
use crate::config::IdentityConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Decides whether an (email, password, role) triple is a valid login
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str, role: Role) -> bool;
}

/// Expected credential for one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// Fixed role -> credential table standing in for an identity provider
#[derive(Debug, Clone, Default)]
pub struct DemoIdentities {
    entries: HashMap<Role, Credential>,
}

impl DemoIdentities {
    /// The built-in demo table
    pub fn demo() -> Self {
        let mut entries = HashMap::new();
        for (role, email, password) in [
            (Role::Admin, "admin@nevloh.com", "admin123"),
            (Role::Customer, "customer@nevloh.com", "customer123"),
            (Role::Driver, "driver@nevloh.com", "driver123"),
        ] {
            entries.insert(
                role,
                Credential {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            );
        }
        Self { entries }
    }

    /// Build the table from configuration, rejecting unknown or repeated roles
    pub fn from_config(identities: &[IdentityConfig]) -> Result<Self> {
        let mut entries = HashMap::new();
        for identity in identities {
            if !identity.role.is_known() {
                return Err(Error::Config(format!(
                    "Identity '{}' has an unsupported role",
                    identity.email
                )));
            }
            let credential = Credential {
                email: identity.email.clone(),
                password: identity.password.clone(),
            };
            if entries.insert(identity.role, credential).is_some() {
                return Err(Error::Config(format!(
                    "Role '{}' has more than one identity",
                    identity.role
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, role: Role) -> Option<&Credential> {
        self.entries.get(&role)
    }

    /// Rows in role order (admin, customer, driver)
    pub fn rows(&self) -> Vec<(Role, &Credential)> {
        Role::KNOWN
            .iter()
            .filter_map(|role| self.entries.get(role).map(|c| (*role, c)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialVerifier for DemoIdentities {
    fn verify(&self, email: &str, password: &str, role: Role) -> bool {
        self.entries
            .get(&role)
            .is_some_and(|c| c.email == email && c.password == password)
    }
}
