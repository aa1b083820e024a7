//! Contact and signup form handling

use crate::auth::Role;
use crate::error::FormError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MIN_PASSWORD_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .expect("Invalid regex pattern - this is a bug in the codebase")
    })
}

/// Loose address check: something@something.tld
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Contact page submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.name, "name")?;
        require(&self.email, "email")?;
        if !is_valid_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        require(&self.service, "service")?;
        require(&self.message, "message")?;
        Ok(())
    }
}

/// Signup page submission. Only recorded as a request; accounts are not created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub role: String,
}

impl SignupForm {
    /// Validate and return the requested account type
    pub fn validate(&self) -> Result<Role, FormError> {
        require(&self.name, "name")?;
        require(&self.email, "email")?;
        if !is_valid_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        require(&self.password, "password")?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        // Admin accounts are provisioned internally
        match Role::from_label(&self.role) {
            role @ (Role::Customer | Role::Driver) => Ok(role),
            _ => Err(FormError::UnsupportedRole(self.role.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactForm {
        ContactForm {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: String::new(),
            service: "bulk-delivery".to_string(),
            message: "Need 2,000 gallons monthly".to_string(),
        }
    }

    fn signup() -> SignupForm {
        SignupForm {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            role: "customer".to_string(),
        }
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("ops@nevloh.com"));
        assert!(!is_valid_email("ops@nevloh"));
        assert!(!is_valid_email("ops nevloh.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_contact_valid() {
        assert_eq!(contact().validate(), Ok(()));
    }

    #[test]
    fn test_contact_missing_message() {
        let mut form = contact();
        form.message = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingField("message")));
    }

    #[test]
    fn test_contact_requires_service() {
        let mut form = contact();
        form.service = String::new();
        assert_eq!(form.validate(), Err(FormError::MissingField("service")));

        let mut form = contact();
        form.phone = String::new();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_contact_bad_email() {
        let mut form = contact();
        form.email = "dana".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_signup_valid() {
        assert_eq!(signup().validate(), Ok(Role::Customer));
        let mut driver = signup();
        driver.role = "driver".to_string();
        assert_eq!(driver.validate(), Ok(Role::Driver));
    }

    #[test]
    fn test_signup_password_rules() {
        let mut form = signup();
        form.password = "abc".to_string();
        form.confirm_password = "abc".to_string();
        assert_eq!(form.validate(), Err(FormError::PasswordTooShort(6)));

        let mut form = signup();
        form.confirm_password = "secret2".to_string();
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));
    }

    #[test]
    fn test_signup_rejects_admin() {
        let mut form = signup();
        form.role = "admin".to_string();
        assert_eq!(
            form.validate(),
            Err(FormError::UnsupportedRole("admin".to_string()))
        );
    }
}
