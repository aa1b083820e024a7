//! Session gate
//!
//! Decides whether a navigation may proceed to a view, and owns the only two
//! transitions of the session state machine: `authenticate` (Anonymous ->
//! Authenticated) and `logout` (Authenticated -> Anonymous).

use crate::auth::identities::CredentialVerifier;
use crate::auth::models::{Role, Session};
use crate::auth::store::{
    SessionStore, KEY_AUTHENTICATED, KEY_EMAIL, KEY_LOGIN_TIME, KEY_ROLE, SESSION_KEYS,
};
use crate::error::{AuthError, Field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Paths the gate can send a client to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Unauthorized,
    AdminDashboard,
    CustomerPortal,
    DriverDashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Unauthorized => "/unauthorized",
            Route::AdminDashboard => "/admin-dashboard",
            Route::CustomerPortal => "/customer-portal",
            Route::DriverDashboard => "/driver-dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Outcome of a gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Route),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::Redirect(route) => write!(f, "redirect {}", route),
        }
    }
}

/// How authenticated sessions without a recognized role are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPolicy {
    /// Unguarded views allow them; role-guarded views send them to `/unauthorized`
    #[default]
    Lenient,
    /// Every check sends them back to `/login`
    Strict,
}

/// Gate decision under the default (lenient) policy
pub fn check_access(session: &Session, required_role: Option<Role>) -> Decision {
    check_access_with(AccessPolicy::Lenient, session, required_role)
}

/// Gate decision under an explicit policy
pub fn check_access_with(
    policy: AccessPolicy,
    session: &Session,
    required_role: Option<Role>,
) -> Decision {
    if !session.authenticated {
        return Decision::Redirect(Route::Login);
    }

    if policy == AccessPolicy::Strict && session.has_unknown_role() {
        return Decision::Redirect(Route::Login);
    }

    match required_role {
        Some(required) if !session.role.is_some_and(|role| role.satisfies(required)) => {
            Decision::Redirect(Route::Unauthorized)
        }
        _ => Decision::Allow,
    }
}

/// Landing page for a role
pub fn dashboard_route_for(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard,
        Role::Customer => Route::CustomerPortal,
        Role::Driver => Route::DriverDashboard,
        Role::Unknown => Route::Home,
    }
}

/// Landing page for a raw role label; unknown labels land on `/`
pub fn dashboard_route_for_label(label: &str) -> Route {
    dashboard_route_for(Role::from_label(label))
}

/// Read the session snapshot out of a store
pub fn load_session<S: SessionStore + ?Sized>(store: &S) -> Session {
    let authenticated = store.get(KEY_AUTHENTICATED).as_deref() == Some("true");
    let role = store.get(KEY_ROLE).map(|label| Role::from_label(&label));
    let email = store.get(KEY_EMAIL);
    let established_at = store
        .get(KEY_LOGIN_TIME)
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|t| t.with_timezone(&Utc));

    Session {
        authenticated,
        role,
        email,
        established_at,
    }
}

/// Overwrite every session key with `session`; absent fields are removed
fn persist_session<S: SessionStore + ?Sized>(store: &mut S, session: &Session) {
    if session.authenticated {
        store.set(KEY_AUTHENTICATED, "true");
    } else {
        store.remove(KEY_AUTHENTICATED);
    }

    match session.role {
        Some(role) => store.set(KEY_ROLE, role.as_str()),
        None => store.remove(KEY_ROLE),
    }

    match &session.email {
        Some(email) => store.set(KEY_EMAIL, email),
        None => store.remove(KEY_EMAIL),
    }

    match session.established_at {
        Some(at) => store.set(KEY_LOGIN_TIME, &at.to_rfc3339()),
        None => store.remove(KEY_LOGIN_TIME),
    }
}

/// Check a login and, on success, persist a fresh session.
///
/// The store is untouched on any error.
pub fn authenticate<S, V>(
    store: &mut S,
    verifier: &V,
    email: &str,
    password: &str,
    selected_role: Role,
) -> Result<Session, AuthError>
where
    S: SessionStore + ?Sized,
    V: CredentialVerifier + ?Sized,
{
    if email.is_empty() {
        return Err(AuthError::MissingField(Field::Email));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField(Field::Password));
    }

    if !selected_role.is_known() || !verifier.verify(email, password, selected_role) {
        tracing::warn!("Rejected login for {} as {}", email, selected_role);
        return Err(AuthError::InvalidCredentials);
    }

    let session = Session::established(selected_role, email, Utc::now());
    persist_session(store, &session);
    tracing::info!("Signed in {} as {}", email, selected_role);

    Ok(session)
}

/// Clear every session key. Idempotent.
pub fn logout<S: SessionStore + ?Sized>(store: &mut S) {
    for key in SESSION_KEYS {
        store.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identities::DemoIdentities;
    use crate::auth::store::MemoryStore;

    fn signed_in(role: Option<Role>) -> Session {
        Session {
            authenticated: true,
            role,
            email: Some("someone@nevloh.com".to_string()),
            established_at: None,
        }
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        let session = Session::anonymous();
        assert_eq!(check_access(&session, None), Decision::Redirect(Route::Login));
        assert_eq!(
            check_access(&session, Some(Role::Admin)),
            Decision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_anonymous_with_stale_role_still_redirects() {
        let session = Session {
            authenticated: false,
            role: Some(Role::Admin),
            email: None,
            established_at: None,
        };
        assert_eq!(
            check_access(&session, Some(Role::Admin)),
            Decision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_missing_role_fails_open_for_unguarded_views() {
        let session = signed_in(None);
        assert_eq!(check_access(&session, None), Decision::Allow);
        assert_eq!(
            check_access(&session, Some(Role::Customer)),
            Decision::Redirect(Route::Unauthorized)
        );
    }

    #[test]
    fn test_unknown_role_cannot_satisfy_unknown_requirement() {
        let session = signed_in(Some(Role::Unknown));
        assert_eq!(
            check_access(&session, Some(Role::Unknown)),
            Decision::Redirect(Route::Unauthorized)
        );
    }

    #[test]
    fn test_strict_policy_sends_unknown_roles_to_login() {
        let session = signed_in(Some(Role::Unknown));
        assert_eq!(
            check_access_with(AccessPolicy::Strict, &session, None),
            Decision::Redirect(Route::Login)
        );
        let known = signed_in(Some(Role::Driver));
        assert_eq!(
            check_access_with(AccessPolicy::Strict, &known, Some(Role::Driver)),
            Decision::Allow
        );
    }

    #[test]
    fn test_load_session_requires_exact_true() {
        let mut store = MemoryStore::new();
        store.set(KEY_AUTHENTICATED, "True");
        store.set(KEY_ROLE, "admin");
        assert!(!load_session(&store).authenticated);

        store.set(KEY_AUTHENTICATED, "true");
        assert!(load_session(&store).authenticated);
    }

    #[test]
    fn test_load_session_ignores_bad_login_time() {
        let mut store = MemoryStore::new();
        store.set(KEY_AUTHENTICATED, "true");
        store.set(KEY_LOGIN_TIME, "yesterday");
        let session = load_session(&store);
        assert!(session.established_at.is_none());
        assert!(session.role.is_none());
    }

    #[test]
    fn test_authenticate_missing_fields() {
        let mut store = MemoryStore::new();
        let ids = DemoIdentities::demo();
        assert_eq!(
            authenticate(&mut store, &ids, "", "admin123", Role::Admin),
            Err(AuthError::MissingField(Field::Email))
        );
        assert_eq!(
            authenticate(&mut store, &ids, "admin@nevloh.com", "", Role::Admin),
            Err(AuthError::MissingField(Field::Password))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_authenticate_overwrites_previous_session() {
        let mut store = MemoryStore::new();
        let ids = DemoIdentities::demo();
        authenticate(&mut store, &ids, "driver@nevloh.com", "driver123", Role::Driver).unwrap();
        authenticate(&mut store, &ids, "admin@nevloh.com", "admin123", Role::Admin).unwrap();

        let session = load_session(&store);
        assert_eq!(session.role, Some(Role::Admin));
        assert_eq!(session.email.as_deref(), Some("admin@nevloh.com"));
        assert!(session.established_at.is_some());
    }

    #[test]
    fn test_logout_leaves_unrelated_keys() {
        let mut store = MemoryStore::new();
        store.set("theme", "dark");
        let ids = DemoIdentities::demo();
        authenticate(&mut store, &ids, "customer@nevloh.com", "customer123", Role::Customer)
            .unwrap();

        logout(&mut store);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_dashboard_routes() {
        assert_eq!(dashboard_route_for(Role::Admin).path(), "/admin-dashboard");
        assert_eq!(dashboard_route_for(Role::Customer).path(), "/customer-portal");
        assert_eq!(dashboard_route_for(Role::Driver).path(), "/driver-dashboard");
        assert_eq!(dashboard_route_for(Role::Unknown).path(), "/");
        assert_eq!(dashboard_route_for_label("superuser"), Route::Home);
    }
}
