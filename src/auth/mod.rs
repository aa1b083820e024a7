//! Authentication, session storage, and the session gate

pub mod gate;
pub mod identities;
pub mod middleware;
pub mod models;
pub mod session;
pub mod store;

pub use gate::{
    authenticate, check_access, check_access_with, dashboard_route_for,
    dashboard_route_for_label, load_session, logout, AccessPolicy, Decision, Route,
};
pub use identities::{Credential, CredentialVerifier, DemoIdentities};
pub use middleware::{client_id_from_request, client_session, ClientId, CLIENT_COOKIE};
pub use models::{LoginRequest, LoginResponse, Role, Session, SessionInfo};
pub use session::{SessionManager, DEFAULT_MAX_CLIENTS};
pub use store::{FileStore, MemoryStore, SessionStore};
