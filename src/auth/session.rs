//! Per-client session storage for the web server

use crate::auth::gate::{self, load_session};
use crate::auth::identities::CredentialVerifier;
use crate::auth::models::{Role, Session};
use crate::auth::store::MemoryStore;
use crate::error::AuthError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Default upper bound on clients holding a store
pub const DEFAULT_MAX_CLIENTS: usize = 10_000;

/// Session manager keeping one [`MemoryStore`] per client id.
///
/// Stores are only created by a successful login and dropped on logout, so
/// anonymous visitors cost nothing. At most `max_clients` stores are held;
/// a login from a new client beyond that evicts the oldest login. Concurrent
/// writes for the same client are last-write-wins.
pub struct SessionManager {
    stores: Arc<RwLock<HashMap<String, MemoryStore>>>,
    max_clients: usize,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self::with_max_clients(DEFAULT_MAX_CLIENTS)
    }

    /// Create a session manager holding at most `max_clients` stores
    pub fn with_max_clients(max_clients: usize) -> Self {
        Self {
            stores: Arc::new(RwLock::new(HashMap::new())),
            max_clients: max_clients.max(1),
        }
    }

    pub fn max_clients(&self) -> usize {
        self.max_clients
    }

    /// Current session of a client; anonymous when it has no store
    pub async fn session(&self, client_id: &str) -> Session {
        self.stores
            .read()
            .await
            .get(client_id)
            .map(load_session)
            .unwrap_or_default()
    }

    /// Run the gate's login against this client's store
    pub async fn authenticate(
        &self,
        client_id: &str,
        verifier: &dyn CredentialVerifier,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Session, AuthError> {
        let mut stores = self.stores.write().await;
        let mut store = stores.remove(client_id).unwrap_or_default();
        let result = gate::authenticate(&mut store, verifier, email, password, role);
        if !store.is_empty() {
            while stores.len() >= self.max_clients {
                if !evict_oldest(&mut stores) {
                    break;
                }
            }
            stores.insert(client_id.to_string(), store);
        }
        result
    }

    /// Log the client out and forget its store
    pub async fn logout(&self, client_id: &str) {
        let mut stores = self.stores.write().await;
        if let Some(mut store) = stores.remove(client_id) {
            gate::logout(&mut store);
            if !store.is_empty() {
                stores.insert(client_id.to_string(), store);
            }
        }
    }

    /// Number of clients holding a store
    pub async fn client_count(&self) -> usize {
        self.stores.read().await.len()
    }
}

/// Drop the store with the earliest login; unreadable login times go first
fn evict_oldest(stores: &mut HashMap<String, MemoryStore>) -> bool {
    let oldest = stores
        .iter()
        .min_by_key(|(_, store)| load_session(*store).established_at)
        .map(|(id, _)| id.clone());

    match oldest {
        Some(id) => {
            stores.remove(&id);
            debug!("Evicted session for client {}", id);
            true
        }
        None => false,
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            stores: Arc::clone(&self.stores),
            max_clients: self.max_clients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identities::DemoIdentities;

    #[tokio::test]
    async fn test_unknown_client_is_anonymous() {
        let manager = SessionManager::new();
        let session = manager.session("nobody").await;
        assert!(!session.authenticated);
        assert_eq!(manager.client_count().await, 0);
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let manager = SessionManager::new();
        let ids = DemoIdentities::demo();

        manager
            .authenticate("tab-1", &ids, "driver@nevloh.com", "driver123", Role::Driver)
            .await
            .expect("demo driver should sign in");

        let session = manager.session("tab-1").await;
        assert!(session.authenticated);
        assert_eq!(session.role, Some(Role::Driver));
        assert_eq!(manager.client_count().await, 1);

        manager.logout("tab-1").await;
        assert!(!manager.session("tab-1").await.authenticated);
        assert_eq!(manager.client_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_login_creates_no_store() {
        let manager = SessionManager::new();
        let ids = DemoIdentities::demo();

        let result = manager
            .authenticate("tab-2", &ids, "admin@nevloh.com", "nope", Role::Admin)
            .await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(manager.client_count().await, 0);
    }

    #[tokio::test]
    async fn test_clients_are_isolated() {
        let manager = SessionManager::new();
        let ids = DemoIdentities::demo();

        manager
            .authenticate("a", &ids, "admin@nevloh.com", "admin123", Role::Admin)
            .await
            .unwrap();

        assert!(manager.session("a").await.authenticated);
        assert!(!manager.session("b").await.authenticated);
    }

    #[tokio::test]
    async fn test_client_count_is_bounded() {
        let manager = SessionManager::with_max_clients(3);
        let ids = DemoIdentities::demo();

        for i in 0..20 {
            let client = format!("client-{}", i);
            manager
                .authenticate(&client, &ids, "admin@nevloh.com", "admin123", Role::Admin)
                .await
                .unwrap();
            assert!(manager.client_count().await <= 3);
        }
        assert_eq!(manager.client_count().await, 3);
        assert!(manager.session("client-19").await.authenticated);
    }

    #[tokio::test]
    async fn test_eviction_drops_oldest_login() {
        let manager = SessionManager::with_max_clients(2);
        let ids = DemoIdentities::demo();

        manager
            .authenticate("first", &ids, "admin@nevloh.com", "admin123", Role::Admin)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        manager
            .authenticate("second", &ids, "driver@nevloh.com", "driver123", Role::Driver)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        manager
            .authenticate("third", &ids, "customer@nevloh.com", "customer123", Role::Customer)
            .await
            .unwrap();

        assert!(!manager.session("first").await.authenticated);
        assert!(manager.session("second").await.authenticated);
        assert!(manager.session("third").await.authenticated);
    }

    #[tokio::test]
    async fn test_relogin_at_capacity_keeps_other_clients() {
        let manager = SessionManager::with_max_clients(2);
        let ids = DemoIdentities::demo();

        for id in ["a", "b"] {
            manager
                .authenticate(id, &ids, "admin@nevloh.com", "admin123", Role::Admin)
                .await
                .unwrap();
        }
        manager
            .authenticate("a", &ids, "driver@nevloh.com", "driver123", Role::Driver)
            .await
            .unwrap();

        assert_eq!(manager.client_count().await, 2);
        assert_eq!(manager.session("a").await.role, Some(Role::Driver));
        assert!(manager.session("b").await.authenticated);
    }
}
