//! Admin console
//!
//! The session token issued by `POST /api/admin/login` is persisted under
//! [`ADMIN_SESSION_KEY`] so a restart skips the login until it expires.

use serde::{Deserialize, Serialize};

use shared::client::LoginResponse;
use shared::models::{Order, OrderDetail, OrderStats, OrderStatus};
use shared::util::now_millis;

use crate::http::HttpClient;
use crate::storage::{ADMIN_SESSION_KEY, LocalStorage};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    pub username: String,
    /// Unix millis
    pub expires_at: i64,
}

impl AdminSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= now_millis()
    }
}

impl From<LoginResponse> for AdminSession {
    fn from(resp: LoginResponse) -> Self {
        Self {
            token: resp.token,
            username: resp.username,
            expires_at: resp.expires_at,
        }
    }
}

pub struct AdminConsole {
    client: HttpClient,
    session: AdminSession,
    storage: LocalStorage,
}

impl AdminConsole {
    /// Exchange credentials for a session and persist it
    pub async fn login(
        client: &HttpClient,
        storage: LocalStorage,
        username: &str,
        password: &str,
    ) -> ClientResult<Self> {
        let session = AdminSession::from(client.login(username, password).await?);
        storage.save(ADMIN_SESSION_KEY, &session)?;
        tracing::info!(username = %session.username, "Admin logged in");
        Ok(Self::with_session(client, session, storage))
    }

    /// Resume a persisted session; expired or unreadable sessions are dropped
    pub fn restore(client: &HttpClient, storage: LocalStorage) -> Option<Self> {
        let session = match storage.load::<AdminSession>(ADMIN_SESSION_KEY) {
            Ok(Some(session)) => session,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable admin session");
                Self::forget(&storage);
                return None;
            }
        };
        if session.is_expired() {
            tracing::debug!(username = %session.username, "Admin session expired");
            Self::forget(&storage);
            return None;
        }
        Some(Self::with_session(client, session, storage))
    }

    fn with_session(client: &HttpClient, session: AdminSession, storage: LocalStorage) -> Self {
        Self {
            client: client.clone().with_token(session.token.clone()),
            session,
            storage,
        }
    }

    fn forget(storage: &LocalStorage) {
        if let Err(e) = storage.remove(ADMIN_SESSION_KEY) {
            tracing::warn!(error = %e, "Failed to remove admin session");
        }
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn logout(self) {
        tracing::info!(username = %self.session.username, "Admin logged out");
        Self::forget(&self.storage);
    }

    /// A rejected token ends the persisted session
    fn check<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(ClientError::Unauthorized(_)) = &result {
            tracing::warn!(username = %self.session.username, "Admin session rejected by server");
            Self::forget(&self.storage);
        }
        result
    }

    /// All orders, newest first
    pub async fn orders(&self) -> ClientResult<Vec<Order>> {
        let result = self.client.list_orders().await;
        self.check(result)
    }

    pub async fn stats(&self) -> ClientResult<OrderStats> {
        let result = self.client.order_stats().await;
        self.check(result)
    }

    pub async fn order(&self, id: &str) -> ClientResult<OrderDetail> {
        let result = self.client.admin_order(id).await;
        self.check(result)
    }

    pub async fn set_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        let result = self.client.update_order_status(id, status).await;
        self.check(result)
    }

    pub async fn confirm(&self, id: &str) -> ClientResult<Order> {
        self.set_status(id, OrderStatus::Confirmed).await
    }

    pub async fn cancel(&self, id: &str) -> ClientResult<Order> {
        self.set_status(id, OrderStatus::Cancelled).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let result = self.client.delete_order(id).await;
        self.check(result).map(|_| ())
    }

    /// Status buttons offered for an order row
    pub fn actions(order: &Order) -> &'static [OrderStatus] {
        order.status.admin_actions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(storage: &LocalStorage) -> HttpClient {
        HttpClient::new(&crate::ClientConfig::new("http://127.0.0.1:9", storage.dir())).unwrap()
    }

    fn session(expires_at: i64) -> AdminSession {
        AdminSession {
            token: "t".to_string(),
            username: "admin".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_restore_live_session() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage
            .save(ADMIN_SESSION_KEY, &session(now_millis() + 60_000))
            .unwrap();

        let console = AdminConsole::restore(&client(&storage), storage.clone()).unwrap();
        assert_eq!(console.session().username, "admin");

        console.logout();
        assert!(!storage.exists(ADMIN_SESSION_KEY));
        assert!(AdminConsole::restore(&client(&storage), storage).is_none());
    }

    #[test]
    fn test_expired_session_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage.save(ADMIN_SESSION_KEY, &session(now_millis() - 1)).unwrap();

        assert!(AdminConsole::restore(&client(&storage), storage.clone()).is_none());
        assert!(!storage.exists(ADMIN_SESSION_KEY));
    }

    #[test]
    fn test_corrupt_session_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path());
        std::fs::write(storage.path(ADMIN_SESSION_KEY), "{").unwrap();

        assert!(AdminConsole::restore(&client(&storage), storage.clone()).is_none());
        assert!(!storage.exists(ADMIN_SESSION_KEY));
    }
}
