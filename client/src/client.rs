use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serbisyo_core::endpoints::auth::{Login, LoginResponse};
use serbisyo_core::endpoints::customers::ListCustomers;
use serbisyo_core::endpoints::notifications::UserNotifications;
use serbisyo_core::endpoints::providers::ListProviders;
use serbisyo_core::reconcile;
use serbisyo_core::types::UserSummary;
use serbisyo_core::{ApiClient, ApiError, ClientConfig, Endpoint};
use tokio::sync::RwLock;

use crate::transport;

/// Async SerbisYo client holding the session token.
#[derive(Debug, Clone)]
pub struct SerbisYoClient {
    api: ApiClient,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl SerbisYoClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            api: ApiClient::new(config),
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Client configured from `SERBISYO_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Replace the session token, e.g. one restored from secure storage.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.token
            .read()
            .await
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    /// Build, send and parse one endpoint call.
    ///
    /// A missing token for an authenticated endpoint fails before any I/O.
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output, ApiError> {
        let token = self.token.read().await.clone();
        let request = self.api.build(endpoint, token.as_deref())?;
        let response = transport::execute(&self.http, request).await?;
        let result = self.api.parse(endpoint, response);
        if let Err(err) = &result {
            tracing::debug!(path = %endpoint.path(), error = %err, "call failed");
        }
        result
    }

    /// Like `send`, but resolves to `ApiError::Cancelled` as soon as `cancel`
    /// completes. The in-flight request is dropped.
    pub async fn send_until<E, C>(&self, endpoint: &E, cancel: C) -> Result<E::Output, ApiError>
    where
        E: Endpoint,
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.send(endpoint) => result,
            () = cancel => {
                tracing::debug!(path = %endpoint.path(), "call cancelled");
                Err(ApiError::Cancelled)
            }
        }
    }

    /// Like `send`, bounded by `deadline` on top of the configured timeouts.
    pub async fn send_with_deadline<E: Endpoint>(
        &self,
        endpoint: &E,
        deadline: Duration,
    ) -> Result<E::Output, ApiError> {
        tokio::time::timeout(deadline, self.send(endpoint))
            .await
            .map_err(|_| ApiError::Timeout)?
    }

    /// Log in and keep the returned token for later calls.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let session = self
            .send(&Login {
                user_name: user_name.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.set_token(session.token.clone()).await;
        tracing::info!(user_id = ?session.user_id, role = ?session.role, "logged in");
        Ok(session)
    }

    pub async fn logout(&self) {
        self.token.write().await.take();
    }

    /// Directory search for starting a conversation. Fetches customers and
    /// providers concurrently.
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        let (customers, providers) =
            tokio::try_join!(self.send(&ListCustomers), self.send(&ListProviders))?;
        Ok(reconcile::search_users(&customers, &providers, query))
    }

    /// Notification badge count for `user_id`, one per message thread.
    pub async fn unread_count(&self, user_id: i64) -> Result<usize, ApiError> {
        let notifications = self.send(&UserNotifications { user_id }).await?;
        Ok(reconcile::unread_count(&notifications))
    }
}
