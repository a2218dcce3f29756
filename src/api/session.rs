use std::collections::HashMap;
use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::errors::ApiError;
use crate::models::Session;

pub const SESSION_HEADER: &str = "x-session-id";

/// In-process session map. Sessions are created on profile submission and
/// addressed by the uuid echoed back to the client.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session under a fresh id.
    pub async fn create(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, session);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Replace the session under an existing id (profile resubmission and
    /// committed plan transitions).
    pub async fn set(&self, id: Uuid, session: Session) {
        self.inner.write().await.insert(id, session);
    }
}

/// Extracts the `X-Session-Id` header. A missing or malformed header maps to
/// the missing-prerequisite error, same as an unknown session.
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .map(SessionId)
            .ok_or(ApiError::MissingProfile)
    }
}
