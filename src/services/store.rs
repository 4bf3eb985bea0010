use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use moka::{Entry, Expiry};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use crate::models::{Session, SessionStatus, UserProfile};

/// Errors that can occur with store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: session {id} is already {status}")]
    InvalidTransition { id: String, status: SessionStatus },
}

/// Sessions live for a fixed time from creation; status changes do not
/// extend it
struct SessionExpiry {
    ttl: Duration,
}

impl Expiry<String, Session> for SessionExpiry {
    fn expire_after_create(&self, _key: &String, _value: &Session, _created_at: Instant) -> Option<Duration> {
        Some(self.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        _value: &Session,
        _updated_at: Instant,
        duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        duration_until_expiry
    }
}

/// Transient in-memory store for the bot layer
///
/// Profiles are bounded by capacity only. Sessions additionally expire after
/// the configured TTL. Nothing survives a restart.
pub struct MemoryStore {
    profiles: Cache<String, UserProfile>,
    sessions: Cache<String, Session>,
}

impl MemoryStore {
    /// Create a new store
    pub fn new(capacity: u64, session_ttl_secs: u64) -> Self {
        let profiles = Cache::builder().max_capacity(capacity).build();

        let sessions = Cache::builder()
            .max_capacity(capacity)
            .expire_after(SessionExpiry {
                ttl: Duration::from_secs(session_ttl_secs),
            })
            .build();

        Self { profiles, sessions }
    }

    /// Insert or replace a profile
    pub async fn put_profile(&self, profile: UserProfile) {
        tracing::trace!("Store profile: {}", profile.id);
        self.profiles.insert(profile.id.clone(), profile).await;
    }

    pub async fn get_profile(&self, id: &str) -> Result<UserProfile, StoreError> {
        self.profiles
            .get(id)
            .await
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", id)))
    }

    /// All stored profiles, ordered by id
    pub fn list_profiles(&self) -> Vec<UserProfile> {
        let mut profiles: Vec<UserProfile> = self.profiles.iter().map(|(_, p)| p).collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }

    pub async fn put_session(&self, session: Session) {
        tracing::trace!("Store session: {}", session.id);
        self.sessions.insert(session.id.clone(), session).await;
    }

    pub async fn get_session(&self, id: &str) -> Result<Session, StoreError> {
        self.sessions
            .get(id)
            .await
            .ok_or_else(|| StoreError::NotFound(format!("session {}", id)))
    }

    /// Move a scheduled session to a new status
    ///
    /// The final-status check and the update are one atomic step on the cache
    /// entry. An expired session is never written back.
    pub async fn set_session_status(
        &self,
        id: &str,
        status: SessionStatus,
    ) -> Result<Session, StoreError> {
        let result = self
            .sessions
            .entry_by_ref(id)
            .and_compute_with(|entry| {
                let op = match entry.map(Entry::into_value) {
                    Some(mut session) if !session.status.is_final() => {
                        session.status = status;
                        Op::Put(session)
                    }
                    _ => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;

        match result {
            CompResult::ReplacedWith(entry) | CompResult::Inserted(entry) => {
                tracing::debug!("Session {} is now {}", id, status);
                Ok(entry.into_value())
            }
            CompResult::Unchanged(entry) => Err(StoreError::InvalidTransition {
                id: id.to_string(),
                status: entry.value().status,
            }),
            CompResult::StillNone(_) | CompResult::Removed(_) => {
                Err(StoreError::NotFound(format!("session {}", id)))
            }
        }
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            profiles: self.profiles.entry_count(),
            sessions: self.sessions.entry_count(),
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub profiles: u64,
    pub sessions: u64,
}
