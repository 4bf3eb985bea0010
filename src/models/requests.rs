use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{is_valid_user_id, UserProfile};

/// One side of a pairing request.
///
/// Callers either reference a profile already registered with the service by
/// its id, or send the whole profile inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileRef {
    Id(String),
    Inline(UserProfile),
}

/// Request carrying two users to compare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairRequest {
    pub user1: ProfileRef,
    pub user2: ProfileRef,
}

/// Request to register or replace a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 128), custom(function = "validate_user_id"))]
    #[serde(alias = "userId", alias = "user_id")]
    pub id: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub timezone: Option<String>,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

fn validate_user_id(id: &str) -> Result<(), ValidationError> {
    if is_valid_user_id(id) {
        Ok(())
    } else {
        Err(ValidationError::new("user_id_charset"))
    }
}

impl From<UpsertProfileRequest> for UserProfile {
    fn from(req: UpsertProfileRequest) -> Self {
        UserProfile {
            id: req.id,
            timezone: req.timezone,
            country: req.country,
            interests: req.interests,
        }
    }
}

/// Request to rank registered profiles for one user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    10
}

/// Request to schedule a session for a pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub user1: ProfileRef,
    pub user2: ProfileRef,
    #[serde(default, alias = "selected_time_index", rename = "selectedTimeIndex")]
    pub selected_time_index: Option<usize>,
}

/// Request to move a session through its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSessionStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}
