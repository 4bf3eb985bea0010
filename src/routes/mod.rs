// Route exports
pub mod cultures;
pub mod error;
pub mod matches;
pub mod profiles;
pub mod sessions;

use actix_web::web;
use std::sync::Arc;
use crate::core::Matcher;
use crate::models::{is_valid_user_id, ProfileRef, UserProfile};
use crate::services::MemoryStore;

pub use error::{handle_json_payload_error, handle_query_payload_error, ApiError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(cultures::configure)
            .configure(profiles::configure)
            .configure(sessions::configure),
    );
}

/// Turn either wire shape of a user into a profile
pub(crate) async fn resolve_profile(
    store: &MemoryStore,
    profile: &ProfileRef,
) -> Result<UserProfile, ApiError> {
    match profile {
        ProfileRef::Id(id) => {
            let id = checked_user_id(id)?;
            Ok(store.get_profile(id).await?)
        }
        ProfileRef::Inline(profile) => {
            let id = checked_user_id(&profile.id)?;
            Ok(UserProfile {
                id: id.to_string(),
                ..profile.clone()
            })
        }
    }
}

fn checked_user_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::Validation("user id must not be empty".to_string()));
    }
    if !is_valid_user_id(id) {
        return Err(ApiError::Validation(format!(
            "user id {:?} may only contain letters, digits, '-', '_' and '.'",
            id
        )));
    }
    Ok(id)
}
