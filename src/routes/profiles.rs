use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::timezone::{country_timezone, profile_offset};
use crate::models::{ProfileResponse, UpsertProfileRequest, UserProfile};
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles", web::put().to(upsert_profile))
        .route("/profiles/{id}", web::get().to(get_profile));
}

fn profile_response(profile: UserProfile) -> ProfileResponse {
    ProfileResponse {
        offset_hours: profile_offset(&profile),
        country_timezone: profile.country().map(|c| country_timezone(c).to_string()),
        profile,
    }
}

/// Register or replace a profile
///
/// PUT /api/v1/profiles
async fn upsert_profile(
    state: web::Data<AppState>,
    req: web::Json<UpsertProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let profile = UserProfile::from(req.into_inner());
    tracing::info!(
        "Registering profile {} (timezone: {:?}, country: {:?})",
        profile.id,
        profile.timezone(),
        profile.country()
    );

    state.store.put_profile(profile.clone()).await;

    Ok(HttpResponse::Ok().json(profile_response(profile)))
}

/// GET /api/v1/profiles/{id}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let profile = state.store.get_profile(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile_response(profile)))
}
