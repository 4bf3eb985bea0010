use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{CreateSessionRequest, SessionStatus, UpdateSessionStatusRequest};
use crate::routes::{resolve_profile, ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}/status", web::post().to(update_status));
}

/// Schedule a session for a pair
///
/// POST /api/v1/sessions
///
/// Request body:
/// ```json
/// {
///   "user1": "alice",
///   "user2": "kenji",
///   "selectedTimeIndex": 0
/// }
/// ```
async fn create_session(
    state: web::Data<AppState>,
    req: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    let user1 = resolve_profile(&state.store, &req.user1).await?;
    let user2 = resolve_profile(&state.store, &req.user2).await?;

    let session = match state.matcher.schedule(&user1, &user2, req.selected_time_index) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Could not schedule {} <-> {}: {}", user1.id, user2.id, e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Scheduled session {} ({} / {})",
        session.id,
        session.display_times.user1,
        session.display_times.user2
    );

    state.store.put_session(session.clone()).await;

    Ok(HttpResponse::Created().json(session))
}

/// GET /api/v1/sessions/{id}
async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let session = state.store.get_session(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(session))
}

/// Complete or cancel a session
///
/// POST /api/v1/sessions/{id}/status
///
/// Request body:
/// ```json
/// { "status": "completed|cancelled" }
/// ```
async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateSessionStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let status = match req.status.to_lowercase().as_str() {
        "completed" => SessionStatus::Completed,
        "cancelled" | "canceled" => SessionStatus::Cancelled,
        _ => {
            return Err(ApiError::Validation(
                "Status must be one of: completed, cancelled".to_string(),
            ));
        }
    };

    let session = state
        .store
        .set_session_status(&path.into_inner(), status)
        .await?;

    Ok(HttpResponse::Ok().json(session))
}
