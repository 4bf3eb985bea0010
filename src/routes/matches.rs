use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse, PairRequest, SuggestTimesResponse};
use crate::routes::{resolve_profile, ApiError, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_pair))
        .route("/matches/suggest-times", web::post().to(suggest_times))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let stats = state.store.stats();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        profiles: stats.profiles,
        sessions: stats.sessions,
        timestamp: chrono::Utc::now(),
    })
}

/// Score a pair of users
///
/// POST /api/v1/matches/score
///
/// Request body (each side is a stored id or an inline profile):
/// ```json
/// {
///   "user1": "alice",
///   "user2": { "id": "kenji", "timezone": "JST", "country": "Japan" }
/// }
/// ```
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<PairRequest>,
) -> Result<HttpResponse, ApiError> {
    let user1 = resolve_profile(&state.store, &req.user1).await?;
    let user2 = resolve_profile(&state.store, &req.user2).await?;

    let proposal = state.matcher.propose(&user1, &user2);

    tracing::info!(
        "Scored {} <-> {}: overall {:.3}, {} meeting time(s)",
        user1.id,
        user2.id,
        proposal.score.overall,
        proposal.suggested_meeting_times.len()
    );

    Ok(HttpResponse::Ok().json(proposal))
}

/// Suggest meeting times for a pair of users
///
/// POST /api/v1/matches/suggest-times
///
/// An empty list means no time can be proposed (a timezone is missing).
async fn suggest_times(
    state: web::Data<AppState>,
    req: web::Json<PairRequest>,
) -> Result<HttpResponse, ApiError> {
    let user1 = resolve_profile(&state.store, &req.user1).await?;
    let user2 = resolve_profile(&state.store, &req.user2).await?;

    let candidates = state.matcher.scheduler().suggest_times(&user1, &user2);

    Ok(HttpResponse::Ok().json(SuggestTimesResponse {
        count: candidates.len(),
        candidates,
    }))
}

/// Rank registered users for one user
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 10
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return Err(errors.into());
    }

    let profile = state.store.get_profile(&req.user_id).await?;
    let candidates = state.store.list_profiles();

    let result = state
        .matcher
        .find_matches(&profile, candidates, req.limit as usize);

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        result.matches.len(),
        profile.id,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    }))
}
