use actix_web::{web, HttpResponse};
use crate::core::timezone::country_timezone;
use crate::models::CultureResponse;
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/cultures/{country}", web::get().to(get_culture));
}

/// Greeting, clock preference and topics for a country
///
/// GET /api/v1/cultures/{country}
async fn get_culture(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let country = path.into_inner();
    let culture = state
        .matcher
        .scorer()
        .cultures()
        .get(&country)
        .ok_or_else(|| ApiError::NotFound(format!("culture for {}", country)))?;

    Ok(HttpResponse::Ok().json(CultureResponse {
        greeting: culture.greeting.clone(),
        time_format: culture.time_format,
        topics: culture.topics.clone(),
        timezone: country_timezone(&country).to_string(),
        country,
    }))
}
