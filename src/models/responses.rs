use serde::{Deserialize, Serialize};
use crate::core::culture::TimeFormat;
use crate::models::domain::{MeetingTimeCandidate, RankedMatch, UserProfile};

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<RankedMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the suggest times endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestTimesResponse {
    pub candidates: Vec<MeetingTimeCandidate>,
    pub count: usize,
}

/// Stored profile with its resolved timezone data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    #[serde(rename = "offsetHours")]
    pub offset_hours: Option<f64>,
    #[serde(rename = "countryTimezone")]
    pub country_timezone: Option<String>,
}

/// Culture entry for one country, as shown to users before they meet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CultureResponse {
    pub country: String,
    pub greeting: String,
    #[serde(rename = "timeFormat")]
    pub time_format: TimeFormat,
    pub topics: Vec<String>,
    /// Primary timezone code for the country, `UTC` when unknown
    pub timezone: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub profiles: u64,
    pub sessions: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
