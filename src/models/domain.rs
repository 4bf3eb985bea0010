use serde::{Deserialize, Serialize};

/// A chat user as resolved by the upstream bot or webhook layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "userId", alias = "user_id")]
    pub id: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timezone: None,
            country: None,
            interests: Vec::new(),
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Timezone code, treating blank input as missing
    pub fn timezone(&self) -> Option<&str> {
        non_blank(self.timezone.as_deref())
    }

    /// Country key, treating blank input as missing
    pub fn country(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// User ids end up in session ids and URL paths, so they are limited to
/// ASCII letters, digits, `-`, `_` and `.`
pub fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Weights used to combine the timezone and cultural components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub timezone: f64,
    pub cultural: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            timezone: 0.7,
            cultural: 0.3,
        }
    }
}

/// Compatibility between two profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    #[serde(rename = "timezoneOverlapHours")]
    pub timezone_overlap_hours: f64,
    #[serde(rename = "culturalScore")]
    pub cultural_score: f64,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
    #[serde(rename = "commonTopics")]
    pub common_topics: Vec<String>,
}

/// A proposed meeting instant and its wall-clock hour for each participant.
///
/// Hours are fractional only when a half-hour offset (e.g. IST) is involved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeetingTimeCandidate {
    #[serde(rename = "utcHour")]
    pub utc_hour: f64,
    #[serde(rename = "localHourForUser1")]
    pub local_hour_user1: f64,
    #[serde(rename = "localHourForUser2")]
    pub local_hour_user2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Completed and cancelled sessions accept no further transitions
    pub fn is_final(self) -> bool {
        !matches!(self, SessionStatus::Scheduled)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Local meeting time rendered for each participant, e.g. "1:00 PM EST"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTimes {
    pub user1: String,
    pub user2: String,
}

/// A finalized meetup between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(rename = "participantIds")]
    pub participant_ids: [String; 2],
    #[serde(rename = "chosenTime")]
    pub chosen_time: MeetingTimeCandidate,
    #[serde(rename = "meetingLink")]
    pub meeting_link: String,
    #[serde(rename = "conversationStarters")]
    pub conversation_starters: Vec<String>,
    #[serde(rename = "displayTimes")]
    pub display_times: DisplayTimes,
    pub status: SessionStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Normalized score components of a match proposal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: f64,
    pub timezone: f64,
    pub cultural: f64,
}

/// Everything needed to present a pair of users to each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchProposal {
    pub users: [String; 2],
    pub score: ScoreBreakdown,
    #[serde(rename = "timezoneOverlapHours")]
    pub timezone_overlap_hours: f64,
    #[serde(rename = "hourDifference")]
    pub hour_difference: Option<f64>,
    #[serde(rename = "commonTopics")]
    pub common_topics: Vec<String>,
    #[serde(rename = "conversationStarters")]
    pub conversation_starters: Vec<String>,
    #[serde(rename = "suggestedMeetingTimes")]
    pub suggested_meeting_times: Vec<MeetingTimeCandidate>,
}

/// A candidate partner ranked for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
    #[serde(rename = "timezoneOverlapHours")]
    pub timezone_overlap_hours: f64,
    #[serde(rename = "culturalScore")]
    pub cultural_score: f64,
    #[serde(rename = "commonTopics")]
    pub common_topics: Vec<String>,
}
