//! PingPair - compatibility scoring and meetup scheduling for a cross-cultural chat bot
//!
//! The `core` module pairs two user profiles: it scores how well their workdays
//! and cultures line up, proposes meeting times in each user's local clock, and
//! turns a chosen time into a session. It is pure and holds no state. The
//! `routes` and `services` modules wrap it in a small HTTP service with an
//! in-memory store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CompatibilityScorer, CultureTable, Matcher, SchedulingError, SessionScheduler};
pub use models::{CompatibilityResult, MatchProposal, MeetingTimeCandidate, ScoringWeights, Session, UserProfile};

/// Score two profiles with the default weights and culture table
pub fn score(profile1: &UserProfile, profile2: &UserProfile) -> CompatibilityResult {
    CompatibilityScorer::with_default_weights().score(profile1, profile2)
}

/// Suggest meeting times for two profiles; empty when either lacks a timezone
pub fn suggest_times(profile1: &UserProfile, profile2: &UserProfile) -> Vec<MeetingTimeCandidate> {
    crate::core::suggest_meeting_times(profile1, profile2)
}

/// Build a session from a chosen candidate with the default meeting link base
pub fn build_session(
    candidate: &MeetingTimeCandidate,
    participant_ids: &[String],
    common_topics: Option<&[String]>,
) -> Result<Session, SchedulingError> {
    SessionScheduler::default().build_session(
        candidate,
        participant_ids,
        common_topics.unwrap_or_default(),
        [None, None],
    )
}
