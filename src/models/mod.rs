// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompatibilityResult, DisplayTimes, MatchProposal, MeetingTimeCandidate, RankedMatch,
    ScoreBreakdown, ScoringWeights, Session, SessionStatus, UserProfile,
};
pub use domain::is_valid_user_id;
pub use requests::{
    CreateSessionRequest, FindMatchesRequest, PairRequest, ProfileRef, UpdateSessionStatusRequest,
    UpsertProfileRequest,
};
pub use responses::{
    CultureResponse, ErrorResponse, FindMatchesResponse, HealthResponse, ProfileResponse, SuggestTimesResponse,
};
