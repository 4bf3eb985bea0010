// Core algorithm exports
pub mod culture;
pub mod matcher;
pub mod scheduler;
pub mod scoring;
pub mod timezone;

pub use culture::{cultural_compatibility, CulturalMatch, CultureInfo, CultureTable, TimeFormat};
pub use matcher::{MatchResult, Matcher};
pub use scheduler::{conversation_starters, format_local_time, suggest_meeting_times, SchedulingError, SessionScheduler};
pub use scoring::{calculate_overall_score, CompatibilityScorer};
pub use timezone::{country_timezone, hour_difference, timezone_offset_hours, working_hours_overlap, WorkdayWindow};
