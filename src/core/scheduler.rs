use chrono::{NaiveTime, Utc};
use thiserror::Error;
use uuid::Uuid;
use crate::models::{is_valid_user_id, DisplayTimes, MeetingTimeCandidate, Session, SessionStatus, UserProfile};
use crate::core::timezone::{profile_offset, WorkdayWindow, WORKDAY_START_HOUR};

/// Default base URL for generated meeting links
pub const DEFAULT_MEETING_LINK_BASE: &str = "https://meet.pingpair.com";

/// Minimum number of conversation starters attached to a session
pub const MIN_CONVERSATION_STARTERS: usize = 3;

/// Maximum number of conversation starters attached to a session
pub const MAX_CONVERSATION_STARTERS: usize = 4;

/// Label used when a participant has no timezone
const DEFAULT_TIMEZONE_LABEL: &str = "UTC";

const TOPIC_STARTERS: &[(&str, &str)] = &[
    ("technology", "What's your favorite tech gadget you've used recently?"),
    ("food", "What's a traditional dish from your country that you'd recommend trying?"),
    ("travel", "What's one place in your country that you'd recommend visiting?"),
    ("sports", "What sports are popular in your country?"),
];

const GENERIC_STARTERS: &[&str] = &[
    "How does your typical workday differ from others around the world?",
    "What's something about your culture that you wish more people knew about?",
    "What holidays or festivals are most important in your culture?",
];

/// Errors raised when a session cannot be scheduled
#[derive(Debug, Error, PartialEq)]
pub enum SchedulingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No suitable meeting time available")]
    NoCompatibleTime,
}

/// Wrap an hour onto the 24-hour clock
#[inline]
fn hour_of_day(hour: f64) -> f64 {
    hour.rem_euclid(24.0)
}

/// Propose meeting times for two users
///
/// 1. Either timezone missing: no candidates
/// 2. Workdays overlap: one candidate at the (floored) midpoint of the overlap
/// 3. No overlap: two compromise candidates, user2's 9am and user1's 9am
pub fn suggest_meeting_times(profile1: &UserProfile, profile2: &UserProfile) -> Vec<MeetingTimeCandidate> {
    let (Some(offset1), Some(offset2)) = (profile_offset(profile1), profile_offset(profile2)) else {
        tracing::debug!(
            "Cannot suggest times for {} <-> {}: missing timezone",
            profile1.id,
            profile2.id
        );
        return Vec::new();
    };

    let window1 = WorkdayWindow::for_offset(offset1);
    let window2 = WorkdayWindow::for_offset(offset2);
    let (overlap_start, overlap_end) = window1.intersection(&window2);

    if overlap_start < overlap_end {
        let midpoint = ((overlap_start + overlap_end) / 2.0).floor();

        vec![MeetingTimeCandidate {
            utc_hour: hour_of_day(midpoint),
            local_hour_user1: hour_of_day(midpoint - offset1),
            local_hour_user2: hour_of_day(midpoint - offset2),
        }]
    } else {
        vec![
            // user1 shifts to user2's morning
            MeetingTimeCandidate {
                utc_hour: hour_of_day(window2.start),
                local_hour_user1: hour_of_day(window2.start - offset1),
                local_hour_user2: WORKDAY_START_HOUR,
            },
            // user2 shifts to user1's morning
            MeetingTimeCandidate {
                utc_hour: hour_of_day(window1.start),
                local_hour_user1: WORKDAY_START_HOUR,
                local_hour_user2: hour_of_day(window1.start - offset2),
            },
        ]
    }
}

/// Prompts derived from shared topics, padded with generic ones up to the
/// minimum
pub fn conversation_starters(common_topics: &[String]) -> Vec<String> {
    let mut starters: Vec<String> = common_topics
        .iter()
        .filter_map(|topic| {
            TOPIC_STARTERS
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(topic))
                .map(|(_, prompt)| prompt.to_string())
        })
        .take(MAX_CONVERSATION_STARTERS)
        .collect();

    for prompt in GENERIC_STARTERS {
        if starters.len() >= MIN_CONVERSATION_STARTERS {
            break;
        }
        starters.push(prompt.to_string());
    }

    starters
}

/// Render a local hour as a 12-hour clock string, e.g. `9:30 AM IST`
pub fn format_local_time(hour: f64, timezone_label: &str) -> String {
    let minutes = (hour_of_day(hour) * 60.0).round() as u32 % (24 * 60);

    match NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0) {
        Some(time) => format!("{} {}", time.format("%-I:%M %p"), timezone_label),
        None => format!("{:02}:{:02} {}", minutes / 60, minutes % 60, timezone_label),
    }
}

/// Turns compatibility data into concrete, schedulable sessions
#[derive(Debug, Clone)]
pub struct SessionScheduler {
    meeting_link_base: String,
}

impl SessionScheduler {
    pub fn new(meeting_link_base: impl Into<String>) -> Self {
        Self {
            meeting_link_base: meeting_link_base.into(),
        }
    }

    pub fn meeting_link_base(&self) -> &str {
        &self.meeting_link_base
    }

    pub fn suggest_times(&self, profile1: &UserProfile, profile2: &UserProfile) -> Vec<MeetingTimeCandidate> {
        suggest_meeting_times(profile1, profile2)
    }

    /// Pick the requested candidate, or the first one when no index is given
    pub fn select_candidate<'a>(
        &self,
        candidates: &'a [MeetingTimeCandidate],
        index: Option<usize>,
    ) -> Result<&'a MeetingTimeCandidate, SchedulingError> {
        if candidates.is_empty() {
            return Err(SchedulingError::NoCompatibleTime);
        }

        let index = index.unwrap_or(0);
        candidates.get(index).ok_or_else(|| {
            SchedulingError::InvalidInput(format!(
                "selected time index {} out of range ({} candidates)",
                index,
                candidates.len()
            ))
        })
    }

    /// Materialize a session from a chosen candidate
    ///
    /// # Arguments
    /// * `candidate` - The meeting time both users agreed on
    /// * `participant_ids` - Exactly two distinct user ids
    /// * `common_topics` - Shared topics used for conversation starters
    /// * `timezone_labels` - Each participant's timezone for display, `UTC` if absent
    pub fn build_session(
        &self,
        candidate: &MeetingTimeCandidate,
        participant_ids: &[String],
        common_topics: &[String],
        timezone_labels: [Option<&str>; 2],
    ) -> Result<Session, SchedulingError> {
        let [user1, user2] = participant_ids else {
            return Err(SchedulingError::InvalidInput(format!(
                "a session needs exactly two participants, got {}",
                participant_ids.len()
            )));
        };

        let user1 = user1.trim();
        let user2 = user2.trim();
        if user1.is_empty() || user2.is_empty() {
            return Err(SchedulingError::InvalidInput(
                "participant ids must not be empty".to_string(),
            ));
        }
        if let Some(bad) = [user1, user2].into_iter().find(|id| !is_valid_user_id(id)) {
            return Err(SchedulingError::InvalidInput(format!(
                "participant id {:?} may only contain letters, digits, '-', '_' and '.'",
                bad
            )));
        }
        if user1 == user2 {
            return Err(SchedulingError::InvalidInput(format!(
                "cannot schedule {} with themselves",
                user1
            )));
        }

        let created_at = Utc::now();
        let id = format!("session_{}_{}_{}", created_at.timestamp_millis(), user1, user2);

        let label = |l: Option<&str>| {
            l.map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_TIMEZONE_LABEL)
                .to_string()
        };
        let display_times = DisplayTimes {
            user1: format_local_time(candidate.local_hour_user1, &label(timezone_labels[0])),
            user2: format_local_time(candidate.local_hour_user2, &label(timezone_labels[1])),
        };

        let session = Session {
            id,
            participant_ids: [user1.to_string(), user2.to_string()],
            chosen_time: *candidate,
            meeting_link: self.meeting_link(),
            conversation_starters: conversation_starters(common_topics),
            display_times,
            status: SessionStatus::Scheduled,
            created_at,
        };

        tracing::debug!("Built session {} at UTC hour {}", session.id, candidate.utc_hour);
        Ok(session)
    }

    fn meeting_link(&self) -> String {
        format!(
            "{}/{}",
            self.meeting_link_base.trim_end_matches('/'),
            Uuid::new_v4().simple()
        )
    }
}

impl Default for SessionScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MEETING_LINK_BASE)
    }
}
