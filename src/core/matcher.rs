use std::collections::HashSet;
use crate::models::{MatchProposal, RankedMatch, ScoreBreakdown, ScoringWeights, Session, UserProfile};
use crate::core::{
    culture::CultureTable,
    scheduler::{conversation_starters, SchedulingError, SessionScheduler},
    scoring::CompatibilityScorer,
    timezone::{hour_difference, MAX_OVERLAP_HOURS},
};

/// Result of ranking a pool of candidates
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
}

/// Entry point for the bot layer: scores pairs, ranks candidate pools and
/// turns a chosen pair into a session
///
/// # Pipeline
/// 1. Compatibility scoring (timezone overlap + cultural overlap)
/// 2. Meeting-time suggestion
/// 3. Candidate selection and session materialization
#[derive(Debug, Clone)]
pub struct Matcher {
    scorer: CompatibilityScorer,
    scheduler: SessionScheduler,
}

impl Matcher {
    pub fn new(scorer: CompatibilityScorer, scheduler: SessionScheduler) -> Self {
        Self { scorer, scheduler }
    }

    pub fn with_default_weights() -> Self {
        Self::new(
            CompatibilityScorer::new(ScoringWeights::default(), CultureTable::builtin()),
            SessionScheduler::default(),
        )
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    pub fn scheduler(&self) -> &SessionScheduler {
        &self.scheduler
    }

    /// Score a pair and gather everything needed to introduce them
    pub fn propose(&self, profile1: &UserProfile, profile2: &UserProfile) -> MatchProposal {
        let result = self.scorer.score(profile1, profile2);
        let suggested_meeting_times = self.scheduler.suggest_times(profile1, profile2);

        let hour_difference = match (profile1.timezone(), profile2.timezone()) {
            (Some(tz1), Some(tz2)) => Some(hour_difference(tz1, tz2)),
            _ => None,
        };

        MatchProposal {
            users: [profile1.id.clone(), profile2.id.clone()],
            score: ScoreBreakdown {
                overall: result.overall_score,
                timezone: result.timezone_overlap_hours / MAX_OVERLAP_HOURS,
                cultural: result.cultural_score,
            },
            timezone_overlap_hours: result.timezone_overlap_hours,
            hour_difference,
            conversation_starters: conversation_starters(&result.common_topics),
            common_topics: result.common_topics,
            suggested_meeting_times,
        }
    }

    /// Propose, pick a meeting time and build the session for a pair
    ///
    /// # Arguments
    /// * `selected_time_index` - Index into the suggested times, first when `None`
    pub fn schedule(
        &self,
        profile1: &UserProfile,
        profile2: &UserProfile,
        selected_time_index: Option<usize>,
    ) -> Result<Session, SchedulingError> {
        let proposal = self.propose(profile1, profile2);
        let candidate = self
            .scheduler
            .select_candidate(&proposal.suggested_meeting_times, selected_time_index)?;

        self.scheduler.build_session(
            candidate,
            &proposal.users,
            &proposal.common_topics,
            [profile1.timezone(), profile2.timezone()],
        )
    }

    /// Rank candidates for a user by overall compatibility
    ///
    /// # Arguments
    /// * `profile` - The user looking for a partner
    /// * `candidates` - Potential partners; the user itself and repeated ids are skipped
    /// * `limit` - Maximum number of matches to return
    pub fn find_matches(
        &self,
        profile: &UserProfile,
        candidates: Vec<UserProfile>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();
        let mut seen = HashSet::new();

        let mut matches: Vec<RankedMatch> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != profile.id)
            .filter(|candidate| seen.insert(candidate.id.clone()))
            .map(|candidate| {
                let result = self.scorer.score(profile, &candidate);
                RankedMatch {
                    user_id: candidate.id,
                    overall_score: result.overall_score,
                    timezone_overlap_hours: result.timezone_overlap_hours,
                    cultural_score: result.cultural_score,
                    common_topics: result.common_topics,
                }
            })
            .collect();

        // Sort by score (descending), then overlap (descending), then id
        matches.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.timezone_overlap_hours
                        .partial_cmp(&a.timezone_overlap_hours)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        matches.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} candidates for {}",
            matches.len(),
            total_candidates,
            profile.id
        );

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(id: &str, timezone: &str, country: &str) -> UserProfile {
        UserProfile::new(id).with_timezone(timezone).with_country(country)
    }

    #[test]
    fn test_propose_same_zone() {
        let matcher = Matcher::with_default_weights();
        let proposal = matcher.propose(
            &create_candidate("a", "JST", "Japan"),
            &create_candidate("b", "JST", "India"),
        );

        assert_eq!(proposal.users, ["a".to_string(), "b".to_string()]);
        assert_eq!(proposal.score.timezone, 1.0);
        assert_eq!(proposal.score.cultural, 0.4);
        assert_eq!(proposal.hour_difference, Some(0.0));
        assert_eq!(proposal.common_topics, vec!["technology", "food"]);
        assert_eq!(proposal.suggested_meeting_times.len(), 1);
        assert_eq!(proposal.conversation_starters.len(), 3);
    }

    #[test]
    fn test_propose_without_timezone() {
        let matcher = Matcher::with_default_weights();
        let proposal = matcher.propose(&UserProfile::new("a").with_country("UK"), &create_candidate("b", "GMT", "UK"));

        assert_eq!(proposal.hour_difference, None);
        assert!(proposal.suggested_meeting_times.is_empty());
        assert_eq!(proposal.score.cultural, 1.0);
    }

    #[test]
    fn test_schedule_picks_selected_time() {
        let matcher = Matcher::with_default_weights();
        let a = create_candidate("a", "UTC", "UK");
        let b = create_candidate("b", "JST", "Japan");

        let session = matcher.schedule(&a, &b, Some(1)).unwrap();
        assert_eq!(session.chosen_time.utc_hour, 9.0);
        assert_eq!(session.display_times.user1, "9:00 AM UTC");
        assert_eq!(session.display_times.user2, "12:00 AM JST");
        // travel is the only shared topic
        assert_eq!(
            session.conversation_starters[0],
            "What's one place in your country that you'd recommend visiting?"
        );
    }

    #[test]
    fn test_schedule_without_timezone_fails() {
        let matcher = Matcher::with_default_weights();
        let result = matcher.schedule(&UserProfile::new("a"), &create_candidate("b", "UTC", "UK"), None);
        assert_eq!(result.unwrap_err(), SchedulingError::NoCompatibleTime);
    }

    #[test]
    fn test_find_matches_ranked() {
        let matcher = Matcher::with_default_weights();
        let me = create_candidate("me", "EST", "US");

        let candidates = vec![
            create_candidate("far", "JST", "Japan"),     // no overlap
            create_candidate("near", "CST", "US"),       // 7h overlap, same culture
            create_candidate("mid", "PST", "India"),     // 5h overlap
            create_candidate("me", "EST", "US"),         // self
            create_candidate("near", "CST", "US"),       // duplicate
        ];

        let result = matcher.find_matches(&me, candidates, 10);

        assert_eq!(result.total_candidates, 5);
        let ids: Vec<&str> = result.matches.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_find_matches_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let me = create_candidate("me", "UTC", "UK");

        let candidates: Vec<UserProfile> = (0..20)
            .map(|i| create_candidate(&format!("user{}", i), "CET", "Brazil"))
            .collect();

        let result = matcher.find_matches(&me, candidates, 5);
        assert_eq!(result.matches.len(), 5);
        // equal scores fall back to id order
        assert_eq!(result.matches[0].user_id, "user0");
        assert_eq!(result.matches[1].user_id, "user1");
    }
}
