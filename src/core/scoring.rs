use std::sync::Arc;
use crate::models::{CompatibilityResult, ScoringWeights, UserProfile};
use crate::core::{
    culture::{cultural_compatibility, CulturalMatch, CultureTable},
    timezone::{working_hours_overlap, MAX_OVERLAP_HOURS},
};

/// Combine the two components into one score (0-1)
///
/// Scoring formula:
/// score = (
///     (overlap_hours / 8) * 0.7 +   # Scheduling feasibility
///     cultural_score * 0.3          # Topical affinity
/// )
#[inline]
pub fn calculate_overall_score(
    timezone_overlap_hours: f64,
    cultural_score: f64,
    weights: &ScoringWeights,
) -> f64 {
    let total = weights.timezone * (timezone_overlap_hours / MAX_OVERLAP_HOURS)
        + weights.cultural * cultural_score;

    total.clamp(0.0, 1.0)
}

/// Pure scorer turning two profiles into a `CompatibilityResult`.
///
/// Holds no mutable state; repeated calls with the same inputs return
/// identical results.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
    cultures: Arc<CultureTable>,
}

impl CompatibilityScorer {
    pub fn new(weights: ScoringWeights, cultures: CultureTable) -> Self {
        Self {
            weights,
            cultures: Arc::new(cultures),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), CultureTable::builtin())
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn cultures(&self) -> &CultureTable {
        &self.cultures
    }

    pub fn working_hours_overlap(&self, profile1: &UserProfile, profile2: &UserProfile) -> f64 {
        working_hours_overlap(profile1, profile2)
    }

    pub fn cultural_compatibility(&self, profile1: &UserProfile, profile2: &UserProfile) -> CulturalMatch {
        cultural_compatibility(&self.cultures, profile1, profile2)
    }

    pub fn score(&self, profile1: &UserProfile, profile2: &UserProfile) -> CompatibilityResult {
        let overlap = self.working_hours_overlap(profile1, profile2);
        let CulturalMatch { score: cultural, common_topics } =
            self.cultural_compatibility(profile1, profile2);

        let overall = calculate_overall_score(overlap, cultural, &self.weights);

        tracing::trace!(
            "Scored {} <-> {}: overlap={}h cultural={} overall={}",
            profile1.id,
            profile2.id,
            overlap,
            cultural,
            overall
        );

        CompatibilityResult {
            timezone_overlap_hours: overlap,
            cultural_score: cultural,
            overall_score: overall,
            common_topics,
        }
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
