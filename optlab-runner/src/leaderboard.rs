//! Cross-family leaderboard: bounded, deduplicated, sorted by a ranking metric.
//!
//! Candidates from every family compete on one scale. Scores are compared at
//! display precision and equal scores keep insertion order, so a sweep fed in
//! family order produces a reproducible board. Deduplication key: family plus
//! description (the same strikes in the same structure).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use optlab_core::ranking::{ratio_key, reward_key};
use optlab_core::{Candidate, StrategyFamily};

/// Which candidate field the board ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    #[default]
    PercentGain,
    RewardRiskRatio,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 2] = [RankingMetric::PercentGain, RankingMetric::RewardRiskRatio];

    /// Score of `candidate` at display precision.
    pub fn score(&self, candidate: &Candidate) -> f64 {
        match self {
            RankingMetric::PercentGain => reward_key(candidate),
            RankingMetric::RewardRiskRatio => ratio_key(candidate),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            RankingMetric::PercentGain => "percent_gain",
            RankingMetric::RewardRiskRatio => "reward_risk_ratio",
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RankingMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "percent_gain" | "reward" | "gain" => Ok(RankingMetric::PercentGain),
            "reward_risk_ratio" | "ratio" => Ok(RankingMetric::RewardRiskRatio),
            other => Err(format!(
                "unknown ranking metric '{other}' (expected percent_gain or reward_risk_ratio)"
            )),
        }
    }
}

/// A single entry in the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub candidate: Candidate,
    pub score: f64,
}

impl LeaderboardEntry {
    pub fn family(&self) -> StrategyFamily {
        self.candidate.family
    }

    fn same_position(&self, other: &Candidate) -> bool {
        self.candidate.family == other.family && self.candidate.description == other.description
    }
}

/// Outcome of an insert operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// New entry added to the leaderboard.
    Inserted,
    /// Replaced an existing entry for the same position (better score).
    Replaced,
    /// Skipped: duplicate with worse or equal score, non-finite score, or no room.
    Skipped,
}

/// Top N candidates across families.
#[derive(Debug, Clone)]
pub struct FamilyLeaderboard {
    entries: Vec<LeaderboardEntry>,
    max_size: usize,
    metric: RankingMetric,
}

impl FamilyLeaderboard {
    pub fn new(max_size: usize, metric: RankingMetric) -> Self {
        Self {
            entries: Vec::with_capacity(max_size.min(1024)),
            max_size,
            metric,
        }
    }

    /// Insert a candidate. Returns the outcome.
    ///
    /// - Rejects non-finite scores.
    /// - Deduplicates by family + description: replaces if better, skips otherwise.
    /// - A new entry goes after every entry with an equal or better score, then
    ///   the board is trimmed to `max_size`.
    pub fn insert(&mut self, candidate: Candidate) -> InsertResult {
        let score = self.metric.score(&candidate);
        if !score.is_finite() {
            return InsertResult::Skipped;
        }

        let mut outcome = InsertResult::Inserted;
        if let Some(idx) = self.entries.iter().position(|e| e.same_position(&candidate)) {
            if score <= self.entries[idx].score {
                return InsertResult::Skipped;
            }
            self.entries.remove(idx);
            outcome = InsertResult::Replaced;
        }

        let at = self.entries.partition_point(|e| e.score >= score);
        if at >= self.max_size {
            return InsertResult::Skipped;
        }
        self.entries.insert(at, LeaderboardEntry { candidate, score });
        self.entries.truncate(self.max_size);
        outcome
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn metric(&self) -> RankingMetric {
        self.metric
    }

    /// Candidates in board order.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.entries.iter().map(|e| e.candidate.clone()).collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
