//! Wire types for rendering ranking and grading reports.
//!
//! The engine's output is read-only derived data; these are the JSON
//! shapes the serving layer publishes, with the documented field names.

use std::collections::BTreeMap;

use algoarena_core::{GradeEntry, GroupEntry, GroupId, InputId, ScoreTuple};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsResponse {
    pub status: String,
    pub groups: Vec<GroupRankings>,
}

impl RankingsResponse {
    #[must_use]
    pub fn success(groups: Vec<GroupRankings>) -> Self {
        Self {
            status: "success".to_string(),
            groups,
        }
    }
}

/// One row of the rankings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRankings {
    pub group_name: String,
    pub reject_count: u32,
    pub sum_of_ranks: u64,
    pub penalties: u32,
    pub score: u64,
    pub place: u32,
    pub input_ranks: Vec<InputRank>,
}

impl GroupRankings {
    /// Flatten a ranking entry. `owners` maps each input to the id of the
    /// group that contributed it, which is how input columns are keyed in
    /// the wire format; unmapped inputs fall back to the raw input id.
    #[must_use]
    pub fn from_entry(
        group_name: impl Into<String>,
        entry: &GroupEntry,
        owners: &BTreeMap<InputId, GroupId>,
    ) -> Self {
        Self {
            group_name: group_name.into(),
            reject_count: entry.reject_count,
            sum_of_ranks: entry.sum_of_ranks,
            penalties: entry.penalties,
            score: entry.score(),
            place: entry.place,
            input_ranks: entry
                .input_ranks
                .iter()
                .map(|(input, tuple)| InputRank::from_tuple(*input, tuple, owners))
                .collect(),
        }
    }
}

/// One group's result against one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRank {
    pub group_id: i64,
    pub score: Option<String>,
    pub verification: String,
    pub rank: Option<u32>,
}

impl InputRank {
    #[must_use]
    pub fn from_tuple(
        input: InputId,
        tuple: &ScoreTuple,
        owners: &BTreeMap<InputId, GroupId>,
    ) -> Self {
        Self {
            group_id: owners
                .get(&input)
                .copied()
                .map_or_else(|| input.into_inner(), GroupId::into_inner),
            score: tuple.score.clone(),
            verification: tuple.verification.to_string(),
            rank: tuple.rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationBreakdown {
    pub correct: u32,
    pub false_positives: u32,
    pub false_negatives: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    pub ranking: f64,
    pub verification: f64,
    pub participation: f64,
    pub input_submitted: f64,
    pub input_difficulty: f64,
    pub total: f64,
}

/// One group's grade report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSheet {
    pub group_name: String,
    pub fleet: usize,
    pub verification: VerificationBreakdown,
    pub input_ones: u32,
    pub contributions: ContributionBreakdown,
    /// to_member -> from_member -> normalized peer score.
    pub evaluations: BTreeMap<i64, BTreeMap<i64, f64>>,
}

impl GradeSheet {
    #[must_use]
    pub fn from_grade(group_name: impl Into<String>, grade: &GradeEntry) -> Self {
        Self {
            group_name: group_name.into(),
            fleet: grade.fleet,
            verification: VerificationBreakdown {
                correct: grade.verification.correct,
                false_positives: grade.verification.false_positives,
                false_negatives: grade.verification.false_negatives,
            },
            input_ones: grade.input_ones,
            contributions: ContributionBreakdown {
                ranking: grade.contributions.ranking,
                verification: grade.contributions.verification,
                participation: grade.contributions.participation,
                input_submitted: grade.contributions.input_submitted,
                input_difficulty: grade.contributions.input_difficulty,
                total: grade.contributions.total(),
            },
            evaluations: grade
                .evaluations
                .iter()
                .map(|(to_member, from_scores)| {
                    (
                        to_member.into_inner(),
                        from_scores
                            .iter()
                            .map(|(from_member, score)| (from_member.into_inner(), *score))
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}
