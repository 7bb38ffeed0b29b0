//! Single-pass rank computation over the ordered submission stream.
//!
//! The caller supplies the rows already ordered per the storage contract:
//! by input, non-rejected before rejected, then by score in the problem's
//! rank direction. [`sort_rows`] implements that ordering for callers that
//! cannot push it into their query.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::domain::{
    GroupId, GroupInfo, InputId, OutputId, OutputRecord, Protest, RankSort, ScoringPolicy,
    VerificationMode, VerificationStatus,
};

/// One group's result against one input, as shown in the rankings table.
///
/// `score` and `output` are withheld before score disclosure, and always
/// withheld for rejected submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTuple {
    pub score: Option<String>,
    pub verification: VerificationStatus,
    pub rank: Option<u32>,
    pub output: Option<OutputId>,
    /// Set in ground-truth mode when the group's judgement disagrees with
    /// ground truth and ground truth has not been revealed to them.
    pub verification_differs: bool,
}

/// Per-group ranking accumulator for one competition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupEntry {
    /// Inputs for which this group's submission was rejected or missing.
    pub reject_count: u32,
    pub sum_of_ranks: u64,
    /// Accepted late resubmissions plus rejected protests.
    pub penalties: u32,
    /// 1-based, dense: tied entries share a place.
    pub place: u32,
    pub input_ranks: BTreeMap<InputId, ScoreTuple>,
}

impl GroupEntry {
    /// Rejection cost multiplier for a group that ranked nothing at all.
    const UNRANKED_COST: u64 = 9999;

    pub fn score(&self) -> u64 {
        self.sum_of_ranks + u64::from(self.penalties)
    }

    /// Score used for grading: each rejection is assumed to cost the
    /// worst plausible rank, the number of inputs this group was ranked
    /// against.
    pub fn adj_score(&self) -> u64 {
        if self.reject_count == 0 {
            return self.score();
        }
        let mut num_inputs = self.input_ranks.len() as u64;
        if num_inputs == 0 {
            num_inputs = Self::UNRANKED_COST;
        }
        self.score() + u64::from(self.reject_count) * num_inputs
    }

    /// Fewer rejections always wins; score breaks ties.
    fn ranking_key(&self) -> (u32, u64) {
        (self.reject_count, self.score())
    }

    pub fn ranks_before(&self, other: &GroupEntry) -> bool {
        self.ranking_key() < other.ranking_key()
    }

    pub fn ties_with(&self, other: &GroupEntry) -> bool {
        self.ranking_key() == other.ranking_key()
    }
}

/// One element of the ordered tuple stream from the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    pub input: InputId,
    pub group: GroupId,
    pub output: OutputRecord,
}

impl SubmissionRow {
    pub fn new(output: OutputRecord) -> Self {
        Self {
            input: output.input(),
            group: output.group(),
            output,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RankingOptions {
    pub mode: VerificationMode,
    /// Include incognito groups' submissions. Off for default rankings.
    pub include_incognito: bool,
    /// Whether raw scores may be disclosed to the viewer.
    pub show_scores: bool,
}

/// The derived rankings for one competition run. Read-only; serializing
/// or rendering it is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct RankingReport {
    pub entries: BTreeMap<GroupId, GroupEntry>,
    /// Inputs encountered in the stream, in stream order.
    pub inputs: Vec<InputId>,
    /// Ground-truth mode only: fraction of processed rows whose normally
    /// effective judgement agrees with ground truth. Reporting only.
    pub verification_accuracy: f64,
}

/// Order rows per the tuple-source contract: by input, non-rejected
/// before rejected, then by score in the problem's rank direction.
pub fn sort_rows(rows: &mut [SubmissionRow], mode: VerificationMode, rank_sort: RankSort) {
    rows.sort_by(|a, b| {
        let a_rejected = a.output.effective_verification(mode) == VerificationStatus::Rejected;
        let b_rejected = b.output.effective_verification(mode) == VerificationStatus::Rejected;
        a.input
            .cmp(&b.input)
            .then(a_rejected.cmp(&b_rejected))
            .then_with(|| match rank_sort {
                RankSort::Minimization => a.output.score().cmp(&b.output.score()),
                RankSort::Maximization => b.output.score().cmp(&a.output.score()),
            })
    });
}

/// Run the ranking pass over `rows`, which must hold only active outputs
/// and be ordered per [`sort_rows`]. Rank assignment is order-dependent:
/// tie detection compares against the immediately preceding row.
pub fn compute_rankings(
    rows: &[SubmissionRow],
    roster: &[GroupInfo],
    protests: &[Protest],
    policy: &dyn ScoringPolicy,
    options: RankingOptions,
) -> RankingReport {
    let incognito: HashSet<GroupId> = roster
        .iter()
        .filter(|g| g.incognito)
        .map(|g| g.id)
        .collect();

    let mut entries: BTreeMap<GroupId, GroupEntry> = BTreeMap::new();
    let mut inputs: Vec<InputId> = Vec::new();

    let mut last_input: Option<InputId> = None;
    let mut potential_rank: u32 = 1;
    let mut last_rank: Option<u32> = None;
    let mut last_score: Option<i64> = None;

    let mut accurate_count: u64 = 0;
    let mut total_count: u64 = 0;

    for row in rows {
        if !options.include_incognito && incognito.contains(&row.group) {
            continue;
        }
        if last_input != Some(row.input) {
            inputs.push(row.input);
            potential_rank = 1;
            last_rank = None;
            last_score = None;
        }

        let verification = row.output.effective_verification(options.mode);

        let mut shown_score = options
            .show_scores
            .then(|| policy.repr_score(row.output.score()));
        let shown_output = options.show_scores.then(|| row.output.id());

        let rank = if verification == VerificationStatus::Rejected {
            shown_score = None;
            None
        } else if last_score == Some(row.output.score()) {
            // tie with the previous row on this input
            last_rank
        } else {
            Some(potential_rank)
        };

        let mut verification_differs = false;
        if options.mode == VerificationMode::GroundTruth {
            if row.output.uses_ground_truth()
                || row.output.verification() == row.output.ground_truth()
            {
                accurate_count += 1;
            } else {
                verification_differs = true;
            }
        }

        let entry = entries.entry(row.group).or_default();
        entry.input_ranks.insert(
            row.input,
            ScoreTuple {
                score: shown_score,
                verification,
                rank,
                output: shown_output,
                verification_differs,
            },
        );
        match rank {
            Some(rank) => entry.sum_of_ranks += u64::from(rank),
            None => entry.reject_count += 1,
        }

        // accepted resubmissions from the resolution stage cost a penalty
        if verification == VerificationStatus::Accepted && !row.output.is_original() {
            entry.penalties += 1;
        }

        total_count += 1;
        potential_rank += 1;
        last_input = Some(row.input);
        last_rank = rank;
        last_score = Some(row.output.score());
    }

    // never submitting against an input counts the same as a rejection
    for entry in entries.values_mut() {
        for input in &inputs {
            if !entry.input_ranks.contains_key(input) {
                entry.reject_count += 1;
            }
        }
    }

    // roster groups with no submissions at all rank behind every submitter
    for group in roster {
        if group.incognito && !options.include_incognito {
            continue;
        }
        entries.entry(group.id).or_insert_with(|| GroupEntry {
            reject_count: inputs.len() as u32,
            ..GroupEntry::default()
        });
    }

    for protest in protests {
        if protest.accepted {
            continue;
        }
        if let Some(entry) = entries.get_mut(&protest.submitter) {
            entry.penalties += 1;
        }
    }

    let keys: Vec<(u32, u64)> = entries.values().map(GroupEntry::ranking_key).collect();
    for entry in entries.values_mut() {
        let key = entry.ranking_key();
        entry.place = 1 + keys.iter().filter(|other| **other < key).count() as u32;
    }

    let verification_accuracy = if total_count == 0 {
        0.0
    } else {
        accurate_count as f64 / total_count as f64
    };

    debug!(
        rows = rows.len(),
        groups = entries.len(),
        inputs = inputs.len(),
        "computed rankings"
    );

    RankingReport {
        entries,
        inputs,
        verification_accuracy,
    }
}
