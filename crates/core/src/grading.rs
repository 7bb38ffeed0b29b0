//! Grade computation on top of a ground-truth ranking run.
//!
//! Gradable groups are bucketed into fleets bounded by the benchmark
//! groups' adjusted scores, then each earns five contribution components:
//! ranking, verification accuracy, participation, input difficulty, and
//! normalized peer evaluations.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    GroupId, GroupInfo, InputId, MemberId, OutputRecord, PeerEvaluation, VerificationStatus,
};
use crate::ranking::{GroupEntry, RankingReport};

/// How a group's verification work compares against ground truth, over
/// the original outputs submitted against its own input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationTally {
    pub correct: u32,
    pub false_positives: u32,
    pub false_negatives: u32,
}

impl VerificationTally {
    pub fn total(self) -> u32 {
        self.correct + self.false_positives + self.false_negatives
    }
}

/// The five rubric components. Rankings are worth up to 5 per fleet step,
/// verification 20, participation 50, input credit 5 + difficulty bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contributions {
    pub ranking: f64,
    pub verification: f64,
    pub participation: f64,
    pub input_submitted: f64,
    pub input_difficulty: f64,
}

impl Contributions {
    pub fn total(self) -> f64 {
        self.ranking
            + self.verification
            + self.participation
            + self.input_submitted
            + self.input_difficulty
    }
}

/// Everything the grade report records about one gradable group.
#[derive(Debug, Clone, Default)]
pub struct GradeEntry {
    pub rankings: GroupEntry,
    /// 0-based fleet index; fleet 0 is the best-performing tier.
    pub fleet: usize,
    pub verification: VerificationTally,
    /// How many gradable groups earned rank 1 on this group's input.
    pub input_ones: u32,
    pub contributions: Contributions,
    /// to_member -> from_member -> normalized peer score.
    pub evaluations: BTreeMap<MemberId, BTreeMap<MemberId, f64>>,
}

#[derive(Debug, Clone, Default)]
pub struct GradingReport {
    pub entries: BTreeMap<GroupId, GradeEntry>,
    /// Fleet membership, each fleet ordered worst adjusted score first.
    pub fleets: Vec<Vec<GroupId>>,
}

fn ranking_contribution(group: GroupId, fleet_index: usize, fleet: &[(GroupId, u64)]) -> f64 {
    if fleet.len() == 1 {
        return 5.0 + fleet_index as f64 * 5.0;
    }
    let mut place_in_fleet = 0usize;
    let mut last_adj_score = fleet[0].1;
    for (i, (other, adj_score)) in fleet.iter().enumerate() {
        if *adj_score != last_adj_score {
            place_in_fleet = i;
            last_adj_score = *adj_score;
        }
        if *other == group {
            break;
        }
    }
    (place_in_fleet as f64 / (fleet.len() - 1) as f64) * 5.0 + fleet_index as f64 * 5.0
}

/// Compute grades from a ranking run. `report` must come from a
/// ground-truth, incognito-excluded ranking pass. `original_outputs`
/// holds every original-window output of the competition, active or not;
/// `evaluations` the raw peer-evaluation records.
pub fn compute_grades(
    report: &RankingReport,
    roster: &[GroupInfo],
    original_outputs: &[OutputRecord],
    evaluations: &[PeerEvaluation],
) -> GradingReport {
    let num_inputs = report.inputs.len();

    let info: BTreeMap<GroupId, &GroupInfo> = roster.iter().map(|g| (g.id, g)).collect();
    let input_owner: BTreeMap<InputId, &GroupInfo> = roster
        .iter()
        .filter_map(|g| g.input.as_ref().map(|input| (input.id, g)))
        .collect();

    // partition the roster: incognito groups drop out entirely, benchmark
    // groups only contribute fleet thresholds, the rest are gradable. A
    // group absent from the rankings (submitted nothing while the tables
    // were built) gets a backfilled all-reject entry.
    let mut entries: BTreeMap<GroupId, GradeEntry> = BTreeMap::new();
    let mut benchmark_scores: Vec<u64> = Vec::new();
    for group in roster {
        if group.incognito {
            continue;
        }
        let rankings = report.entries.get(&group.id).cloned().unwrap_or_else(|| {
            GroupEntry {
                reject_count: num_inputs as u32,
                ..GroupEntry::default()
            }
        });
        if group.benchmark {
            benchmark_scores.push(rankings.adj_score());
            continue;
        }
        entries.insert(
            group.id,
            GradeEntry {
                rankings,
                ..GradeEntry::default()
            },
        );
    }
    // worst benchmark first, so fleet 0 sits above every threshold
    benchmark_scores.sort_unstable_by(|a, b| b.cmp(a));

    // verification correctness: a group verified the original outputs
    // submitted against its own input
    for output in original_outputs {
        if !output.is_original() {
            continue;
        }
        let Some(owner) = input_owner.get(&output.input()) else {
            continue;
        };
        let Some(entry) = entries.get_mut(&owner.id) else {
            continue;
        };
        if output.verification() == output.ground_truth() {
            entry.verification.correct += 1;
        } else if output.verification() == VerificationStatus::Accepted {
            entry.verification.false_positives += 1;
        } else {
            entry.verification.false_negatives += 1;
        }
    }

    // input difficulty: count rank-1 finishes on each gradable group's input
    let mut ones: BTreeMap<GroupId, u32> = BTreeMap::new();
    for entry in entries.values() {
        for (input, tuple) in &entry.rankings.input_ranks {
            if tuple.rank != Some(1) {
                continue;
            }
            if let Some(owner) = input_owner.get(input)
                && !owner.incognito
                && !owner.benchmark
            {
                *ones.entry(owner.id).or_default() += 1;
            }
        }
    }
    for (group, count) in ones {
        if let Some(entry) = entries.get_mut(&group) {
            entry.input_ones = count;
        }
    }

    // fleet assignment: count of benchmark thresholds beaten or tied
    let mut fleets: Vec<Vec<(GroupId, u64)>> = vec![Vec::new(); benchmark_scores.len() + 1];
    for (group, entry) in entries.iter_mut() {
        let adj_score = entry.rankings.adj_score();
        entry.fleet = benchmark_scores
            .iter()
            .filter(|threshold| adj_score <= **threshold)
            .count();
        fleets[entry.fleet].push((*group, adj_score));
    }
    for fleet in &mut fleets {
        fleet.sort_by(|a, b| b.1.cmp(&a.1));
    }

    for (group, entry) in entries.iter_mut() {
        entry.contributions.ranking = ranking_contribution(*group, entry.fleet, &fleets[entry.fleet]);

        entry.contributions.verification = if entry.verification.total() > 0 {
            f64::from(entry.verification.correct) / f64::from(entry.verification.total()) * 20.0
        } else {
            0.0
        };

        entry.contributions.participation = if num_inputs > 0 {
            (num_inputs as f64 - f64::from(entry.rankings.reject_count)) / num_inputs as f64 * 50.0
        } else {
            0.0
        };

        let custom_input = info
            .get(group)
            .and_then(|g| g.input.as_ref())
            .filter(|input| !input.is_default);
        if custom_input.is_some() {
            entry.contributions.input_submitted = 5.0;
            entry.contributions.input_difficulty =
                (10 - (i64::from(entry.input_ones) - 1)).max(0) as f64;
        }
    }

    // peer evaluations: each member's handed-out scores are normalized to
    // sum to one; unscored members default to 1.0
    for (group, entry) in entries.iter_mut() {
        let Some(group_info) = info.get(group) else {
            continue;
        };
        for from_member in &group_info.members {
            let mut raw: BTreeMap<MemberId, f64> = evaluations
                .iter()
                .filter(|e| e.group == *group && e.from_member == *from_member)
                .map(|e| (e.to_member, e.score))
                .collect();
            for to_member in &group_info.members {
                raw.entry(*to_member).or_insert(1.0);
            }
            let sum: f64 = raw.values().sum();
            for (to_member, score) in raw {
                let normalized = if sum == 0.0 { 0.0 } else { score / sum };
                entry
                    .evaluations
                    .entry(to_member)
                    .or_default()
                    .insert(*from_member, normalized);
            }
        }
    }

    debug!(
        gradable = entries.len(),
        benchmarks = benchmark_scores.len(),
        fleets = fleets.len(),
        "computed grades"
    );

    GradingReport {
        entries,
        fleets: fleets
            .into_iter()
            .map(|fleet| fleet.into_iter().map(|(group, _)| group).collect())
            .collect(),
    }
}
