//! End-to-end run of a small competition: submissions through ranking,
//! then grading against a benchmark group.

use algoarena_core::{
    GroupId, GroupInfo, InputId, MemberId, NumericPolicy, OutputId, OutputRecord, PeerEvaluation,
    Protest, RankSort, RankingOptions, SubmissionRow, VerificationMode, VerificationStatus,
    compute_grades, compute_rankings, sort_rows,
};

fn output(id: i64, group: i64, input: i64, score: i64) -> OutputRecord {
    let mut output = OutputRecord::new(
        OutputId::new(id),
        GroupId::new(group),
        InputId::new(input),
        score,
    );
    output
        .set_verification(VerificationStatus::Accepted)
        .expect("fresh output should accept verification");
    output.set_ground_truth(VerificationStatus::Accepted);
    output
}

fn competition_roster() -> Vec<GroupInfo> {
    vec![
        GroupInfo::new(GroupId::new(1), "Simplex Squad")
            .with_members(vec![MemberId::new(11), MemberId::new(12)])
            .with_input(InputId::new(101), false),
        GroupInfo::new(GroupId::new(2), "Branch and Bounders")
            .with_members(vec![MemberId::new(21), MemberId::new(22)])
            .with_input(InputId::new(102), false),
        GroupInfo::new(GroupId::new(3), "Lazy Evaluators")
            .with_members(vec![MemberId::new(31)])
            .with_input(InputId::new(103), true),
        GroupInfo::new(GroupId::new(4), "Reference").as_benchmark(),
        GroupInfo::new(GroupId::new(5), "Staff Test").as_incognito(),
    ]
}

/// Everyone solves inputs 101 and 102; group 3 skips 102, the staff test
/// group submits everywhere but must stay invisible.
fn competition_outputs() -> Vec<OutputRecord> {
    let mut outputs = vec![
        output(1, 1, 101, 40),
        output(2, 2, 101, 40),
        output(3, 3, 101, 55),
        output(4, 4, 101, 45),
        output(5, 5, 101, 1),
        output(6, 1, 102, 70),
        output(7, 2, 102, 90),
        output(8, 4, 102, 80),
        output(9, 5, 102, 1),
    ];
    // group 3's answer to input 102 was thrown out
    let mut rejected = output(10, 3, 102, 10);
    rejected
        .set_verification(VerificationStatus::Rejected)
        .expect("output should accept verification");
    rejected.set_ground_truth(VerificationStatus::Rejected);
    outputs.push(rejected);
    outputs
}

fn ranked(options: RankingOptions) -> algoarena_core::RankingReport {
    let mut rows: Vec<SubmissionRow> = competition_outputs()
        .into_iter()
        .map(SubmissionRow::new)
        .collect();
    sort_rows(&mut rows, options.mode, RankSort::Minimization);
    compute_rankings(
        &rows,
        &competition_roster(),
        &[Protest::new(GroupId::new(2), OutputId::new(3), false)],
        &NumericPolicy::minimizing(),
        options,
    )
}

#[test]
fn rankings_track_places_rejects_and_penalties() {
    let report = ranked(RankingOptions {
        show_scores: true,
        ..RankingOptions::default()
    });

    // incognito group is invisible, everyone else is present
    assert!(!report.entries.contains_key(&GroupId::new(5)));
    assert_eq!(report.entries.len(), 4);
    assert_eq!(report.inputs.len(), 2);

    // input 101: groups 1 and 2 tie at rank 1, benchmark 3rd, group 3 4th
    let rank = |group: i64, input: i64| {
        report.entries[&GroupId::new(group)].input_ranks[&InputId::new(input)].rank
    };
    assert_eq!(rank(1, 101), Some(1));
    assert_eq!(rank(2, 101), Some(1));
    assert_eq!(rank(4, 101), Some(3));
    assert_eq!(rank(3, 101), Some(4));

    // input 102: 70 < 80 < 90, group 3 rejected
    assert_eq!(rank(1, 102), Some(1));
    assert_eq!(rank(4, 102), Some(2));
    assert_eq!(rank(2, 102), Some(3));
    assert_eq!(rank(3, 102), None);

    let one = &report.entries[&GroupId::new(1)];
    let two = &report.entries[&GroupId::new(2)];
    let three = &report.entries[&GroupId::new(3)];
    assert_eq!(one.score(), 2);
    // group 2 pays for its rejected protest
    assert_eq!(two.penalties, 1);
    assert_eq!(two.score(), 5);
    assert_eq!(three.reject_count, 1);

    // groups 2 and 4 tie at score 5 and share second place
    assert_eq!(one.place, 1);
    assert_eq!(two.place, 2);
    assert_eq!(report.entries[&GroupId::new(4)].place, 2);
    assert_eq!(three.place, 4);

    // disclosed scores render through the policy
    assert_eq!(
        report.entries[&GroupId::new(1)].input_ranks[&InputId::new(101)]
            .score
            .as_deref(),
        Some("40")
    );
}

#[test]
fn conservation_holds_for_every_group() {
    let report = ranked(RankingOptions::default());

    for entry in report.entries.values() {
        let ranked_inputs = entry
            .input_ranks
            .values()
            .filter(|tuple| tuple.rank.is_some())
            .count() as u32;
        assert_eq!(entry.reject_count + ranked_inputs, report.inputs.len() as u32);
    }
}

#[test]
fn place_ordering_is_consistent_with_the_entry_order() {
    let report = ranked(RankingOptions::default());

    for a in report.entries.values() {
        for b in report.entries.values() {
            if a.ranks_before(b) {
                assert!(a.place <= b.place);
            }
            if a.ties_with(b) {
                assert_eq!(a.place, b.place);
            }
        }
    }
}

#[test]
fn grading_splits_fleets_at_the_benchmark() {
    let report = ranked(RankingOptions {
        mode: VerificationMode::GroundTruth,
        ..RankingOptions::default()
    });
    let roster = competition_roster();
    let outputs = competition_outputs();
    let evaluations = vec![PeerEvaluation::new(
        GroupId::new(1),
        MemberId::new(11),
        MemberId::new(12),
        2.0,
    )];
    let grades = compute_grades(&report, &roster, &outputs, &evaluations);

    // benchmark and incognito groups are not graded
    assert!(!grades.entries.contains_key(&GroupId::new(4)));
    assert!(!grades.entries.contains_key(&GroupId::new(5)));
    assert_eq!(grades.fleets.len(), 2);

    // benchmark adj_score is 5: groups 1 (adj 2) and 2 (adj 5) beat or
    // tie it, group 3 (4 + 1 reject over 2 scored inputs = 6) does not
    let one = &grades.entries[&GroupId::new(1)];
    let two = &grades.entries[&GroupId::new(2)];
    let three = &grades.entries[&GroupId::new(3)];
    assert_eq!(one.fleet, 1);
    assert_eq!(two.fleet, 1);
    assert_eq!(three.fleet, 0);
    assert!(grades.fleets[1].contains(&GroupId::new(1)));
    assert!(grades.fleets[0].contains(&GroupId::new(3)));

    // participation: group 3 missed one of two inputs
    assert!((one.contributions.participation - 50.0).abs() < 1e-9);
    assert!((three.contributions.participation - 25.0).abs() < 1e-9);

    // input credit: groups 1 and 2 submitted custom inputs, group 3 used
    // the default
    assert_eq!(one.contributions.input_submitted, 5.0);
    assert_eq!(three.contributions.input_submitted, 0.0);

    // peer evaluations from member 11: {12: 2.0, 11: 1.0} normalized
    let to_twelve = one.evaluations[&MemberId::new(12)][&MemberId::new(11)];
    assert!((to_twelve - 2.0 / 3.0).abs() < 1e-9);
    let handed_out: f64 = one
        .evaluations
        .values()
        .filter_map(|from| from.get(&MemberId::new(11)))
        .sum();
    assert!((handed_out - 1.0).abs() < 1e-9);

    let total = one.contributions.total();
    assert!(total > 0.0);
    assert!(
        (total
            - (one.contributions.ranking
                + one.contributions.verification
                + one.contributions.participation
                + one.contributions.input_submitted
                + one.contributions.input_difficulty))
            .abs()
            < 1e-9
    );
}
