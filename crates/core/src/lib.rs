//! Ranking and grading engine for multi-stage algorithm competitions.
//!
//! Groups submit problem inputs, solve each other's inputs, and verify
//! each other's outputs. Given the materialized submission tuples for a
//! competition, [`ranking::compute_rankings`] derives per-group places and
//! [`grading::compute_grades`] derives the five-component grade report.
//! Storage, HTTP, and per-problem file parsing are collaborator concerns;
//! this crate is synchronous and side-effect free.

pub mod domain;
pub mod grading;
pub mod ranking;

pub use domain::{
    DomainError, GroupId, GroupInfo, InputId, InputInfo, MemberId, NumericPolicy, OutputId,
    OutputRecord, PeerEvaluation, Protest, RankSort, ScoringPolicy, VerificationMode,
    VerificationStatus,
};
pub use grading::{Contributions, GradeEntry, GradingReport, VerificationTally, compute_grades};
pub use ranking::{
    GroupEntry, RankingOptions, RankingReport, ScoreTuple, SubmissionRow, compute_rankings,
    sort_rows,
};
