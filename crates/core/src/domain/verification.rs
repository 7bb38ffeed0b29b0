use std::fmt;

/// Judgement attached to an output, either by the verifying group or by
/// the automatic verifier (ground truth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerificationStatus {
    #[default]
    Waiting,
    Accepted,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which judgement the ranking engine treats as effective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerificationMode {
    /// The group-assigned verification, unless ground truth has been
    /// revealed for a specific output.
    #[default]
    Current,
    /// Ground truth for every output. Staff-only reporting mode, and the
    /// mode grading runs in.
    GroundTruth,
}
