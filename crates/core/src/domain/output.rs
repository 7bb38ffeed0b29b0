use super::{DomainError, GroupId, InputId, OutputId, VerificationMode, VerificationStatus};

/// One group's answer to one input.
///
/// At most one active record exists per (group, input) pair; a
/// resolution-stage resubmission deactivates the old record rather than
/// deleting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    id: OutputId,
    group: GroupId,
    input: InputId,
    score: i64,
    verification: VerificationStatus,
    ground_truth: VerificationStatus,
    active: bool,
    original: bool,
    use_ground_truth: bool,
}

impl OutputRecord {
    /// A fresh submission from the primary output-upload window.
    pub fn new(id: OutputId, group: GroupId, input: InputId, score: i64) -> Self {
        Self {
            id,
            group,
            input,
            score,
            verification: VerificationStatus::Waiting,
            ground_truth: VerificationStatus::Waiting,
            active: true,
            original: true,
            use_ground_truth: false,
        }
    }

    /// Rehydrate a record from persisted state. The storage collaborator
    /// is responsible for the fields being mutually consistent.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: OutputId,
        group: GroupId,
        input: InputId,
        score: i64,
        verification: VerificationStatus,
        ground_truth: VerificationStatus,
        active: bool,
        original: bool,
        use_ground_truth: bool,
    ) -> Self {
        Self {
            id,
            group,
            input,
            score,
            verification,
            ground_truth,
            active,
            original,
            use_ground_truth,
        }
    }

    pub fn id(&self) -> OutputId {
        self.id
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn input(&self) -> InputId {
        self.input
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn verification(&self) -> VerificationStatus {
        self.verification
    }

    pub fn ground_truth(&self) -> VerificationStatus {
        self.ground_truth
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_original(&self) -> bool {
        self.original
    }

    pub fn uses_ground_truth(&self) -> bool {
        self.use_ground_truth
    }

    /// The judgement the ranking engine treats as effective under `mode`.
    pub fn effective_verification(&self, mode: VerificationMode) -> VerificationStatus {
        match mode {
            VerificationMode::GroundTruth => self.ground_truth,
            VerificationMode::Current if self.use_ground_truth => self.ground_truth,
            VerificationMode::Current => self.verification,
        }
    }

    /// Record the verifying group's judgement. Fails once the output has
    /// been locked to ground truth by the resolution stage or a protest.
    pub fn set_verification(&mut self, status: VerificationStatus) -> Result<(), DomainError> {
        if self.use_ground_truth {
            return Err(DomainError::VerificationLocked(self.id));
        }
        self.verification = status;
        Ok(())
    }

    /// Record the automatic verifier's judgement. Reverification may
    /// overwrite this at any time.
    pub fn set_ground_truth(&mut self, status: VerificationStatus) {
        self.ground_truth = status;
    }

    /// Lock the output to ground truth, as happens when resolution opens
    /// for it or a protest is filed against it.
    pub fn reveal_ground_truth(&mut self) -> Result<(), DomainError> {
        if self.use_ground_truth {
            return Err(DomainError::GroundTruthAlreadyRevealed(self.id));
        }
        self.use_ground_truth = true;
        Ok(())
    }

    /// Whether a protest against this output would be upheld: the group's
    /// judgement disagrees with ground truth.
    pub fn protest_would_stand(&self) -> bool {
        self.verification != self.ground_truth
    }

    /// Resolution-stage resubmission: deactivate this record and produce
    /// the non-original replacement.
    pub fn supersede_with(&mut self, id: OutputId, score: i64) -> Result<OutputRecord, DomainError> {
        if !self.active {
            return Err(DomainError::OutputNotActive(self.id));
        }
        self.active = false;
        Ok(OutputRecord {
            id,
            group: self.group,
            input: self.input,
            score,
            verification: VerificationStatus::Waiting,
            ground_truth: VerificationStatus::Waiting,
            active: true,
            original: false,
            use_ground_truth: false,
        })
    }
}
