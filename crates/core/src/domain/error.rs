use thiserror::Error;

use super::OutputId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("verification for output {0} is locked to ground truth")]
    VerificationLocked(OutputId),

    #[error("ground truth for output {0} has already been revealed")]
    GroundTruthAlreadyRevealed(OutputId),

    #[error("output {0} is no longer active and cannot be superseded")]
    OutputNotActive(OutputId),
}
