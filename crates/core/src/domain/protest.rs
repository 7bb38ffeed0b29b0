use super::{GroupId, OutputId};

/// An open-verification disagreement filed by a group against another
/// group's judgement of its output. A rejected protest costs the
/// submitter one penalty point regardless of anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protest {
    pub submitter: GroupId,
    pub output: OutputId,
    /// Whether the protest changed the outcome.
    pub accepted: bool,
}

impl Protest {
    pub fn new(submitter: GroupId, output: OutputId, accepted: bool) -> Self {
        Self {
            submitter,
            output,
            accepted,
        }
    }
}
