use super::{GroupId, MemberId};

/// A raw peer-evaluation score one group member gave another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerEvaluation {
    pub group: GroupId,
    pub from_member: MemberId,
    pub to_member: MemberId,
    pub score: f64,
}

impl PeerEvaluation {
    pub fn new(group: GroupId, from_member: MemberId, to_member: MemberId, score: f64) -> Self {
        Self {
            group,
            from_member,
            to_member,
            score,
        }
    }
}
