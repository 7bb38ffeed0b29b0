use super::{GroupId, InputId, MemberId};

/// The problem instance a group contributed for everyone else to solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputInfo {
    pub id: InputId,
    pub owner: GroupId,
    /// True when the group never uploaded its own input and the staff
    /// default was used instead. Default inputs earn no input credit.
    pub is_default: bool,
}

/// A competition participant, or one of the pseudo-participants used for
/// staff testing (incognito) and fleet thresholds (benchmark).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
    pub members: Vec<MemberId>,
    /// Excluded from rankings and grading unless explicitly requested.
    pub incognito: bool,
    /// Excluded from the gradable pool; only defines fleet boundaries.
    pub benchmark: bool,
    pub input: Option<InputInfo>,
}

impl GroupInfo {
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
            incognito: false,
            benchmark: false,
            input: None,
        }
    }

    pub fn with_members(mut self, members: Vec<MemberId>) -> Self {
        self.members = members;
        self
    }

    pub fn with_input(mut self, id: InputId, is_default: bool) -> Self {
        self.input = Some(InputInfo {
            id,
            owner: self.id,
            is_default,
        });
        self
    }

    pub fn as_incognito(mut self) -> Self {
        self.incognito = true;
        self
    }

    pub fn as_benchmark(mut self) -> Self {
        self.benchmark = true;
        self
    }
}
