/// Whether lower or higher scores rank first for a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankSort {
    #[default]
    Minimization,
    Maximization,
}

/// Per-problem scoring behavior, resolved once per competition before the
/// engine runs. The engine never loads problem code itself.
pub trait ScoringPolicy {
    fn rank_sort(&self) -> RankSort;

    /// Render a raw score for display.
    fn repr_score(&self, score: i64) -> String {
        score.to_string()
    }
}

/// Plain decimal scores in either direction; the behavior problems get
/// unless they override the policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericPolicy {
    sort: RankSort,
}

impl NumericPolicy {
    pub fn minimizing() -> Self {
        Self {
            sort: RankSort::Minimization,
        }
    }

    pub fn maximizing() -> Self {
        Self {
            sort: RankSort::Maximization,
        }
    }
}

impl ScoringPolicy for NumericPolicy {
    fn rank_sort(&self) -> RankSort {
        self.sort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_policy_renders_plain_decimal() {
        let policy = NumericPolicy::minimizing();
        assert_eq!(policy.rank_sort(), RankSort::Minimization);
        assert_eq!(policy.repr_score(1234), "1234");
    }
}
