use std::fmt::Display;

/// Answer of a constant-vs-balanced decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Constant,
    Balanced,
}

impl Decision {
    pub fn is_balanced(self) -> bool {
        matches!(self, Decision::Balanced)
    }

    pub fn is_constant(self) -> bool {
        matches!(self, Decision::Constant)
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Decision::Constant => "constant",
            Decision::Balanced => "balanced",
        };
        f.pad(name)
    }
}

/// Vote split of an amplified run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub balanced: usize,
    pub constant: usize,
}

impl Tally {
    pub fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Balanced => self.balanced += 1,
            Decision::Constant => self.constant += 1,
        }
    }

    pub fn trials(&self) -> usize {
        self.balanced + self.constant
    }

    /// Strict majority for `Balanced`, ties go to `Constant`.
    pub fn majority(&self) -> Decision {
        if self.balanced > self.constant {
            Decision::Balanced
        } else {
            Decision::Constant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_display() {
        assert_eq!("constant", Decision::Constant.to_string());
        assert_eq!("balanced", Decision::Balanced.to_string());
        assert_eq!("constant  ", format!("{:<10}", Decision::Constant));
    }

    #[test]
    fn test_decision_predicates() {
        assert!(Decision::Constant.is_constant());
        assert!(!Decision::Constant.is_balanced());
        assert!(Decision::Balanced.is_balanced());
        assert!(!Decision::Balanced.is_constant());
    }

    #[test]
    fn test_tally_majority() {
        let mut tally = Tally::default();
        tally.record(Decision::Balanced);
        tally.record(Decision::Constant);
        assert_eq!(2, tally.trials());
        assert_eq!(Decision::Constant, tally.majority());

        tally.record(Decision::Balanced);
        assert_eq!(Decision::Balanced, tally.majority());
    }

    #[test]
    fn test_empty_tally_is_constant() {
        assert_eq!(Decision::Constant, Tally::default().majority());
    }
}
