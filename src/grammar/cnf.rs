use std::fmt::Display;

use super::{Grammar, Rule, Symbol};

// The ways a rule can fall outside Chomsky Normal Form
#[derive(Debug, Clone, PartialEq)]
pub enum CnfViolation {
    // `A -->` with nothing on the right
    EmptyRightSide,
    // More than two symbols on the right
    TooLong(usize),
    // `A --> B c` or `A --> b C`
    TerminalInBinaryRule(Symbol),
    // `A --> B`
    NonTerminalInUnaryRule(Symbol),
}

impl Display for CnfViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CnfViolation::EmptyRightSide => write!(f, "right hand side is empty"),
            CnfViolation::TooLong(len) => write!(f, "right hand side has {} symbols, at most 2 are allowed", len),
            CnfViolation::TerminalInBinaryRule(s) => write!(f, "terminal `{}` in a binary rule", s),
            CnfViolation::NonTerminalInUnaryRule(s) => write!(f, "non-terminal `{}` alone on the right hand side", s),
        }
    }
}

fn rule_violation(grammar: &Grammar, rule: &Rule) -> Option<CnfViolation> {
    match &rule.rhs[..] {
        [] => Some(CnfViolation::EmptyRightSide),
        [single] if grammar.is_non_terminal(single) => Some(CnfViolation::NonTerminalInUnaryRule(single.clone())),
        [_] => None,
        [left, right] => [left, right]
            .into_iter()
            .find(|s| !grammar.is_non_terminal(s))
            .map(|s| CnfViolation::TerminalInBinaryRule(s.clone())),
        long => Some(CnfViolation::TooLong(long.len())),
    }
}

/// The first rule (in grammar order) that is neither `A --> a` nor `A --> B C`.
pub fn find_violation(grammar: &Grammar) -> Option<(&Rule, CnfViolation)> {
    grammar.rules().iter().find_map(|rule| rule_violation(grammar, rule).map(|v| (rule, v)))
}

pub fn check_cnf(grammar: &Grammar) -> bool {
    find_violation(grammar).is_none()
}
