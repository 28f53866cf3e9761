/*
    This module decides membership with the CYK algorithm and rebuilds the
    derivation trees of accepted words
*/

pub mod table;
pub mod tree;

use std::fmt::Display;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::error_handling::*;
use crate::grammar::cnf::{find_violation, CnfViolation};
use crate::grammar::{Grammar, Rule};
pub use table::{Cell, ParseTable, Span};
pub use tree::{Branches, Tree};

#[derive(Debug, PartialEq)]
pub enum ParseErrorType {
    // The grammar has a rule that is neither `A --> a` nor `A --> B C`
    NotCnf(Rule, CnfViolation),
}

impl ErrorType for ParseErrorType {}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::NotCnf(rule, violation) => {
                write!(f, "The grammar is not in Chomsky Normal Form: `{}` ({})", rule, violation)
            }
        }
    }
}

pub type ParseError = Error<ParseErrorType>;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub accepted: bool,
    pub table: ParseTable,
    // Every derivation of the whole input from the axiom
    pub trees: Vec<Tree>,
}

/// Creates the table for `u` and fills the diagonal from the rules `A --> a`.
/// A token that no terminal matches leaves its cell empty.
pub(crate) fn init<T: AsRef<str>>(u: &[T], grammar: &Grammar) -> ParseTable {
    let mut table = ParseTable::new(u.len());

    for (i, token) in u.iter().enumerate() {
        let token = token.as_ref();
        let mut matched = false;

        for rule in grammar.rules() {
            if let [terminal] = &rule.rhs[..] {
                if terminal.name == token {
                    let tree = Tree::unary(rule.lhs.clone(), Tree::leaf(terminal.clone()));
                    table.insert(Span::new(i, i + 1), tree);
                    matched = true;
                }
            }
        }

        if !matched {
            warn!("Token `{}` at position {} matches no terminal of {}", token, i, grammar.name());
        }
    }

    return table;
}

/// Builds every span from two shorter ones with the rules `A --> B C`,
/// shortest spans first. Returns how many trees were added, so a second
/// run over a filled table returns 0.
pub(crate) fn fill(table: &mut ParseTable, grammar: &Grammar) -> usize {
    let n = table.input_len();
    let binary_rules = grammar.rules().iter()
        .filter_map(|rule| match &rule.rhs[..] {
            [left, right] => Some((&rule.lhs, left, right)),
            _ => None
        })
        .collect_vec();

    let mut added = 0;
    for l in 2..=n {
        for i in 0..=n - l {
            let span = Span::new(i, i + l);

            // Collect first, the cell being built can't be borrowed while
            // its neighbours are read
            let mut found = Vec::new();
            for k in i + 1..i + l {
                let (Some(left_cell), Some(right_cell)) =
                    (table.cell(Span::new(i, k)), table.cell(Span::new(k, i + l))) else {
                    continue;
                };

                for (lhs, left, right) in &binary_rules {
                    for t1 in left_cell.labeled(left) {
                        for t2 in right_cell.labeled(right) {
                            found.push(Tree::binary((*lhs).clone(), t1.clone(), t2.clone()));
                        }
                    }
                }
            }

            let new = found.into_iter()
                .map(|tree| table.insert(span, tree))
                .filter(|&inserted| inserted)
                .count();
            if new > 0 {
                trace!("{}: {} new trees", span, new);
            }
            added += new;
        }
    }

    return added;
}

/// Fills the whole table for `u`. The diagonal only holds sound trees for
/// unary rules over terminals, so any other grammar is refused up front.
pub fn build_table<T: AsRef<str>>(u: &[T], grammar: &Grammar) -> Result<ParseTable, ParseErrorType> {
    if let Some((rule, violation)) = find_violation(grammar) {
        return Err(ParseErrorType::NotCnf(rule.clone(), violation));
    }

    let mut table = init(u, grammar);
    let added = fill(&mut table, grammar);
    debug!("Built table for {} tokens over {}, {} trees above the diagonal", u.len(), grammar.name(), added);
    Ok(table)
}

/// True iff the whole input derives from the axiom.
pub fn is_success(table: &ParseTable, grammar: &Grammar) -> bool {
    table.top().is_some_and(|cell| cell.has_label(grammar.axiom()))
}

/// Every tree of the whole input rooted at the axiom. Empty when the parse
/// failed, whatever else the top cell holds.
pub fn extract_trees<'a>(table: &'a ParseTable, grammar: &'a Grammar) -> Vec<&'a Tree> {
    match table.top() {
        Some(cell) => cell.labeled(grammar.axiom()).collect(),
        None => Vec::new(),
    }
}

pub fn parse<T: AsRef<str>>(u: &[T], grammar: &Grammar) -> Result<ParseOutcome, ParseErrorType> {
    let table = build_table(u, grammar)?;
    let accepted = is_success(&table, grammar);
    let trees = if accepted {
        extract_trees(&table, grammar).into_iter().cloned().collect()
    } else {
        Vec::new()
    };

    Ok(ParseOutcome { accepted, table, trees })
}
