/*
    This module generates random words of a grammar
*/

use rand::prelude::*;
use std::{collections::HashMap, fmt::Display};

use crate::grammar::*;
use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // The start symbol has no rule
    UndefinedNonterminal(String),
    // Every derivation from this nonterminal goes on forever
    Unproductive(String),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::Unproductive(nonterminal) => write!(f, "Nonterminal `{}` never derives a finite word", nonterminal),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<Vec<String>, GenerateErrorType>;

// Height of the shortest derivation tree below each nonterminal that can
// derive a word at all
fn termination_heights(grammar: &Grammar) -> HashMap<&Symbol, usize> {
    let mut heights = HashMap::new();

    loop {
        let mut changed = false;
        for rule in grammar.rules() {
            if let Some(height) = rule_height(grammar, &heights, rule) {
                match heights.get(&rule.lhs) {
                    Some(&old) if old <= height => {}
                    _ => {
                        heights.insert(&rule.lhs, height);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            return heights;
        }
    }
}

fn rule_height(grammar: &Grammar, heights: &HashMap<&Symbol, usize>, rule: &Rule) -> Option<usize> {
    rule.rhs.iter()
        .map(|symbol| if grammar.is_non_terminal(symbol) {
            heights.get(symbol).copied()
        } else {
            Some(0)
        })
        .try_fold(0, |highest, height| height.map(|h| highest.max(h)))
        .map(|highest| highest + 1)
}

struct Generator<'g, R: Rng> {
    grammar: &'g Grammar,
    heights: HashMap<&'g Symbol, usize>,
    rng: &'g mut R,
    max_depth: usize,
}

impl<'g, R: Rng> Generator<'g, R> {
    fn generate_symbol(&mut self, symbol: &Symbol, depth: usize, word: &mut Vec<String>) -> Result<(), GenerateErrorType> {
        let grammar = self.grammar;
        if !grammar.is_non_terminal(symbol) {
            word.push(symbol.name.clone());
            return Ok(());
        }

        let best = *self.heights
            .get(symbol)
            .ok_or_else(|| GenerateErrorType::Unproductive(symbol.name.clone()))?;

        // Past the depth limit only the rules leading to the shortest
        // derivations are used, so the height strictly decreases
        let candidates: Vec<&Rule> = grammar.rules_for(symbol)
            .filter(|rule| match rule_height(grammar, &self.heights, rule) {
                Some(height) => depth < self.max_depth || height == best,
                None => false,
            })
            .collect();

        let rule = match candidates.choose(&mut *self.rng) {
            Some(rule) => *rule,
            None => return Err(GenerateErrorType::Unproductive(symbol.name.clone())),
        };

        for next in &rule.rhs {
            self.generate_symbol(next, depth + 1, word)?;
        }

        return Ok(());
    }
}

pub fn generate(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    generate_from(grammar, grammar.axiom(), rng, max_depth)
}

// Generates a word in the given grammar starting with the given symbol
pub fn generate_from(grammar: &Grammar, start: &Symbol, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    if !grammar.is_non_terminal(start) {
        return Err(GenerateErrorType::UndefinedNonterminal(start.name.clone()));
    }

    let mut generator = Generator {
        grammar,
        heights: termination_heights(grammar),
        rng,
        max_depth,
    };

    let mut word = Vec::new();
    generator.generate_symbol(start, 0, &mut word)?;
    return Ok(word);
}
