/*
    This module is for storing and querying grammars
*/

pub mod cnf;

use std::collections::HashSet;
use std::fmt::Display;

use itertools::Itertools;

// The base unit in a grammar rule. Two symbols with the same name are the
// same symbol, whichever grammar or tree they come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    pub name: String,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol { name: name.into() }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// A single production `lhs --> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Rule {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Rule { lhs, rhs }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --> [{}]", self.lhs, self.rhs.iter().join(","))
    }
}

// Built once and never changed in place, so the non-terminal set always
// matches the rules
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    name: String,
    symbols: Vec<Symbol>,
    axiom: Symbol,
    rules: Vec<Rule>,
    non_terminals: HashSet<Symbol>,
}

impl Grammar {
    pub fn new(name: impl Into<String>, symbols: Vec<Symbol>, axiom: Symbol, rules: Vec<Rule>) -> Self {
        let non_terminals = rules.iter().map(|rule| rule.lhs.clone()).collect();

        Grammar {
            name: name.into(),
            symbols,
            axiom,
            rules,
            non_terminals,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The vocabulary, terminals and non-terminals alike.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn axiom(&self) -> &Symbol {
        &self.axiom
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// True iff `symbol` is the left hand side of at least one rule.
    pub fn is_non_terminal(&self, symbol: &Symbol) -> bool {
        self.non_terminals.contains(symbol)
    }

    pub fn non_terminals(&self) -> &HashSet<Symbol> {
        &self.non_terminals
    }

    /// Vocabulary symbols that no rule defines.
    pub fn terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(move |symbol| !self.is_non_terminal(symbol))
    }

    pub fn rules_for<'a>(&'a self, lhs: &'a Symbol) -> impl Iterator<Item = &'a Rule> {
        self.rules.iter().filter(move |rule| rule.lhs == *lhs)
    }

    /// Returns a symbol named `base` followed by as few `'` as needed for
    /// the name to be unused in the vocabulary. The grammar is left as is.
    pub fn create_new_symbol(&self, base: &str) -> Symbol {
        let mut name = base.to_string();
        while self.symbols.iter().any(|symbol| symbol.name == name) {
            name.push('\'');
        }

        Symbol::new(name)
    }

    /// The same grammar with another start symbol.
    pub fn with_axiom(self, axiom: Symbol) -> Self {
        Grammar { axiom, ..self }
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{symbols = [{}] axiom = {} rules = [{}]}}",
            self.symbols.iter().join(","),
            self.axiom,
            self.rules.iter().join(", ")
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /*
        Small grammars shared by the tests of several modules
    */

    use super::*;

    pub fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    pub fn rule(lhs: &str, rhs: &[&str]) -> Rule {
        Rule::new(sym(lhs), rhs.iter().map(|name| sym(name)).collect())
    }

    fn grammar(name: &str, symbols: &[&str], rules: Vec<Rule>) -> Grammar {
        Grammar::new(name, symbols.iter().map(|name| sym(name)).collect(), sym("S"), rules)
    }

    // S -> AB | a, A -> SB | b, B -> b
    pub fn g1() -> Grammar {
        grammar("g1", &["S", "A", "B", "a", "b"], vec![
            rule("S", &["A", "B"]),
            rule("S", &["a"]),
            rule("A", &["S", "B"]),
            rule("A", &["b"]),
            rule("B", &["b"]),
        ])
    }

    // S -> AS | b, A -> a
    pub fn g2() -> Grammar {
        grammar("g2", &["S", "A", "b", "a"], vec![
            rule("S", &["A", "S"]),
            rule("S", &["b"]),
            rule("A", &["a"]),
        ])
    }

    // S -> SA | a, A -> BS | CS, B -> b, C -> c (ambiguous)
    pub fn g3() -> Grammar {
        grammar("g3", &["S", "A", "a", "B", "C", "b", "c"], vec![
            rule("S", &["S", "A"]),
            rule("S", &["a"]),
            rule("A", &["B", "S"]),
            rule("A", &["C", "S"]),
            rule("B", &["b"]),
            rule("C", &["c"]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn non_terminals_are_rule_heads() {
        let g = g1();
        for name in ["S", "A", "B"] {
            assert!(g.is_non_terminal(&sym(name)), "{} should be a non-terminal", name);
        }
        for name in ["a", "b", "C"] {
            assert!(!g.is_non_terminal(&sym(name)), "{} should not be a non-terminal", name);
        }
        assert_eq!(g.terminals().cloned().collect_vec(), vec![sym("a"), sym("b")]);
    }

    #[test]
    fn new_symbol_avoids_the_vocabulary() {
        let g = g1();
        assert_eq!(g.create_new_symbol("X"), sym("X"));
        assert_eq!(g.create_new_symbol("S"), sym("S'"));

        let mut symbols = g.symbols().to_vec();
        symbols.extend([sym("S'"), sym("S''")]);
        let g = Grammar::new("primed", symbols, sym("S"), g.rules().to_vec());
        assert_eq!(g.create_new_symbol("S"), sym("S'''"));
        // Nothing gets registered
        assert_eq!(g.symbols().len(), 7);
    }

    #[test]
    fn non_terminals_follow_the_rules_given() {
        let mut rules = g2().rules().to_vec();
        rules.push(rule("X", &["a"]));
        let g = Grammar::new("g2x", g2().symbols().to_vec(), sym("S"), rules);
        assert!(g.is_non_terminal(&sym("X")));
        assert_eq!(g.non_terminals().len(), 3);
        assert!(!g2().is_non_terminal(&sym("X")));

        let g = g.with_axiom(sym("X"));
        assert_eq!(g.axiom(), &sym("X"));
        assert_eq!(g.name(), "g2x");
        assert_eq!(g.non_terminals().len(), 3);
    }

    #[test]
    fn rules_for_keeps_file_order() {
        let g = g3();
        assert_eq!(g.rules_for(&sym("A")).collect_vec(), vec![
            &rule("A", &["B", "S"]),
            &rule("A", &["C", "S"]),
        ]);
        assert_eq!(g.rules_for(&sym("a")).count(), 0);
    }

    #[test]
    fn axiom_override() {
        let g = g1().with_axiom(sym("A"));
        assert_eq!(g.axiom(), &sym("A"));
        assert!(g.is_non_terminal(&sym("S")));
    }

    #[test]
    fn display_formats() {
        assert_eq!(rule("S", &["A", "B"]).to_string(), "S --> [A,B]");
        assert_eq!(g2().to_string(), "{symbols = [S,A,b,a] axiom = S rules = [S --> [A,S], S --> [b], A --> [a]]}");
    }
}
