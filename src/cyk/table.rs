use std::collections::HashSet;
use std::fmt::Display;

use itertools::Itertools;

use super::tree::Tree;
use crate::grammar::Symbol;

/// Half-open interval `[start, end)` over input positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Zero when `start` is not before `end`.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

// The trees found for one span, in insertion order, without duplicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    trees: Vec<Tree>,
    seen: HashSet<Tree>,
}

impl Cell {
    /// Returns false when an identical tree is already there.
    pub fn insert(&mut self, tree: Tree) -> bool {
        if self.seen.contains(&tree) {
            return false;
        }
        self.seen.insert(tree.clone());
        self.trees.push(tree);
        true
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn labeled<'a>(&'a self, label: &'a Symbol) -> impl Iterator<Item = &'a Tree> {
        self.trees.iter().filter(move |tree| tree.label == *label)
    }

    pub fn has_label(&self, label: &Symbol) -> bool {
        self.labeled(label).next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.trees.iter().map(|tree| &tree.label).join(", "))
    }
}

/// Triangular table with one cell per span of an input of length `n`.
/// `rows[i][j - i - 1]` is the cell of `[i, j)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTable {
    n: usize,
    rows: Vec<Vec<Cell>>,
}

impl ParseTable {
    pub fn new(n: usize) -> Self {
        let rows = (0..n).map(|i| vec![Cell::default(); n - i]).collect();
        ParseTable { n, rows }
    }

    /// Length of the input the table was built for.
    pub fn input_len(&self) -> usize {
        self.n
    }

    fn index(span: Span) -> Option<(usize, usize)> {
        if span.start >= span.end {
            return None;
        }
        Some((span.start, span.len() - 1))
    }

    pub fn cell(&self, span: Span) -> Option<&Cell> {
        let (row, column) = Self::index(span)?;
        self.rows.get(row)?.get(column)
    }

    pub(crate) fn insert(&mut self, span: Span, tree: Tree) -> bool {
        match Self::index(span).and_then(|(row, column)| self.rows.get_mut(row)?.get_mut(column)) {
            Some(cell) => cell.insert(tree),
            None => false,
        }
    }

    /// The cell of the whole input, absent for empty input.
    pub fn top(&self) -> Option<&Cell> {
        self.cell(Span::new(0, self.n))
    }

    /// Every span, row by row.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        (0..self.n).flat_map(move |i| (i + 1..=self.n).map(move |j| Span::new(i, j)))
    }
}

impl Display for ParseTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for span in self.spans() {
            if let Some(cell) = self.cell(span) {
                writeln!(f, "{}: {}", span, cell)?;
            }
        }
        Ok(())
    }
}
