use std::fmt::Display;

use crate::grammar::Symbol;

// In CNF a node has no children (the terminal itself), one child (the
// terminal under `A --> a`) or two (`A --> B C`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Branches {
    Leaf,
    Unary(Box<Tree>),
    Binary(Box<Tree>, Box<Tree>),
}

/// One completed derivation. Equality is structural, so two derivations
/// with the same label but different shapes are different trees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tree {
    pub label: Symbol,
    pub branches: Branches,
}

impl Tree {
    pub fn leaf(terminal: Symbol) -> Self {
        Tree { label: terminal, branches: Branches::Leaf }
    }

    pub fn unary(label: Symbol, child: Tree) -> Self {
        Tree { label, branches: Branches::Unary(Box::new(child)) }
    }

    pub fn binary(label: Symbol, left: Tree, right: Tree) -> Self {
        Tree { label, branches: Branches::Binary(Box::new(left), Box::new(right)) }
    }

    pub fn children(&self) -> Vec<&Tree> {
        match &self.branches {
            Branches::Leaf => vec![],
            Branches::Unary(child) => vec![child.as_ref()],
            Branches::Binary(left, right) => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// The terminals under this node, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        match &self.branches {
            Branches::Leaf => vec![self.label.name.as_str()],
            _ => self.children().into_iter().flat_map(Tree::leaves).collect(),
        }
    }

    pub fn pretty(&self) -> String {
        let mut lines = Vec::new();
        self.pretty_indent(0, &mut lines);
        lines.join("\n")
    }

    fn pretty_indent(&self, indent: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(indent), self.label));
        for child in self.children() {
            child.pretty_indent(indent + 1, lines);
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.branches {
            Branches::Leaf => write!(f, "{}", self.label),
            Branches::Unary(child) => write!(f, "[ {}, {} ]", self.label, child),
            Branches::Binary(left, right) => write!(f, "[ {}, {}, {} ]", self.label, left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::fixtures::sym;

    fn unit(label: &str, terminal: &str) -> Tree {
        Tree::unary(sym(label), Tree::leaf(sym(terminal)))
    }

    #[test]
    fn display_nests_brackets() {
        let tree = Tree::binary(sym("S"), unit("A", "b"), unit("B", "b"));
        assert_eq!(tree.to_string(), "[ S, [ A, b ], [ B, b ] ]");
        assert_eq!(Tree::leaf(sym("a")).to_string(), "a");
    }

    #[test]
    fn leaves_read_left_to_right() {
        let tree = Tree::binary(sym("S"), unit("S", "a"), Tree::binary(sym("A"), unit("B", "b"), unit("S", "a")));
        assert_eq!(tree.leaves(), vec!["a", "b", "a"]);
    }

    #[test]
    fn equality_is_structural() {
        let left_heavy = Tree::binary(sym("S"), Tree::binary(sym("S"), unit("S", "a"), unit("A", "b")), unit("A", "b"));
        let right_heavy = Tree::binary(sym("S"), unit("S", "a"), Tree::binary(sym("A"), unit("B", "b"), unit("S", "a")));
        assert_ne!(left_heavy, right_heavy);
        assert_eq!(left_heavy.clone(), left_heavy);
    }

    #[test]
    fn pretty_indents_children() {
        let tree = Tree::binary(sym("S"), unit("A", "b"), unit("B", "b"));
        assert_eq!(tree.pretty(), "S\n  A\n    b\n  B\n    b");
    }
}
