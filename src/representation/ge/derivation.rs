use crate::grammar::{Grammar, RuleId};
use std::fmt;

/// Child of a non-terminal in a derivation tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DerivationNode {
    NonTerminal(NonTerminalNode),
    Terminal(String),
}

/// Expansion of one rule: the chosen production and one child per symbol of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonTerminalNode {
    pub rule: RuleId,
    pub production: usize,
    pub children: Vec<DerivationNode>,
}

impl NonTerminalNode {
    /// Rule-expansion levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                DerivationNode::NonTerminal(node) => node.depth(),
                DerivationNode::Terminal(_) => 0,
            })
            .max()
            .unwrap_or(0)
    }

    /// Length of the shallowest path from this node down to a leaf.
    pub fn min_leaf_depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                DerivationNode::NonTerminal(node) => node.min_leaf_depth(),
                DerivationNode::Terminal(_) => 0,
            })
            .min()
            .unwrap_or(0)
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                DerivationNode::NonTerminal(node) => node.collect_terminals(out),
                DerivationNode::Terminal(text) => out.push(text),
            }
        }
    }

    fn count_nodes(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                DerivationNode::NonTerminal(node) => node.count_nodes(),
                DerivationNode::Terminal(_) => 1,
            })
            .sum::<usize>()
    }
}

/// Phenotype of a grammatical evolution individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationTree {
    root: NonTerminalNode,
}

impl DerivationTree {
    pub fn new(root: NonTerminalNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &NonTerminalNode {
        &self.root
    }

    /// Longest root-to-leaf path, counted in rule expansions.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Shortest root-to-leaf path, counted in rule expansions.
    pub fn min_leaf_depth(&self) -> usize {
        self.root.min_leaf_depth()
    }

    pub fn terminals(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_terminals(&mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.terminals().len()
    }

    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// Terminal literals joined by single spaces.
    pub fn to_source(&self) -> String {
        self.terminals().join(" ")
    }

    /// Bracketed rendering showing every rule expansion.
    pub fn display<'a>(&'a self, grammar: &'a Grammar) -> impl fmt::Display + 'a {
        TreeDisplay { node: &self.root, grammar }
    }
}

struct TreeDisplay<'a> {
    node: &'a NonTerminalNode,
    grammar: &'a Grammar,
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.grammar.rule(self.node.rule).name())?;
        for child in &self.node.children {
            match child {
                DerivationNode::NonTerminal(node) => write!(
                    f,
                    " {}",
                    TreeDisplay {
                        node,
                        grammar: self.grammar
                    }
                )?,
                DerivationNode::Terminal(text) => write!(f, " {:?}", text)?,
            }
        }
        write!(f, ")")
    }
}
