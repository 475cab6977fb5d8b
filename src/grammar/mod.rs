//! Context-free grammar model used by grammatical evolution.
//!
//! A [`Grammar`] is built once and never mutated. Rules are stored in an
//! arena and referenced by [`RuleId`], so a cyclic rule graph needs no
//! shared ownership. Per-production metadata (`min_depth`, recursiveness)
//! is computed at construction time.

pub mod analysis;
pub mod parser;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GrammarError {
    #[error("Failed to read grammar file: {0}")]
    FileRead(String),
    #[error("Failed to parse rule on line {line}: '{text}'")]
    Parse { line: usize, text: String },
    #[error("Grammar contains no rules")]
    Empty,
    #[error("Start rule '{0}' not found in grammar")]
    MissingStartRule(String),
    #[error("Undefined rule '{name}' referenced from '{from}'")]
    UndefinedRule { name: String, from: String },
    #[error("Rule '{0}' can never derive a string of terminals")]
    NonTerminatingRule(String),
}

/// Index of a rule inside its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

impl RuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Non-terminal reference
    Rule(RuleId),
    /// Terminal text
    Literal(String),
}

/// Unresolved symbol, as written in a grammar definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSymbol {
    NonTerminal(String),
    Literal(String),
}

impl RawSymbol {
    pub fn rule(name: impl Into<String>) -> Self {
        RawSymbol::NonTerminal(name.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        RawSymbol::Literal(text.into())
    }
}

/// One rule as written: a name plus its alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub name: String,
    pub alternatives: Vec<Vec<RawSymbol>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    symbols: Vec<Symbol>,
    min_depth: usize,
    recursive: bool,
}

impl Production {
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Fewest expansion levels needed to reach only terminals through this production.
    pub fn min_depth(&self) -> usize {
        self.min_depth
    }

    /// Whether expanding this production can lead back to its own rule.
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    id: RuleId,
    name: String,
    productions: Vec<Production>,
    min_depth: usize,
}

impl Rule {
    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    pub fn production_count(&self) -> usize {
        self.productions.len()
    }

    pub fn min_depth(&self) -> usize {
        self.min_depth
    }

    pub fn is_recursive(&self) -> bool {
        self.productions.iter().any(Production::is_recursive)
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
    start: RuleId,
    by_name: HashMap<String, RuleId>,
}

impl Grammar {
    /// Builds a grammar from rule definitions. The first definition is the start rule.
    ///
    /// Definitions sharing a name are merged, their alternatives appended in order.
    pub fn new(definitions: Vec<RuleDefinition>) -> Result<Self, GrammarError> {
        let start = definitions
            .first()
            .map(|d| d.name.clone())
            .ok_or(GrammarError::Empty)?;
        Self::with_start(definitions, &start)
    }

    /// Builds a grammar from rule definitions with an explicit start rule name.
    pub fn with_start(definitions: Vec<RuleDefinition>, start: &str) -> Result<Self, GrammarError> {
        if definitions.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut by_name: HashMap<String, RuleId> = HashMap::new();
        let mut merged: Vec<RuleDefinition> = Vec::new();
        for definition in definitions {
            match by_name.get(&definition.name) {
                Some(id) => merged[id.0].alternatives.extend(definition.alternatives),
                None => {
                    by_name.insert(definition.name.clone(), RuleId(merged.len()));
                    merged.push(definition);
                }
            }
        }

        let start = *by_name
            .get(start)
            .ok_or_else(|| GrammarError::MissingStartRule(start.to_string()))?;

        let mut resolved: Vec<Vec<Vec<Symbol>>> = Vec::with_capacity(merged.len());
        for definition in &merged {
            let mut alternatives = Vec::with_capacity(definition.alternatives.len());
            for alternative in &definition.alternatives {
                let symbols = alternative
                    .iter()
                    .map(|raw| match raw {
                        RawSymbol::Literal(text) => Ok(Symbol::Literal(text.clone())),
                        RawSymbol::NonTerminal(name) => by_name
                            .get(name)
                            .copied()
                            .map(Symbol::Rule)
                            .ok_or_else(|| GrammarError::UndefinedRule {
                                name: name.clone(),
                                from: definition.name.clone(),
                            }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                alternatives.push(symbols);
            }
            resolved.push(alternatives);
        }

        let rule_depths = analysis::rule_min_depths(&resolved);
        if let Some(stuck) = rule_depths.iter().position(Option::is_none) {
            return Err(GrammarError::NonTerminatingRule(merged[stuck].name.clone()));
        }
        let rule_depths: Vec<usize> = rule_depths.into_iter().flatten().collect();
        let reach = analysis::reachability(&resolved);

        let rules = merged
            .into_iter()
            .zip(resolved)
            .enumerate()
            .map(|(index, (definition, alternatives))| {
                let productions: Vec<Production> = alternatives
                    .into_iter()
                    .map(|symbols| Production {
                        min_depth: analysis::production_min_depth(&symbols, &rule_depths),
                        recursive: analysis::reaches(&symbols, index, &reach),
                        symbols,
                    })
                    .collect();
                Rule {
                    id: RuleId(index),
                    name: definition.name,
                    min_depth: rule_depths[index],
                    productions,
                }
            })
            .collect();

        Ok(Self { rules, start, by_name })
    }

    /// Parses a BNF grammar from text.
    pub fn parse(source: &str) -> Result<Self, GrammarError> {
        Self::new(parser::parse_bnf(source)?)
    }

    /// Reads and parses a BNF grammar file.
    pub fn from_file(path: &Path) -> Result<Self, GrammarError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| GrammarError::FileRead(format!("{}: {}", path.display(), e)))?;
        Self::parse(&source)
    }

    pub fn start_rule(&self) -> &Rule {
        &self.rules[self.start.0]
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.0]
    }

    pub fn rule_by_name(&self, name: &str) -> Option<&Rule> {
        self.by_name.get(name).map(|id| &self.rules[id.0])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of distinct derivation trees from the start rule with depth at most `max_depth`.
    ///
    /// Saturates at `u128::MAX`.
    pub fn count_trees(&self, max_depth: usize) -> u128 {
        analysis::count_trees(self, self.start, max_depth)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "<{}> ::=", rule.name)?;
            for (i, production) in rule.productions.iter().enumerate() {
                if i > 0 {
                    write!(f, " |")?;
                }
                for symbol in &production.symbols {
                    match symbol {
                        Symbol::Rule(id) => write!(f, " <{}>", self.rules[id.0].name)?,
                        Symbol::Literal(text) => write!(f, " \"{}\"", text)?,
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
