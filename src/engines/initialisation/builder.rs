use super::codon::codon_for_production;
use crate::error::{GpError, Result};
use crate::grammar::{Grammar, RuleId, Symbol};
use crate::representation::ge::{
    Chromosome, Codon, DerivationNode, DerivationTree, GeIndividual, NonTerminalNode,
};
use rand::Rng;
use std::ops::Range;

/// How productions are chosen while building a derivation tree directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    /// Recursive productions are preferred whenever one fits, pushing every
    /// branch towards the target depth.
    Full,
    /// Any production that fits the remaining depth.
    Grow,
}

impl Growth {
    pub fn other(self) -> Self {
        match self {
            Growth::Full => Growth::Grow,
            Growth::Grow => Growth::Full,
        }
    }
}

/// Builds a derivation tree and the chromosome that maps back onto it.
///
/// Codons are emitted in the order the mapper consumes them, and only for
/// rules with more than one production.
#[derive(Debug, Clone)]
pub struct DerivationBuilder<'g> {
    grammar: &'g Grammar,
    codon_range: Range<Codon>,
}

impl<'g> DerivationBuilder<'g> {
    pub fn new(grammar: &'g Grammar, codon_range: Range<Codon>) -> Self {
        Self {
            grammar,
            codon_range,
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn codon_range(&self) -> &Range<Codon> {
        &self.codon_range
    }

    /// Fails with `IllegalState` when no tree of `depth` levels exists or the
    /// codon range cannot encode the grammar's choices.
    pub fn check(&self, depth: usize) -> Result<()> {
        let min_depth = self.grammar.start_rule().min_depth();
        if min_depth > depth {
            return Err(GpError::IllegalState(format!(
                "Grammar needs a depth of at least {}, requested {}",
                min_depth, depth
            )));
        }
        if self.codon_range.end < 3 {
            return Err(GpError::IllegalState(
                "Maximum codon value must be at least 3".to_string(),
            ));
        }
        Ok(())
    }

    pub fn build<R: Rng + ?Sized>(
        &self,
        growth: Growth,
        depth: usize,
        rng: &mut R,
    ) -> Result<GeIndividual> {
        self.check(depth)?;
        let mut chromosome = Chromosome::new();
        let root = self.expand(
            self.grammar.start_rule().id(),
            depth,
            growth,
            &mut chromosome,
            rng,
        )?;
        Ok(GeIndividual::with_phenotype(
            chromosome,
            DerivationTree::new(root),
        ))
    }

    /// `remaining` counts the expansion levels still available, this one included.
    fn expand<R: Rng + ?Sized>(
        &self,
        rule_id: RuleId,
        remaining: usize,
        growth: Growth,
        chromosome: &mut Chromosome,
        rng: &mut R,
    ) -> Result<NonTerminalNode> {
        let rule = self.grammar.rule(rule_id);

        let production_index = if rule.production_count() == 1 {
            0
        } else {
            let fitting: Vec<usize> = rule
                .productions()
                .iter()
                .enumerate()
                .filter(|(_, p)| p.min_depth() <= remaining)
                .map(|(i, _)| i)
                .collect();
            let candidates = match growth {
                Growth::Full if fitting.iter().any(|&i| rule.production(i).is_recursive()) => {
                    fitting
                        .into_iter()
                        .filter(|&i| rule.production(i).is_recursive())
                        .collect()
                }
                _ => fitting,
            };
            if candidates.is_empty() {
                return Err(GpError::IllegalState(format!(
                    "No production of <{}> fits in {} levels",
                    rule.name(),
                    remaining
                )));
            }

            let chosen = candidates[rng.gen_range(0..candidates.len())];
            chromosome.append(codon_for_production(
                chosen,
                rule.production_count(),
                &self.codon_range,
                rng,
            )?);
            chosen
        };

        let production = rule.production(production_index);
        let mut children = Vec::with_capacity(production.symbols().len());
        for symbol in production.symbols() {
            match symbol {
                Symbol::Rule(child) => children.push(DerivationNode::NonTerminal(self.expand(
                    *child,
                    remaining - 1,
                    growth,
                    chromosome,
                    rng,
                )?)),
                Symbol::Literal(text) => children.push(DerivationNode::Terminal(text.clone())),
            }
        }

        Ok(NonTerminalNode {
            rule: rule_id,
            production: production_index,
            children,
        })
    }
}
