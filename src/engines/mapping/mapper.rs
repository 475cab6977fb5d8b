use super::codon_consumer::CodonConsumer;
use super::MappingError;
use crate::config::mapping::MappingConfig;
use crate::grammar::{Grammar, RuleId, Symbol};
use crate::representation::ge::{Chromosome, DerivationNode, DerivationTree, NonTerminalNode};
use log::trace;
use rand::Rng;

/// Successful genotype-to-phenotype mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub tree: DerivationTree,
    /// Codons actually read; a codon reused by wrapping counts once.
    pub mapped_codons: usize,
}

/// Maps a chromosome onto a derivation tree by a depth-first walk of the grammar.
///
/// Codons are consumed only at rules with more than one production, and the
/// chosen production is `codon % production_count`.
#[derive(Clone)]
pub struct DepthFirstMapper<'g> {
    grammar: &'g Grammar,
    config: MappingConfig,
}

impl<'g> DepthFirstMapper<'g> {
    pub fn new(grammar: &'g Grammar, config: MappingConfig) -> Self {
        Self { grammar, config }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Maps `chromosome`, which may grow (extension policy) or shrink
    /// (unused codon removal) as a side effect.
    ///
    /// `rng` is only drawn from when the extension policy synthesises codons.
    pub fn map<R: Rng + ?Sized>(
        &self,
        chromosome: &mut Chromosome,
        rng: &mut R,
    ) -> Result<Mapping, MappingError> {
        let (root, mapped_codons) = {
            let mut consumer = CodonConsumer::new(
                chromosome,
                self.config.shortage,
                self.config.codon_range(),
                rng,
            );
            let root = self.expand(self.grammar.start_rule().id(), 0, &mut consumer)?;
            (root, consumer.used())
        };

        if self.config.remove_unused_codons && mapped_codons < chromosome.len() {
            trace!(
                "Removing {} unused codons",
                chromosome.len() - mapped_codons
            );
            chromosome.truncate(mapped_codons);
        }

        Ok(Mapping {
            tree: DerivationTree::new(root),
            mapped_codons,
        })
    }

    fn expand<R: Rng + ?Sized>(
        &self,
        rule_id: RuleId,
        depth: usize,
        consumer: &mut CodonConsumer<'_, R>,
    ) -> Result<NonTerminalNode, MappingError> {
        let rule = self.grammar.rule(rule_id);

        let production_index = if rule.production_count() == 1 {
            0
        } else {
            consumer.choose(rule.production_count())?
        };

        if depth + 1 > self.config.max_tree_depth {
            return Err(MappingError::DepthExceeded {
                limit: self.config.max_tree_depth,
            });
        }

        let production = rule.production(production_index);
        let mut children = Vec::with_capacity(production.symbols().len());
        for symbol in production.symbols() {
            match symbol {
                Symbol::Rule(child) => children.push(DerivationNode::NonTerminal(
                    self.expand(*child, depth + 1, consumer)?,
                )),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mapping::ShortagePolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn binary_grammar() -> Grammar {
        Grammar::parse("<S> ::= a | <S> <S>").unwrap()
    }

    fn config(max_tree_depth: usize, shortage: ShortagePolicy) -> MappingConfig {
        MappingConfig {
            max_tree_depth,
            shortage,
            remove_unused_codons: true,
            min_codon_value: 0,
            max_codon_value: 100,
        }
    }

    #[test]
    fn test_maps_codons_depth_first() {
        let grammar = binary_grammar();
        let mapper = DepthFirstMapper::new(&grammar, config(5, ShortagePolicy::Fail));
        let mut rng = StdRng::seed_from_u64(0);

        // 1 -> S S; 0 -> a; 3 -> S S; 2 -> a; 4 -> a
        let mut chromosome = Chromosome::from(vec![1, 0, 3, 2, 4, 99, 98]);
        let mapping = mapper.map(&mut chromosome, &mut rng).unwrap();

        assert_eq!(mapping.tree.to_source(), "a a a");
        assert_eq!(mapping.tree.depth(), 3);
        assert_eq!(mapping.mapped_codons, 5);
        // unused tail removed
        assert_eq!(chromosome.as_slice(), &[1, 0, 3, 2, 4]);
    }

    #[test]
    fn test_unused_codons_kept_when_disabled() {
        let grammar = binary_grammar();
        let mut mapping_config = config(5, ShortagePolicy::Fail);
        mapping_config.remove_unused_codons = false;
        let mapper = DepthFirstMapper::new(&grammar, mapping_config);
        let mut rng = StdRng::seed_from_u64(0);

        let mut chromosome = Chromosome::from(vec![0, 7, 7]);
        let mapping = mapper.map(&mut chromosome, &mut rng).unwrap();
        assert_eq!(mapping.mapped_codons, 1);
        assert_eq!(chromosome.len(), 3);
    }

    #[test]
    fn test_single_production_rules_consume_nothing() {
        let grammar = Grammar::parse("<s> ::= <x> <y>\n<x> ::= x\n<y> ::= y | z").unwrap();
        let mapper = DepthFirstMapper::new(&grammar, config(5, ShortagePolicy::Fail));
        let mut rng = StdRng::seed_from_u64(0);

        let mut chromosome = Chromosome::from(vec![1]);
        let mapping = mapper.map(&mut chromosome, &mut rng).unwrap();
        assert_eq!(mapping.tree.to_source(), "x z");
        assert_eq!(mapping.mapped_codons, 1);
    }

    #[test]
    fn test_depth_exceeded_invalidates_whole_tree() {
        let grammar = binary_grammar();
        let mapper = DepthFirstMapper::new(&grammar, config(2, ShortagePolicy::Fail));
        let mut rng = StdRng::seed_from_u64(0);

        // left branch fine, right branch wants a third level
        let mut chromosome = Chromosome::from(vec![1, 0, 1, 0, 0]);
        assert_eq!(
            mapper.map(&mut chromosome, &mut rng),
            Err(MappingError::DepthExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_wrapping_reuses_codons_once_counted() {
        let grammar = Grammar::parse("<s> ::= <d> <d> <d>\n<d> ::= 0 | 1").unwrap();
        let mapper = DepthFirstMapper::new(&grammar, config(3, ShortagePolicy::Wrap { max_wraps: 1 }));
        let mut rng = StdRng::seed_from_u64(0);

        let mut chromosome = Chromosome::from(vec![1, 0]);
        let mapping = mapper.map(&mut chromosome, &mut rng).unwrap();
        assert_eq!(mapping.tree.to_source(), "1 0 1");
        assert_eq!(mapping.mapped_codons, 2);
        assert_eq!(chromosome.len(), 2);

        let strict = DepthFirstMapper::new(&grammar, config(3, ShortagePolicy::Wrap { max_wraps: 0 }));
        let mut chromosome = Chromosome::from(vec![1, 0]);
        assert_eq!(
            strict.map(&mut chromosome, &mut rng),
            Err(MappingError::ExcessiveWrapping { limit: 0 })
        );
    }

    #[test]
    fn test_excessive_wrapping() {
        let grammar = binary_grammar();
        let mapper = DepthFirstMapper::new(&grammar, config(10, ShortagePolicy::Wrap { max_wraps: 1 }));
        let mut rng = StdRng::seed_from_u64(0);

        // every read picks S S, so the walk keeps asking for codons
        let mut chromosome = Chromosome::from(vec![1, 1]);
        assert_eq!(
            mapper.map(&mut chromosome, &mut rng),
            Err(MappingError::ExcessiveWrapping { limit: 1 })
        );
    }

    #[test]
    fn test_extension_grows_chromosome() {
        let grammar = binary_grammar();
        let mapper = DepthFirstMapper::new(
            &grammar,
            config(
                4,
                ShortagePolicy::Extend {
                    max_chromosome_length: 10,
                },
            ),
        );
        let mut rng = StdRng::seed_from_u64(3);

        let mut chromosome = Chromosome::new();
        match mapper.map(&mut chromosome, &mut rng) {
            Ok(mapping) => {
                assert!(mapping.tree.depth() <= 4);
                assert_eq!(mapping.mapped_codons, chromosome.len());
            }
            Err(e) => assert!(matches!(
                e,
                MappingError::DepthExceeded { .. } | MappingError::ChromosomeFull { .. }
            )),
        }
        assert!(!chromosome.is_empty());
        assert!(chromosome.len() <= 10);
    }

    #[test]
    fn test_exhausted_without_policy() {
        let grammar = binary_grammar();
        let mapper = DepthFirstMapper::new(&grammar, config(5, ShortagePolicy::Fail));
        let mut rng = StdRng::seed_from_u64(0);

        let mut chromosome = Chromosome::from(vec![1, 0]);
        assert_eq!(
            mapper.map(&mut chromosome, &mut rng),
            Err(MappingError::ChromosomeExhausted)
        );
    }
}
