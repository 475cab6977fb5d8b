use super::{Chromosome, Codon, GeIndividual};
use crate::engines::generation::{CrossoverOperator, MutationOperator};
use rand::{Rng, RngCore};
use std::ops::Range;

/// One-point crossover: an independent cut point in each parent, tails swapped.
#[derive(Debug, Clone, Default)]
pub struct OnePointCrossover;

impl OnePointCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator<GeIndividual> for OnePointCrossover {
    fn name(&self) -> &'static str {
        "one-point crossover"
    }

    fn crossover(
        &mut self,
        parent1: &GeIndividual,
        parent2: &GeIndividual,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<GeIndividual>> {
        let mut child1 = parent1.chromosome().clone();
        let mut child2 = parent2.chromosome().clone();
        if child1.is_empty() || child2.is_empty() {
            return None;
        }

        let point1 = rng.gen_range(0..child1.len());
        let point2 = rng.gen_range(0..child2.len());

        let len1 = child1.len();
        let len2 = child2.len();
        let tail1 = child1.remove_range(point1, len1).ok()?;
        let tail2 = child2.remove_range(point2, len2).ok()?;
        child1.extend(tail2);
        child2.extend(tail1);

        Some(vec![GeIndividual::new(child1), GeIndividual::new(child2)])
    }
}

/// Point mutation: each codon is replaced with probability `probability`.
#[derive(Debug, Clone)]
pub struct PointMutation {
    probability: f64,
    codon_range: Range<Codon>,
}

impl PointMutation {
    pub fn new(probability: f64, codon_range: Range<Codon>) -> Self {
        Self {
            probability,
            codon_range,
        }
    }
}

impl MutationOperator<GeIndividual> for PointMutation {
    fn name(&self) -> &'static str {
        "point mutation"
    }

    fn mutate(&mut self, parent: &GeIndividual, rng: &mut dyn RngCore) -> Option<GeIndividual> {
        let mutated: Chromosome = parent
            .chromosome()
            .iter()
            .map(|&codon| {
                if rng.gen::<f64>() < self.probability {
                    rng.gen_range(self.codon_range.clone())
                } else {
                    codon
                }
            })
            .collect();
        Some(GeIndividual::new(mutated))
    }
}
