use super::builder::{DerivationBuilder, Growth};
use super::Initialiser;
use crate::error::{GpError, Result};
use crate::grammar::Grammar;
use crate::representation::ge::{Codon, GeIndividual};
use log::debug;
use rand::RngCore;
use std::ops::Range;

/// Splits `population_size` evenly over the depths `start..=end`; the
/// remainder goes to the deepest level.
pub fn depth_quotas(population_size: usize, start: usize, end: usize) -> Vec<(usize, usize)> {
    if start > end {
        return Vec::new();
    }
    let levels = end - start + 1;
    let per_level = population_size / levels;
    let remainder = population_size % levels;
    (start..=end)
        .map(|depth| {
            let extra = if depth == end { remainder } else { 0 };
            (depth, per_level + extra)
        })
        .collect()
}

/// Ramped half-and-half over derivation trees.
///
/// Each depth level gets an even share of the population and builds it by
/// alternating Grow and Full on every attempt, discarded duplicates
/// included. When duplicates are not allowed and a level has fewer distinct
/// trees left than its share, the shortfall moves to the next level.
pub struct RampedHalfAndHalf<'g> {
    builder: DerivationBuilder<'g>,
    start_depth: usize,
    end_depth: usize,
    population_size: usize,
    allow_duplicates: bool,
    next_growth: Growth,
}

impl<'g> RampedHalfAndHalf<'g> {
    pub fn new(
        grammar: &'g Grammar,
        start_depth: usize,
        end_depth: usize,
        codon_range: Range<Codon>,
        population_size: usize,
        allow_duplicates: bool,
    ) -> Self {
        Self {
            builder: DerivationBuilder::new(grammar, codon_range),
            start_depth,
            end_depth,
            population_size,
            allow_duplicates,
            next_growth: Growth::Grow,
        }
    }

    fn take_turn(&mut self) -> Growth {
        let growth = self.next_growth;
        self.next_growth = growth.other();
        growth
    }

    fn check(&self) -> Result<()> {
        if self.start_depth > self.end_depth {
            return Err(GpError::Configuration(format!(
                "Start depth {} exceeds end depth {}",
                self.start_depth, self.end_depth
            )));
        }
        self.builder.check(self.start_depth)
    }
}

impl Initialiser<GeIndividual> for RampedHalfAndHalf<'_> {
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<GeIndividual>> {
        self.check()?;
        self.next_growth = Growth::Grow;

        let mut population: Vec<GeIndividual> = Vec::with_capacity(self.population_size);
        let mut shortfall = 0;
        for (depth, quota) in depth_quotas(self.population_size, self.start_depth, self.end_depth) {
            let mut target = quota + shortfall;
            shortfall = 0;

            if !self.allow_duplicates {
                let available = self
                    .builder
                    .grammar()
                    .count_trees(depth)
                    .saturating_sub(population.len() as u128);
                if available < target as u128 {
                    if depth == self.end_depth {
                        return Err(GpError::IllegalState(format!(
                            "Only {} more distinct trees of depth {} exist, {} needed",
                            available, depth, target
                        )));
                    }
                    // available < target, so it fits in usize
                    let available = available as usize;
                    debug!(
                        "Depth {} can only supply {} of {} individuals",
                        depth, available, target
                    );
                    shortfall = target - available;
                    target = available;
                }
            }

            let mut created = 0;
            while created < target {
                let growth = self.take_turn();
                let candidate = self.builder.build(growth, depth, &mut *rng)?;
                if !self.allow_duplicates
                    && population
                        .iter()
                        .any(|existing| existing.phenotype() == candidate.phenotype())
                {
                    debug!("Duplicate {:?} tree at depth {} discarded", growth, depth);
                    continue;
                }
                population.push(candidate);
                created += 1;
            }
        }
        Ok(population)
    }

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<GeIndividual> {
        self.check()?;
        let growth = self.take_turn();
        self.builder.build(growth, self.end_depth, rng)
    }
}
