use super::builder::{DerivationBuilder, Growth};
use super::{fill_population, Initialiser, PopulationSpec};
use crate::error::{GpError, Result};
use crate::grammar::Grammar;
use crate::representation::ge::{Chromosome, Codon, GeIndividual};
use rand::RngCore;
use std::ops::Range;

fn same_phenotype(a: &GeIndividual, b: &GeIndividual) -> bool {
    a.phenotype() == b.phenotype()
}

/// Every branch of every tree is pushed to exactly `depth` levels where the
/// grammar allows it.
pub struct FullInitialiser<'g> {
    builder: DerivationBuilder<'g>,
    depth: usize,
    spec: PopulationSpec,
}

impl<'g> FullInitialiser<'g> {
    pub fn new(
        grammar: &'g Grammar,
        depth: usize,
        codon_range: Range<Codon>,
        spec: PopulationSpec,
    ) -> Self {
        Self {
            builder: DerivationBuilder::new(grammar, codon_range),
            depth,
            spec,
        }
    }
}

impl Initialiser<GeIndividual> for FullInitialiser<'_> {
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<GeIndividual>> {
        self.builder.check(self.depth)?;
        let (builder, depth) = (&self.builder, self.depth);
        fill_population(
            self.spec,
            || builder.build(Growth::Full, depth, &mut *rng),
            same_phenotype,
        )
    }

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<GeIndividual> {
        self.builder.build(Growth::Full, self.depth, rng)
    }
}

/// Trees of irregular shape with at most `depth` levels.
pub struct GrowInitialiser<'g> {
    builder: DerivationBuilder<'g>,
    depth: usize,
    spec: PopulationSpec,
}

impl<'g> GrowInitialiser<'g> {
    pub fn new(
        grammar: &'g Grammar,
        depth: usize,
        codon_range: Range<Codon>,
        spec: PopulationSpec,
    ) -> Self {
        Self {
            builder: DerivationBuilder::new(grammar, codon_range),
            depth,
            spec,
        }
    }
}

impl Initialiser<GeIndividual> for GrowInitialiser<'_> {
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<GeIndividual>> {
        self.builder.check(self.depth)?;
        if !self.spec.allow_duplicates {
            let distinct = self.builder.grammar().count_trees(self.depth);
            if distinct < self.spec.population_size as u128 {
                return Err(GpError::IllegalState(format!(
                    "Only {} distinct trees of depth {} exist, {} requested",
                    distinct, self.depth, self.spec.population_size
                )));
            }
        }
        let (builder, depth) = (&self.builder, self.depth);
        fill_population(
            self.spec,
            || builder.build(Growth::Grow, depth, &mut *rng),
            same_phenotype,
        )
    }

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<GeIndividual> {
        self.builder.build(Growth::Grow, self.depth, rng)
    }
}

/// Random chromosomes of a fixed length; validity is left to mapping.
pub struct FixedLengthInitialiser {
    chromosome_length: usize,
    codon_range: Range<Codon>,
    spec: PopulationSpec,
}

impl FixedLengthInitialiser {
    pub fn new(chromosome_length: usize, codon_range: Range<Codon>, spec: PopulationSpec) -> Self {
        Self {
            chromosome_length,
            codon_range,
            spec,
        }
    }
}

impl Initialiser<GeIndividual> for FixedLengthInitialiser {
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<GeIndividual>> {
        if self.codon_range.is_empty() {
            return Err(GpError::IllegalState(format!(
                "Empty codon range {:?}",
                self.codon_range
            )));
        }
        let (length, range) = (self.chromosome_length, &self.codon_range);
        fill_population(
            self.spec,
            || {
                Ok(GeIndividual::new(Chromosome::random(
                    length,
                    range.clone(),
                    &mut *rng,
                )))
            },
            |a, b| a.chromosome() == b.chromosome(),
        )
    }

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<GeIndividual> {
        if self.codon_range.is_empty() {
            return Err(GpError::IllegalState(format!(
                "Empty codon range {:?}",
                self.codon_range
            )));
        }
        Ok(GeIndividual::new(Chromosome::random(
            self.chromosome_length,
            self.codon_range.clone(),
            rng,
        )))
    }
}
