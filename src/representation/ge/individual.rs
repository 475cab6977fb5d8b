use super::{Chromosome, DerivationTree};
use crate::engines::generation::{Candidate, FitnessFunction};
use crate::engines::mapping::{DepthFirstMapper, Mapping, MappingError};
use log::trace;
use rand::{Rng, RngCore};

/// Grammatical evolution individual: a chromosome plus lazily computed
/// phenotype and fitness.
#[derive(Debug, Clone)]
pub struct GeIndividual {
    chromosome: Chromosome,
    mapping: Option<Result<Mapping, MappingError>>,
    fitness: Option<f64>,
}

impl GeIndividual {
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            mapping: None,
            fitness: None,
        }
    }

    /// Individual whose phenotype is already known, as built by the
    /// grammar-driven initialisers. Every codon is considered mapped.
    pub fn with_phenotype(chromosome: Chromosome, tree: DerivationTree) -> Self {
        let mapped_codons = chromosome.len();
        Self {
            chromosome,
            mapping: Some(Ok(Mapping {
                tree,
                mapped_codons,
            })),
            fitness: None,
        }
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Mutable access to the codons. Drops the cached phenotype and fitness.
    pub fn chromosome_mut(&mut self) -> &mut Chromosome {
        self.mapping = None;
        self.fitness = None;
        &mut self.chromosome
    }

    pub fn into_chromosome(self) -> Chromosome {
        self.chromosome
    }

    /// Maps the chromosome on first call; later calls return the cached outcome.
    ///
    /// A cached phenotype deeper than the mapper's `max_tree_depth` is
    /// replaced by `DepthExceeded`, the outcome a fresh mapping would give.
    pub fn map<R: Rng + ?Sized>(
        &mut self,
        mapper: &DepthFirstMapper<'_>,
        rng: &mut R,
    ) -> Result<&DerivationTree, MappingError> {
        let limit = mapper.config().max_tree_depth;
        let cached_depth = match &self.mapping {
            Some(Ok(mapping)) => Some(mapping.tree.depth()),
            _ => None,
        };
        if let Some(depth) = cached_depth.filter(|&depth| depth > limit) {
            trace!("Cached phenotype of depth {} exceeds the limit of {}", depth, limit);
            self.mapping = Some(Err(MappingError::DepthExceeded { limit }));
        }

        let chromosome = &mut self.chromosome;
        let outcome = self
            .mapping
            .get_or_insert_with(|| mapper.map(chromosome, rng));
        match outcome {
            Ok(mapping) => Ok(&mapping.tree),
            Err(e) => Err(e.clone()),
        }
    }

    /// Cached phenotype, if the individual has been mapped successfully.
    pub fn phenotype(&self) -> Option<&DerivationTree> {
        match &self.mapping {
            Some(Ok(mapping)) => Some(&mapping.tree),
            _ => None,
        }
    }

    pub fn mapped_codons(&self) -> Option<usize> {
        match &self.mapping {
            Some(Ok(mapping)) => Some(mapping.mapped_codons),
            _ => None,
        }
    }

    /// `Some(false)` once mapping has been attempted and failed.
    pub fn is_valid(&self) -> Option<bool> {
        self.mapping.as_ref().map(Result::is_ok)
    }
}

impl Candidate for GeIndividual {
    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}

/// Fitness function over derivation trees, applied after mapping.
///
/// Individuals that fail to map receive the worst standardised fitness,
/// `f64::INFINITY`.
pub struct GrammarFitness<'g, F> {
    mapper: DepthFirstMapper<'g>,
    objective: F,
}

impl<'g, F> GrammarFitness<'g, F>
where
    F: FnMut(&DerivationTree) -> f64,
{
    pub fn new(mapper: DepthFirstMapper<'g>, objective: F) -> Self {
        Self { mapper, objective }
    }

    pub fn mapper(&self) -> &DepthFirstMapper<'g> {
        &self.mapper
    }
}

impl<F> FitnessFunction<GeIndividual> for GrammarFitness<'_, F>
where
    F: FnMut(&DerivationTree) -> f64,
{
    fn evaluate(&mut self, individual: &mut GeIndividual, rng: &mut dyn RngCore) -> f64 {
        match individual.map(&self.mapper, rng) {
            Ok(tree) => (self.objective)(tree),
            Err(e) => {
                trace!("Invalid individual: {}", e);
                f64::INFINITY
            }
        }
    }
}
