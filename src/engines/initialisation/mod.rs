pub mod builder;
pub mod codon;
pub mod ge;
pub mod ramped;
pub mod tree;

pub use builder::{DerivationBuilder, Growth};
pub use codon::codon_for_production;
pub use ge::{FixedLengthInitialiser, FullInitialiser, GrowInitialiser};
pub use ramped::{depth_quotas, RampedHalfAndHalf};
pub use tree::{TreeFull, TreeGrow, TreeRampedHalfAndHalf};

use crate::config::{AppConfig, InitialisationMethod};
use crate::error::{GpError, Result};
use crate::grammar::Grammar;
use crate::representation::ge::GeIndividual;
use log::debug;
use rand::RngCore;

/// Creates the first population of a run.
pub trait Initialiser<I> {
    /// Exactly `population_size` individuals, or an error.
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<I>>;

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<I>;
}

/// Settings shared by the initialisers that retry on duplicates.
#[derive(Debug, Clone, Copy)]
pub struct PopulationSpec {
    pub population_size: usize,
    pub allow_duplicates: bool,
    pub max_duplicate_retries: usize,
}

impl PopulationSpec {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            population_size: config.evolution.population_size,
            allow_duplicates: config.initialisation.allow_duplicates,
            max_duplicate_retries: config.initialisation.max_duplicate_retries,
        }
    }
}

/// Calls `create` until `spec.population_size` individuals are collected,
/// discarding duplicates under `same` unless they are allowed.
pub(crate) fn fill_population<I>(
    spec: PopulationSpec,
    mut create: impl FnMut() -> Result<I>,
    same: impl Fn(&I, &I) -> bool,
) -> Result<Vec<I>> {
    let mut population = Vec::with_capacity(spec.population_size);
    let mut duplicates = 0;
    while population.len() < spec.population_size {
        let candidate = create()?;
        if !spec.allow_duplicates && population.iter().any(|existing| same(existing, &candidate)) {
            duplicates += 1;
            debug!("Duplicate individual discarded ({} in a row)", duplicates);
            if duplicates > spec.max_duplicate_retries {
                return Err(GpError::IllegalState(format!(
                    "Gave up after {} consecutive duplicates with {} of {} individuals created",
                    duplicates,
                    population.len(),
                    spec.population_size
                )));
            }
            continue;
        }
        duplicates = 0;
        population.push(candidate);
    }
    Ok(population)
}

/// The GE initialiser selected by `config.initialisation.method`.
///
/// Fails with `Configuration` when `config` is invalid, including initial
/// trees deeper than the mapper accepts.
pub fn ge_initialiser<'g>(
    grammar: &'g Grammar,
    config: &AppConfig,
) -> Result<Box<dyn Initialiser<GeIndividual> + 'g>> {
    config.validate()?;
    let spec = PopulationSpec::from_config(config);
    let init = &config.initialisation;
    let codon_range = config.mapping.codon_range();
    let initialiser: Box<dyn Initialiser<GeIndividual> + 'g> = match init.method {
        InitialisationMethod::Full => {
            Box::new(FullInitialiser::new(grammar, init.depth, codon_range, spec))
        }
        InitialisationMethod::Grow => {
            Box::new(GrowInitialiser::new(grammar, init.depth, codon_range, spec))
        }
        InitialisationMethod::FixedLength => Box::new(FixedLengthInitialiser::new(
            init.chromosome_length,
            codon_range,
            spec,
        )),
        InitialisationMethod::RampedHalfAndHalf => Box::new(RampedHalfAndHalf::new(
            grammar,
            init.start_depth,
            init.end_depth,
            codon_range,
            spec.population_size,
            spec.allow_duplicates,
        )),
    };
    Ok(initialiser)
}
