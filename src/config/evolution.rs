use super::traits::{ensure, ConfigSection};
use crate::error::GpError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
    /// Per-codon (or per-tree) rate used by the mutation operator itself.
    pub point_mutation_rate: f64,
    pub elitism: usize,
    /// Breeding pool size; `None` breeds directly from the previous population.
    pub pool_size: Option<usize>,
    pub pool_selection: SelectionMethod,
    pub parent_selection: SelectionMethod,
    pub tournament_size: usize,
    pub target_fitness: Option<f64>,
    /// Reverts tolerated at any single hook before the run fails.
    pub max_reversions: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMethod {
    Tournament,
    FitnessProportionate,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            max_generations: 50,
            crossover_probability: 0.9,
            mutation_probability: 0.05,
            point_mutation_rate: 0.01,
            elitism: 10,
            pool_size: None,
            pool_selection: SelectionMethod::Tournament,
            parent_selection: SelectionMethod::Tournament,
            tournament_size: 7,
            target_fitness: None,
            max_reversions: 100,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GpError> {
        ensure(self.population_size >= 1, "Population size must be at least 1")?;
        ensure(
            (0.0..=1.0).contains(&self.crossover_probability),
            "Crossover probability must be between 0 and 1",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.mutation_probability),
            "Mutation probability must be between 0 and 1",
        )?;
        ensure(
            self.crossover_probability + self.mutation_probability <= 1.0,
            "Crossover and mutation probabilities must sum to at most 1",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.point_mutation_rate),
            "Point mutation rate must be between 0 and 1",
        )?;
        ensure(
            self.elitism <= self.population_size,
            "Elitism cannot exceed the population size",
        )?;
        ensure(self.tournament_size >= 1, "Tournament size must be at least 1")?;
        if let Some(pool_size) = self.pool_size {
            ensure(pool_size >= 1, "Pool size must be at least 1")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_population_rejected() {
        let config = EvolutionConfig {
            population_size: 0,
            elitism: 0,
            ..EvolutionConfig::default()
        };
        assert!(matches!(config.validate(), Err(GpError::Configuration(_))));
    }

    #[test]
    fn test_operator_probabilities_bounded() {
        let config = EvolutionConfig {
            crossover_probability: 0.8,
            mutation_probability: 0.3,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
