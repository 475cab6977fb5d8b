use super::candidate::{Candidate, FitnessFunction};
use super::generation_manager::GenerationManager;
use super::hooks::GenerationHooks;
use super::operators::{CrossoverOperator, MutationOperator};
use super::stats::{GenerationStats, RunReport};
use super::termination::{FitnessTarget, MaxGenerations, TerminationCriterion};
use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::initialisation::Initialiser;
use crate::error::{GpError, Result};
use chrono::Utc;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generational run loop.
///
/// Owns the single random stream every stochastic decision of the run draws
/// from, so a seeded engine replays exactly.
pub struct EvolutionEngine<I> {
    manager: GenerationManager<I>,
    criteria: Vec<Box<dyn TerminationCriterion>>,
    rng: StdRng,
}

impl<I: Candidate> EvolutionEngine<I> {
    /// Stops at `max_generations` and, when set, at `target_fitness`.
    pub fn new(
        config: EvolutionConfig,
        crossover: Box<dyn CrossoverOperator<I>>,
        mutation: Box<dyn MutationOperator<I>>,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut criteria: Vec<Box<dyn TerminationCriterion>> =
            vec![Box::new(MaxGenerations(config.max_generations))];
        if let Some(target) = config.target_fitness {
            criteria.push(Box::new(FitnessTarget(target)));
        }

        Ok(Self {
            manager: GenerationManager::new(config, crossover, mutation),
            criteria,
            rng,
        })
    }

    /// Adds a criterion, OR-combined with the existing ones.
    pub fn with_termination(mut self, criterion: impl TerminationCriterion + 'static) -> Self {
        self.criteria.push(Box::new(criterion));
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        self.manager.config()
    }

    /// The run's random stream, for work that must share it (e.g. building a
    /// population outside `run`).
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Runs from a fresh population until a termination criterion fires.
    pub fn run(
        &mut self,
        initialiser: &mut dyn Initialiser<I>,
        fitness: &mut dyn FitnessFunction<I>,
        hooks: &mut dyn GenerationHooks<I>,
    ) -> Result<RunReport<I>> {
        let population = initialiser.create_population(&mut self.rng)?;
        self.run_from(population, fitness, hooks)
    }

    /// Runs from a given initial population, treated as generation 0.
    pub fn run_from(
        &mut self,
        mut population: Vec<I>,
        fitness: &mut dyn FitnessFunction<I>,
        hooks: &mut dyn GenerationHooks<I>,
    ) -> Result<RunReport<I>> {
        let started_at = Utc::now();
        if population.is_empty() {
            return Err(GpError::IllegalState(
                "Initial population is empty".to_string(),
            ));
        }
        info!(
            "Starting evolution: population {}, up to {} generations",
            population.len(),
            self.config().max_generations
        );
        hooks.on_run_start();

        for individual in population.iter_mut().filter(|i| i.fitness().is_none()) {
            let value = fitness.evaluate(individual, &mut self.rng);
            individual.set_fitness(value);
        }

        let mut best = fittest(&population)?.clone();
        let mut generations = vec![GenerationStats::from_population(0, &population, 0)];
        hooks.on_generation_complete(&generations[0]);

        let mut generation = 0;
        while !self.should_terminate(&generations[generation]) {
            generation += 1;
            hooks.on_generation_start(generation);

            let bred = self
                .manager
                .generation(generation, &population, fitness, hooks, &mut self.rng)?;
            population = bred.population;
            if population.is_empty() {
                return Err(GpError::IllegalState(format!(
                    "Generation {} left an empty population",
                    generation
                )));
            }

            let candidate = fittest(&population)?;
            if candidate.standardised_fitness() < best.standardised_fitness() {
                best = candidate.clone();
            }

            let stats = GenerationStats::from_population(generation, &population, bred.reversions);
            hooks.on_generation_complete(&stats);
            generations.push(stats);
        }

        hooks.on_run_end(generation);
        info!(
            "Evolution finished after {} generations, best fitness {:.4}",
            generation,
            best.standardised_fitness()
        );

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            generations,
            best,
            final_population: population,
        })
    }

    fn should_terminate(&mut self, stats: &GenerationStats) -> bool {
        // every criterion is polled so stateful ones see each generation
        self.criteria
            .iter_mut()
            .fold(false, |stop, criterion| criterion.terminate(stats) || stop)
    }
}

/// First individual with the lowest standardised fitness.
fn fittest<I: Candidate>(population: &[I]) -> Result<&I> {
    population
        .iter()
        .min_by(|a, b| a.standardised_fitness().total_cmp(&b.standardised_fitness()))
        .ok_or_else(|| GpError::IllegalState("Population is empty".to_string()))
}
