use super::candidate::{Candidate, FitnessFunction};
use super::hooks::{Decision, GenerationHooks};
use super::operators::{CrossoverOperator, MutationOperator, Operation};
use crate::config::EvolutionConfig;
use crate::engines::selection::Selector;
use crate::error::{GpError, Result};
use log::{debug, warn};
use rand::{Rng, RngCore};

/// A bred, evaluated and accepted population.
#[derive(Debug, Clone)]
pub struct BredGeneration<I> {
    pub population: Vec<I>,
    /// Whole-generation rebuilds forced by `on_generation_end`.
    pub reversions: usize,
}

/// Breeds one generation from the previous one: elitism, optional pool
/// selection, then crossover/mutation/reproduction until the population is
/// full.
pub struct GenerationManager<I> {
    config: EvolutionConfig,
    crossover: Box<dyn CrossoverOperator<I>>,
    mutation: Box<dyn MutationOperator<I>>,
}

/// Counts consecutive failed attempts at one stage.
struct RetryBudget {
    stage: &'static str,
    limit: usize,
    used: usize,
}

impl RetryBudget {
    fn new(stage: &'static str, limit: usize) -> Self {
        Self { stage, limit, used: 0 }
    }

    fn spend(&mut self) -> Result<()> {
        self.used += 1;
        if self.used > self.limit {
            return Err(GpError::ExcessiveReversion {
                stage: self.stage,
                limit: self.limit,
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.used = 0;
    }
}

impl<I: Candidate> GenerationManager<I> {
    pub fn new(
        config: EvolutionConfig,
        crossover: Box<dyn CrossoverOperator<I>>,
        mutation: Box<dyn MutationOperator<I>>,
    ) -> Self {
        Self {
            config,
            crossover,
            mutation,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn generation(
        &mut self,
        generation: usize,
        previous: &[I],
        fitness: &mut dyn FitnessFunction<I>,
        hooks: &mut dyn GenerationHooks<I>,
        rng: &mut dyn RngCore,
    ) -> Result<BredGeneration<I>> {
        if previous.is_empty() {
            return Err(GpError::IllegalState(
                "Cannot breed from an empty population".to_string(),
            ));
        }

        let mut reversions = RetryBudget::new("generation", self.config.max_reversions);
        loop {
            let mut next = self.elites(previous, hooks)?;
            let pool = self.pool(previous, hooks, rng)?;
            self.breed(&mut next, &pool, hooks, rng)?;

            for individual in next.iter_mut().filter(|i| i.fitness().is_none()) {
                let value = fitness.evaluate(individual, rng);
                individual.set_fitness(value);
            }

            match hooks.on_generation_end(generation, next) {
                Decision::Accept(population) => {
                    return Ok(BredGeneration {
                        population,
                        reversions: reversions.used,
                    })
                }
                Decision::Revert => {
                    warn!("Generation {} reverted, rebuilding", generation);
                    reversions.spend()?;
                }
            }
        }
    }

    /// Top individuals by standardised fitness; ties keep population order.
    fn elites(&self, previous: &[I], hooks: &mut dyn GenerationHooks<I>) -> Result<Vec<I>> {
        let mut order: Vec<usize> = (0..previous.len()).collect();
        order.sort_by(|&a, &b| {
            previous[a]
                .standardised_fitness()
                .total_cmp(&previous[b].standardised_fitness())
        });

        let mut budget = RetryBudget::new("elitism", self.config.max_reversions);
        loop {
            let elites: Vec<I> = order
                .iter()
                .take(self.config.elitism)
                .map(|&i| previous[i].clone())
                .collect();
            match hooks.on_elitism_end(elites) {
                Decision::Accept(elites) => return Ok(elites),
                Decision::Revert => budget.spend()?,
            }
        }
    }

    fn pool(
        &self,
        previous: &[I],
        hooks: &mut dyn GenerationHooks<I>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<I>> {
        let Some(pool_size) = self.config.pool_size else {
            return Ok(previous.to_vec());
        };

        let selector = Selector::new(
            self.config.pool_selection,
            self.config.tournament_size,
            fitnesses(previous),
        );
        let mut budget = RetryBudget::new("pool selection", self.config.max_reversions);
        loop {
            let pool: Vec<I> = selector
                .select_pool(pool_size, rng)
                .into_iter()
                .map(|i| previous[i].clone())
                .collect();
            match hooks.on_pool_selection_end(pool) {
                Decision::Accept(pool) if !pool.is_empty() => return Ok(pool),
                Decision::Accept(_) => {
                    return Err(GpError::IllegalState(
                        "Breeding pool is empty".to_string(),
                    ))
                }
                Decision::Revert => budget.spend()?,
            }
        }
    }

    fn breed(
        &mut self,
        next: &mut Vec<I>,
        pool: &[I],
        hooks: &mut dyn GenerationHooks<I>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        let target = self.config.population_size;
        let selector = Selector::new(
            self.config.parent_selection,
            self.config.tournament_size,
            fitnesses(pool),
        );
        let mut budget = RetryBudget::new("breeding", self.config.max_reversions);

        while next.len() < target {
            let r: f64 = rng.gen();
            let operation = Operation::from_draw(
                r,
                self.config.crossover_probability,
                self.config.mutation_probability,
            );

            let offspring = match operation {
                Operation::Crossover => {
                    let parent1 = &pool[selector.select(rng)];
                    let parent2 = &pool[selector.select(rng)];
                    self.crossover
                        .crossover(parent1, parent2, rng)
                        .map(|children| hooks.on_crossover_end((parent1, parent2), children))
                        .and_then(accepted)
                        .map(|mut children| {
                            children.truncate(target - next.len());
                            children
                        })
                }
                Operation::Mutation => {
                    let parent = &pool[selector.select(rng)];
                    self.mutation
                        .mutate(parent, rng)
                        .map(|child| hooks.on_mutation_end(parent, child))
                        .and_then(accepted)
                        .map(|child| vec![child])
                }
                Operation::Reproduction => {
                    let parent = &pool[selector.select(rng)];
                    accepted(hooks.on_reproduction_end(parent.clone())).map(|child| vec![child])
                }
            };

            match offspring {
                Some(children) if !children.is_empty() => {
                    budget.reset();
                    next.extend(children);
                }
                _ => {
                    debug!("{:?} produced nothing, retrying", operation);
                    budget.spend()?;
                }
            }
        }
        Ok(())
    }
}

fn accepted<T>(decision: Decision<T>) -> Option<T> {
    match decision {
        Decision::Accept(value) => Some(value),
        Decision::Revert => None,
    }
}

fn fitnesses<I: Candidate>(population: &[I]) -> Vec<f64> {
    population.iter().map(Candidate::standardised_fitness).collect()
}
