use super::stats::GenerationStats;

/// Outcome of a hook: keep the (possibly replaced) value, or throw the step away and redo it.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<T> {
    Accept(T),
    Revert,
}

/// Observation points of a generation. Every `*_end` hook may replace its
/// value or revert the step; the engine redoes a reverted step, up to
/// `max_reversions` times per step.
///
/// All methods default to accepting unchanged.
pub trait GenerationHooks<I> {
    fn on_run_start(&mut self) {}

    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_elitism_end(&mut self, elites: Vec<I>) -> Decision<Vec<I>> {
        Decision::Accept(elites)
    }

    fn on_pool_selection_end(&mut self, pool: Vec<I>) -> Decision<Vec<I>> {
        Decision::Accept(pool)
    }

    fn on_crossover_end(&mut self, _parents: (&I, &I), children: Vec<I>) -> Decision<Vec<I>> {
        Decision::Accept(children)
    }

    fn on_mutation_end(&mut self, _parent: &I, child: I) -> Decision<I> {
        Decision::Accept(child)
    }

    fn on_reproduction_end(&mut self, child: I) -> Decision<I> {
        Decision::Accept(child)
    }

    /// Sees the bred and evaluated population. Reverting rebuilds the whole generation.
    fn on_generation_end(&mut self, _generation: usize, population: Vec<I>) -> Decision<Vec<I>> {
        Decision::Accept(population)
    }

    /// Called once a generation has been accepted.
    fn on_generation_complete(&mut self, _stats: &GenerationStats) {}

    fn on_run_end(&mut self, _generations: usize) {}
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<I> GenerationHooks<I> for NoHooks {}
