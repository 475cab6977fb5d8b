use super::stats::GenerationStats;

/// Polled once per generation; the run stops when any criterion fires.
pub trait TerminationCriterion {
    fn terminate(&mut self, stats: &GenerationStats) -> bool;
}

/// Stops once the given number of generations has been bred.
#[derive(Debug, Clone, Copy)]
pub struct MaxGenerations(pub usize);

impl TerminationCriterion for MaxGenerations {
    fn terminate(&mut self, stats: &GenerationStats) -> bool {
        stats.generation >= self.0
    }
}

/// Stops once the best fitness reaches the target (lower is better).
#[derive(Debug, Clone, Copy)]
pub struct FitnessTarget(pub f64);

impl TerminationCriterion for FitnessTarget {
    fn terminate(&mut self, stats: &GenerationStats) -> bool {
        stats.best_fitness <= self.0
    }
}

impl<F> TerminationCriterion for F
where
    F: FnMut(&GenerationStats) -> bool,
{
    fn terminate(&mut self, stats: &GenerationStats) -> bool {
        self(stats)
    }
}
