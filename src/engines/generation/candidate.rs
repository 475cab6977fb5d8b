use rand::RngCore;
use std::fmt::Debug;

/// An individual the generational engine can breed and rank.
///
/// Fitness is standardised: lower is better.
pub trait Candidate: Clone + Debug {
    fn fitness(&self) -> Option<f64>;
    fn set_fitness(&mut self, fitness: f64);

    /// Fitness used for ranking; unevaluated individuals rank last.
    fn standardised_fitness(&self) -> f64 {
        self.fitness().unwrap_or(f64::INFINITY)
    }
}

/// External fitness evaluation, called once per unevaluated individual.
///
/// Receives the run's random stream for representations whose evaluation
/// draws randomness (GE mapping with codon extension).
pub trait FitnessFunction<I> {
    fn evaluate(&mut self, individual: &mut I, rng: &mut dyn RngCore) -> f64;
}

impl<I, F> FitnessFunction<I> for F
where
    F: FnMut(&I) -> f64,
{
    fn evaluate(&mut self, individual: &mut I, _rng: &mut dyn RngCore) -> f64 {
        self(individual)
    }
}
