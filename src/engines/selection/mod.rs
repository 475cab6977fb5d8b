pub mod fitness_proportionate;
pub mod tournament;

pub use crate::config::evolution::SelectionMethod;
pub use fitness_proportionate::FitnessProportionate;
pub use tournament::tournament_selection;

use rand::Rng;

/// Selects individuals, by index, from a fixed set of standardised fitness values.
#[derive(Debug, Clone)]
pub struct Selector {
    fitnesses: Vec<f64>,
    strategy: Strategy,
}

#[derive(Debug, Clone)]
enum Strategy {
    Tournament { size: usize },
    Proportionate(FitnessProportionate),
}

impl Selector {
    /// `fitnesses` must not be empty.
    pub fn new(method: SelectionMethod, tournament_size: usize, fitnesses: Vec<f64>) -> Self {
        let strategy = match method {
            SelectionMethod::Tournament => Strategy::Tournament {
                size: tournament_size.max(1),
            },
            SelectionMethod::FitnessProportionate => {
                Strategy::Proportionate(FitnessProportionate::new(&fitnesses))
            }
        };
        Self {
            fitnesses,
            strategy,
        }
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match &self.strategy {
            Strategy::Tournament { size } => tournament_selection(&self.fitnesses, *size, rng),
            Strategy::Proportionate(wheel) => wheel.select(rng),
        }
    }

    /// Breeding pool of `size` indices, drawn with replacement.
    pub fn select_pool<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<usize> {
        (0..size).map(|_| self.select(rng)).collect()
    }
}
