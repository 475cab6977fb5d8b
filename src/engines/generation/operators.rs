use rand::RngCore;

/// Recombines two parents. Implementations clone before modifying; parents
/// are never changed. `None` means no children could be produced from this
/// pair and new parents should be drawn.
pub trait CrossoverOperator<I> {
    fn name(&self) -> &'static str;
    fn crossover(&mut self, parent1: &I, parent2: &I, rng: &mut dyn RngCore) -> Option<Vec<I>>;
}

/// Produces a modified copy of one parent. `None` asks for another parent.
pub trait MutationOperator<I> {
    fn name(&self) -> &'static str;
    fn mutate(&mut self, parent: &I, rng: &mut dyn RngCore) -> Option<I>;
}

/// Which operator the breeding loop applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Crossover,
    Mutation,
    Reproduction,
}

impl Operation {
    /// Chooses an operation from one uniform draw `r` in `[0, 1)`.
    pub fn from_draw(r: f64, crossover_probability: f64, mutation_probability: f64) -> Self {
        if r < crossover_probability {
            Operation::Crossover
        } else if r < crossover_probability + mutation_probability {
            Operation::Mutation
        } else {
            Operation::Reproduction
        }
    }
}
