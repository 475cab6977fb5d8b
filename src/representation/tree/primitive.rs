use crate::error::{GpError, Result};
use rand::Rng;
use std::fmt::Debug;

/// A function or terminal usable as a tree node.
///
/// Terminals have arity 0; functions receive the values of their children in order.
pub trait Primitive: Clone + Debug + PartialEq {
    type Value;
    /// Evaluation environment, e.g. variable bindings.
    type Context: ?Sized;

    fn alias(&self) -> &'static str;
    fn arity(&self) -> usize;
    fn evaluate(&self, args: &[Self::Value], context: &Self::Context) -> anyhow::Result<Self::Value>;
}

/// The functions and terminals trees are built from.
#[derive(Debug, Clone)]
pub struct PrimitiveSet<P> {
    functions: Vec<P>,
    terminals: Vec<P>,
}

impl<P: Primitive> PrimitiveSet<P> {
    /// Splits `primitives` into functions and terminals by arity.
    pub fn new(primitives: Vec<P>) -> Result<Self> {
        let (functions, terminals): (Vec<P>, Vec<P>) =
            primitives.into_iter().partition(|p| p.arity() > 0);
        if terminals.is_empty() {
            return Err(GpError::Configuration(
                "Primitive set needs at least one terminal".to_string(),
            ));
        }
        Ok(Self {
            functions,
            terminals,
        })
    }

    pub fn functions(&self) -> &[P] {
        &self.functions
    }

    pub fn terminals(&self) -> &[P] {
        &self.terminals
    }

    pub fn random_terminal<R: Rng + ?Sized>(&self, rng: &mut R) -> P {
        self.terminals[rng.gen_range(0..self.terminals.len())].clone()
    }

    /// Falls back to a terminal when there are no functions.
    pub fn random_function<R: Rng + ?Sized>(&self, rng: &mut R) -> P {
        if self.functions.is_empty() {
            return self.random_terminal(rng);
        }
        self.functions[rng.gen_range(0..self.functions.len())].clone()
    }

    /// Uniform over functions and terminals together.
    pub fn random_primitive<R: Rng + ?Sized>(&self, rng: &mut R) -> P {
        let index = rng.gen_range(0..self.functions.len() + self.terminals.len());
        if index < self.functions.len() {
            self.functions[index].clone()
        } else {
            self.terminals[index - self.functions.len()].clone()
        }
    }

    /// Number of distinct trees with depth at most `max_depth` (a lone
    /// terminal has depth 0). Saturates at `u128::MAX`.
    pub fn count_trees(&self, max_depth: usize) -> u128 {
        let terminals = self.terminals.len() as u128;
        let mut count = terminals;
        for _ in 0..max_depth {
            let mut next = terminals;
            for function in &self.functions {
                let mut combinations: u128 = 1;
                for _ in 0..function.arity() {
                    combinations = combinations.saturating_mul(count);
                }
                next = next.saturating_add(combinations);
            }
            count = next;
        }
        count
    }
}


#[cfg(test)]
mod tests {
    use super::test_primitives::*;
    use super::*;

    #[test]
    fn test_partition_by_arity() {
        let set = arith_set();
        assert_eq!(set.functions().len(), 4);
        assert_eq!(set.terminals(), &[Arith::X, Arith::One]);
    }

    #[test]
    fn test_terminal_required() {
        assert!(PrimitiveSet::new(vec![Arith::Add]).is_err());
    }

    #[test]
    fn test_count_trees() {
        let set = PrimitiveSet::new(vec![Arith::Add, Arith::X]).unwrap();
        assert_eq!(set.count_trees(0), 1);
        assert_eq!(set.count_trees(1), 2);
        assert_eq!(set.count_trees(2), 5);
    }
}
