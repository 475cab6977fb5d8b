use super::individual::TreeIndividual;
use super::node::Node;
use super::primitive::{Primitive, PrimitiveSet};
use crate::engines::generation::{CrossoverOperator, MutationOperator};
use crate::engines::initialisation::tree::grow_tree;
use rand::{Rng, RngCore};

/// Swaps a random subtree of one parent with a random subtree of the other.
/// Children deeper than `max_depth` are dropped.
#[derive(Debug, Clone)]
pub struct SubtreeCrossover {
    max_depth: usize,
}

impl SubtreeCrossover {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl<P: Primitive> CrossoverOperator<TreeIndividual<P>> for SubtreeCrossover {
    fn name(&self) -> &'static str {
        "subtree crossover"
    }

    fn crossover(
        &mut self,
        parent1: &TreeIndividual<P>,
        parent2: &TreeIndividual<P>,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<TreeIndividual<P>>> {
        let point1 = rng.gen_range(0..parent1.size());
        let point2 = rng.gen_range(0..parent2.size());

        let mut child1 = parent1.root().clone();
        let mut child2 = parent2.root().clone();
        let graft1 = child2.subtree(point2)?.clone();
        let graft2 = child1.replace_subtree(point1, graft1)?;
        child2.replace_subtree(point2, graft2)?;

        let children: Vec<TreeIndividual<P>> = [child1, child2]
            .into_iter()
            .filter(|child| child.depth() <= self.max_depth)
            .map(TreeIndividual::new)
            .collect();
        if children.is_empty() {
            None
        } else {
            Some(children)
        }
    }
}

/// Replaces a random subtree with a freshly grown one, keeping the result
/// within `max_depth`.
#[derive(Debug, Clone)]
pub struct SubtreeMutation<P> {
    primitives: PrimitiveSet<P>,
    max_depth: usize,
    max_subtree_depth: usize,
}

impl<P: Primitive> SubtreeMutation<P> {
    pub fn new(primitives: PrimitiveSet<P>, max_depth: usize, max_subtree_depth: usize) -> Self {
        Self {
            primitives,
            max_depth,
            max_subtree_depth,
        }
    }
}

impl<P: Primitive> MutationOperator<TreeIndividual<P>> for SubtreeMutation<P> {
    fn name(&self) -> &'static str {
        "subtree mutation"
    }

    fn mutate(
        &mut self,
        parent: &TreeIndividual<P>,
        rng: &mut dyn RngCore,
    ) -> Option<TreeIndividual<P>> {
        let point = rng.gen_range(0..parent.size());
        let point_depth = parent.root().depth_of(point)?;
        let room = self.max_depth.checked_sub(point_depth)?;

        let replacement: Node<P> =
            grow_tree(&self.primitives, room.min(self.max_subtree_depth), rng);
        let mut child = parent.root().clone();
        child.replace_subtree(point, replacement)?;
        Some(TreeIndividual::new(child))
    }
}

#[cfg(test)]
mod tests {
    use super::super::primitive::test_primitives::{arith_set, Arith};
    use super::*;
    use crate::engines::generation::Candidate;
    use crate::engines::initialisation::tree::full_tree;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_crossover_keeps_parents_and_depth_limit() {
        let set = arith_set();
        let mut rng = StdRng::seed_from_u64(13);
        let mut operator = SubtreeCrossover::new(4);

        for _ in 0..50 {
            let mut parent1 = TreeIndividual::new(full_tree(&set, 3, &mut rng));
            parent1.set_fitness(1.0);
            let parent2 = TreeIndividual::new(full_tree(&set, 2, &mut rng));
            let before = parent1.clone();

            if let Some(children) = operator.crossover(&parent1, &parent2, &mut rng) {
                assert!(!children.is_empty() && children.len() <= 2);
                for child in &children {
                    assert!(child.depth() <= 4);
                    assert_eq!(child.fitness(), None);
                }
            }
            assert_eq!(parent1, before);
        }
    }

    #[test]
    fn test_mutation_respects_max_depth() {
        let set = arith_set();
        let mut rng = StdRng::seed_from_u64(2);
        let mut operator = SubtreeMutation::new(set.clone(), 5, 3);

        for _ in 0..50 {
            let parent = TreeIndividual::new(full_tree(&set, 4, &mut rng));
            let child = operator.mutate(&parent, &mut rng).unwrap();
            assert!(child.depth() <= 5);
        }
    }

    #[test]
    fn test_root_swap_of_terminals() {
        let mut rng = StdRng::seed_from_u64(0);
        let parent1 = TreeIndividual::new(Node::Terminal(Arith::X));
        let parent2 = TreeIndividual::new(Node::Terminal(Arith::One));
        let children = SubtreeCrossover::new(0)
            .crossover(&parent1, &parent2, &mut rng)
            .unwrap();
        assert_eq!(children[0].root(), &Node::Terminal(Arith::One));
        assert_eq!(children[1].root(), &Node::Terminal(Arith::X));
    }
}
