use super::node::Node;
use super::primitive::Primitive;
use crate::engines::generation::Candidate;

/// Tree GP individual: the program tree is both genotype and phenotype.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeIndividual<P> {
    root: Node<P>,
    fitness: Option<f64>,
}

impl<P: Primitive> TreeIndividual<P> {
    pub fn new(root: Node<P>) -> Self {
        Self {
            root,
            fitness: None,
        }
    }

    pub fn root(&self) -> &Node<P> {
        &self.root
    }

    pub fn into_root(self) -> Node<P> {
        self.root
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn evaluate(&self, context: &P::Context) -> anyhow::Result<P::Value> {
        self.root.evaluate(context)
    }
}

impl<P: Primitive> Candidate for TreeIndividual<P> {
    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}
