use super::builder::Growth;
use super::ramped::depth_quotas;
use super::{fill_population, Initialiser, PopulationSpec};
use crate::error::{GpError, Result};
use crate::representation::tree::{Node, Primitive, PrimitiveSet, TreeIndividual};
use log::debug;
use rand::{Rng, RngCore};

/// Tree whose every leaf sits at exactly `depth` (given functions exist).
pub fn full_tree<P: Primitive, R: Rng + ?Sized>(
    set: &PrimitiveSet<P>,
    depth: usize,
    rng: &mut R,
) -> Node<P> {
    build(set, depth, Growth::Full, rng)
}

/// Tree of depth at most `depth`, choosing among all primitives at each inner level.
pub fn grow_tree<P: Primitive, R: Rng + ?Sized>(
    set: &PrimitiveSet<P>,
    depth: usize,
    rng: &mut R,
) -> Node<P> {
    build(set, depth, Growth::Grow, rng)
}

fn build<P: Primitive, R: Rng + ?Sized>(
    set: &PrimitiveSet<P>,
    depth: usize,
    growth: Growth,
    rng: &mut R,
) -> Node<P> {
    if depth == 0 {
        return Node::Terminal(set.random_terminal(rng));
    }
    let primitive = match growth {
        Growth::Full => set.random_function(rng),
        Growth::Grow => set.random_primitive(rng),
    };
    if primitive.arity() == 0 {
        return Node::Terminal(primitive);
    }
    let children = (0..primitive.arity())
        .map(|_| build(set, depth - 1, growth, &mut *rng))
        .collect();
    Node::Function(primitive, children)
}

pub struct TreeFull<P> {
    primitives: PrimitiveSet<P>,
    depth: usize,
    spec: PopulationSpec,
}

impl<P: Primitive> TreeFull<P> {
    pub fn new(primitives: PrimitiveSet<P>, depth: usize, spec: PopulationSpec) -> Self {
        Self {
            primitives,
            depth,
            spec,
        }
    }
}

impl<P: Primitive> Initialiser<TreeIndividual<P>> for TreeFull<P> {
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<TreeIndividual<P>>> {
        let (set, depth) = (&self.primitives, self.depth);
        fill_population(
            self.spec,
            || Ok(TreeIndividual::new(full_tree(set, depth, &mut *rng))),
            |a, b| a.root() == b.root(),
        )
    }

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<TreeIndividual<P>> {
        Ok(TreeIndividual::new(full_tree(&self.primitives, self.depth, rng)))
    }
}

pub struct TreeGrow<P> {
    primitives: PrimitiveSet<P>,
    depth: usize,
    spec: PopulationSpec,
}

impl<P: Primitive> TreeGrow<P> {
    pub fn new(primitives: PrimitiveSet<P>, depth: usize, spec: PopulationSpec) -> Self {
        Self {
            primitives,
            depth,
            spec,
        }
    }
}

impl<P: Primitive> Initialiser<TreeIndividual<P>> for TreeGrow<P> {
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<TreeIndividual<P>>> {
        if !self.spec.allow_duplicates {
            let distinct = self.primitives.count_trees(self.depth);
            if distinct < self.spec.population_size as u128 {
                return Err(GpError::IllegalState(format!(
                    "Only {} distinct trees of depth {} exist, {} requested",
                    distinct, self.depth, self.spec.population_size
                )));
            }
        }
        let (set, depth) = (&self.primitives, self.depth);
        fill_population(
            self.spec,
            || Ok(TreeIndividual::new(grow_tree(set, depth, &mut *rng))),
            |a, b| a.root() == b.root(),
        )
    }

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<TreeIndividual<P>> {
        Ok(TreeIndividual::new(grow_tree(&self.primitives, self.depth, rng)))
    }
}

/// Ramped half-and-half over program trees, with the same depth quotas,
/// alternation and shortfall handling as the grammar version.
pub struct TreeRampedHalfAndHalf<P> {
    primitives: PrimitiveSet<P>,
    start_depth: usize,
    end_depth: usize,
    population_size: usize,
    allow_duplicates: bool,
    next_growth: Growth,
}

impl<P: Primitive> TreeRampedHalfAndHalf<P> {
    pub fn new(
        primitives: PrimitiveSet<P>,
        start_depth: usize,
        end_depth: usize,
        population_size: usize,
        allow_duplicates: bool,
    ) -> Self {
        Self {
            primitives,
            start_depth,
            end_depth,
            population_size,
            allow_duplicates,
            next_growth: Growth::Grow,
        }
    }

    fn take_turn(&mut self) -> Growth {
        let growth = self.next_growth;
        self.next_growth = growth.other();
        growth
    }
}

impl<P: Primitive> Initialiser<TreeIndividual<P>> for TreeRampedHalfAndHalf<P> {
    fn create_population(&mut self, rng: &mut dyn RngCore) -> Result<Vec<TreeIndividual<P>>> {
        if self.start_depth > self.end_depth {
            return Err(GpError::Configuration(format!(
                "Start depth {} exceeds end depth {}",
                self.start_depth, self.end_depth
            )));
        }
        self.next_growth = Growth::Grow;

        let mut population: Vec<TreeIndividual<P>> = Vec::with_capacity(self.population_size);
        let mut shortfall = 0;
        for (depth, quota) in depth_quotas(self.population_size, self.start_depth, self.end_depth) {
            let mut target = quota + shortfall;
            shortfall = 0;

            if !self.allow_duplicates {
                let available = self
                    .primitives
                    .count_trees(depth)
                    .saturating_sub(population.len() as u128);
                if available < target as u128 {
                    if depth == self.end_depth {
                        return Err(GpError::IllegalState(format!(
                            "Only {} more distinct trees of depth {} exist, {} needed",
                            available, depth, target
                        )));
                    }
                    let available = available as usize;
                    shortfall = target - available;
                    target = available;
                }
            }

            let mut created = 0;
            while created < target {
                let growth = self.take_turn();
                let candidate = build(&self.primitives, depth, growth, &mut *rng);
                if !self.allow_duplicates && population.iter().any(|p| p.root() == &candidate) {
                    debug!("Duplicate {:?} tree at depth {} discarded", growth, depth);
                    continue;
                }
                population.push(TreeIndividual::new(candidate));
                created += 1;
            }
        }
        Ok(population)
    }

    fn create_individual(&mut self, rng: &mut dyn RngCore) -> Result<TreeIndividual<P>> {
        let growth = self.take_turn();
        Ok(TreeIndividual::new(build(
            &self.primitives,
            self.end_depth,
            growth,
            rng,
        )))
    }
}
