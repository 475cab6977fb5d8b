pub mod individual;
pub mod node;
pub mod operators;
pub mod primitive;

pub use individual::TreeIndividual;
pub use node::Node;
pub use operators::{SubtreeCrossover, SubtreeMutation};
pub use primitive::{Primitive, PrimitiveSet};
