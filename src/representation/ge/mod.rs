//! Grammatical evolution representation: codon chromosomes and the
//! derivation trees they map to.

pub mod chromosome;
pub mod derivation;
pub mod individual;
pub mod operators;

pub use chromosome::{Chromosome, Codon};
pub use derivation::{DerivationNode, DerivationTree, NonTerminalNode};
pub use individual::{GeIndividual, GrammarFitness};
pub use operators::{OnePointCrossover, PointMutation};
