pub mod codon_consumer;
pub mod mapper;

use thiserror::Error;

pub use codon_consumer::CodonConsumer;
pub use mapper::{DepthFirstMapper, Mapping};

/// Reasons a chromosome has no phenotype. All of them are recoverable:
/// the individual is simply invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Derivation tree would exceed the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
    #[error("Chromosome ran out of codons")]
    ChromosomeExhausted,
    #[error("Chromosome wrapped more than {limit} times")]
    ExcessiveWrapping { limit: usize },
    #[error("Chromosome reached its maximum length of {limit} codons")]
    ChromosomeFull { limit: usize },
}
