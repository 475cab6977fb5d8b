pub mod candidate;
pub mod evolution_engine;
pub mod generation_manager;
pub mod hooks;
pub mod operators;
pub mod progress;
pub mod stats;
pub mod termination;

pub use candidate::{Candidate, FitnessFunction};
pub use evolution_engine::EvolutionEngine;
pub use generation_manager::{BredGeneration, GenerationManager};
pub use hooks::{Decision, GenerationHooks, NoHooks};
pub use operators::{CrossoverOperator, MutationOperator, Operation};
pub use progress::LoggingHooks;
pub use stats::{GenerationStats, RunReport};
pub use termination::{FitnessTarget, MaxGenerations, TerminationCriterion};
