pub mod generation;
pub mod initialisation;
pub mod mapping;
pub mod selection;
