pub mod ge;
pub mod tree;
