use super::traits::{ensure, ConfigSection};
use crate::error::GpError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialisationMethod {
    Full,
    Grow,
    FixedLength,
    RampedHalfAndHalf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialisationConfig {
    pub method: InitialisationMethod,
    /// Target depth for Full, depth ceiling for Grow.
    pub depth: usize,
    pub start_depth: usize,
    pub end_depth: usize,
    /// Codon count for fixed-length chromosomes.
    pub chromosome_length: usize,
    pub allow_duplicates: bool,
    /// Consecutive duplicates tolerated by Full, Grow and FixedLength before
    /// giving up. Ramped half-and-half is bounded by tree counting instead.
    pub max_duplicate_retries: usize,
}

impl Default for InitialisationConfig {
    fn default() -> Self {
        Self {
            method: InitialisationMethod::RampedHalfAndHalf,
            depth: 6,
            start_depth: 2,
            end_depth: 6,
            chromosome_length: 100,
            allow_duplicates: false,
            max_duplicate_retries: 10_000,
        }
    }
}

impl ConfigSection for InitialisationConfig {
    fn section_name() -> &'static str {
        "initialisation"
    }

    fn validate(&self) -> Result<(), GpError> {
        ensure(self.depth >= 1, "Initial depth must be at least 1")?;
        ensure(
            self.start_depth <= self.end_depth,
            "Start depth must not exceed end depth",
        )?;
        ensure(self.start_depth >= 1, "Start depth must be at least 1")?;
        if self.method == InitialisationMethod::FixedLength {
            ensure(
                self.chromosome_length >= 1,
                "Chromosome length must be at least 1",
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_depth_range_rejected() {
        let config = InitialisationConfig {
            start_depth: 5,
            end_depth: 3,
            ..InitialisationConfig::default()
        };
        assert!(matches!(config.validate(), Err(GpError::Configuration(_))));
    }
}
