use super::traits::{ensure, ConfigSection};
use crate::error::GpError;
use serde::{Deserialize, Serialize};

/// What the mapper does when it needs a codon past the end of the chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortagePolicy {
    /// Restart from the first codon, at most `max_wraps` times.
    Wrap { max_wraps: usize },
    /// Append a freshly generated codon, up to `max_chromosome_length` codons.
    Extend { max_chromosome_length: usize },
    /// Fail the mapping.
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub max_tree_depth: usize,
    pub shortage: ShortagePolicy,
    pub remove_unused_codons: bool,
    pub min_codon_value: u32,
    pub max_codon_value: u32,
}

impl MappingConfig {
    pub fn codon_range(&self) -> std::ops::Range<u32> {
        self.min_codon_value..self.max_codon_value
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            max_tree_depth: 14,
            shortage: ShortagePolicy::Wrap { max_wraps: 1 },
            remove_unused_codons: true,
            min_codon_value: 0,
            max_codon_value: u32::MAX,
        }
    }
}

impl ConfigSection for MappingConfig {
    fn section_name() -> &'static str {
        "mapping"
    }

    fn validate(&self) -> Result<(), GpError> {
        ensure(self.max_tree_depth >= 1, "Maximum tree depth must be at least 1")?;
        ensure(self.max_codon_value >= 3, "Maximum codon value must be at least 3")?;
        ensure(
            self.min_codon_value < self.max_codon_value,
            "Minimum codon value must be below the maximum codon value",
        )?;
        if let ShortagePolicy::Extend {
            max_chromosome_length,
        } = self.shortage
        {
            ensure(
                max_chromosome_length >= 1,
                "Maximum chromosome length must be at least 1",
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MappingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_small_codon_range_rejected() {
        let config = MappingConfig {
            max_codon_value: 2,
            ..MappingConfig::default()
        };
        assert!(matches!(config.validate(), Err(GpError::Configuration(_))));

        let inverted = MappingConfig {
            min_codon_value: 10,
            max_codon_value: 5,
            ..MappingConfig::default()
        };
        assert!(inverted.validate().is_err());
    }
}
