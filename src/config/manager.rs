use super::{
    evolution::EvolutionConfig,
    initialisation::{InitialisationConfig, InitialisationMethod},
    mapping::MappingConfig,
    traits::ConfigSection,
};
use crate::error::GpError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub initialisation: InitialisationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GpError> {
        validate_section(&self.evolution)?;
        validate_section(&self.mapping)?;
        validate_section(&self.initialisation)?;

        // grammar-built individuals must still map under the depth limit
        let deepest = match self.initialisation.method {
            InitialisationMethod::Full | InitialisationMethod::Grow => {
                Some(("depth", self.initialisation.depth))
            }
            InitialisationMethod::RampedHalfAndHalf => {
                Some(("end_depth", self.initialisation.end_depth))
            }
            InitialisationMethod::FixedLength => None,
        };
        if let Some((field, depth)) = deepest {
            if depth > self.mapping.max_tree_depth {
                return Err(GpError::Configuration(format!(
                    "[{}] {} {} exceeds [{}] max_tree_depth {}",
                    InitialisationConfig::section_name(),
                    field,
                    depth,
                    MappingConfig::section_name(),
                    self.mapping.max_tree_depth
                )));
            }
        }
        Ok(())
    }
}

/// Validates one section, prefixing failures with its name.
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), GpError> {
    section.validate().map_err(|e| match e {
        GpError::Configuration(message) => {
            GpError::Configuration(format!("[{}] {}", S::section_name(), message))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let contents = std::fs::read_to_string(path)?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| GpError::Configuration(format!("Failed to parse config: {}", e)))?;

        self.replace(config)
    }

    /// Loads `path` and overlays `GPE_`-prefixed environment variables,
    /// e.g. `GPE_EVOLUTION__POPULATION_SIZE=200`.
    pub fn load_layered<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("GPE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|layered| layered.try_deserialize())
            .map_err(|e| GpError::Configuration(format!("Failed to load config: {}", e)))?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| GpError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Applies `f` to a copy and keeps it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), GpError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), GpError> {
        config.validate()?;
        let mut guard = self
            .config
            .write()
            .map_err(|_| GpError::IllegalState("Configuration lock poisoned".to_string()))?;
        *guard = config;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mapping::ShortagePolicy;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gpe.toml");

        let manager = ConfigManager::new();
        manager
            .update(|config| {
                config.evolution.population_size = 42;
                config.evolution.elitism = 2;
                config.mapping.shortage = ShortagePolicy::Extend {
                    max_chromosome_length: 300,
                };
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        let config = reloaded.get();
        assert_eq!(config.evolution.population_size, 42);
        assert_eq!(
            config.mapping.shortage,
            ShortagePolicy::Extend {
                max_chromosome_length: 300
            }
        );
    }

    #[test]
    fn test_invalid_update_is_discarded() {
        let manager = ConfigManager::new();
        let result = manager.update(|config| config.mapping.max_codon_value = 1);
        assert!(result.is_err());
        assert_eq!(manager.get().mapping.max_codon_value, u32::MAX);
    }

    #[test]
    fn test_initial_depth_beyond_mapping_limit_rejected() {
        let mut config = AppConfig::default();
        config.mapping.max_tree_depth = 3;
        config.initialisation.method = InitialisationMethod::Full;
        config.initialisation.depth = 6;
        assert!(matches!(config.validate(), Err(GpError::Configuration(_))));

        config.initialisation.method = InitialisationMethod::Grow;
        assert!(matches!(config.validate(), Err(GpError::Configuration(_))));

        config.initialisation.method = InitialisationMethod::RampedHalfAndHalf;
        config.initialisation.start_depth = 2;
        config.initialisation.end_depth = 4;
        assert!(matches!(config.validate(), Err(GpError::Configuration(_))));

        config.initialisation.end_depth = 3;
        assert!(config.validate().is_ok());

        // fixed-length chromosomes are only checked when mapped
        config.initialisation.method = InitialisationMethod::FixedLength;
        config.initialisation.end_depth = 9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new();
        let result = manager.load_from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(GpError::Io(_))));
    }

    #[test]
    fn test_validation_errors_name_the_section() {
        let mut config = AppConfig::default();
        config.evolution.population_size = 0;
        match config.validate() {
            Err(GpError::Configuration(message)) => assert!(message.starts_with("[evolution]")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[evolution]\npopulation_size = 20\nmax_generations = 5\ncrossover_probability = 0.5\n\
             mutation_probability = 0.2\npoint_mutation_rate = 0.1\nelitism = 1\n\
             pool_selection = \"Tournament\"\nparent_selection = \"FitnessProportionate\"\n\
             tournament_size = 3\nmax_reversions = 5\n",
        )
        .unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get();
        assert_eq!(config.evolution.population_size, 20);
        assert_eq!(
            config.evolution.parent_selection,
            crate::config::evolution::SelectionMethod::FitnessProportionate
        );
        assert_eq!(config.mapping.max_tree_depth, MappingConfig::default().max_tree_depth);
    }

    #[test]
    fn test_layered_load_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layered.toml");
        let manager = ConfigManager::new();
        manager.update(|config| config.evolution.population_size = 77).unwrap();
        manager.save_to_file(&path).unwrap();

        let layered = ConfigManager::new();
        layered.load_layered(&path).unwrap();
        assert_eq!(layered.get().evolution.population_size, 77);
    }
}
