pub mod traits;
pub mod evolution;
pub mod mapping;
pub mod initialisation;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{EvolutionConfig, SelectionMethod};
pub use mapping::{MappingConfig, ShortagePolicy};
pub use initialisation::{InitialisationConfig, InitialisationMethod};
pub use traits::ConfigSection;
