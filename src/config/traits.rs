use crate::error::GpError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), GpError>;
}

pub(crate) fn ensure(condition: bool, message: &str) -> Result<(), GpError> {
    if condition {
        Ok(())
    } else {
        Err(GpError::Configuration(message.to_string()))
    }
}
