//! Root configuration document.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::configuration::{AllocationConfig, ServiceConfig};

/// Configuration loaded from `fundalloc.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub allocation: AllocationConfig,
    /// Only remote commands need this section.
    #[serde(default)]
    pub service: Option<ServiceConfig>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.allocation.validate()?;
        if let Some(service) = &self.service {
            service.validate()?;
        }
        Ok(())
    }

    /// Service settings, or an error naming the missing section.
    pub fn require_service(&self) -> Result<&ServiceConfig, AppError> {
        self.service.as_ref().ok_or_else(|| {
            AppError::config_error("Missing [service] section; remote commands need an LCD endpoint")
        })
    }
}
