use crate::domain::{AppConfig, AppError, ServiceConfig};
use crate::ports::ProposalSource;

/// Application context holding the configuration and the proposal source.
pub struct AppContext<S: ProposalSource> {
    config: AppConfig,
    source: S,
}

impl<S: ProposalSource> AppContext<S> {
    pub fn new(config: AppConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The `[service]` section; remote commands fail without it.
    pub fn service(&self) -> Result<&ServiceConfig, AppError> {
        self.config.require_service()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
