//! Remote LCD service configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Environment variable overriding `service.lcd_url`.
pub const LCD_URL_ENV: &str = "FUNDALLOC_LCD_URL";

/// Connection and query settings for the proposal contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the LCD REST endpoint.
    pub lcd_url: Url,
    /// Address of the voting contract.
    pub contract_address: String,
    /// Round whose proposals are allocated.
    pub round_id: u64,
    #[serde(default = "default_tranche_id")]
    pub tranche_id: u64,
    /// Page size for round proposals and N for the top-N query.
    #[serde(default = "default_proposal_limit")]
    pub proposal_limit: u64,
    /// Denomination counted when summing previously deployed funds.
    #[serde(default = "default_asset_denom")]
    pub asset_denom: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per query.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.contract_address.trim().is_empty() {
            return Err(AppError::config_error("service.contract_address must not be empty"));
        }
        if self.proposal_limit == 0 {
            return Err(AppError::config_error("service.proposal_limit must be greater than 0"));
        }
        if self.asset_denom.trim().is_empty() {
            return Err(AppError::config_error("service.asset_denom must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("service.timeout_secs must be greater than 0"));
        }
        if self.max_retries == 0 {
            return Err(AppError::config_error("service.max_retries must be greater than 0"));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::config_error("service.retry_delay_ms must be greater than 0"));
        }
        Ok(())
    }

    /// Apply the `FUNDALLOC_LCD_URL` override when it is set.
    pub fn apply_env_override(&mut self) -> Result<(), AppError> {
        if let Ok(raw) = std::env::var(LCD_URL_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.lcd_url = Url::parse(trimmed).map_err(|e| {
                    AppError::config_error(format!("{LCD_URL_ENV} is not a valid URL: {e}"))
                })?;
            }
        }
        Ok(())
    }
}

fn default_tranche_id() -> u64 {
    1
}

fn default_proposal_limit() -> u64 {
    100
}

fn default_asset_denom() -> String {
    "uatom".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}
