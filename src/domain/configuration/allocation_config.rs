//! Allocation policy configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Budget and venue risk policy passed explicitly into both allocators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllocationConfig {
    /// Total amount of the asset distributed across all proposals.
    pub total_budget: f64,
    /// Display label for the asset in reports.
    #[serde(default = "default_asset_symbol")]
    pub asset_symbol: String,
    /// Category name to fraction `f` in `[0, 1)`.
    #[serde(default)]
    pub venue_fractions: BTreeMap<String, f64>,
}

impl AllocationConfig {
    /// Build a validated configuration; category keys are lower-cased.
    pub fn new<I, K>(total_budget: f64, venue_fractions: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let config = Self {
            total_budget,
            asset_symbol: default_asset_symbol(),
            venue_fractions: venue_fractions
                .into_iter()
                .map(|(category, fraction)| (category.as_ref().to_string(), fraction))
                .collect(),
        }
        .normalized();
        config.validate()?;
        Ok(config)
    }

    /// Lower-case every category key so lookups are case-insensitive.
    pub fn normalized(mut self) -> Self {
        self.venue_fractions = std::mem::take(&mut self.venue_fractions)
            .into_iter()
            .map(|(category, fraction)| (category.trim().to_lowercase(), fraction))
            .collect();
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !self.total_budget.is_finite() || self.total_budget <= 0.0 {
            return Err(AppError::config_error(format!(
                "allocation.total_budget must be a positive number, got {}",
                self.total_budget
            )));
        }
        for (category, fraction) in &self.venue_fractions {
            if category.is_empty() {
                return Err(AppError::config_error("venue_fractions keys must not be empty"));
            }
            if !(0.0..1.0).contains(fraction) {
                return Err(AppError::config_error(format!(
                    "venue_fractions.{category} must be in [0, 1), got {fraction}"
                )));
            }
        }
        Ok(())
    }

    /// Fraction for a venue category; unknown categories get 0.
    pub fn fraction_for(&self, category: &str) -> f64 {
        let key = category.trim().to_lowercase();
        self.venue_fractions.get(&key).copied().unwrap_or(0.0)
    }
}

fn default_asset_symbol() -> String {
    "ATOM".to_string()
}
