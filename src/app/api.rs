//! API Facade for the application.
//!
//! Loads configuration, wires the LCD client behind the retry wrapper and runs
//! the commands. The pure allocators are re-exported for embedding programs
//! that bring their own proposals.

use std::path::Path;

use crate::adapters::{HttpLcdClient, RetryPolicy, RetryingProposalSource};
use crate::app::AppContext;
use crate::app::commands::{allocate as allocate_cmd, fetch};
use crate::domain::{AppConfig, load_config};

pub use crate::adapters::ReportFormat;
pub use crate::app::commands::allocate::{TableInputs, run_allocation};
pub use crate::app::commands::enrich::{merge_previous_funds, merge_previous_ids, merge_venues};
pub use crate::domain::{
    AllocationConfig, AllocationReport, AppError, Proposal, Venue, WaterFill,
    allocate_all_venues, allocate_proposals, allocate_venues, water_fill,
};

/// Build a context talking to the configured LCD endpoint.
fn create_remote_context(
    config: AppConfig,
) -> Result<AppContext<RetryingProposalSource>, AppError> {
    let service = config.require_service()?;
    let client = HttpLcdClient::new(service)?;
    let source = RetryingProposalSource::new(Box::new(client), RetryPolicy::from_config(service));
    Ok(AppContext::new(config, source))
}

/// Fetch the configured round, enrich it and allocate the budget.
pub fn allocate(config_path: &Path, tables: &TableInputs) -> Result<AllocationReport, AppError> {
    let ctx = create_remote_context(load_config(config_path)?)?;
    allocate_cmd::execute(&ctx, tables)
}

/// Allocate a stored snapshot; no network access.
pub fn allocate_offline(
    config_path: &Path,
    snapshot: &Path,
    tables: &TableInputs,
) -> Result<AllocationReport, AppError> {
    let config = load_config(config_path)?;
    allocate_cmd::execute_offline(&config.allocation, snapshot, tables)
}

/// Fetch the configured round with refreshed vote shares.
pub fn fetch_snapshot(config_path: &Path) -> Result<Vec<Proposal>, AppError> {
    let ctx = create_remote_context(load_config(config_path)?)?;
    fetch::execute(&ctx)
}
