//! End-to-end allocation pipelines.

use std::path::{Path, PathBuf};

use crate::adapters::snapshot_file::load_snapshot;
use crate::adapters::venue_table::{load_previous_table, load_venue_table};
use crate::app::AppContext;
use crate::app::commands::{enrich, fetch};
use crate::domain::{
    AllocationConfig, AllocationReport, AppError, Proposal, allocate_all_venues,
    allocate_proposals,
};
use crate::ports::ProposalSource;

/// Auxiliary tables merged into the proposals before allocating.
#[derive(Debug, Clone, Default)]
pub struct TableInputs {
    pub venues: Option<PathBuf>,
    pub previous: Option<PathBuf>,
}

/// Fetch, enrich, look up historical funds, then allocate.
pub fn execute<S: ProposalSource>(
    ctx: &AppContext<S>,
    tables: &TableInputs,
) -> Result<AllocationReport, AppError> {
    let service = ctx.service()?;
    let mut proposals = fetch::execute(ctx)?;

    apply_tables(&mut proposals, tables)?;
    enrich::merge_previous_funds(
        ctx.source(),
        &mut proposals,
        service.round_id,
        service.tranche_id,
    );

    Ok(run_allocation(&mut proposals, &ctx.config().allocation))
}

/// Allocate a stored snapshot without contacting the service.
pub fn execute_offline(
    config: &AllocationConfig,
    snapshot: &Path,
    tables: &TableInputs,
) -> Result<AllocationReport, AppError> {
    let mut proposals = load_snapshot(snapshot)?;
    apply_tables(&mut proposals, tables)?;
    Ok(run_allocation(&mut proposals, config))
}

/// Run both allocators over `proposals` and summarise the result.
pub fn run_allocation(proposals: &mut [Proposal], config: &AllocationConfig) -> AllocationReport {
    allocate_proposals(proposals, config);
    allocate_all_venues(proposals, config);

    let report = AllocationReport::from_proposals(proposals, config);
    tracing::info!(
        proposals = report.proposals.len(),
        allocated = report.total_allocated,
        placed = report.total_placed,
        unplaced = report.total_unplaced,
        "allocation complete"
    );
    report
}

fn apply_tables(proposals: &mut [Proposal], tables: &TableInputs) -> Result<(), AppError> {
    if let Some(path) = &tables.venues {
        let venues = load_venue_table(path)?;
        tracing::info!(path = %path.display(), proposals = venues.len(), "venue table loaded");
        enrich::merge_venues(proposals, venues);
    }
    if let Some(path) = &tables.previous {
        let links = load_previous_table(path)?;
        tracing::info!(path = %path.display(), links = links.len(), "prior-round table loaded");
        enrich::merge_previous_ids(proposals, &links);
    }
    Ok(())
}
