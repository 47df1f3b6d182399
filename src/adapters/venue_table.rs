//! Venue and prior-round link tables read from delimited files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::adapters::delimited::Table;
use crate::domain::coerce::{non_negative_or_zero, parse_flag, parse_id};
use crate::domain::{AppError, Venue};

const VENUE_COLUMNS: &[&str] =
    &["proposal_id", "contract_address", "percentage", "denom", "deployment_type"];
const PREVIOUS_COLUMNS: &[&str] = &["proposal_id", "previous_proposal_id"];

/// Venues keyed by owning proposal, in file order.
pub type VenueMap = HashMap<u64, Vec<Venue>>;

/// Prior-round links keyed by current proposal; `None` marks an explicit "no link".
pub type PreviousIdMap = HashMap<u64, Option<u64>>;

pub fn load_venue_table(path: &Path) -> Result<VenueMap, AppError> {
    let content = fs::read_to_string(path)?;
    parse_venue_table(&path.display().to_string(), &content)
}

/// Parse the venue table.
///
/// Rows with an unreadable `proposal_id` are skipped. Unreadable balances and
/// weights become 0, unreadable bootstrap flags become false, and the optional
/// `existing_tvl` / `bootstrap_eligible` columns default the same way when
/// absent.
pub fn parse_venue_table(source: &str, content: &str) -> Result<VenueMap, AppError> {
    let table = Table::parse(source, content)?;
    table.require_columns(source, VENUE_COLUMNS)?;

    let proposal_id = table.column("proposal_id");
    let contract_address = table.column("contract_address");
    let percentage = table.column("percentage");
    let denom = table.column("denom");
    let deployment_type = table.column("deployment_type");
    let existing_tvl = table.column("existing_tvl");
    let bootstrap_eligible = table.column("bootstrap_eligible");

    let mut venues = VenueMap::new();
    for row in table.rows() {
        let Some(id) = parse_id(row.get(proposal_id)) else {
            tracing::warn!(
                source,
                line = row.line,
                value = row.get(proposal_id),
                "skipping venue row with invalid proposal_id"
            );
            continue;
        };

        let bootstrap_raw = row.get(bootstrap_eligible);
        let bootstrap = parse_flag(bootstrap_raw).unwrap_or_else(|| {
            if !bootstrap_raw.trim().is_empty() {
                tracing::warn!(
                    source,
                    line = row.line,
                    value = bootstrap_raw,
                    "bootstrap flag unreadable; using false"
                );
            }
            false
        });

        venues.entry(id).or_default().push(Venue {
            contract_address: row.get(contract_address).trim().to_string(),
            denom: row.get(denom).trim().to_string(),
            deployment_type: row.get(deployment_type).trim().to_string(),
            existing_balance: non_negative_or_zero(row.get(existing_tvl)),
            bootstrap_eligible: bootstrap,
            weight: non_negative_or_zero(row.get(percentage)),
            capacity: 0.0,
            allocated: 0.0,
        });
    }

    Ok(venues)
}

pub fn load_previous_table(path: &Path) -> Result<PreviousIdMap, AppError> {
    let content = fs::read_to_string(path)?;
    parse_previous_table(&path.display().to_string(), &content)
}

/// Parse the prior-round link table.
///
/// An empty `previous_proposal_id` records an explicit "no link"; rows with an
/// unreadable id in either column are skipped.
pub fn parse_previous_table(source: &str, content: &str) -> Result<PreviousIdMap, AppError> {
    let table = Table::parse(source, content)?;
    table.require_columns(source, PREVIOUS_COLUMNS)?;

    let proposal_id = table.column("proposal_id");
    let previous_proposal_id = table.column("previous_proposal_id");

    let mut links = PreviousIdMap::new();
    for row in table.rows() {
        let Some(current) = parse_id(row.get(proposal_id)) else {
            tracing::warn!(
                source,
                line = row.line,
                value = row.get(proposal_id),
                "skipping invalid proposal_id"
            );
            continue;
        };

        let previous_raw = row.get(previous_proposal_id);
        if previous_raw.trim().is_empty() {
            links.insert(current, None);
            continue;
        }

        match parse_id(previous_raw) {
            Some(previous) => {
                links.insert(current, Some(previous));
            }
            None => {
                tracing::warn!(
                    source,
                    line = row.line,
                    value = previous_raw,
                    "skipping invalid previous_proposal_id"
                );
            }
        }
    }

    Ok(links)
}
