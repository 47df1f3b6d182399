//! Output records handed to report sinks.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AllocationConfig, Proposal};

/// Result of one allocation run, detached from the mutable input records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationReport {
    pub generated_at: DateTime<Utc>,
    pub total_budget: f64,
    pub asset_symbol: String,
    pub total_allocated: f64,
    pub total_placed: f64,
    pub total_unplaced: f64,
    pub proposals: Vec<ProposalOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalOutcome {
    pub proposal_id: u64,
    pub title: String,
    pub percentage: String,
    pub allocated: f64,
    pub placed: f64,
    pub unplaced: f64,
    pub previous_proposal_id: Option<u64>,
    pub previous_funds: u64,
    pub venues: Vec<VenueOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueOutcome {
    pub contract_address: String,
    pub deployment_type: String,
    pub capacity: f64,
    pub allocated: f64,
}

impl AllocationReport {
    pub fn from_proposals(proposals: &[Proposal], config: &AllocationConfig) -> Self {
        Self::at(Utc::now(), proposals, config)
    }

    pub fn at(
        generated_at: DateTime<Utc>,
        proposals: &[Proposal],
        config: &AllocationConfig,
    ) -> Self {
        let outcomes: Vec<ProposalOutcome> = proposals.iter().map(ProposalOutcome::from).collect();

        Self {
            generated_at,
            total_budget: config.total_budget,
            asset_symbol: config.asset_symbol.clone(),
            total_allocated: outcomes.iter().map(|outcome| outcome.allocated).sum(),
            total_placed: outcomes.iter().map(|outcome| outcome.placed).sum(),
            total_unplaced: outcomes.iter().map(|outcome| outcome.unplaced).sum(),
            proposals: outcomes,
        }
    }
}

impl From<&Proposal> for ProposalOutcome {
    fn from(proposal: &Proposal) -> Self {
        Self {
            proposal_id: proposal.proposal_id,
            title: proposal.title.clone(),
            percentage: proposal.percentage.to_string(),
            allocated: proposal.allocated_amount,
            placed: proposal.placed_amount(),
            unplaced: proposal.unplaced_amount(),
            previous_proposal_id: proposal.previous_proposal_id,
            previous_funds: proposal.previous_funds,
            venues: proposal
                .venues
                .iter()
                .map(|venue| VenueOutcome {
                    contract_address: venue.contract_address.clone(),
                    deployment_type: venue.deployment_type.clone(),
                    capacity: venue.capacity,
                    allocated: venue.allocated,
                })
                .collect(),
        }
    }
}
