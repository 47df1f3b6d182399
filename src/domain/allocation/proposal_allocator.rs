//! Proposal-level distribution of the total budget.

use crate::domain::{AllocationConfig, Proposal};

/// Set every proposal's allocated amount from its vote share.
///
/// `allocated = clamp(percentage, 0, 100) / 100 * total_budget`. A share that
/// is not a non-negative number yields 0 and the batch continues.
pub fn allocate_proposals(proposals: &mut [Proposal], config: &AllocationConfig) {
    for proposal in proposals.iter_mut() {
        proposal.allocated_amount = match proposal.percentage.percent() {
            Some(percent) => percent / 100.0 * config.total_budget,
            None => {
                tracing::warn!(
                    proposal_id = proposal.proposal_id,
                    percentage = %proposal.percentage,
                    "unreadable vote share; allocating 0"
                );
                0.0
            }
        };
    }
}
