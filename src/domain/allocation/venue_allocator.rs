//! Venue-level distribution of each proposal's budget.

use crate::domain::allocation::water_fill::{SATURATION_TOLERANCE, water_fill};
use crate::domain::coerce::{clamp_non_negative, clamp_weight};
use crate::domain::{AllocationConfig, Proposal, Venue};

/// Minimum capacity granted to bootstrap-eligible venues.
pub const BOOTSTRAP_FLOOR: f64 = 10_000.0;

/// Capacity of a venue under category fraction `fraction`.
///
/// Solves `alloc / (balance + alloc) = f` for `alloc`, giving
/// `f / (1 - f) * balance`. Fractions outside `(0, 1)` yield 0. Eligible
/// venues below the bootstrap floor are raised to it.
pub fn venue_capacity(venue: &Venue, fraction: f64) -> f64 {
    let balance = clamp_non_negative(venue.existing_balance);
    let capacity =
        if fraction > 0.0 && fraction < 1.0 { fraction / (1.0 - fraction) * balance } else { 0.0 };

    if capacity < BOOTSTRAP_FLOOR && venue.bootstrap_eligible { BOOTSTRAP_FLOOR } else { capacity }
}

/// Distribute one proposal's allocated amount across its venues.
///
/// Capacities are recomputed and allocations reset on every call, so the
/// result depends only on the proposal's inputs and `config`. Proposals with a
/// non-positive allocated amount keep zero allocations everywhere.
pub fn allocate_venues(proposal: &mut Proposal, config: &AllocationConfig) {
    for venue in proposal.venues.iter_mut() {
        venue.capacity = venue_capacity(venue, config.fraction_for(&venue.deployment_type));
        venue.allocated = 0.0;
    }

    if proposal.allocated_amount.is_nan()
        || proposal.allocated_amount <= 0.0
        || proposal.venues.is_empty()
    {
        return;
    }

    let weights: Vec<f64> =
        proposal.venues.iter().map(|venue| clamp_weight(venue.weight)).collect();
    let capacities: Vec<f64> = proposal.venues.iter().map(|venue| venue.capacity).collect();

    let fill = water_fill(proposal.allocated_amount, &weights, &capacities);
    for (venue, allocated) in proposal.venues.iter_mut().zip(fill.allocations) {
        venue.allocated = allocated;
    }

    if fill.unplaced > SATURATION_TOLERANCE {
        tracing::info!(
            proposal_id = proposal.proposal_id,
            unplaced = fill.unplaced,
            rounds = fill.rounds,
            "venue capacity insufficient for proposal budget"
        );
    }
}

/// Run [`allocate_venues`] over every proposal.
pub fn allocate_all_venues(proposals: &mut [Proposal], config: &AllocationConfig) {
    for proposal in proposals.iter_mut() {
        allocate_venues(proposal, config);
    }
}
