//! Capacity-constrained proportional distribution.
//!
//! Each round splits whatever is still unplaced across the active recipients
//! in proportion to their weights, caps every grant at the recipient's spare
//! capacity, and retires recipients that reach their capacity. A round that
//! saturates nobody has placed the whole remainder, so the loop stops; every
//! other round retires at least one recipient, so there are at most `n`
//! rounds.

/// Leftover amounts at or below this are float noise rather than unplaced budget.
pub const SATURATION_TOLERANCE: f64 = 1e-9;

/// Outcome of one water-filling run.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterFill {
    /// Amount granted to each recipient, index-aligned with the inputs.
    pub allocations: Vec<f64>,
    /// Budget left over once no recipient could absorb more.
    pub unplaced: f64,
    /// Number of distribution rounds executed.
    pub rounds: usize,
}

/// Distribute `budget` across recipients by `weights`, bounded by `capacities`.
///
/// Recipients with a non-positive weight or capacity never receive anything,
/// and so do weights without a matching capacity. Weights and capacities are
/// expected to be already clamped to non-negative values; a total active
/// weight of zero leaves the budget unplaced.
pub fn water_fill(budget: f64, weights: &[f64], capacities: &[f64]) -> WaterFill {
    let mut allocations = vec![0.0; weights.len()];
    let mut active: Vec<usize> = weights
        .iter()
        .zip(capacities)
        .enumerate()
        .filter(|(_, (weight, capacity))| **weight > 0.0 && **capacity > 0.0)
        .map(|(idx, _)| idx)
        .collect();
    let mut remaining = budget.max(0.0);
    let mut rounds = 0;

    while remaining > 0.0 && !active.is_empty() {
        let active_weight: f64 = active.iter().map(|&idx| weights[idx]).sum();
        if active_weight <= 0.0 {
            break;
        }

        rounds += 1;
        let round_budget = remaining;
        let mut still_active = Vec::with_capacity(active.len());

        for &idx in &active {
            let desired = weights[idx] / active_weight * round_budget;
            let space = capacities[idx] - allocations[idx];

            // A capped grant lands exactly on capacity and retires the recipient.
            if desired >= space {
                allocations[idx] = capacities[idx];
                remaining -= space.max(0.0);
            } else {
                allocations[idx] += desired;
                remaining -= desired;
                still_active.push(idx);
            }
        }

        let saturated = active.len() - still_active.len();
        tracing::debug!(round = rounds, saturated, remaining, "water-filling round");

        active = still_active;
        if saturated == 0 {
            // No grant was capped, so the remainder is fully placed.
            remaining = 0.0;
            break;
        }
    }

    WaterFill { allocations, unplaced: remaining.max(0.0), rounds }
}
