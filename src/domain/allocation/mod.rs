//! Two-level allocation: proposals by vote share, then venues by weight
//! within capacity.

pub mod proposal_allocator;
pub mod report;
pub mod venue_allocator;
pub mod water_fill;

pub use proposal_allocator::allocate_proposals;
pub use report::{AllocationReport, ProposalOutcome, VenueOutcome};
pub use venue_allocator::{BOOTSTRAP_FLOOR, allocate_all_venues, allocate_venues, venue_capacity};
pub use water_fill::{SATURATION_TOLERANCE, WaterFill, water_fill};
