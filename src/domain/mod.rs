pub mod allocation;
pub mod coerce;
pub mod configuration;
pub mod error;
pub mod proposal;

pub use allocation::{
    AllocationReport, BOOTSTRAP_FLOOR, ProposalOutcome, SATURATION_TOLERANCE, VenueOutcome,
    WaterFill, allocate_all_venues, allocate_proposals, allocate_venues, venue_capacity,
    water_fill,
};
pub use configuration::{
    AllocationConfig, AppConfig, DEFAULT_CONFIG_FILE, ServiceConfig, load_config,
    parse_config_content,
};
pub use error::AppError;
pub use proposal::{Proposal, Venue, VoteShare};
