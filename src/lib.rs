//! fundalloc: distribute a liquidity budget across voted proposals and the
//! capacity-limited venues that deploy it.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api;
pub use domain::{AllocationConfig, AllocationReport, AppError, Proposal, Venue};
