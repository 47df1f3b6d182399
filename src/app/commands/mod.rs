pub mod allocate;
pub mod enrich;
pub mod fetch;
