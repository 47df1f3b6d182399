mod fake_proposal_source;

pub use fake_proposal_source::FakeProposalSource;

use crate::domain::{AllocationConfig, Proposal};

/// Budget of 100 000 with `lending` at 0.1 and `dex` at 0.2.
pub fn reference_config() -> AllocationConfig {
    AllocationConfig::new(100_000.0, [("lending", 0.1), ("dex", 0.2)])
        .expect("reference config is valid")
}

pub fn titled(proposal_id: u64, percentage: &str, title: &str) -> Proposal {
    let mut proposal = Proposal::new(proposal_id, percentage);
    proposal.title = title.to_string();
    proposal
}
