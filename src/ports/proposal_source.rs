//! Proposal data source port definition.

use crate::domain::{AppError, Proposal};

/// Port for reading proposals and deployment history from the voting contract.
pub trait ProposalSource {
    /// Proposals submitted in a round, paged from `start_from`.
    fn round_proposals(
        &self,
        round_id: u64,
        tranche_id: u64,
        start_from: u64,
        limit: u64,
    ) -> Result<Vec<Proposal>, AppError>;

    /// The highest-voted proposals of a round, carrying current vote shares.
    fn top_n_proposals(
        &self,
        number_of_proposals: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<Vec<Proposal>, AppError>;

    /// Whole asset units deployed for a proposal in a given round.
    fn liquidity_deployment_total(
        &self,
        proposal_id: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<u64, AppError>;
}

impl<S: ProposalSource + ?Sized> ProposalSource for Box<S> {
    fn round_proposals(
        &self,
        round_id: u64,
        tranche_id: u64,
        start_from: u64,
        limit: u64,
    ) -> Result<Vec<Proposal>, AppError> {
        (**self).round_proposals(round_id, tranche_id, start_from, limit)
    }

    fn top_n_proposals(
        &self,
        number_of_proposals: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<Vec<Proposal>, AppError> {
        (**self).top_n_proposals(number_of_proposals, round_id, tranche_id)
    }

    fn liquidity_deployment_total(
        &self,
        proposal_id: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<u64, AppError> {
        (**self).liquidity_deployment_total(proposal_id, round_id, tranche_id)
    }
}
