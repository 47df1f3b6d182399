use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, Proposal};
use crate::ports::ProposalSource;

/// Recorded `(proposal_id, round_id, tranche_id)` of a deployment lookup.
pub type DeploymentLookup = (u64, u64, u64);

/// In-memory proposal source with canned responses and call recording.
#[derive(Clone, Default)]
pub struct FakeProposalSource {
    pub round: Vec<Proposal>,
    pub top_n: Vec<Proposal>,
    pub deployments: HashMap<u64, u64>,
    pub failing_deployments: Vec<u64>,
    pub fail_round_query: bool,
    pub lookups: Arc<Mutex<Vec<DeploymentLookup>>>,
}

impl FakeProposalSource {
    pub fn new(round: Vec<Proposal>) -> Self {
        Self { round, ..Self::default() }
    }

    pub fn with_top_n(mut self, top_n: Vec<Proposal>) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_deployment(mut self, proposal_id: u64, whole_units: u64) -> Self {
        self.deployments.insert(proposal_id, whole_units);
        self
    }

    pub fn failing_deployment(mut self, proposal_id: u64) -> Self {
        self.failing_deployments.push(proposal_id);
        self
    }

    pub fn recorded_lookups(&self) -> Vec<DeploymentLookup> {
        self.lookups.lock().unwrap().clone()
    }
}

impl ProposalSource for FakeProposalSource {
    fn round_proposals(&self, _: u64, _: u64, _: u64, _: u64) -> Result<Vec<Proposal>, AppError> {
        if self.fail_round_query {
            return Err(AppError::LcdQuery {
                message: "round query unavailable".to_string(),
                status: Some(503),
            });
        }
        Ok(self.round.clone())
    }

    fn top_n_proposals(&self, _: u64, _: u64, _: u64) -> Result<Vec<Proposal>, AppError> {
        Ok(self.top_n.clone())
    }

    fn liquidity_deployment_total(
        &self,
        proposal_id: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<u64, AppError> {
        self.lookups.lock().unwrap().push((proposal_id, round_id, tranche_id));
        if self.failing_deployments.contains(&proposal_id) {
            return Err(AppError::LcdQuery {
                message: format!("no deployment for proposal {proposal_id}"),
                status: Some(404),
            });
        }
        Ok(self.deployments.get(&proposal_id).copied().unwrap_or(0))
    }
}
