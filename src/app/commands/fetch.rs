//! Proposal retrieval from the voting contract.

use std::collections::HashMap;

use crate::app::AppContext;
use crate::domain::{AppError, Proposal, ServiceConfig, VoteShare};
use crate::ports::ProposalSource;

/// Fetch the configured round and refresh vote shares from the top-N ranking.
pub fn execute<S: ProposalSource>(ctx: &AppContext<S>) -> Result<Vec<Proposal>, AppError> {
    fetch_proposals(ctx.source(), ctx.service()?)
}

/// Round proposals for the configured round and tranche, with each
/// percentage overwritten by its top-N value when the ranking includes it.
pub fn fetch_proposals<S: ProposalSource + ?Sized>(
    source: &S,
    service: &ServiceConfig,
) -> Result<Vec<Proposal>, AppError> {
    let mut proposals = source.round_proposals(
        service.round_id,
        service.tranche_id,
        0,
        service.proposal_limit,
    )?;
    let ranked =
        source.top_n_proposals(service.proposal_limit, service.round_id, service.tranche_id)?;

    let shares: HashMap<u64, VoteShare> =
        ranked.into_iter().map(|proposal| (proposal.proposal_id, proposal.percentage)).collect();

    let mut refreshed = 0usize;
    for proposal in &mut proposals {
        if let Some(share) = shares.get(&proposal.proposal_id) {
            proposal.percentage = share.clone();
            refreshed += 1;
        }
    }

    tracing::info!(
        round_id = service.round_id,
        tranche_id = service.tranche_id,
        proposals = proposals.len(),
        refreshed,
        "fetched round proposals"
    );
    Ok(proposals)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::domain::{AppConfig, parse_config_content};
    use crate::testing::{FakeProposalSource, titled};

    fn remote_config() -> AppConfig {
        parse_config_content(
            r#"
            [allocation]
            total_budget = 1000.0

            [service]
            lcd_url = "http://127.0.0.1:1"
            contract_address = "neutron1hydro"
            round_id = 4
            "#,
        )
        .unwrap()
    }

    #[test]
    #[serial]
    fn top_n_percentages_override_round_values() {
        let source = FakeProposalSource::new(vec![titled(1, "10", "a"), titled(2, "20", "b")])
            .with_top_n(vec![titled(2, "55.5", "b")]);
        let ctx = AppContext::new(remote_config(), source);

        let proposals = execute(&ctx).unwrap();

        assert_eq!(proposals[0].percentage.as_str(), "10");
        assert_eq!(proposals[1].percentage.as_str(), "55.5");
    }

    #[test]
    #[serial]
    fn ranking_entries_absent_from_round_are_ignored() {
        let source = FakeProposalSource::new(vec![titled(1, "10", "a")])
            .with_top_n(vec![titled(9, "90", "z")]);
        let ctx = AppContext::new(remote_config(), source);

        let proposals = execute(&ctx).unwrap();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].percentage.as_str(), "10");
    }

    #[test]
    #[serial]
    fn round_query_failure_is_fatal() {
        let source = FakeProposalSource { fail_round_query: true, ..FakeProposalSource::default() };
        let ctx = AppContext::new(remote_config(), source);

        assert!(matches!(execute(&ctx), Err(AppError::LcdQuery { status: Some(503), .. })));
    }

    #[test]
    fn missing_service_section_is_a_configuration_error() {
        let config = parse_config_content("[allocation]\ntotal_budget = 5.0\n").unwrap();
        let ctx = AppContext::new(config, FakeProposalSource::default());

        let err = execute(&ctx).unwrap_err();
        assert!(err.to_string().contains("[service]"));
    }
}
