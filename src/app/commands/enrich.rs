//! Attach venues, prior-round links and historical funds to fetched proposals.

use crate::adapters::venue_table::{PreviousIdMap, VenueMap};
use crate::domain::Proposal;
use crate::ports::ProposalSource;

/// Replace each proposal's venues with the table's rows for it, in row order.
///
/// Proposals without rows keep what they already carry.
pub fn merge_venues(proposals: &mut [Proposal], mut venues: VenueMap) {
    for proposal in proposals.iter_mut() {
        if let Some(rows) = venues.remove(&proposal.proposal_id) {
            proposal.venues = rows;
        }
    }

    if !venues.is_empty() {
        let mut orphaned: Vec<u64> = venues.into_keys().collect();
        orphaned.sort_unstable();
        tracing::warn!(?orphaned, "venue rows reference unknown proposals");
    }
}

/// Set the prior-round link of every proposal listed in the table.
pub fn merge_previous_ids(proposals: &mut [Proposal], links: &PreviousIdMap) {
    for proposal in proposals.iter_mut() {
        if let Some(link) = links.get(&proposal.proposal_id) {
            proposal.previous_proposal_id = *link;
        }
    }
}

/// Look up what each linked proposal received in the previous round.
///
/// Unlinked proposals, and every proposal when `round_id` is 0, get 0. A
/// failed lookup is logged, drops the link and leaves the funds at 0.
pub fn merge_previous_funds<S: ProposalSource + ?Sized>(
    source: &S,
    proposals: &mut [Proposal],
    round_id: u64,
    tranche_id: u64,
) {
    for proposal in proposals.iter_mut() {
        proposal.previous_funds = 0;

        let Some(previous_id) = proposal.previous_proposal_id else {
            continue;
        };
        if round_id == 0 {
            continue;
        }

        match source.liquidity_deployment_total(previous_id, round_id - 1, tranche_id) {
            Ok(total) => {
                tracing::debug!(
                    proposal_id = proposal.proposal_id,
                    previous_id,
                    total,
                    "previous round funds"
                );
                proposal.previous_funds = total;
            }
            Err(error) => {
                tracing::warn!(
                    proposal_id = proposal.proposal_id,
                    previous_id,
                    %error,
                    "previous round lookup failed; dropping link"
                );
                proposal.previous_proposal_id = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Venue;
    use crate::testing::{FakeProposalSource, titled};

    #[test]
    fn venues_replace_only_listed_proposals() {
        let mut proposals = vec![
            titled(1, "50", "a").with_venues(vec![Venue::new("old", "dex")]),
            titled(2, "50", "b").with_venues(vec![Venue::new("kept", "dex")]),
        ];
        let mut venues = VenueMap::new();
        venues.insert(1, vec![Venue::new("first", "dex"), Venue::new("second", "lending")]);
        venues.insert(7, vec![Venue::new("orphan", "dex")]);

        merge_venues(&mut proposals, venues);

        let addresses: Vec<&str> =
            proposals[0].venues.iter().map(|venue| venue.contract_address.as_str()).collect();
        assert_eq!(addresses, ["first", "second"]);
        assert_eq!(proposals[1].venues[0].contract_address, "kept");
    }

    #[test]
    fn previous_ids_apply_explicit_links_and_unlinks() {
        let mut proposals = vec![titled(1, "1", "a"), titled(2, "1", "b"), titled(3, "1", "c")];
        proposals[1].previous_proposal_id = Some(40);
        proposals[2].previous_proposal_id = Some(41);
        let links = PreviousIdMap::from([(1, Some(10)), (2, None)]);

        merge_previous_ids(&mut proposals, &links);

        assert_eq!(proposals[0].previous_proposal_id, Some(10));
        assert_eq!(proposals[1].previous_proposal_id, None);
        assert_eq!(proposals[2].previous_proposal_id, Some(41));
    }

    #[test]
    fn previous_funds_query_prior_round_and_drop_failed_links() {
        let source = FakeProposalSource::default().with_deployment(10, 70).failing_deployment(11);
        let mut proposals = vec![titled(1, "1", "a"), titled(2, "1", "b"), titled(3, "1", "c")];
        proposals[0].previous_proposal_id = Some(10);
        proposals[1].previous_proposal_id = Some(11);

        merge_previous_funds(&source, &mut proposals, 5, 2);

        assert_eq!(proposals[0].previous_funds, 70);
        assert_eq!(proposals[0].previous_proposal_id, Some(10));
        assert_eq!(proposals[1].previous_funds, 0);
        assert_eq!(proposals[1].previous_proposal_id, None);
        assert_eq!(proposals[2].previous_funds, 0);
        assert_eq!(source.recorded_lookups(), vec![(10, 4, 2), (11, 4, 2)]);
    }

    #[test]
    fn first_round_has_no_previous_funds() {
        let source = FakeProposalSource::default().with_deployment(10, 70);
        let mut proposals = vec![titled(1, "1", "a")];
        proposals[0].previous_proposal_id = Some(10);

        merge_previous_funds(&source, &mut proposals, 0, 1);

        assert_eq!(proposals[0].previous_funds, 0);
        assert_eq!(proposals[0].previous_proposal_id, Some(10));
        assert!(source.recorded_lookups().is_empty());
    }
}
