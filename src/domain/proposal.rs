//! Proposal and venue records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::coerce;

/// A funding request competing for a share of the total budget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub round_id: u64,
    #[serde(default)]
    pub tranche_id: u64,
    #[serde(default)]
    pub deployment_duration: u64,
    #[serde(default)]
    pub minimum_atom_liquidity_request: String,
    /// Vote share as reported by the service, kept verbatim.
    #[serde(default)]
    pub percentage: VoteShare,
    #[serde(default)]
    pub power: String,
    /// Absolute budget assigned by the proposal allocator.
    #[serde(default)]
    pub allocated_amount: f64,
    /// Identifier this proposal carried in the previous round, if any.
    #[serde(default)]
    pub previous_proposal_id: Option<u64>,
    #[serde(default, rename = "deployment_locations")]
    pub venues: Vec<Venue>,
    /// Amount deployed for the linked proposal in the previous round.
    #[serde(default)]
    pub previous_funds: u64,
}

impl Proposal {
    pub fn new(proposal_id: u64, percentage: impl Into<VoteShare>) -> Self {
        Self { proposal_id, percentage: percentage.into(), ..Self::default() }
    }

    pub fn with_venues(mut self, venues: Vec<Venue>) -> Self {
        self.venues = venues;
        self
    }

    /// Sum of what the venue allocator placed.
    pub fn placed_amount(&self) -> f64 {
        self.venues.iter().map(|venue| venue.allocated).sum()
    }

    /// Budget the venues could not absorb.
    pub fn unplaced_amount(&self) -> f64 {
        (self.allocated_amount - self.placed_amount()).max(0.0)
    }
}

/// A deployment destination owned by exactly one proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub contract_address: String,
    #[serde(default)]
    pub denom: String,
    /// Policy category, matched case-insensitively against the fraction table.
    #[serde(default)]
    pub deployment_type: String,
    #[serde(default, rename = "existing_tvl")]
    pub existing_balance: f64,
    #[serde(default)]
    pub bootstrap_eligible: bool,
    /// Relative weight; not required to sum to anything in particular.
    #[serde(default, rename = "percentage")]
    pub weight: f64,
    #[serde(default, rename = "venue_limit")]
    pub capacity: f64,
    #[serde(default, rename = "venue_allocated")]
    pub allocated: f64,
}

impl Venue {
    pub fn new(contract_address: impl Into<String>, deployment_type: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            deployment_type: deployment_type.into(),
            ..Self::default()
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn existing_balance(mut self, balance: f64) -> Self {
        self.existing_balance = balance;
        self
    }

    pub fn bootstrap(mut self, eligible: bool) -> Self {
        self.bootstrap_eligible = eligible;
        self
    }
}

/// Vote share percentage in `[0, 100]`, kept as the raw text the service sent.
///
/// The service encodes decimals as strings; numbers are accepted too and
/// stored in their display form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteShare(String);

impl VoteShare {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the share as a percentage clamped to `[0, 100]`.
    ///
    /// Returns `None` when the raw value is not a non-negative number.
    pub fn percent(&self) -> Option<f64> {
        coerce::parse_non_negative(&self.0).map(|value| value.min(100.0))
    }
}

impl fmt::Display for VoteShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VoteShare {
    fn from(value: &str) -> Self {
        VoteShare(value.to_string())
    }
}

impl From<String> for VoteShare {
    fn from(value: String) -> Self {
        VoteShare(value)
    }
}

impl From<f64> for VoteShare {
    fn from(value: f64) -> Self {
        VoteShare(value.to_string())
    }
}

impl Serialize for VoteShare {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawShare {
    Text(String),
    Number(serde_json::Number),
    Missing(()),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for VoteShare {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match RawShare::deserialize(deserializer)? {
            RawShare::Text(text) => text,
            RawShare::Number(number) => number.to_string(),
            RawShare::Missing(()) | RawShare::Other(_) => String::new(),
        };
        Ok(VoteShare(raw))
    }
}
