//! LCD smart-query client implementation using reqwest.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, Proposal, ServiceConfig};
use crate::ports::ProposalSource;

/// Micro-units per whole asset unit in deployment records.
pub const MICRO_UNITS: u128 = 1_000_000;

const DEFAULT_STATUS_MESSAGE: &str = "LCD request failed";

/// HTTP transport for CosmWasm smart queries against one contract.
///
/// This client performs a single request per call. Retry behavior is
/// implemented by a dedicated retry wrapper adapter.
#[derive(Debug, Clone)]
pub struct HttpLcdClient {
    lcd_url: Url,
    contract_address: String,
    asset_denom: String,
    client: Client,
}

impl HttpLcdClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::LcdQuery {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self {
            lcd_url: config.lcd_url.clone(),
            contract_address: config.contract_address.clone(),
            asset_denom: config.asset_denom.clone(),
            client,
        })
    }

    fn query_url(&self, msg: &QueryMsg) -> Result<String, AppError> {
        let encoded = STANDARD.encode(serde_json::to_vec(msg)?);
        Ok(format!(
            "{}/cosmwasm/wasm/v1/contract/{}/smart/{}",
            self.lcd_url.as_str().trim_end_matches('/'),
            self.contract_address,
            encoded
        ))
    }

    fn smart_query<T: DeserializeOwned>(&self, msg: &QueryMsg) -> Result<T, AppError> {
        let url = self.query_url(msg)?;
        tracing::debug!(query = msg.name(), %url, "LCD smart query");

        let response = self.client.get(&url).send().map_err(|e| AppError::LcdQuery {
            message: format!("HTTP request failed: {}", e),
            status: None,
        })?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str::<SmartResponse<T>>(&body_text)
                .map(|envelope| envelope.data)
                .map_err(|e| AppError::LcdQuery {
                    message: format!("Failed to parse {} response: {}", msg.name(), e),
                    status: Some(status.as_u16()),
                });
        }

        let mut message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if let Some(value) = retry_after_ms {
            message.push_str(&format!(" (retry_after_ms={})", value));
        }

        Err(AppError::LcdQuery { message, status: Some(status.as_u16()) })
    }
}

/// Contract query messages, serialized as `{"<name>":{...}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    RoundProposals { limit: u64, round_id: u64, start_from: u64, tranche_id: u64 },
    TopNProposals { number_of_proposals: u64, round_id: u64, tranche_id: u64 },
    LiquidityDeployment { proposal_id: u64, round_id: u64, tranche_id: u64 },
}

impl QueryMsg {
    fn name(&self) -> &'static str {
        match self {
            QueryMsg::RoundProposals { .. } => "round_proposals",
            QueryMsg::TopNProposals { .. } => "top_n_proposals",
            QueryMsg::LiquidityDeployment { .. } => "liquidity_deployment",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SmartResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ProposalsData {
    #[serde(default)]
    proposals: Vec<Proposal>,
}

#[derive(Debug, Deserialize)]
struct LiquidityDeploymentData {
    liquidity_deployment: LiquidityDeployment,
}

#[derive(Debug, Deserialize)]
struct LiquidityDeployment {
    #[serde(default)]
    deployed_funds: Vec<Coin>,
}

#[derive(Debug, Deserialize)]
struct Coin {
    denom: String,
    amount: String,
}

/// Sum the amounts in `denom` and convert micro-units to whole units,
/// truncating any fractional remainder.
fn whole_units_deployed(funds: &[Coin], denom: &str) -> Result<u64, AppError> {
    let mut total: u128 = 0;
    for coin in funds.iter().filter(|coin| coin.denom == denom) {
        let amount = coin.amount.trim().parse::<u128>().map_err(|e| AppError::LcdQuery {
            message: format!("Failed to parse deployed fund amount '{}': {}", coin.amount, e),
            status: None,
        })?;
        total = total.saturating_add(amount);
    }

    u64::try_from(total / MICRO_UNITS).map_err(|_| AppError::LcdQuery {
        message: format!("Deployed total {} {} exceeds supported range", total, denom),
        status: None,
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

impl ProposalSource for HttpLcdClient {
    fn round_proposals(
        &self,
        round_id: u64,
        tranche_id: u64,
        start_from: u64,
        limit: u64,
    ) -> Result<Vec<Proposal>, AppError> {
        let msg = QueryMsg::RoundProposals { limit, round_id, start_from, tranche_id };
        self.smart_query::<ProposalsData>(&msg).map(|data| data.proposals)
    }

    fn top_n_proposals(
        &self,
        number_of_proposals: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<Vec<Proposal>, AppError> {
        let msg = QueryMsg::TopNProposals { number_of_proposals, round_id, tranche_id };
        self.smart_query::<ProposalsData>(&msg).map(|data| data.proposals)
    }

    fn liquidity_deployment_total(
        &self,
        proposal_id: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<u64, AppError> {
        let msg = QueryMsg::LiquidityDeployment { proposal_id, round_id, tranche_id };
        let data = self.smart_query::<LiquidityDeploymentData>(&msg)?;
        whole_units_deployed(&data.liquidity_deployment.deployed_funds, &self.asset_denom)
    }
}
