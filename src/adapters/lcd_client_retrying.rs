//! Retry wrapper for proposal source queries.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::{AppError, Proposal, ServiceConfig};
use crate::ports::ProposalSource;

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let multiplier = 1_u64 << exponent;
        let backoff_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Proposal source that retries transient failures of an inner source.
pub struct RetryingProposalSource {
    inner: Box<dyn ProposalSource>,
    policy: RetryPolicy,
}

impl RetryingProposalSource {
    pub fn new(inner: Box<dyn ProposalSource>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn with_retries<T>(
        &self,
        operation: &str,
        mut call: impl FnMut(&dyn ProposalSource) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.policy.max_attempts {
            match call(self.inner.as_ref()) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    let retryable = is_retryable_error(&error);
                    let last_attempt = attempt == self.policy.max_attempts;

                    if !retryable || last_attempt {
                        return Err(error);
                    }

                    let delay = self.policy.delay_for_retry(attempt, &error);
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %format_error_for_log(&error),
                        "LCD query failed; retrying"
                    );
                    last_error = Some(error);
                    thread::sleep(delay);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::LcdQuery {
            message: format!("{operation} failed after retries"),
            status: None,
        }))
    }
}

impl ProposalSource for RetryingProposalSource {
    fn round_proposals(
        &self,
        round_id: u64,
        tranche_id: u64,
        start_from: u64,
        limit: u64,
    ) -> Result<Vec<Proposal>, AppError> {
        self.with_retries("round_proposals", |source| {
            source.round_proposals(round_id, tranche_id, start_from, limit)
        })
    }

    fn top_n_proposals(
        &self,
        number_of_proposals: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<Vec<Proposal>, AppError> {
        self.with_retries("top_n_proposals", |source| {
            source.top_n_proposals(number_of_proposals, round_id, tranche_id)
        })
    }

    fn liquidity_deployment_total(
        &self,
        proposal_id: u64,
        round_id: u64,
        tranche_id: u64,
    ) -> Result<u64, AppError> {
        self.with_retries("liquidity_deployment", |source| {
            source.liquidity_deployment_total(proposal_id, round_id, tranche_id)
        })
    }
}

fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::LcdQuery { message, status } => {
            if status.is_some_and(|code| code == 429 || code == 408 || code >= 500) {
                return true;
            }
            if status.is_some() {
                return false;
            }

            let lower = message.to_ascii_lowercase();
            lower.contains("timeout")
                || lower.contains("timed out")
                || lower.contains("connect")
                || lower.contains("connection")
                || lower.contains("temporary")
        }
        _ => false,
    }
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let message = match error {
        AppError::LcdQuery { message, .. } => message,
        _ => return None,
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let tail = &message[start..];
    let digits: String = tail.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4; // 25% jitter upper bound
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}

fn format_error_for_log(error: &AppError) -> String {
    match error {
        AppError::LcdQuery { message, status } => {
            let sanitized = sanitize_and_truncate_for_log(message);
            match status {
                Some(code) => format!("LcdQuery(status={}): {}", code, sanitized),
                None => format!("LcdQuery: {}", sanitized),
            }
        }
        _ => sanitize_and_truncate_for_log(&error.to_string()),
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let mut output = String::new();

    for (count, ch) in input.chars().enumerate() {
        if count >= MAX_LOG_ERROR_CHARS {
            break;
        }
        output.push(if ch.is_control() { ' ' } else { ch });
    }

    let mut compact = output.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact.trim().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct SequenceSource {
        attempts: &'static AtomicUsize,
        responses: Mutex<Vec<Result<u64, AppError>>>,
    }

    impl SequenceSource {
        fn boxed(
            attempts: &'static AtomicUsize,
            responses: Vec<Result<u64, AppError>>,
        ) -> Box<dyn ProposalSource> {
            Box::new(Self { attempts, responses: Mutex::new(responses) })
        }
    }

    impl ProposalSource for SequenceSource {
        fn round_proposals(&self, _: u64, _: u64, _: u64, _: u64) -> Result<Vec<Proposal>, AppError> {
            Ok(vec![])
        }

        fn top_n_proposals(&self, _: u64, _: u64, _: u64) -> Result<Vec<Proposal>, AppError> {
            Ok(vec![])
        }

        fn liquidity_deployment_total(&self, _: u64, _: u64, _: u64) -> Result<u64, AppError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let mut guard = self.responses.lock().expect("responses lock poisoned");
            if guard.is_empty() {
                return Err(AppError::LcdQuery {
                    message: "test: unexpected extra call".to_string(),
                    status: Some(500),
                });
            }
            guard.remove(0)
        }
    }

    fn server_error(status: u16) -> AppError {
        AppError::LcdQuery { message: "server error".to_string(), status: Some(status) }
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy { max_attempts, base_delay_ms: 1, max_delay_ms: 2 }
    }

    #[test]
    fn retries_transient_failures_and_succeeds() {
        static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
        let inner =
            SequenceSource::boxed(&ATTEMPTS, vec![Err(server_error(500)), Err(server_error(429)), Ok(7)]);
        let source = RetryingProposalSource::new(inner, policy(3));

        assert_eq!(source.liquidity_deployment_total(1, 2, 1).unwrap(), 7);
        assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn does_not_retry_on_client_error() {
        static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
        let inner = SequenceSource::boxed(&ATTEMPTS, vec![Err(server_error(400)), Ok(7)]);
        let source = RetryingProposalSource::new(inner, policy(3));

        match source.liquidity_deployment_total(1, 2, 1).unwrap_err() {
            AppError::LcdQuery { status, .. } => assert_eq!(status, Some(400)),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn retries_connection_failures_without_status() {
        static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
        let refused = AppError::LcdQuery {
            message: "HTTP request failed: error trying to connect".to_string(),
            status: None,
        };
        let inner = SequenceSource::boxed(&ATTEMPTS, vec![Err(refused), Ok(3)]);
        let source = RetryingProposalSource::new(inner, policy(2));

        assert_eq!(source.liquidity_deployment_total(1, 2, 1).unwrap(), 3);
    }

    #[test]
    fn stops_after_max_attempts() {
        static ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
        let inner = SequenceSource::boxed(
            &ATTEMPTS,
            vec![Err(server_error(500)), Err(server_error(502)), Err(server_error(503))],
        );
        let source = RetryingProposalSource::new(inner, policy(2));

        assert!(source.liquidity_deployment_total(1, 2, 1).is_err());
        assert_eq!(ATTEMPTS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn retry_after_hint_is_honored_and_capped() {
        let policy = RetryPolicy { max_attempts: 3, base_delay_ms: 1, max_delay_ms: 500 };
        let error = AppError::LcdQuery {
            message: "Rate limited (retry_after_ms=2000)".to_string(),
            status: Some(429),
        };
        assert_eq!(policy.delay_for_retry(1, &error), Duration::from_millis(500));
    }

    #[test]
    fn log_format_sanitizes_control_characters() {
        let err = AppError::LcdQuery {
            message: "bad\nerror\twith\rcontrols".to_string(),
            status: Some(500),
        };
        let formatted = format_error_for_log(&err);
        assert!(formatted.contains("LcdQuery(status=500):"));
        assert!(!formatted.contains('\n'));
        assert!(!formatted.contains('\r'));
    }
}
