//! Backoff arithmetic for the request retry loop.

use std::time::Duration;

use reqwest::StatusCode;

/// Largest exponent applied to the base delay.
const MAX_BACKOFF_EXPONENT: usize = 16;

/// Exponential backoff: `base * 2^attempt`, with `attempt` counted from 0.
pub fn backoff_delay(base: Duration, attempt: usize) -> Duration {
    let exp = attempt.min(MAX_BACKOFF_EXPONENT) as u32;
    base.saturating_mul(1u32 << exp)
}

/// Parses a `Retry-After` header given in (possibly fractional) seconds.
///
/// HTTP-date values and negative or non-finite numbers yield `None`.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds = value.trim().parse::<f64>().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(seconds).ok()
}

/// Delay before the attempt following `attempt`.
///
/// `Retry-After` overrides the computed backoff only for HTTP 429.
pub fn next_delay(
    status: StatusCode,
    attempt: usize,
    base: Duration,
    retry_after: Option<&str>,
) -> Duration {
    if status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(delay) = retry_after.and_then(parse_retry_after) {
            return delay;
        }
    }
    backoff_delay(base, attempt)
}
