use crate::core::error::{ClientError, FetchFailure};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

pub const USER_AGENT: &str = concat!("fxtrend/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client with a per-request timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

fn fetch_failure(url: &str, err: reqwest::Error) -> ClientError {
    let cause = if err.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Transport(err.to_string())
    };
    ClientError::FetchFailed {
        url: url.to_string(),
        cause,
    }
}

/// Issues a GET and returns the body of a 200 response. Any other status,
/// including other 2xx codes, is a `FetchFailure::Status`.
pub async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, ClientError> {
    debug!("Requesting {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_failure(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ClientError::FetchFailed {
            url: url.to_string(),
            cause: FetchFailure::Status(status.as_u16()),
        });
    }

    response.text().await.map_err(|e| fetch_failure(url, e))
}

/// Accepts JSON numbers and numeric strings. Non-finite values such as
/// `"NaN"` or `"inf"` are rejected.
pub fn coerce_rate(value: &serde_json::Value) -> Option<f64> {
    let rate = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    rate.filter(|r| r.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_rate() {
        assert_eq!(coerce_rate(&json!(1)), Some(1.0));
        assert_eq!(coerce_rate(&json!(0.85)), Some(0.85));
        assert_eq!(coerce_rate(&json!("1.5")), Some(1.5));
        assert_eq!(coerce_rate(&json!("abc")), None);
        assert_eq!(coerce_rate(&json!(null)), None);
        assert_eq!(coerce_rate(&json!({"EUR": 1})), None);
    }

    #[test]
    fn test_coerce_rate_rejects_non_finite_strings() {
        assert_eq!(coerce_rate(&json!("NaN")), None);
        assert_eq!(coerce_rate(&json!("inf")), None);
        assert_eq!(coerce_rate(&json!("-infinity")), None);
        assert_eq!(coerce_rate(&json!(" 2.5 ")), Some(2.5));
    }
}
