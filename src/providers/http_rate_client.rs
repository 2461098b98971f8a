use crate::core::error::ClientError;
use crate::core::rates::{RateClient, RateSnapshot};
use crate::providers::util::{build_http_client, coerce_rate, get_text};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, instrument};

/// Rate client over a "latest rates" endpoint and a "rate on date" endpoint.
pub struct HttpRateClient {
    latest_base_url: String,
    historical_base_url: String,
    client: reqwest::Client,
}

impl HttpRateClient {
    pub fn new(latest_base_url: &str, historical_base_url: &str, timeout: Duration) -> Result<Self> {
        let client = build_http_client(timeout).context("Failed to build HTTP client")?;
        Ok(HttpRateClient {
            latest_base_url: latest_base_url.trim_end_matches('/').to_string(),
            historical_base_url: historical_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    base: Option<String>,
    date: Option<String>,
    rates: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    #[serde(default)]
    rates: HashMap<String, serde_json::Value>,
}

fn parse_failed(url: &str, reason: impl ToString) -> ClientError {
    ClientError::ParseFailed {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl RateClient for HttpRateClient {
    #[instrument(name = "LatestRatesFetch", skip_all, fields(base = %base))]
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot, ClientError> {
        let url = format!("{}/{}", self.latest_base_url, base);
        let text = get_text(&self.client, &url).await?;

        let data: LatestResponse =
            serde_json::from_str(&text).map_err(|e| parse_failed(&url, e))?;

        let rates = data
            .rates
            .iter()
            .map(|(code, value)| {
                coerce_rate(value)
                    .map(|rate| (code.to_uppercase(), rate))
                    .ok_or_else(|| parse_failed(&url, format!("non-numeric rate for {code}")))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        debug!(count = rates.len(), "Parsed latest rates");

        Ok(RateSnapshot {
            base: data.base.unwrap_or_else(|| base.to_uppercase()),
            date: data.date,
            rates,
        })
    }

    #[instrument(name = "DailyRateFetch", skip_all, fields(base = %base, target = %target, date = %date))]
    async fn fetch_rate_for_date(
        &self,
        base: &str,
        target: &str,
        date: NaiveDate,
    ) -> Result<f64, ClientError> {
        let url = format!(
            "{}/{}?from={}&to={}",
            self.historical_base_url,
            date.format("%Y-%m-%d"),
            base,
            target
        );
        let text = get_text(&self.client, &url).await?;

        let data: HistoricalResponse =
            serde_json::from_str(&text).map_err(|e| parse_failed(&url, e))?;

        match data.rates.get(&target.to_uppercase()) {
            Some(value) => coerce_rate(value)
                .ok_or_else(|| parse_failed(&url, format!("non-numeric rate for {target}"))),
            None => {
                debug!("No {} rate in response, treating as no conversion", target);
                Ok(1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FetchFailure;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpRateClient {
        HttpRateClient::new(
            &format!("{}/v4/latest", server.uri()),
            &server.uri(),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    pub async fn create_latest_mock(server: &MockServer, base: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/v4/latest/{base}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_successful_latest_fetch() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "base": "USD",
            "date": "2024-03-10",
            "time_last_updated": 1710028801,
            "rates": {"USD": 1, "EUR": 0.85, "JPY": 148}
        }"#;
        create_latest_mock(&mock_server, "USD", 200, mock_response).await;

        let snapshot = client_for(&mock_server).fetch_latest("USD").await.unwrap();
        assert_eq!(snapshot.base, "USD");
        assert_eq!(snapshot.date.as_deref(), Some("2024-03-10"));
        assert_eq!(snapshot.rates.len(), 3);
        assert_eq!(snapshot.rate_for("USD"), Some(1.0));
        assert_eq!(snapshot.rate_for("EUR"), Some(0.85));
        assert_eq!(snapshot.rate_for("JPY"), Some(148.0));
    }

    #[tokio::test]
    async fn test_latest_http_error() {
        let mock_server = MockServer::start().await;
        create_latest_mock(&mock_server, "USD", 500, "").await;

        let err = client_for(&mock_server)
            .fetch_latest("USD")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::FetchFailed {
                url: format!("{}/v4/latest/USD", mock_server.uri()),
                cause: FetchFailure::Status(500),
            }
        );
    }

    #[tokio::test]
    async fn test_latest_malformed_response() {
        let mock_server = MockServer::start().await;
        create_latest_mock(&mock_server, "USD", 200, r#"{"base": "USD", "result": {}}"#).await;
        create_latest_mock(&mock_server, "EUR", 200, "<html>not json</html>").await;
        create_latest_mock(&mock_server, "GBP", 200, r#"{"rates": {"USD": "n/a"}}"#).await;
        create_latest_mock(&mock_server, "JPY", 200, r#"{"rates": {"USD": "NaN"}}"#).await;
        create_latest_mock(&mock_server, "CHF", 200, r#"{"rates": {"USD": "inf"}}"#).await;
        let client = client_for(&mock_server);

        for base in ["USD", "EUR", "GBP", "JPY", "CHF"] {
            let err = client.fetch_latest(base).await.unwrap_err();
            assert!(
                matches!(err, ClientError::ParseFailed { .. }),
                "expected parse failure for {base}, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_rate_for_date() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2024-03-04"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"amount": 1.0, "base": "USD", "date": "2024-03-04", "rates": {"EUR": 0.9213}}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let rate = client_for(&mock_server)
            .fetch_rate_for_date("USD", "EUR", date)
            .await
            .unwrap();
        assert_eq!(rate, 0.9213);
    }

    #[tokio::test]
    async fn test_rate_for_date_missing_target_is_one() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2024-03-04"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rates": {}}"#))
            .mount(&mock_server)
            .await;

        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let rate = client_for(&mock_server)
            .fetch_rate_for_date("USD", "EUR", date)
            .await
            .unwrap();
        assert_eq!(rate, 1.0);
    }

    #[tokio::test]
    async fn test_rate_for_date_errors() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2024-03-04"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message": "not found"}"#))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/2024-03-05"))
            .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        let err = client
            .fetch_rate_for_date("USD", "EUR", NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_status());

        let err = client
            .fetch_rate_for_date("USD", "EUR", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ParseFailed { .. }));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_status_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2024-03-04"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;
        create_latest_mock(&mock_server, "USD", 204, "").await;
        let client = client_for(&mock_server);

        let err = client
            .fetch_rate_for_date("USD", "EUR", NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
            .await
            .unwrap_err();
        assert!(
            matches!(
                err,
                ClientError::FetchFailed {
                    cause: FetchFailure::Status(204),
                    ..
                }
            ),
            "expected status failure, got {err:?}"
        );

        let err = client.fetch_latest("USD").await.unwrap_err();
        assert!(err.is_status());
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"rates": {"EUR": 0.85}}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = HttpRateClient::new(
            &format!("{}/v4/latest", mock_server.uri()),
            &mock_server.uri(),
            Duration::from_millis(50),
        )
        .unwrap();

        let err = client.fetch_latest("USD").await.unwrap_err();
        assert!(
            matches!(
                err,
                ClientError::FetchFailed {
                    cause: FetchFailure::Timeout,
                    ..
                }
            ),
            "expected timeout, got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let client = HttpRateClient::new(
            "http://127.0.0.1:9/latest",
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.fetch_latest("USD").await.unwrap_err();
        assert!(matches!(err, ClientError::FetchFailed { .. }));
        assert!(!err.is_status());
    }
}
