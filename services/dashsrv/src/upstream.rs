//! Upstream backend access
//!
//! The backend is an external collaborator; this module only knows its two
//! collection endpoints and which alarm filters it understands natively.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use dash_model::{AlarmSeverity, AlarmUpstream, BatchUpstream, ProductionStep};

use crate::config::UpstreamConfig;
use crate::error::{AdapterError, Result};

const ALARMS_PATH: &str = "api/alarms";
const BATCHES_PATH: &str = "api/batches";

/// Alarm filters the backend applies itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmUpstreamQuery {
    pub severity: Option<AlarmSeverity>,
    pub production_step: Option<u32>,
    pub start_date: Option<String>,
}

impl AlarmUpstreamQuery {
    /// Query pairs in backend spelling
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(severity) = self.severity {
            pairs.push(("severity", severity.upstream_name().to_string()));
        }
        if let Some(step) = self.production_step {
            pairs.push(("productionStep", step.to_string()));
        }
        if let Some(start) = &self.start_date {
            pairs.push(("startDate", start.clone()));
        }
        pairs
    }
}

#[allow(clippy::disallowed_methods)] // literal pattern
fn step_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^step-(\d+)$").unwrap())
}

/// Backend step number for a `production_step` filter value
///
/// `step-N` references pass through as `N`; step names map to their line
/// position. Anything else is not forwarded.
pub fn upstream_step_number(filter: &str) -> Option<u32> {
    let value = filter.trim().to_ascii_lowercase();
    if let Some(caps) = step_ref_pattern().captures(&value) {
        return caps[1].parse().ok();
    }
    value
        .parse::<ProductionStep>()
        .ok()
        .map(|step| step.step_number())
}

#[async_trait]
pub trait UpstreamSource: Send + Sync + 'static {
    async fn fetch_alarms(&self, query: &AlarmUpstreamQuery) -> Result<Vec<AlarmUpstream>>;

    async fn fetch_batches(&self) -> Result<Vec<BatchUpstream>>;

    /// Cheap reachability check for `/health`
    async fn ping(&self) -> Result<()>;
}

/// reqwest-backed upstream client
pub struct HttpUpstream {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| AdapterError::Config(format!("upstream.base_url: {}", e)))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { base_url, http })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AdapterError::Internal(format!("invalid upstream path {}: {}", path, e)))
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        debug!("Fetching upstream {}", url);
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<Vec<T>>().await?)
    }
}

#[async_trait]
impl UpstreamSource for HttpUpstream {
    async fn fetch_alarms(&self, query: &AlarmUpstreamQuery) -> Result<Vec<AlarmUpstream>> {
        let mut url = self.url(ALARMS_PATH)?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.get_list(url).await
    }

    async fn fetch_batches(&self) -> Result<Vec<BatchUpstream>> {
        let url = self.url(BATCHES_PATH)?;
        self.get_list(url).await
    }

    async fn ping(&self) -> Result<()> {
        self.http.get(self.base_url.clone()).send().await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream_for(uri: &str, timeout_ms: u64) -> HttpUpstream {
        HttpUpstream::new(&UpstreamConfig {
            base_url: uri.to_string(),
            timeout_ms,
        })
        .unwrap()
    }

    #[test]
    fn test_step_number_from_filter() {
        assert_eq!(upstream_step_number("step-3"), Some(3));
        assert_eq!(upstream_step_number("step-12"), Some(12));
        assert_eq!(upstream_step_number("Mixing"), Some(2));
        assert_eq!(upstream_step_number("qa"), Some(5));
        assert_eq!(upstream_step_number("step-"), None);
        assert_eq!(upstream_step_number("blending"), None);
    }

    #[test]
    fn test_query_pairs_use_backend_spelling() {
        let query = AlarmUpstreamQuery {
            severity: Some(AlarmSeverity::Critical),
            production_step: Some(2),
            start_date: Some("2025-11-01".into()),
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("severity", "Critical".to_string()),
                ("productionStep", "2".to_string()),
                ("startDate", "2025-11-01".to_string()),
            ]
        );
        assert!(AlarmUpstreamQuery::default().pairs().is_empty());
    }

    #[test]
    fn test_base_path_is_kept() {
        let upstream = upstream_for("http://backend:8080/plant", 1000);
        assert_eq!(
            upstream.url(ALARMS_PATH).unwrap().as_str(),
            "http://backend:8080/plant/api/alarms"
        );
    }

    #[tokio::test]
    async fn test_fetch_alarms_forwards_native_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/alarms"))
            .and(query_param("severity", "Warning"))
            .and(query_param("productionStep", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "startDate": "2025-11-03T10:00:00", "severity": "Warning", "productionStep": 4}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let upstream = upstream_for(&server.uri(), 2000);
        let alarms = upstream
            .fetch_alarms(&AlarmUpstreamQuery {
                severity: Some(AlarmSeverity::Warning),
                production_step: Some(4),
                start_date: None,
            })
            .await
            .unwrap();
        assert_eq!(alarms.len(), 1);
        assert_eq!(alarms[0].production_step, Some(4));
    }

    #[tokio::test]
    async fn test_non_success_and_bad_body_are_upstream_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/batches"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/alarms"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let upstream = upstream_for(&server.uri(), 2000);
        let err = upstream.fetch_batches().await.unwrap_err();
        assert!(matches!(err, AdapterError::UpstreamStatus { status: 502, .. }));

        let err = upstream
            .fetch_alarms(&AlarmUpstreamQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::UpstreamDecode(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/batches"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let upstream = upstream_for(&server.uri(), 50);
        let err = upstream.fetch_batches().await.unwrap_err();
        assert!(matches!(err, AdapterError::UpstreamUnavailable(_)));
    }
}
