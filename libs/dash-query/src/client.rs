//! HTTP client for the dashboard adapter endpoints

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use dash_model::paths::{ALARMS, ALARM_STATS, BATCHES, BATCH_STATS};
use dash_model::{AlarmStats, AlarmsResponse, BatchStats, BatchesResponse};
use errors::{DashError, DashResult};

/// Something that answers a serialized filter query with a page of data
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    async fn fetch(&self, query: String) -> DashResult<Self::Output>;
}

/// Client for the adapter service
#[derive(Clone)]
pub struct AdapterClient {
    base_url: Url,
    http: reqwest::Client,
}

impl AdapterClient {
    pub fn new(base_url: &str, timeout: Duration) -> DashResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| DashError::InvalidConfig {
            field: "base_url".to_string(),
            reason: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DashError::from)?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str, query: Option<&str>) -> DashResult<Url> {
        let mut url = self.base_url.join(path).map_err(|e| DashError::InvalidParameter {
            param: "path".to_string(),
            reason: e.to_string(),
        })?;
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: Option<&str>) -> DashResult<T> {
        let url = self.endpoint(path, query)?;
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    pub async fn alarms(&self, query: &str) -> DashResult<AlarmsResponse> {
        self.get_json(ALARMS, Some(query)).await
    }

    pub async fn batches(&self, query: &str) -> DashResult<BatchesResponse> {
        self.get_json(BATCHES, Some(query)).await
    }

    pub async fn alarm_stats(&self) -> DashResult<AlarmStats> {
        self.get_json(ALARM_STATS, None).await
    }

    pub async fn batch_stats(&self) -> DashResult<BatchStats> {
        self.get_json(BATCH_STATS, None).await
    }

    /// Page source for the alarm table
    pub fn alarms_source(&self) -> Arc<EndpointSource<AlarmsResponse>> {
        Arc::new(EndpointSource::new(self.clone(), ALARMS))
    }

    /// Page source for the batch table
    pub fn batches_source(&self) -> Arc<EndpointSource<BatchesResponse>> {
        Arc::new(EndpointSource::new(self.clone(), BATCHES))
    }
}

/// One adapter endpoint bound to its response type
pub struct EndpointSource<T> {
    client: AdapterClient,
    path: &'static str,
    _response: PhantomData<fn() -> T>,
}

impl<T> EndpointSource<T> {
    pub fn new(client: AdapterClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _response: PhantomData,
        }
    }
}

#[async_trait]
impl<T> PageSource for EndpointSource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Output = T;

    async fn fetch(&self, query: String) -> DashResult<T> {
        self.client.get_json(self.path, Some(&query)).await
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_path_and_query() {
        let client = AdapterClient::new("http://dash.local:6010", Duration::from_secs(1)).unwrap();
        let url = client.endpoint(ALARMS, Some("page=1&limit=20")).unwrap();
        assert_eq!(url.as_str(), "http://dash.local:6010/api/alarms?page=1&limit=20");

        let url = client.endpoint(ALARM_STATS, None).unwrap();
        assert_eq!(url.as_str(), "http://dash.local:6010/api/dashboard/alarm-stats");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = AdapterClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(DashError::InvalidConfig { .. })));
    }
}
