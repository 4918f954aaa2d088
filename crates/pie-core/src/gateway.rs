// File: crates/pie-core/src/gateway.rs
// Summary: Data source gateway; resolves a configuration to a dataset via a live query API or a content-addressed snapshot.
// Notes:
// - `resolve` reports failures as `FetchError`; `resolve_or_empty` is the
//   fail-soft entry point the orchestrator uses (log, then empty dataset).
// - Exactly one upstream call per resolution, no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::dataset::Dataset;
use crate::error::FetchError;
use crate::model::{Configuration, DataSource, DataSourceMode};

/// Parameters of a live query call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub data_source: DataSource,
    pub query_id: Option<String>,
    pub api_endpoint: Option<String>,
}

/// The two upstream operations the widget consumes. Both return the raw
/// provider payload; extraction happens in [`Dataset::from_payload`].
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn fetch_content(&self, cid: &str) -> Result<Value, FetchError>;
    async fn call_api(&self, request: &ApiRequest) -> Result<Value, FetchError>;
}

/// Resolve the configuration's data source to a dataset.
pub async fn resolve<G>(gateway: &G, config: &Configuration) -> Result<Dataset, FetchError>
where
    G: DataGateway + ?Sized,
{
    let payload = match config.mode {
        DataSourceMode::Snapshot => {
            let cid = config.snapshot_cid().ok_or(FetchError::MissingIdentifier("file"))?;
            gateway.fetch_content(cid).await?
        }
        DataSourceMode::Live => {
            let data_source = config.data_source.ok_or(FetchError::MissingIdentifier("dataSource"))?;
            let request = ApiRequest {
                data_source,
                query_id: config.query_id.clone(),
                api_endpoint: config.api_endpoint.clone(),
            };
            gateway.call_api(&request).await?
        }
    };
    Dataset::from_payload(payload)
}

/// Like [`resolve`], but any failure degrades to the empty dataset.
pub async fn resolve_or_empty<G>(gateway: &G, config: &Configuration) -> Dataset
where
    G: DataGateway + ?Sized,
{
    match resolve(gateway, config).await {
        Ok(dataset) => dataset,
        Err(e) => {
            degrade(&e, config.mode);
            Dataset::empty()
        }
    }
}

pub(crate) fn degrade(e: &FetchError, mode: DataSourceMode) {
    if e.is_missing_identifier() {
        debug!(mode = ?mode, "nothing to fetch: {e}");
    } else {
        warn!(mode = ?mode, error = %e, "data fetch failed; rendering empty dataset");
    }
}

/// `DataGateway` over HTTP: Dune / custom endpoints for live data and an IPFS
/// gateway for snapshots.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Provider-specific URL for a live query.
    pub fn api_url(&self, request: &ApiRequest) -> Result<String, FetchError> {
        match request.data_source {
            DataSource::Dune => {
                let query_id = non_empty(request.query_id.as_deref())
                    .ok_or(FetchError::MissingIdentifier("queryId"))?;
                Ok(format!(
                    "{}/query/{}/results",
                    self.config.dune_base_url.trim_end_matches('/'),
                    query_id
                ))
            }
            DataSource::Custom => non_empty(request.api_endpoint.as_deref())
                .map(str::to_string)
                .ok_or(FetchError::MissingIdentifier("apiEndpoint")),
        }
    }

    pub fn content_url(&self, cid: &str) -> String {
        format!("{}/{}", self.config.ipfs_gateway_url.trim_end_matches('/'), cid)
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status: status.as_u16(), body });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))
    }
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn fetch_content(&self, cid: &str) -> Result<Value, FetchError> {
        let url = self.content_url(cid);
        debug!(%url, "fetching snapshot content");
        self.get_json(self.client.get(&url)).await
    }

    async fn call_api(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        let url = self.api_url(request)?;
        debug!(%url, source = ?request.data_source, "calling query API");
        let mut builder = self.client.get(&url);
        if request.data_source == DataSource::Dune {
            if let Some(key) = &self.config.dune_api_key {
                builder = builder.header("X-Dune-API-Key", key.as_str());
            }
        }
        self.get_json(builder).await
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
