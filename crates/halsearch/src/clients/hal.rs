//! Client implementation for the public HAL API.
//!
//! This module provides [`HalClient`], the `reqwest`-backed [`QueryGateway`], along
//! with convenience methods for the resolver and aggregation entry points so that
//! a caller only ever needs one value in hand.
//!
//! The client talks to <https://api.archives-ouvertes.fr> by default. A different
//! root (for example a preproduction instance) can be set through [`HalConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use halsearch::clients::HalClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HalClient::new();
//! let table = client.get_hal_researcher_data(Some("Humbert"), Some("Marc"), None).await?;
//!
//! println!("{} publications", table.len());
//! # Ok(())
//! # }
//! ```

use super::*;

/// Client for the HAL reference and search endpoints.
///
/// Requests are sent one at a time and are never retried. Non-success statuses are
/// not inspected; their bodies go through the same JSON decoding as any other
/// answer and fail there if they are not HAL's envelope.
#[derive(Debug, Clone)]
pub struct HalClient {
  /// Internal web client used to connect to the API.
  client: reqwest::Client,
  /// API root, result window and user agent.
  config: HalConfig,
}

impl HalClient {
  /// Creates a client for the public HAL API with default settings.
  pub fn new() -> Self {
    let config = HalConfig::default();
    Self {
      client: reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .unwrap_or_default(),
      config,
    }
  }

  /// Creates a client from explicit settings.
  ///
  /// # Errors
  ///
  /// Returns [`HalError::Network`] if the underlying HTTP client cannot be built.
  pub fn with_config(config: HalConfig) -> Result<Self, HalError> {
    let client = reqwest::Client::builder().user_agent(config.user_agent.as_str()).build()?;
    Ok(Self { client, config })
  }

  /// The settings this client was built with.
  pub fn config(&self) -> &HalConfig { &self.config }

  /// Resolves a researcher's name to author-document identifiers.
  ///
  /// See [`author::id_author`].
  pub async fn id_author(
    &self,
    last_name: &str,
    first_name: &str,
  ) -> Result<Vec<AuthorDocId>, HalError> {
    author::id_author(self, last_name, first_name).await
  }

  /// Resolves an idHal to author-document identifiers.
  ///
  /// See [`author::req_id_hal`].
  pub async fn req_id_hal(&self, idhal: &str) -> Result<Vec<AuthorDocId>, HalError> {
    author::req_id_hal(self, idhal).await
  }

  /// Collects the publications of already resolved identifiers.
  ///
  /// See [`publication::aggregate`].
  pub async fn aggregate(&self, ids: &[AuthorDocId]) -> Result<PublicationTable, HalError> {
    publication::aggregate(self, ids).await
  }

  /// Resolves a researcher and collects all of their publications.
  ///
  /// See [`publication::get_hal_researcher_data`].
  pub async fn get_hal_researcher_data(
    &self,
    last_name: Option<&str>,
    first_name: Option<&str>,
    idhal: Option<&str>,
  ) -> Result<PublicationTable, HalError> {
    publication::get_hal_researcher_data(self, last_name, first_name, idhal).await
  }
}

impl Default for HalClient {
  fn default() -> Self { Self::new() }
}

#[async_trait]
impl QueryGateway for HalClient {
  async fn query(&self, endpoint: Endpoint, query: &HalQuery) -> Result<Value, HalError> {
    let url = query.url(&self.config.base_url, &endpoint)?;
    debug!("Fetching from HAL via: {url}");

    let response = self.client.get(url).send().await?;
    debug!("HAL response status: {}", response.status());

    let text = response.text().await?;
    trace!("HAL response: {text}");

    Ok(serde_json::from_str(&text)?)
  }

  fn rows(&self) -> usize { self.config.rows }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_with_config_keeps_settings() -> anyhow::Result<()> {
    let client = HalClient::with_config(HalConfig {
      base_url: "https://api-preprod.archives-ouvertes.fr".to_string(),
      rows: 25,
      ..HalConfig::default()
    })?;
    assert_eq!(client.rows(), 25);
    assert_eq!(client.config().base_url, "https://api-preprod.archives-ouvertes.fr");
    Ok(())
  }

  #[tokio::test]
  async fn test_unreachable_root_is_transport_error() {
    let client = HalClient::with_config(HalConfig {
      base_url: "http://127.0.0.1:9".to_string(),
      ..HalConfig::default()
    })
    .unwrap();
    let err = client.query(Endpoint::Search, &HalQuery::new("*:*")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
  }

  #[ignore = "hits the live HAL API"]
  #[traced_test]
  #[tokio::test]
  async fn test_live_reference_author_lookup() -> anyhow::Result<()> {
    let client = HalClient::new();
    let body = client.query_prefix(Some("author"), &HalQuery::new("Humbert Marc")).await?;
    dbg!(&body["response"]["numFound"]);
    assert!(body["response"]["docs"].is_array());
    Ok(())
  }

  #[ignore = "hits the live HAL API"]
  #[traced_test]
  #[tokio::test]
  async fn test_live_researcher_by_name() -> anyhow::Result<()> {
    let client = HalClient::new();
    let ids = client.id_author("Humbert", "Marc").await?;
    assert!(!ids.is_empty());

    let table = client.aggregate(&ids[..1]).await?;
    dbg!(table.len());
    Ok(())
  }
}
