//! Gateways that carry [`HalQuery`] requests to the HAL API.
//!
//! Everything above this module talks to HAL through the [`QueryGateway`] trait,
//! which takes an [`Endpoint`] plus a [`HalQuery`] and hands back the parsed JSON
//! body. [`HalClient`] is the implementation backed by `reqwest`.
//!
//! # Examples
//!
//! ```no_run
//! use halsearch::{
//!   clients::{HalClient, QueryGateway},
//!   query::HalQuery,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HalClient::new();
//! let body = client.query_prefix(Some("journal"), &HalQuery::new("issn_s:0028-0836")).await?;
//! println!("{}", body["response"]["numFound"]);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

pub mod hal;
#[cfg(test)] pub(crate) mod memory;

pub use hal::HalClient;

use super::*;

/// A single round trip to the HAL API.
///
/// Implementations issue exactly one request per call and do not retry. Transport
/// and decoding failures are returned as they come.
#[async_trait]
pub trait QueryGateway: Send + Sync {
  /// Sends `query` to `endpoint` and returns the parsed JSON body.
  async fn query(&self, endpoint: Endpoint, query: &HalQuery) -> Result<Value, HalError>;

  /// Sends `query` to the endpoint named by an optional entity-type prefix.
  ///
  /// See [`Endpoint::from_prefix`] for how the prefix is interpreted.
  async fn query_prefix(&self, prefix: Option<&str>, query: &HalQuery) -> Result<Value, HalError> {
    self.query(Endpoint::from_prefix(prefix), query).await
  }

  /// Number of publications requested per author identifier.
  fn rows(&self) -> usize { config::DEFAULT_ROWS }
}
