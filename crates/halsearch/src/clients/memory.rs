//! In-memory [`QueryGateway`] serving canned bodies, for tests.

use std::{collections::HashMap, sync::Mutex};

use serde_json::json;

use super::*;

/// Answers queries from a table keyed by endpoint and `q` expression.
///
/// Unknown queries get an empty result set. Every request is recorded.
#[derive(Debug, Default)]
pub(crate) struct MemoryGateway {
  /// Bodies to serve
  answers:  HashMap<(Endpoint, String), Value>,
  /// Requests seen so far, in order
  requests: Mutex<Vec<(Endpoint, HalQuery)>>,
}

impl MemoryGateway {
  /// A gateway with no canned answers.
  pub(crate) fn new() -> Self { Self::default() }

  /// Serves `docs` for `q` on `endpoint`.
  pub(crate) fn with_docs(self, endpoint: Endpoint, q: &str, docs: Vec<Value>) -> Self {
    self.with_body(endpoint, q, body(docs))
  }

  /// Serves a raw body for `q` on `endpoint`.
  pub(crate) fn with_body(mut self, endpoint: Endpoint, q: &str, body: Value) -> Self {
    self.answers.insert((endpoint, q.to_string()), body);
    self
  }

  /// Every request received so far.
  pub(crate) fn requests(&self) -> Vec<(Endpoint, HalQuery)> {
    self.requests.lock().unwrap().clone()
  }
}

/// Wraps documents in HAL's response envelope.
pub(crate) fn body(docs: Vec<Value>) -> Value {
  json!({ "response": { "numFound": docs.len(), "docs": docs } })
}

#[async_trait]
impl QueryGateway for MemoryGateway {
  async fn query(&self, endpoint: Endpoint, query: &HalQuery) -> Result<Value, HalError> {
    self.requests.lock().unwrap().push((endpoint, query.clone()));
    Ok(self.answers.get(&(endpoint, query.q.clone())).cloned().unwrap_or_else(|| body(Vec::new())))
  }
}
