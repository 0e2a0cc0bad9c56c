//! Typed view of the JSON envelope HAL wraps every answer in.
//!
//! Both the reference and the search endpoints answer with
//! `{"response": {"numFound": N, "docs": [...]}}`. Only those two members are
//! relied upon; everything else in the body is ignored.

use serde::{de::DeserializeOwned, Deserializer};

use super::*;

/// The top-level body of a HAL answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct SearchResponse<D> {
  /// The result set
  pub response: ResponseBody<D>,
}

/// Match count and documents of a HAL answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct ResponseBody<D> {
  /// Total number of matches reported by the API
  #[serde(rename = "numFound", deserialize_with = "count")]
  pub num_found: u64,
  /// Documents in this page of results
  #[serde(default = "Vec::new")]
  pub docs:      Vec<D>,
}

impl<D: DeserializeOwned> SearchResponse<D> {
  /// Decodes an already parsed JSON body.
  pub fn from_value(value: Value) -> Result<Self, HalError> { Ok(serde_json::from_value(value)?) }

  /// Whether the API reported no match at all.
  pub fn is_empty(&self) -> bool { self.response.num_found == 0 }

  /// Consumes the response, yielding its documents.
  pub fn into_docs(self) -> Vec<D> { self.response.docs }
}

/// Reads `numFound`, which HAL may send as a number or as a numeric string.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
  use serde::de::Error;

  match Value::deserialize(deserializer)? {
    Value::Number(n) => n.as_u64().ok_or_else(|| D::Error::custom(format!("invalid numFound {n}"))),
    Value::String(s) =>
      s.trim().parse().map_err(|_| D::Error::custom(format!("invalid numFound {s:?}"))),
    other => Err(D::Error::custom(format!("invalid numFound {other}"))),
  }
}

/// Flattens a scalar or multi-valued field into display text.
///
/// Arrays are joined with `", "`; `null`, objects and empty arrays have no text.
pub(crate) fn text_of(value: Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Array(items) => {
      let parts: Vec<String> = items.into_iter().filter_map(text_of).collect();
      (!parts.is_empty()).then(|| parts.join(", "))
    },
    Value::Null | Value::Object(_) => None,
  }
}

/// Field deserializer for optional text, see [`text_of`].
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<String>, D::Error> {
  Ok(text_of(Value::deserialize(deserializer)?))
}

/// Field deserializer for multi-valued text: a lone string becomes a one-item list.
pub(crate) fn text_list<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Vec<String>, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::Array(items) => items.into_iter().filter_map(text_of).collect(),
    other => text_of(other).into_iter().collect(),
  })
}
