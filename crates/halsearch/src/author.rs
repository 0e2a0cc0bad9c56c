//! Resolution of a researcher to HAL author-document identifiers.
//!
//! HAL keeps one author form per (person, affiliation) pairing, each with its own
//! `docid` of the shape `"<number>-<number>"`. A researcher can therefore own
//! several identifiers. Two entry points produce them:
//!
//! - [`id_author`] searches author forms by name and keeps the first identifier for
//!   each distinct numeric suffix.
//! - [`req_id_hal`] looks author forms up by idHal and keeps every identifier, with
//!   no suffix filtering.
//!
//! # Examples
//!
//! ```no_run
//! use halsearch::{author, clients::HalClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HalClient::new();
//! let by_name = author::id_author(&client, "Humbert", "Marc").await?;
//! let by_idhal = author::req_id_hal(&client, "marc-humbert").await?;
//! println!("{by_name:?} {by_idhal:?}");
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use super::*;

/// An author-document identifier, e.g. `"1234-56789"`.
pub type AuthorDocId = String;

/// An author form returned by the `ref/author` endpoint.
#[derive(Debug, Deserialize)]
struct AuthorDoc {
  /// Composite author-document identifier
  #[serde(default, deserialize_with = "response::optional_text")]
  docid: Option<String>,
}

/// The part of an identifier after its first `-`.
///
/// An identifier without a separator is its own suffix.
///
/// ```
/// use halsearch::author::docid_suffix;
///
/// assert_eq!(docid_suffix("100-2"), "2");
/// assert_eq!(docid_suffix("100-2-3"), "2-3");
/// assert_eq!(docid_suffix("100"), "100");
/// ```
pub fn docid_suffix(docid: &str) -> &str {
  docid.split_once('-').map_or(docid, |(_, suffix)| suffix)
}

/// Resolves a researcher's last and first name to author-document identifiers.
///
/// The name is sent as `"<last_name> <first_name>"` to the `ref/author` endpoint.
/// Identifiers are returned in response order, keeping only the first one seen for
/// each [`docid_suffix`].
///
/// # Errors
///
/// - [`HalError::MissingInput`] if `last_name` or `first_name` is blank, checked in
///   that order with a distinct message for each
/// - [`HalError::NoDataFound`] if HAL reports no match
/// - [`HalError::DataShape`] if a returned author form has no `docid`
/// - transport and JSON errors from the gateway
pub async fn id_author<G: QueryGateway + ?Sized>(
  gateway: &G,
  last_name: &str,
  first_name: &str,
) -> Result<Vec<AuthorDocId>, HalError> {
  if last_name.trim().is_empty() {
    return Err(HalError::MissingInput("last name is required"));
  }
  if first_name.trim().is_empty() {
    return Err(HalError::MissingInput("first name is required"));
  }

  let docids = author_docids(gateway, HalQuery::new(format!("{last_name} {first_name}"))).await?;

  let mut seen = HashSet::new();
  let ids: Vec<AuthorDocId> =
    docids.into_iter().filter(|docid| seen.insert(docid_suffix(docid).to_string())).collect();

  debug!("Resolved {last_name} {first_name} to {} author identifiers", ids.len());
  Ok(ids)
}

/// Resolves an idHal to author-document identifiers.
///
/// Queries `ref/author` with `idHal_s:<idhal>` and returns every `docid`, in
/// response order, without suffix filtering.
///
/// # Errors
///
/// - [`HalError::MissingInput`] if `idhal` is blank
/// - [`HalError::NoDataFound`] if HAL reports no match
/// - [`HalError::DataShape`] if a returned author form has no `docid`
/// - transport and JSON errors from the gateway
pub async fn req_id_hal<G: QueryGateway + ?Sized>(
  gateway: &G,
  idhal: &str,
) -> Result<Vec<AuthorDocId>, HalError> {
  if idhal.trim().is_empty() {
    return Err(HalError::MissingInput("idHal is required"));
  }

  let ids = author_docids(gateway, HalQuery::new(format!("idHal_s:{idhal}"))).await?;
  debug!("Resolved idHal {idhal} to {} author identifiers", ids.len());
  Ok(ids)
}

/// Runs an author-form lookup and collects the `docid` of every returned form.
async fn author_docids<G: QueryGateway + ?Sized>(
  gateway: &G,
  query: HalQuery,
) -> Result<Vec<AuthorDocId>, HalError> {
  let body = gateway.query(Endpoint::Reference(ReferenceKind::Author), &query).await?;
  let response = SearchResponse::<AuthorDoc>::from_value(body)?;

  if response.is_empty() {
    return Err(HalError::NoDataFound);
  }

  response
    .into_docs()
    .into_iter()
    .map(|doc| {
      doc.docid.ok_or_else(|| HalError::DataShape("author form has no docid".to_string()))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::clients::memory::{body, MemoryGateway};

  /// Endpoint every resolver query goes to.
  const AUTHOR: Endpoint = Endpoint::Reference(ReferenceKind::Author);

  #[traced_test]
  #[tokio::test]
  async fn test_id_author_drops_repeated_suffixes() -> anyhow::Result<()> {
    let gateway = MemoryGateway::new().with_docs(AUTHOR, "Doe John", vec![
      json!({"docid": "100-1"}),
      json!({"docid": "200-1"}),
      json!({"docid": "100-2"}),
      json!({"docid": "300-2"}),
      json!({"docid": "400-3"}),
    ]);

    let ids = id_author(&gateway, "Doe", "John").await?;
    assert_eq!(ids, vec!["100-1", "100-2", "400-3"]);

    let suffixes: HashSet<&str> = ids.iter().map(|id| docid_suffix(id)).collect();
    assert_eq!(suffixes.len(), ids.len());

    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, AUTHOR);
    assert_eq!(requests[0].1, HalQuery::new("Doe John"));
    Ok(())
  }

  #[tokio::test]
  async fn test_id_author_missing_names() {
    let gateway = MemoryGateway::new();

    let last = id_author(&gateway, "", "John").await.unwrap_err();
    let first = id_author(&gateway, "Doe", "").await.unwrap_err();
    assert_eq!(last.kind(), ErrorKind::MissingInput);
    assert_eq!(first.kind(), ErrorKind::MissingInput);
    assert_ne!(last.to_string(), first.to_string());

    // Last name is checked before first name.
    let both = id_author(&gateway, "", "").await.unwrap_err();
    assert_eq!(both.to_string(), last.to_string());

    assert!(gateway.requests().is_empty());
  }

  #[tokio::test]
  async fn test_no_data_found_for_both_resolvers() {
    let gateway = MemoryGateway::new();

    let by_name = id_author(&gateway, "Nobody", "Here").await.unwrap_err();
    let by_idhal = req_id_hal(&gateway, "nobody-here").await.unwrap_err();
    assert_eq!(by_name.kind(), ErrorKind::NoDataFound);
    assert_eq!(by_idhal.kind(), ErrorKind::NoDataFound);
  }

  #[traced_test]
  #[tokio::test]
  async fn test_req_id_hal_keeps_every_docid() -> anyhow::Result<()> {
    let gateway = MemoryGateway::new().with_docs(AUTHOR, "idHal_s:jdoe", vec![
      json!({"docid": "100-1"}),
      json!({"docid": "200-1"}),
    ]);

    let ids = req_id_hal(&gateway, "jdoe").await?;
    assert_eq!(ids, vec!["100-1", "200-1"]);
    Ok(())
  }

  #[tokio::test]
  async fn test_numeric_docid_and_string_count() -> anyhow::Result<()> {
    let gateway = MemoryGateway::new().with_body(
      AUTHOR,
      "idHal_s:jdoe",
      json!({"response": {"numFound": "1", "docs": [{"docid": 12345}]}}),
    );

    assert_eq!(req_id_hal(&gateway, "jdoe").await?, vec!["12345"]);
    Ok(())
  }

  #[tokio::test]
  async fn test_form_without_docid_is_data_shape_error() {
    let gateway = MemoryGateway::new().with_body(
      AUTHOR,
      "idHal_s:jdoe",
      body(vec![json!({"fullName_s": "John Doe"})]),
    );

    let err = req_id_hal(&gateway, "jdoe").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataShape);
  }

  #[tokio::test]
  async fn test_blank_idhal_is_missing_input() {
    let err = req_id_hal(&MemoryGateway::new(), "  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);
  }
}
