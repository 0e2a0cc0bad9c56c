//! Request model for the HAL API.
//!
//! HAL exposes two families of endpoints:
//! - `ref/<type>` answers exact lookups of canonical entities (authors, journals, ...)
//! - `search/` answers structured queries over deposited documents
//!
//! An [`Endpoint`] picks one of those, and a [`HalQuery`] carries the Solr-style
//! parameters (`q`, `fl`, `start`, `rows`) that are appended to it.
//!
//! # Examples
//!
//! ```
//! use halsearch::query::{Endpoint, HalQuery};
//!
//! let query = HalQuery::new("idHal_s:jdoe");
//! let url = query.url("https://api.archives-ouvertes.fr", &Endpoint::from_prefix(Some("author")))?;
//! assert_eq!(url.as_str(), "https://api.archives-ouvertes.fr/ref/author?q=idHal_s%3Ajdoe&wt=json");
//! # Ok::<(), halsearch::errors::HalError>(())
//! ```

use url::Url;

use super::*;

/// Entity types served by the reference endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
  /// French national research agency projects
  AnrProject,
  /// Document types
  DocType,
  /// HAL portals and instances
  Instance,
  /// Metadata field values
  Metadata,
  /// Research structures (labs, institutions)
  Structure,
  /// Lists of metadata values
  MetadataList,
  /// Journals
  Journal,
  /// Scientific domains
  Domain,
  /// European projects
  EuropeanProject,
  /// Author forms
  Author,
}

impl ReferenceKind {
  /// Every reference entity type, in the order HAL documents them.
  pub const ALL: [ReferenceKind; 10] = [
    ReferenceKind::AnrProject,
    ReferenceKind::DocType,
    ReferenceKind::Instance,
    ReferenceKind::Metadata,
    ReferenceKind::Structure,
    ReferenceKind::MetadataList,
    ReferenceKind::Journal,
    ReferenceKind::Domain,
    ReferenceKind::EuropeanProject,
    ReferenceKind::Author,
  ];

  /// The path segment used after `ref/`.
  pub fn as_str(&self) -> &'static str {
    match self {
      ReferenceKind::AnrProject => "anrproject",
      ReferenceKind::DocType => "doctype",
      ReferenceKind::Instance => "instance",
      ReferenceKind::Metadata => "metadata",
      ReferenceKind::Structure => "structure",
      ReferenceKind::MetadataList => "metadatalist",
      ReferenceKind::Journal => "journal",
      ReferenceKind::Domain => "domain",
      ReferenceKind::EuropeanProject => "europeanproject",
      ReferenceKind::Author => "author",
    }
  }

  /// Matches a prefix exactly against [`config::REFERENCE_PREFIXES`].
  pub fn from_prefix(prefix: &str) -> Option<Self> {
    config::REFERENCE_PREFIXES
      .iter()
      .position(|p| *p == prefix)
      .map(|index| ReferenceKind::ALL[index])
  }
}

impl std::fmt::Display for ReferenceKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The API endpoint a query is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  /// `ref/<type>`
  Reference(ReferenceKind),
  /// `search/`
  Search,
}

impl Endpoint {
  /// Chooses an endpoint from an optional entity-type prefix.
  ///
  /// A prefix naming a known reference type selects that reference endpoint. Any
  /// other prefix, or none at all, selects the search endpoint.
  pub fn from_prefix(prefix: Option<&str>) -> Self {
    match prefix.and_then(ReferenceKind::from_prefix) {
      Some(kind) => Endpoint::Reference(kind),
      None => Endpoint::Search,
    }
  }

  /// Path relative to the API root.
  pub fn path(&self) -> String {
    match self {
      Endpoint::Reference(kind) => format!("ref/{kind}"),
      Endpoint::Search => "search/".to_string(),
    }
  }
}

/// Solr-style query parameters for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalQuery {
  /// The `q` expression, e.g. `idHal_s:jdoe`
  pub q:      String,
  /// Fields to return (`fl`), empty for the endpoint default
  pub fields: Vec<String>,
  /// Offset of the first document (`start`)
  pub start:  Option<usize>,
  /// Maximum number of documents (`rows`)
  pub rows:   Option<usize>,
}

impl HalQuery {
  /// Creates a query with only a `q` expression.
  pub fn new(q: impl Into<String>) -> Self { Self { q: q.into(), ..Self::default() } }

  /// Restricts the returned fields.
  pub fn fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.fields = fields.into_iter().map(Into::into).collect();
    self
  }

  /// Sets the result window.
  pub fn window(mut self, start: usize, rows: usize) -> Self {
    self.start = Some(start);
    self.rows = Some(rows);
    self
  }

  /// Builds the full request URL for `endpoint` under `base_url`.
  ///
  /// Parameters are appended in the order `q`, `fl`, `start`, `rows`, `wt`.
  pub fn url(&self, base_url: &str, endpoint: &Endpoint) -> Result<Url, HalError> {
    let mut url = Url::parse(&format!("{}/{}", base_url.trim_end_matches('/'), endpoint.path()))?;
    {
      let mut pairs = url.query_pairs_mut();
      pairs.append_pair("q", &self.q);
      if !self.fields.is_empty() {
        pairs.append_pair("fl", &self.fields.join(","));
      }
      if let Some(start) = self.start {
        pairs.append_pair("start", &start.to_string());
      }
      if let Some(rows) = self.rows {
        pairs.append_pair("rows", &rows.to_string());
      }
      pairs.append_pair("wt", "json");
    }
    Ok(url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_every_listed_prefix_is_a_reference() {
    for prefix in config::REFERENCE_PREFIXES {
      let endpoint = Endpoint::from_prefix(Some(prefix));
      assert_eq!(endpoint.path(), format!("ref/{prefix}"));
    }
  }

  #[test]
  fn test_unknown_or_missing_prefix_is_search() {
    assert_eq!(Endpoint::from_prefix(None), Endpoint::Search);
    assert_eq!(Endpoint::from_prefix(Some("paper")), Endpoint::Search);
    assert_eq!(Endpoint::from_prefix(Some("Author")), Endpoint::Search);
    assert_eq!(Endpoint::Search.path(), "search/");
  }

  #[test]
  fn test_search_url_carries_window_and_fields() {
    let url = HalQuery::new("authIdFormPerson_s:100-1")
      .fields(["title_s", "doiId_s"])
      .window(0, 1000)
      .url(config::API_ROOT, &Endpoint::Search)
      .unwrap();

    assert_eq!(url.path(), "/search/");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![
      ("q".to_string(), "authIdFormPerson_s:100-1".to_string()),
      ("fl".to_string(), "title_s,doiId_s".to_string()),
      ("start".to_string(), "0".to_string()),
      ("rows".to_string(), "1000".to_string()),
      ("wt".to_string(), "json".to_string()),
    ]);
  }

  #[test]
  fn test_name_query_is_form_encoded() {
    let url = HalQuery::new("Doe John")
      .url("https://example.org/", &Endpoint::Reference(ReferenceKind::Author))
      .unwrap();
    assert_eq!(url.as_str(), "https://example.org/ref/author?q=Doe+John&wt=json");
  }

  #[test]
  fn test_bad_base_url() {
    let err = HalQuery::new("x").url("not a url", &Endpoint::Search).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
  }
}
