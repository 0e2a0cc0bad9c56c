//! Static configuration for talking to the HAL API.
//!
//! The API root, the set of entity types served by the reference endpoint and the
//! publication result window are fixed at construction time through [`HalConfig`].
//! Nothing here is mutated after a client is built.

use super::*;

/// Root of the public HAL API.
pub const API_ROOT: &str = "https://api.archives-ouvertes.fr";

/// Entity types that the `ref/<type>` endpoint answers for.
pub const REFERENCE_PREFIXES: [&str; 10] = [
  "anrproject",
  "doctype",
  "instance",
  "metadata",
  "structure",
  "metadatalist",
  "journal",
  "domain",
  "europeanproject",
  "author",
];

/// Number of publications requested per author identifier.
///
/// There is no follow-up pagination, so an identifier with more publications than
/// this is silently truncated.
pub const DEFAULT_ROWS: usize = 1000;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("halsearch/", env!("CARGO_PKG_VERSION"));

/// Settings for a [`HalClient`](crate::clients::HalClient).
///
/// # Examples
///
/// ```
/// use halsearch::HalConfig;
///
/// let config = HalConfig { rows: 50, ..HalConfig::default() };
/// assert_eq!(config.base_url, "https://api.archives-ouvertes.fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalConfig {
  /// API root without trailing slash
  pub base_url:   String,
  /// Publications requested per author identifier
  pub rows:       usize,
  /// User agent header value
  pub user_agent: String,
}

impl Default for HalConfig {
  fn default() -> Self {
    Self {
      base_url:   API_ROOT.to_string(),
      rows:       DEFAULT_ROWS,
      user_agent: DEFAULT_USER_AGENT.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_config_falls_back_to_defaults() {
    let config: HalConfig =
      serde_json::from_str(r#"{"base_url": "https://api-preprod.archives-ouvertes.fr"}"#).unwrap();
    assert_eq!(config.base_url, "https://api-preprod.archives-ouvertes.fr");
    assert_eq!(config.rows, DEFAULT_ROWS);
    assert!(config.user_agent.starts_with("halsearch/"));
  }
}
