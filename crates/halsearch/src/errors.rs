//! Error types for the halsearch library.
//!
//! Every failure is returned as a [`HalError`] value. Callers that only need to
//! branch on the broad category can use [`HalError::kind`] instead of matching on
//! the individual variants:
//! - missing or empty caller input
//! - the API reporting no matching data
//! - transport, status or JSON failures coming back from the API
//! - documents that lack a field the publication table requires
//!
//! # Examples
//!
//! ```no_run
//! use halsearch::{clients::HalClient, ErrorKind};
//!
//! # async fn example() -> Result<(), halsearch::errors::HalError> {
//! match HalClient::new().id_author("Doe", "").await {
//!   Err(e) if e.kind() == ErrorKind::MissingInput => println!("{e}"),
//!   Err(e) if e.kind() == ErrorKind::NoDataFound => println!("nobody by that name"),
//!   Err(e) => return Err(e),
//!   Ok(ids) => println!("{} identifiers", ids.len()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Errors that can occur when querying HAL or building a publication table.
#[derive(Error, Debug)]
pub enum HalError {
  /// A required input was empty or absent.
  ///
  /// The message names the missing field, so a missing last name and a missing
  /// first name produce distinct messages.
  #[error("missing input: {0}")]
  MissingInput(&'static str),

  /// The API answered with `numFound == 0`.
  #[error("no data found in HAL, verify the supplied information")]
  NoDataFound,

  /// Neither a name pair nor an idHal was supplied to the aggregation entry point.
  #[error("a last name and first name, or an idHal, must be supplied")]
  MissingSelector,

  /// A network request failed.
  ///
  /// This covers unreachable hosts, TLS errors and bodies that could not be read.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A response body (or a document inside it) was not the JSON we expected.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The configured API root could not be turned into a request URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// A document is missing a field that every publication row requires.
  #[error("malformed document: {0}")]
  DataShape(String),

  /// Writing a table as CSV failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// Writing a table to disk failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// Broad category of a [`HalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// See [`HalError::MissingInput`].
  MissingInput,
  /// See [`HalError::NoDataFound`].
  NoDataFound,
  /// See [`HalError::MissingSelector`].
  MissingSelector,
  /// Network, URL or JSON decoding failures from the API layer.
  Transport,
  /// See [`HalError::DataShape`].
  DataShape,
  /// CSV or file system failures while exporting a table.
  Export,
}

impl HalError {
  /// Returns the broad category of this error.
  ///
  /// ```
  /// use halsearch::{errors::HalError, ErrorKind};
  ///
  /// assert_eq!(HalError::NoDataFound.kind(), ErrorKind::NoDataFound);
  /// assert_eq!(HalError::MissingInput("first name").kind(), ErrorKind::MissingInput);
  /// ```
  pub fn kind(&self) -> ErrorKind {
    match self {
      HalError::MissingInput(_) => ErrorKind::MissingInput,
      HalError::NoDataFound => ErrorKind::NoDataFound,
      HalError::MissingSelector => ErrorKind::MissingSelector,
      HalError::Network(_) | HalError::Json(_) | HalError::InvalidUrl(_) => ErrorKind::Transport,
      HalError::DataShape(_) => ErrorKind::DataShape,
      HalError::Csv(_) | HalError::Io(_) => ErrorKind::Export,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_input_messages_are_distinct() {
    let last = HalError::MissingInput("last name is required").to_string();
    let first = HalError::MissingInput("first name is required").to_string();
    assert_ne!(last, first);
    assert!(last.contains("last name"));
  }

  #[test]
  fn test_kind_groups_transport_failures() {
    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert_eq!(HalError::from(json).kind(), ErrorKind::Transport);
    let url = url::Url::parse("not a url").unwrap_err();
    assert_eq!(HalError::from(url).kind(), ErrorKind::Transport);
  }
}
