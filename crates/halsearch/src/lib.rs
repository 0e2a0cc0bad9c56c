//! A small client for the HAL open archive (<https://api.archives-ouvertes.fr>).
//!
//! The library resolves a researcher to the set of HAL author-document identifiers
//! that belong to them, either by name or by their personal `idHal`, and then
//! collects every publication attached to those identifiers into a flat
//! [`PublicationTable`].
//!
//! # Example
//! ```rust,no_run
//! use halsearch::clients::HalClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let client = HalClient::new();
//!
//!   // Resolve by name, then by idHal
//!   let ids = client.id_author("Humbert", "Marc").await?;
//!   println!("Found {} author identifiers", ids.len());
//!
//!   let table = client.get_hal_researcher_data(None, None, Some("marc-humbert")).await?;
//!   for record in table.iter() {
//!     println!("{} ({})", record.title, record.year);
//!   }
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod author;
pub mod clients;
pub mod config;
pub mod errors;
pub mod publication;
pub mod query;
pub mod response;

pub use author::{id_author, req_id_hal, AuthorDocId};
use clients::QueryGateway;
pub use clients::HalClient;
pub use config::HalConfig;
use errors::HalError;
pub use errors::ErrorKind;
pub use publication::{
  aggregate, get_hal_researcher_data, PublicationRecord, PublicationTable, Selector,
};
use query::{Endpoint, HalQuery, ReferenceKind};
use response::SearchResponse;
