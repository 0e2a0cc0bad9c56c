//! Publication records and their aggregation into a flat table.
//!
//! Once a researcher has been resolved to author-document identifiers (see
//! [`author`]), [`aggregate`] asks the `search/` endpoint for the publications of
//! each identifier in turn and flattens every returned document into one
//! [`PublicationRecord`]. [`get_hal_researcher_data`] chains both steps.
//!
//! Each identifier is queried with a fixed window of `rows` documents (1000 by
//! default) starting at 0. There is no follow-up paging, so identifiers with more
//! publications than that are truncated; a warning is logged when HAL reports more
//! matches than it returned.
//!
//! # Examples
//!
//! ```no_run
//! use halsearch::{clients::HalClient, publication};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HalClient::new();
//! let table = publication::get_hal_researcher_data(&client, None, None, Some("jdoe")).await?;
//!
//! table.save_csv("jdoe.csv")?;
//! println!("{}", table.to_json()?);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use super::*;

/// Fields requested for every publication document.
pub const PUBLICATION_FIELDS: [&str; 8] = [
  "title_s",
  "doiId_s",
  "authIdHal_s",
  "pubmedId_id",
  "journalTitle_s",
  "journalPublisher_s",
  "publicationDate_s",
  "authLastNameFirstName_s",
];

/// Column labels of a [`PublicationTable`], in column order.
pub const COLUMNS: [&str; 7] = [
  "Journal Title",
  "Author",
  "Article Title",
  "Journal Publisher",
  "Publication Date",
  "DOI",
  "PubMed Id",
];

/// A publication document as returned by the search endpoint.
#[derive(Debug, Deserialize)]
struct PublicationDoc {
  /// Titles, the first one is used
  #[serde(rename = "title_s", default, deserialize_with = "response::text_list")]
  titles:            Vec<String>,
  /// Journal name
  #[serde(rename = "journalTitle_s", default, deserialize_with = "response::optional_text")]
  journal_title:     Option<String>,
  /// Journal publisher
  #[serde(rename = "journalPublisher_s", default, deserialize_with = "response::optional_text")]
  journal_publisher: Option<String>,
  /// Full publication date, e.g. `2021-05-01`
  #[serde(rename = "publicationDate_s", default, deserialize_with = "response::optional_text")]
  publication_date:  Option<String>,
  /// DOI without resolver prefix
  #[serde(rename = "doiId_s", default, deserialize_with = "response::optional_text")]
  doi:               Option<String>,
  /// PubMed identifier
  #[serde(rename = "pubmedId_id", default, deserialize_with = "response::optional_text")]
  pubmed_id:         Option<String>,
  /// Author names as "Last First", possibly several
  #[serde(rename = "authLastNameFirstName_s", default, deserialize_with = "response::optional_text")]
  authors:           Option<String>,
}

/// One row of a [`PublicationTable`].
///
/// Absent optional values stay in the record as `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
  /// Title of the journal the article appeared in
  #[serde(rename = "Journal Title")]
  pub journal_title:     Option<String>,
  /// Author names, joined with `", "` when HAL lists several
  #[serde(rename = "Author")]
  pub authors:           Option<String>,
  /// The article's title
  #[serde(rename = "Article Title")]
  pub title:             String,
  /// Publisher of the journal
  #[serde(rename = "Journal Publisher")]
  pub journal_publisher: Option<String>,
  /// Publication year, the part of the publication date before its first `-`
  #[serde(rename = "Publication Date")]
  pub year:              String,
  /// The article's DOI
  #[serde(rename = "DOI")]
  pub doi:               Option<String>,
  /// The article's PubMed identifier
  #[serde(rename = "PubMed Id")]
  pub pubmed_id:         Option<String>,
}

impl TryFrom<PublicationDoc> for PublicationRecord {
  type Error = HalError;

  fn try_from(doc: PublicationDoc) -> Result<Self, Self::Error> {
    let title = doc
      .titles
      .into_iter()
      .next()
      .ok_or_else(|| HalError::DataShape("publication has no title_s".to_string()))?;

    let date = doc.publication_date.ok_or_else(|| {
      HalError::DataShape(format!("publication {title:?} has no publicationDate_s"))
    })?;
    let year = date.split_once('-').map_or(date.as_str(), |(year, _)| year).to_string();

    Ok(PublicationRecord {
      journal_title: doc.journal_title,
      authors: doc.authors,
      title,
      journal_publisher: doc.journal_publisher,
      year,
      doi: doc.doi,
      pubmed_id: doc.pubmed_id,
    })
  }
}

/// An ordered list of publication records.
///
/// Rows keep the order in which HAL returned them, identifier after identifier.
/// Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationTable {
  /// The records, in insertion order
  rows: Vec<PublicationRecord>,
}

impl PublicationTable {
  /// Creates an empty table.
  pub fn new() -> Self { Self::default() }

  /// Appends a record.
  pub fn push(&mut self, record: PublicationRecord) { self.rows.push(record) }

  /// Number of rows.
  pub fn len(&self) -> usize { self.rows.len() }

  /// Whether the table has no rows.
  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Iterates over the rows in order.
  pub fn iter(&self) -> std::slice::Iter<'_, PublicationRecord> { self.rows.iter() }

  /// The rows as a slice.
  pub fn rows(&self) -> &[PublicationRecord] { &self.rows }

  /// Column labels, see [`COLUMNS`].
  pub fn columns(&self) -> &'static [&'static str] { &COLUMNS }

  /// Serializes the table as a JSON array of objects keyed by column label.
  pub fn to_json(&self) -> Result<String, HalError> { Ok(serde_json::to_string_pretty(self)?) }

  /// Writes the table as CSV: a header row, then one line per record.
  ///
  /// The header is written even when the table is empty. Absent values are empty
  /// cells.
  pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), HalError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(COLUMNS)?;
    for record in &self.rows {
      writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
  }

  /// Renders the table as a CSV string, see [`PublicationTable::write_csv`].
  pub fn to_csv(&self) -> Result<String, HalError> {
    let mut buffer = Vec::new();
    self.write_csv(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
  }

  /// Writes the table as CSV to a file, replacing it if it exists.
  pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<(), HalError> {
    let path = path.as_ref();
    debug!("Writing {} publications to {path:?}", self.len());
    self.write_csv(std::fs::File::create(path)?)
  }
}

impl IntoIterator for PublicationTable {
  type IntoIter = std::vec::IntoIter<PublicationRecord>;
  type Item = PublicationRecord;

  fn into_iter(self) -> Self::IntoIter { self.rows.into_iter() }
}

impl<'a> IntoIterator for &'a PublicationTable {
  type IntoIter = std::slice::Iter<'a, PublicationRecord>;
  type Item = &'a PublicationRecord;

  fn into_iter(self) -> Self::IntoIter { self.rows.iter() }
}

impl FromIterator<PublicationRecord> for PublicationTable {
  fn from_iter<I: IntoIterator<Item = PublicationRecord>>(iter: I) -> Self {
    Self { rows: iter.into_iter().collect() }
  }
}

impl Extend<PublicationRecord> for PublicationTable {
  fn extend<I: IntoIterator<Item = PublicationRecord>>(&mut self, iter: I) {
    self.rows.extend(iter)
  }
}

/// How a researcher is identified for [`get_hal_researcher_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
  /// A personal HAL identifier
  IdHal(&'a str),
  /// A last name and first name
  Name {
    /// Family name
    last_name:  &'a str,
    /// Given name
    first_name: &'a str,
  },
}

impl<'a> Selector<'a> {
  /// Picks a selector from optional parts.
  ///
  /// A non-blank idHal wins over a name. A name is only used when both of its parts
  /// are non-blank.
  ///
  /// ```
  /// use halsearch::Selector;
  ///
  /// assert_eq!(Selector::from_parts(Some("Doe"), Some("John"), Some("jdoe"))?, Selector::IdHal("jdoe"));
  /// assert!(Selector::from_parts(Some("Doe"), None, None).is_err());
  /// # Ok::<(), halsearch::errors::HalError>(())
  /// ```
  ///
  /// # Errors
  ///
  /// [`HalError::MissingSelector`] when neither an idHal nor a full name is given.
  pub fn from_parts(
    last_name: Option<&'a str>,
    first_name: Option<&'a str>,
    idhal: Option<&'a str>,
  ) -> Result<Self, HalError> {
    let present = |part: Option<&'a str>| part.filter(|s| !s.trim().is_empty());

    match (present(last_name), present(first_name), present(idhal)) {
      (_, _, Some(idhal)) => Ok(Selector::IdHal(idhal)),
      (Some(last_name), Some(first_name), None) => Ok(Selector::Name { last_name, first_name }),
      _ => Err(HalError::MissingSelector),
    }
  }

  /// Resolves the selector to author-document identifiers.
  pub async fn resolve<G: QueryGateway + ?Sized>(
    &self,
    gateway: &G,
  ) -> Result<Vec<AuthorDocId>, HalError> {
    match *self {
      Selector::IdHal(idhal) => author::req_id_hal(gateway, idhal).await,
      Selector::Name { last_name, first_name } =>
        author::id_author(gateway, last_name, first_name).await,
    }
  }
}

/// Collects the publications of every identifier into one table.
///
/// Identifiers are queried one after another, in the order given, against the
/// `search/` endpoint with `authIdFormPerson_s:<id>`. An identifier without
/// publications adds no rows. An empty `ids` slice yields an empty table without
/// any request.
///
/// # Errors
///
/// - [`HalError::DataShape`] if a document lacks `title_s` or `publicationDate_s`
/// - transport and JSON errors from the gateway
///
/// The first error stops the aggregation; no partial table is returned.
pub async fn aggregate<G: QueryGateway + ?Sized>(
  gateway: &G,
  ids: &[AuthorDocId],
) -> Result<PublicationTable, HalError> {
  let rows = gateway.rows();
  let mut table = PublicationTable::new();

  for id in ids {
    let query = HalQuery::new(format!("authIdFormPerson_s:{id}"))
      .fields(PUBLICATION_FIELDS)
      .window(0, rows);
    let body = gateway.query(Endpoint::Search, &query).await?;
    let response = SearchResponse::<PublicationDoc>::from_value(body)?;

    let found = response.response.num_found;
    let docs = response.into_docs();
    debug!("Author identifier {id} returned {} of {found} publications", docs.len());
    if found > docs.len() as u64 {
      warn!("Author identifier {id} has {found} publications, only the first {} are kept", docs.len());
    }

    for doc in docs {
      table.push(PublicationRecord::try_from(doc)?);
    }
  }

  Ok(table)
}

/// Resolves a researcher and collects all of their publications.
///
/// The researcher is chosen with [`Selector::from_parts`]: an idHal if given,
/// otherwise a last name and first name pair.
///
/// # Errors
///
/// - [`HalError::MissingSelector`] when neither an idHal nor a full name is given
/// - any error of [`author::req_id_hal`], [`author::id_author`] or [`aggregate`]
pub async fn get_hal_researcher_data<G: QueryGateway + ?Sized>(
  gateway: &G,
  last_name: Option<&str>,
  first_name: Option<&str>,
  idhal: Option<&str>,
) -> Result<PublicationTable, HalError> {
  let selector = Selector::from_parts(last_name, first_name, idhal)?;
  let ids = selector.resolve(gateway).await?;
  aggregate(gateway, &ids).await
}
