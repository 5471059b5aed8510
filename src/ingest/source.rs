//! Tabular data sources
//!
//! The filter/ranking core never touches the network or a parser directly;
//! it consumes `RowRecord`s produced by a `TabularDataSource`. Spreadsheet
//! parsing is delegated to `calamine` (XLSX) and `csv`.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use calamine::{Reader, Xlsx};
use rand::RngExt;
use reqwest::Client;
use tracing::{debug, warn};

use crate::SeedleError;
use crate::cache;
use crate::config::FetchConfig;

/// One spreadsheet row: trimmed header names mapped to cell text, in column
/// order. Blank cells default to the empty string.
#[derive(Debug, Clone, Default)]
pub struct RowRecord {
    cells: Vec<(String, String)>,
}

impl RowRecord {
    #[must_use]
    pub fn from_cells(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Cell text for a header, empty string when the column is absent.
    /// Header comparison is case-insensitive since the sheets disagree on
    /// casing ("OnlineOnly" vs "Onlineonly").
    #[must_use]
    pub fn get(&self, header: &str) -> &str {
        self.cells
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header))
            .map_or("", |(_, value)| value.as_str())
    }
}

/// A source of spreadsheet rows
#[async_trait]
pub trait TabularDataSource: Send + Sync {
    async fn load(&self) -> Result<Vec<RowRecord>>;
}

/// XLSX bytes already in memory
pub struct XlsxSource {
    bytes: Vec<u8>,
}

impl XlsxSource {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl TabularDataSource for XlsxSource {
    async fn load(&self) -> Result<Vec<RowRecord>> {
        parse_xlsx(&self.bytes)
    }
}

/// CSV bytes already in memory
pub struct CsvSource {
    bytes: Vec<u8>,
}

impl CsvSource {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl TabularDataSource for CsvSource {
    async fn load(&self) -> Result<Vec<RowRecord>> {
        parse_csv(&self.bytes)
    }
}

/// A spreadsheet fetched over HTTP, parsed by file extension.
///
/// Fetched bytes go through the persistent cache with a jittered TTL; a
/// cache miss or cache failure falls through to the network. There is no
/// retry: a failed fetch is the caller's empty-dataset case.
pub struct HttpSource {
    client: Client,
    url: String,
    cache_ttl: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("seedle/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            cache_ttl: Duration::from_secs(u64::from(config.cache_ttl_hours) * 3600),
        })
    }

    async fn fetch_bytes(&self) -> Result<Vec<u8>> {
        match cache::get::<Vec<u8>>(&self.url).await {
            Ok(Some(bytes)) => {
                debug!("Serving {} from cache ({} bytes)", self.url, bytes.len());
                return Ok(bytes);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {}", self.url, e),
        }

        debug!("Fetching {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;

        if !response.status().is_success() {
            return Err(SeedleError::fetch(format!(
                "Fetch of {} failed with status {}",
                self.url,
                response.status()
            ))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body from {}", self.url))?
            .to_vec();

        let jitter: f32 = rand::rng().random_range(0.9..1.1);
        let ttl = self.cache_ttl.mul_f32(jitter);
        if let Err(e) = cache::put(&self.url, bytes.clone(), ttl).await {
            warn!("Failed to cache {}: {}", self.url, e);
        }

        Ok(bytes)
    }
}

#[async_trait]
impl TabularDataSource for HttpSource {
    async fn load(&self) -> Result<Vec<RowRecord>> {
        let bytes = self.fetch_bytes().await?;
        let path = self.url.split('?').next().unwrap_or(&self.url);
        if path.to_lowercase().ends_with(".csv") {
            parse_csv(&bytes)
        } else {
            parse_xlsx(&bytes)
        }
    }
}

fn cell_str(data: &calamine::Data) -> String {
    match data {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) => format!("{}", f),
        calamine::Data::Int(i) => format!("{}", i),
        calamine::Data::Bool(b) => format!("{}", b),
        other => format!("{:?}", other),
    }
}

/// Parse XLSX bytes: first sheet, first row is the header.
pub fn parse_xlsx(bytes: &[u8]) -> Result<Vec<RowRecord>> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| SeedleError::parse(format!("Failed to open XLSX workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SeedleError::parse("Workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SeedleError::parse(format!("Failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_str(cell).trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let records = rows
        .map(|row| {
            RowRecord::from_cells(
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(header, cell)| (header.clone(), cell_str(cell)))
                    .collect(),
            )
        })
        .collect();

    Ok(records)
}

/// Parse CSV bytes into the same row-record shape as XLSX.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RowRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SeedleError::parse(format!("Failed to read CSV header row: {e}")))?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| SeedleError::parse(format!("Failed to read CSV row: {e}")))?;
        records.push(RowRecord::from_cells(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, cell)| (header.clone(), cell.to_string()))
                .collect(),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_record_get() {
        let row = RowRecord::from_cells(vec![
            ("Name".to_string(), "Crisis Line".to_string()),
            ("OnlineOnly".to_string(), "yes".to_string()),
        ]);

        assert_eq!(row.get("Name"), "Crisis Line");
        assert_eq!(row.get("onlineonly"), "yes");
        assert_eq!(row.get("Missing"), "");
    }

    #[test]
    fn test_parse_csv_trims_headers_and_defaults_blanks() {
        let csv = b" Name ,City,Latitude\nCentre,Toronto,43.65\nLine,,\n";
        let rows = parse_csv(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Name"), "Centre");
        assert_eq!(rows[0].get("Latitude"), "43.65");
        assert_eq!(rows[1].get("City"), "");
    }

    #[test]
    fn test_parse_csv_empty_input() {
        let rows = parse_csv(b"").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_xlsx_rejects_garbage() {
        let err = parse_xlsx(b"not a zip archive").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SeedleError>(),
            Some(SeedleError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_csv_source_load() {
        let source = CsvSource::new(b"Name,Category\nCentre,Counselling\n".to_vec());
        let rows = source.load().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Category"), "Counselling");
    }
}
