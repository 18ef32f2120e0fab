//! Tabular dataset collaborator: CSV in, CSV plus image column out.
//!
//! The enrichment flow sees the dataset as positional rows with three
//! interesting cells - track name, artist name, image URL. Every other
//! column is carried through untouched. Input decoding tolerates Latin-1
//! byte sequences, since real-world song exports are rarely clean UTF-8.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Column names used to locate the interesting cells.
///
/// Names vary by source dataset, so they are configurable; matching is
/// case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// Column holding track names
    pub track: String,
    /// Column holding artist names
    pub artist: String,
    /// Column receiving the album-art URL
    pub image: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            track: "track_name".to_string(),
            artist: "artist_name".to_string(),
            image: "image_url".to_string(),
        }
    }
}

/// Errors from dataset I/O
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column {0:?} not found in header")]
    MissingColumn(String),
}

/// An in-memory tabular dataset with resolved track/artist/image columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    track_idx: usize,
    artist_idx: usize,
    image_idx: usize,
}

impl Dataset {
    /// Read a delimited file, resolving the interesting columns.
    ///
    /// Bytes that are not valid UTF-8 are decoded as Windows-1252, which
    /// accepts any byte sequence (covers ISO-8859-1 exports). A missing
    /// track or artist column is fatal; the image column is appended to
    /// the header when absent.
    pub fn read_from_path(path: &Path, columns: &ColumnSpec) -> Result<Self, DatasetError> {
        let bytes = std::fs::read(path)?;
        let text = decode(&bytes);
        Self::parse(&text, columns)
    }

    fn parse(text: &str, columns: &ColumnSpec) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let track_idx = find_column(&headers, &columns.track)
            .ok_or_else(|| DatasetError::MissingColumn(columns.track.clone()))?;
        let artist_idx = find_column(&headers, &columns.artist)
            .ok_or_else(|| DatasetError::MissingColumn(columns.artist.clone()))?;
        let image_idx = ensure_column(&mut headers, &columns.image);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            headers,
            rows,
            track_idx,
            artist_idx,
            image_idx,
        })
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Track name for a row; `None` when the cell is absent or blank.
    pub fn track_name(&self, row: usize) -> Option<&str> {
        self.cell(row, self.track_idx)
    }

    /// Artist name for a row; `None` when the cell is absent or blank.
    pub fn artist_name(&self, row: usize) -> Option<&str> {
        self.cell(row, self.artist_idx)
    }

    /// Current image URL cell, if non-blank.
    pub fn image_url(&self, row: usize) -> Option<&str> {
        self.cell(row, self.image_idx)
    }

    /// Write the image cell for a row; `None` clears it. Short rows are
    /// padded up to the image column.
    pub fn set_image_url(&mut self, row: usize, url: Option<String>) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };
        if cells.len() <= self.image_idx {
            cells.resize(self.image_idx + 1, String::new());
        }
        cells[self.image_idx] = url.unwrap_or_default();
    }

    /// Write the dataset as UTF-8 CSV: header first, every original column
    /// in order, no index column.
    pub fn write_to_path(&self, path: &Path) -> Result<(), DatasetError> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
        writer.write_record(&self.headers)?;
        for cells in &self.rows {
            let mut record = cells.clone();
            if record.len() < self.headers.len() {
                record.resize(self.headers.len(), String::new());
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(column)?.trim();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Build a dataset directly from cells, for tests.
    #[cfg(test)]
    pub(crate) fn from_rows(headers: &[&str], rows: &[&[&str]], columns: &ColumnSpec) -> Self {
        let mut headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let track_idx = find_column(&headers, &columns.track).expect("track column");
        let artist_idx = find_column(&headers, &columns.artist).expect("artist column");
        let image_idx = ensure_column(&mut headers, &columns.image);
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Self {
            headers,
            rows,
            track_idx,
            artist_idx,
            image_idx,
        }
    }
}

/// Decode file bytes as UTF-8, falling back to Windows-1252.
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Case-insensitive header lookup.
fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

/// Index of a column, appending it to the header when absent.
fn ensure_column(headers: &mut Vec<String>, name: &str) -> usize {
    match find_column(headers, name) {
        Some(idx) => idx,
        None => {
            headers.push(name.to_string());
            headers.len() - 1
        }
    }
}
