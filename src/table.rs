//! The in-memory song table and its loader.

use crate::error::ChartStatsError;
use crate::models::Song;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{error, info};

/// Columns every dataset must provide. `channel` may also be spelt `artist`, which is read only
/// when there is no `channel` column.
const REQUIRED_COLUMNS: [(&str, Option<&str>); 6] = [
    ("title", None),
    ("channel", Some("artist")),
    ("published", None),
    ("views", None),
    ("likes", None),
    ("comments", None),
];

/// An immutable, ordered collection of songs.
///
/// A table is either fully loaded or empty; a partially parsed file is never exposed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Header names of the source file, in file order
    columns: Vec<String>,
    songs: Vec<Song>,
}

impl Table {
    /// Return an empty table with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a table holding `songs`, with the canonical column names.
    pub fn from_songs(songs: Vec<Song>) -> Self {
        let columns = REQUIRED_COLUMNS
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        Table { columns, songs }
    }

    /// Parse a table from CSV data with a header row.
    ///
    /// # Arguments
    ///
    /// * `reader`: Source of the CSV data
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ChartStatsError> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let has = |column: &str| columns.iter().any(|name| name == column);
        for (column, alias) in REQUIRED_COLUMNS {
            if !has(column) && !alias.is_some_and(has) {
                return Err(ChartStatsError::MissingColumn { column });
            }
        }
        if !has("channel") {
            let headers: StringRecord = columns
                .iter()
                .map(|name| if name == "artist" { "channel" } else { name.as_str() })
                .collect();
            rdr.set_headers(headers);
        }
        let songs = rdr.deserialize().collect::<Result<Vec<Song>, _>>()?;
        Ok(Table { columns, songs })
    }

    /// Parse a table from a CSV file.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to the CSV file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ChartStatsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ChartStatsError::DatasetRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load a table from a CSV file, falling back to an empty table on failure.
    ///
    /// The failure is logged rather than returned so that the service can start and report an
    /// empty dataset.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(table) => {
                info!(path = %path.display(), songs = table.len(), "Loaded dataset");
                table
            }
            Err(err) => {
                let mut message = err.to_string();
                let mut current = std::error::Error::source(&err);
                while let Some(source) = current {
                    message.push_str(": ");
                    message.push_str(&source.to_string());
                    current = source.source();
                }
                error!(
                    path = %path.display(),
                    kind = %err.kind(),
                    "Error loading dataset, serving an empty table: {}",
                    message
                );
                Self::empty()
            }
        }
    }

    /// Header names of the source file.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All songs, in load order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Return the value of a numeric column for every song, in load order.
    pub fn column(&self, field: fn(&Song) -> u64) -> Vec<u64> {
        self.songs.iter().map(field).collect()
    }
}
