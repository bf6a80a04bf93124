//! CSV dataset loading: header row plus rows keyed by column name.

use crate::error::CaptionsError;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// One CSV record keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Value of `column`, or `None` if the record has no such field.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All rows of one CSV file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Load a dataset from a CSV file with a header row.
    pub fn load(path: &Path) -> Result<Self, CaptionsError> {
        if !path.exists() {
            return Err(CaptionsError::DatasetNotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path).map_err(|e| CaptionsError::DatasetRead {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let dataset = Self::from_reader(file).map_err(|source| CaptionsError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.headers.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse CSV with a header row. Short records lack the trailing columns;
    /// fields beyond the header are dropped.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut rows: Vec<Row> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h.as_str(), v))
                    .collect(),
            );
        }
        Ok(Dataset { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
