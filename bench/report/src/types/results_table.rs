use super::{runtime_flavor::RuntimeFlavor, transport::BenchmarkTransport};
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultsTableError {
    #[error("Client '{0}' is already present in the results table")]
    DuplicateClient(String),
    #[error("Client '{0}' is not present in the results table")]
    UnknownClient(String),
    #[error("Result for client '{client}' in column '{column}' was already recorded")]
    DuplicateResult { client: String, column: ResultsColumn },
    #[error("Result for client '{client}' in column '{column}' is missing")]
    MissingResult { client: String, column: ResultsColumn },
}

/// One benchmark column: a transport measured under a runtime flavor.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, derive_new::new,
)]
#[display("{transport}-{flavor}")]
pub struct ResultsColumn {
    pub transport: BenchmarkTransport,
    pub flavor: RuntimeFlavor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsRow {
    /// Client display name
    pub client: String,

    /// Version of the library behind the client
    pub version: String,

    /// Requests per second, indexed like `ResultsTable::columns`
    pub values: Vec<Option<u64>>,
}

impl ResultsRow {
    pub fn label(&self) -> String {
        format!("{}-{}", self.client, self.version)
    }
}

/// Requests per second, one row per client and one column per transport/flavor pair.
///
/// Rows keep the order clients were added in, columns keep the order in which
/// they were first written. Every cell can be written exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ResultsTable {
    pub columns: Vec<ResultsColumn>,
    pub rows: Vec<ResultsRow>,
}

impl ResultsTable {
    pub fn add_client(&mut self, client: &str, version: &str) -> Result<(), ResultsTableError> {
        if self.rows.iter().any(|r| r.client == client) {
            return Err(ResultsTableError::DuplicateClient(client.to_owned()));
        }
        self.rows.push(ResultsRow {
            client: client.to_owned(),
            version: version.to_owned(),
            values: vec![None; self.columns.len()],
        });
        Ok(())
    }

    pub fn insert(
        &mut self,
        client: &str,
        column: ResultsColumn,
        requests_per_second: u64,
    ) -> Result<(), ResultsTableError> {
        let row_index = self
            .rows
            .iter()
            .position(|r| r.client == client)
            .ok_or_else(|| ResultsTableError::UnknownClient(client.to_owned()))?;

        let column_index = match self.column_index(&column) {
            Some(index) => index,
            None => {
                self.columns.push(column);
                self.rows.iter_mut().for_each(|r| r.values.push(None));
                self.columns.len() - 1
            }
        };

        let cell = &mut self.rows[row_index].values[column_index];
        if cell.is_some() {
            return Err(ResultsTableError::DuplicateResult {
                client: client.to_owned(),
                column,
            });
        }
        *cell = Some(requests_per_second);
        Ok(())
    }

    pub fn get(&self, client: &str, column: &ResultsColumn) -> Option<u64> {
        let column_index = self.column_index(column)?;
        self.rows
            .iter()
            .find(|r| r.client == client)
            .and_then(|r| r.values[column_index])
    }

    /// Fails on the first empty cell, scanning row by row.
    pub fn validate_complete(&self) -> Result<(), ResultsTableError> {
        for row in &self.rows {
            for (column, value) in self.columns.iter().zip(&row.values) {
                if value.is_none() {
                    return Err(ResultsTableError::MissingResult {
                        client: row.client.clone(),
                        column: *column,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.to_string()).collect()
    }

    /// Header record, then one record per client. Missing cells are left empty.
    pub fn save_csv(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path).map_err(std::io::Error::other)?;
        self.write_csv(&mut writer).map_err(std::io::Error::other)?;
        writer.flush()
    }

    fn write_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> csv::Result<()> {
        let mut header = vec!["client".to_owned(), "version".to_owned()];
        header.extend(self.column_names());
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.client.clone(), row.version.clone()];
            record.extend(
                row.values
                    .iter()
                    .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
            );
            writer.write_record(&record)?;
        }
        Ok(())
    }

    fn column_index(&self, column: &ResultsColumn) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}
