//! Header-addressed CSV tables.
//!
//! A [`SourceTable`] is an ordered sequence of rows with named columns.
//! Rows are read with `flexible(true)` so a short row surfaces as a
//! [`LoadError::MissingColumn`] for the specific column the caller asked
//! for, rather than as a generic CSV length error.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::LoadError;

/// An in-memory CSV table with a header row.
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Name used in error messages (usually the file path).
    name: String,
    /// Header names in file order.
    headers: Vec<String>,
    /// Column name to column index.
    columns: BTreeMap<String, usize>,
    /// Data rows, excluding the header.
    records: Vec<csv::StringRecord>,
}

impl SourceTable {
    /// Reads a CSV file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Csv`] if the file cannot be opened or is not
    /// valid CSV.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let name = path.display().to_string();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| LoadError::Csv {
                table: name.clone(),
                source,
            })?;
        Self::from_csv_reader(name, reader)
    }

    /// Reads CSV data from any reader. `name` labels the table in errors.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Csv`] if the data is not valid CSV.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, LoadError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        Self::from_csv_reader(name.to_owned(), reader)
    }

    fn from_csv_reader<R: Read>(
        name: String,
        mut reader: csv::Reader<R>,
    ) -> Result<Self, LoadError> {
        let csv_err = |source| LoadError::Csv {
            table: name.clone(),
            source,
        };

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        log::debug!("Read {} rows from {name}", records.len());

        Ok(Self {
            name,
            headers,
            columns,
            records,
        })
    }

    /// Name of the table as used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().enumerate().map(|(i, record)| Row {
            table: self,
            record,
            // Header is line 1.
            line: record.position().map_or(i as u64 + 2, csv::Position::line),
        })
    }
}

/// A single row of a [`SourceTable`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a SourceTable,
    record: &'a csv::StringRecord,
    line: u64,
}

impl<'a> Row<'a> {
    /// 1-based line number of this row in the source file.
    #[must_use]
    pub const fn line(&self) -> u64 {
        self.line
    }

    /// Trimmed values of this row in file order.
    pub fn values(self) -> impl Iterator<Item = &'a str> {
        self.record.iter().map(str::trim)
    }

    /// Returns the trimmed value of `column`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingColumn`] if the table has no such column
    /// or this row is too short to contain it.
    pub fn field(&self, column: &str) -> Result<&'a str, LoadError> {
        self.table
            .columns
            .get(column)
            .and_then(|&i| self.record.get(i))
            .map(str::trim)
            .ok_or_else(|| LoadError::MissingColumn {
                table: self.table.name.clone(),
                line: self.line,
                column: column.to_owned(),
            })
    }

    /// Parses the value of `column` as `T`.
    ///
    /// `expected` describes `T` in error messages (e.g. `"integer"`).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingColumn`] if the column is absent, or
    /// [`LoadError::Parse`] if the value does not parse.
    pub fn parse<T: FromStr>(&self, column: &str, expected: &'static str) -> Result<T, LoadError> {
        let value = self.field(column)?;
        value.parse().map_err(|_| LoadError::Parse {
            table: self.table.name.clone(),
            line: self.line,
            column: column.to_owned(),
            value: value.to_owned(),
            expected,
        })
    }

    /// Parses the value of `column` as a non-negative integer.
    ///
    /// # Errors
    ///
    /// See [`Row::parse`].
    pub fn integer(&self, column: &str) -> Result<u64, LoadError> {
        self.parse(column, "integer")
    }

    /// Parses the value of `column` as a finite decimal number.
    ///
    /// # Errors
    ///
    /// See [`Row::parse`]. Non-finite values (`NaN`, `inf`) are rejected.
    pub fn decimal(&self, column: &str) -> Result<f64, LoadError> {
        let value: f64 = self.parse(column, "decimal")?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(LoadError::Parse {
                table: self.table.name.clone(),
                line: self.line,
                column: column.to_owned(),
                value: self.field(column)?.to_owned(),
                expected: "decimal",
            })
        }
    }
}
