//! Row sources: an ordered header plus a lazy, finite sequence of rows.

use std::fs::File;
use std::path::Path;

use crate::error::SheetError;

/// One data row, field values ordered as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Value at `column`. Empty string when the row is shorter than the
    /// header (ragged input).
    #[must_use]
    pub fn get(&self, column: usize) -> &str {
        self.fields.get(column).map_or("", String::as_str)
    }
}

/// Contract the pipeline consumes. Restart by reopening the source.
pub trait RowSource {
    /// Ordered column names from the source header.
    fn headers(&self) -> &[String];

    /// Next row, or `None` when the source is exhausted.
    fn next_row(&mut self) -> Option<Result<Row, SheetError>>;
}

/// CSV file row source. The first record is the header.
#[derive(Debug)]
pub struct CsvSource {
    headers: Vec<String>,
    reader: csv::Reader<File>,
}

impl CsvSource {
    /// Open `path` and read its header.
    ///
    /// # Errors
    ///
    /// [`SheetError::Unavailable`] when the file cannot be opened,
    /// [`SheetError::Read`] when the header cannot be decoded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SheetError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        Ok(Self { headers, reader })
    }
}

impl RowSource for CsvSource {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_row(&mut self) -> Option<Result<Row, SheetError>> {
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => Some(Ok(Row::new(record.iter().map(str::to_string).collect()))),
            Ok(false) => None,
            Err(error) => Some(Err(SheetError::Read(error))),
        }
    }
}

/// In-memory row source for tests and dry runs.
#[derive(Debug, Clone)]
pub struct VecSource {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    cursor: usize,
}

impl VecSource {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            cursor: 0,
        }
    }
}

impl RowSource for VecSource {
    fn headers(&self) -> &[String] {
        &self.headers
    }

    fn next_row(&mut self) -> Option<Result<Row, SheetError>> {
        let row = self.rows.get(self.cursor)?;
        self.cursor += 1;
        Some(Ok(Row::new(row.clone())))
    }
}
