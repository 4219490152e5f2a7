use crate::{
    config::AnalyzerConfig,
    error::{AnalyzerError, Result},
    models::Stock,
    utils::{end_of_day, parse_trade_date},
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Column layout of a price file; `unused` is read positionally but never stored
pub const COLUMNS: [&str; 7] = ["date", "open", "high", "low", "close", "unused", "volume"];

const DATE: usize = 0;
const OPEN: usize = 1;
const HIGH: usize = 2;
const LOW: usize = 3;
const CLOSE: usize = 4;
const VOLUME: usize = 6;

/// Symbol for every row of a file: the file name up to its first `.`
pub fn symbol_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

/// Streaming reader turning one price file into [`Stock`] values
///
/// The first physical line is dropped as the header whatever it holds.
/// Remaining lines are split on the delimiter with no quote handling. Rows
/// carrying the null marker in any field are skipped and counted; every
/// other row must parse or the iterator yields
/// [`AnalyzerError::MalformedInput`]. The underlying file is closed when the
/// reader is dropped.
pub struct StockCsvReader {
    reader: csv::Reader<BufReader<File>>,
    record: csv::StringRecord,
    path: PathBuf,
    // Lines consumed before the CSV reader started counting
    line_offset: u64,
    symbol: String,
    close_hour: u32,
    null_marker: String,
    skipped: usize,
}

impl StockCsvReader {
    pub fn open(path: impl AsRef<Path>, config: &AnalyzerConfig) -> Result<Self> {
        let path = path.as_ref();
        config.validate()?;
        let delimiter = config.delimiter_byte().ok_or_else(|| {
            AnalyzerError::InvalidConfig(format!("unusable delimiter {:?}", config.delimiter))
        })?;

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AnalyzerError::FileNotFound(path.to_path_buf()),
            _ => AnalyzerError::Io(e),
        })?;

        let mut input = BufReader::new(file);
        let mut header = Vec::new();
        let line_offset = if input.read_until(b'\n', &mut header)? > 0 { 1 } else { 0 };

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .quoting(false)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(input);

        Ok(Self {
            reader,
            record: csv::StringRecord::new(),
            path: path.to_path_buf(),
            line_offset,
            symbol: symbol_from_path(path),
            close_hour: config.close_hour,
            null_marker: config.null_marker.clone(),
            skipped: 0,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of null-marked rows skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn is_null_row(&self) -> bool {
        self.record
            .iter()
            .any(|field| field.eq_ignore_ascii_case(&self.null_marker))
    }

    fn malformed(&self, reason: String) -> AnalyzerError {
        AnalyzerError::MalformedInput {
            path: self.path.clone(),
            line: self
                .record
                .position()
                .map(|p| p.line() + self.line_offset)
                .unwrap_or(0),
            reason,
        }
    }

    fn parse_number(&self, index: usize) -> Result<f64> {
        let raw = &self.record[index];
        let value: f64 = raw.trim().parse().map_err(|_| {
            self.malformed(format!("invalid number '{}' in column {}", raw, COLUMNS[index]))
        })?;
        if !value.is_finite() {
            return Err(self.malformed(format!(
                "non-finite number '{}' in column {}",
                raw, COLUMNS[index]
            )));
        }
        Ok(value)
    }

    fn parse_current(&self) -> Result<Stock> {
        if self.record.len() < COLUMNS.len() {
            return Err(self.malformed(format!(
                "expected {} columns, found {}",
                COLUMNS.len(),
                self.record.len()
            )));
        }

        let date =
            parse_trade_date(&self.record[DATE]).map_err(|e| self.malformed(e.to_string()))?;
        let timestamp =
            end_of_day(date, self.close_hour).map_err(|e| self.malformed(e.to_string()))?;

        Ok(Stock::new(
            self.symbol.clone(),
            timestamp,
            self.parse_number(OPEN)?,
            self.parse_number(HIGH)?,
            self.parse_number(LOW)?,
            self.parse_number(CLOSE)?,
            self.parse_number(VOLUME)?,
        ))
    }
}

impl Iterator for StockCsvReader {
    type Item = Result<Stock>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(false) => return None,
                Ok(true) => {}
                Err(e) => return Some(Err(AnalyzerError::Csv(e))),
            }

            if self.is_null_row() {
                self.skipped += 1;
                continue;
            }

            return Some(self.parse_current());
        }
    }
}
