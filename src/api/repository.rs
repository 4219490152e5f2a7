use crate::{error::Result, models::Stock};
use chrono::NaiveDate;
use std::path::Path;

/// Query surface over a collection of loaded price records
///
/// Date ranges are inclusive on both ends and compare the local calendar
/// date of each record. Symbol matching is exact and case-sensitive.
pub trait StockRepository {
    /// Parse a price file and append its rows; returns the rows of this call only
    fn load(&mut self, path: &Path) -> Result<Vec<Stock>>;

    fn list_all(&self) -> Vec<Stock>;

    fn list_by_symbol(&self, symbol: &str) -> Vec<Stock>;

    fn list_by_symbol_in_range(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Stock>;

    /// Fails with `NotFound` when no record matches
    fn average_high(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64>;

    /// Fails with `NotFound` when no record matches
    fn average_low(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64>;

    /// Fails with `NotFound` when no record matches
    fn average_volume(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64>;
}
