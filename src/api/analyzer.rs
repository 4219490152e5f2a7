//! In-memory stock analyzer backed by flat price files

use crate::{
    api::StockRepository,
    config::AnalyzerConfig,
    error::{AnalyzerError, Result},
    models::Stock,
    services::StockCsvReader,
    utils::{format_trade_date, is_date_in_range, Logger, Timer},
};
use chrono::NaiveDate;
use std::path::Path;

/// Owns every record loaded during a session and answers queries over them
///
/// The store only grows: loads append in file order and nothing is ever
/// removed, except the rollback of a failed load when
/// [`AnalyzerConfig::all_or_nothing`] is set.
pub struct StockAnalyzer {
    records: Vec<Stock>,
    config: AnalyzerConfig,
    logger: Logger,
}

impl StockAnalyzer {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            config: AnalyzerConfig::default(),
            logger: Logger::new("ANALYZER"),
        }
    }

    /// Fails with `InvalidConfig` when the settings cannot be honoured
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load a price file; see [`StockRepository::load`]
    ///
    /// On a malformed row the load stops. Rows appended before the failing
    /// line stay in the store unless `all_or_nothing` is configured.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Vec<Stock>> {
        let path = path.as_ref();
        let timer = Timer::start(&format!("load {}", path.display()));
        let mut reader = StockCsvReader::open(path, &self.config)?;
        let start = self.records.len();

        for item in reader.by_ref() {
            match item {
                Ok(stock) => self.records.push(stock),
                Err(e) => {
                    if self.config.all_or_nothing {
                        self.records.truncate(start);
                    }
                    self.logger.warn(&format!(
                        "load of {} aborted, {} rows kept in store",
                        path.display(),
                        self.records.len() - start
                    ));
                    return Err(e);
                }
            }
        }

        let loaded = self.records[start..].to_vec();
        self.logger.info(&format!(
            "Loaded {} rows for {} ({} null rows skipped, {} total)",
            loaded.len(),
            reader.symbol(),
            reader.skipped(),
            self.records.len()
        ));
        timer.log_elapsed(self.logger.context());

        Ok(loaded)
    }

    pub fn list_all(&self) -> Vec<Stock> {
        self.records.clone()
    }

    pub fn list_by_symbol(&self, symbol: &str) -> Vec<Stock> {
        self.records
            .iter()
            .filter(|stock| stock.symbol() == symbol)
            .cloned()
            .collect()
    }

    pub fn list_by_symbol_in_range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Stock> {
        self.matching(symbol, start, end).cloned().collect()
    }

    pub fn average_high(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        self.average_of(symbol, start, end, Stock::high)
    }

    pub fn average_low(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        self.average_of(symbol, start, end, Stock::low)
    }

    pub fn average_volume(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        self.average_of(symbol, start, end, Stock::volume)
    }

    fn matching<'a>(
        &'a self,
        symbol: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &'a Stock> + 'a {
        self.records.iter().filter(move |stock| {
            stock.symbol() == symbol && is_date_in_range(stock.trading_date(), start, end)
        })
    }

    fn average_of(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        field: fn(&Stock) -> f64,
    ) -> Result<f64> {
        let (sum, count) = self
            .matching(symbol, start, end)
            .fold((0.0, 0usize), |(sum, count), stock| (sum + field(stock), count + 1));

        if count == 0 {
            self.logger.debug(&format!(
                "no {} records between {} and {}",
                symbol,
                format_trade_date(start),
                format_trade_date(end)
            ));
            return Err(AnalyzerError::NotFound {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }

        Ok(sum / count as f64)
    }
}

impl Default for StockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StockRepository for StockAnalyzer {
    fn load(&mut self, path: &Path) -> Result<Vec<Stock>> {
        StockAnalyzer::load(self, path)
    }

    fn list_all(&self) -> Vec<Stock> {
        StockAnalyzer::list_all(self)
    }

    fn list_by_symbol(&self, symbol: &str) -> Vec<Stock> {
        StockAnalyzer::list_by_symbol(self, symbol)
    }

    fn list_by_symbol_in_range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Stock> {
        StockAnalyzer::list_by_symbol_in_range(self, symbol, start, end)
    }

    fn average_high(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        StockAnalyzer::average_high(self, symbol, start, end)
    }

    fn average_low(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        StockAnalyzer::average_low(self, symbol, start, end)
    }

    fn average_volume(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<f64> {
        StockAnalyzer::average_volume(self, symbol, start, end)
    }
}
