use crate::utils::{format_price, local_date};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One trading day of one symbol
///
/// Immutable once built: fields are private and only exposed through
/// accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    symbol: String,
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl Stock {
    /// # Arguments
    /// * `symbol` - ticker symbol (e.g. MSFT for Microsoft)
    /// * `timestamp` - close of the trading day the data was recorded for
    /// * `open` - opening price
    /// * `high` - highest traded price of the day
    /// * `low` - lowest traded price of the day
    /// * `close` - price at the end of trading
    /// * `volume` - number of shares traded
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Unix seconds of the timestamp
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Calendar date of the timestamp in the local time zone
    pub fn trading_date(&self) -> NaiveDate {
        local_date(self.timestamp)
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl fmt::Display for Stock {
    /// `[SYMBOL: OPEN, CLOSE]`, e.g. `[AAPL: 176.23, 175.07]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}: {}, {}]",
            self.symbol,
            format_price(self.open),
            format_price(self.close)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::end_of_day;

    fn sample() -> Stock {
        let date = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
        let timestamp = end_of_day(date, 16).unwrap();
        Stock::new("SYM", timestamp, 176.234, 177.5, 174.9, 175.065, 1_250_000.0)
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(sample().to_string(), "[SYM: 176.23, 175.07]");
    }

    #[test]
    fn test_accessors() {
        let stock = sample();
        assert_eq!(stock.symbol(), "SYM");
        assert_eq!(stock.open(), 176.234);
        assert_eq!(stock.high(), 177.5);
        assert_eq!(stock.low(), 174.9);
        assert_eq!(stock.close(), 175.065);
        assert_eq!(stock.volume(), 1_250_000.0);
        assert_eq!(stock.trading_date(), NaiveDate::from_ymd_opt(2024, 2, 12).unwrap());
        assert_eq!(stock.epoch_seconds(), stock.timestamp().timestamp());
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["symbol"], "SYM");
        assert_eq!(json["close"], 175.065);
        let back: Stock = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
