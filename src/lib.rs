//! # stockanalyzer - daily stock price loader and query engine
//!
//! Loads per-symbol daily price files (one header line, then
//! `date,open,high,low,close,unused,volume` rows) into memory and answers
//! symbol/date-range queries and field averages over them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use stockanalyzer::prelude::*;
//! use chrono::NaiveDate;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut analyzer = StockAnalyzer::new();
//!     analyzer.load("data/AAPL.csv")?;
//!
//!     let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//!     println!("avg high: {:.2}", analyzer.average_high("AAPL", start, end)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Prelude for convenient imports
pub mod prelude {
    //! ```rust
    //! use stockanalyzer::prelude::*;
    //! ```

    pub use crate::api::{StockAnalyzer, StockRepository};
    pub use crate::config::AnalyzerConfig;
    pub use crate::error::AnalyzerError;
    pub use crate::models::Stock;
}

pub use error::{AnalyzerError, Result};
pub use utils::{init_logger, Logger, Timer};
