//! Public query API
//!
//! [`StockAnalyzer`] is the concrete store; [`StockRepository`] is the
//! capability set callers can program against.

pub mod analyzer;
pub mod repository;

pub use analyzer::StockAnalyzer;
pub use repository::StockRepository;
