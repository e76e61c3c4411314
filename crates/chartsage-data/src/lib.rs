//! 시장 데이터 조회.
//!
//! 이 crate는 다음을 제공합니다:
//! - 과거 OHLCV 데이터 제공자 trait
//! - Yahoo Finance 기반 구현
//!
//! 캐싱과 재시도는 의도적으로 없습니다. 조회 실패는 `DataError`로
//! 호출자에게 그대로 전달됩니다.

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{HistoricalDataProvider, Interval, YahooFinanceProvider};
