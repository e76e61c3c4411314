//! 도메인 모델 모듈.

pub mod indicator;
pub mod market_data;

pub use indicator::{parse_indicator_list, IndicatorKind};
pub use market_data::{Candle, OhlcvSeries, SessionState};
