//! ChartSage 차트 렌더링 크레이트.
//!
//! OHLCV 시계열과 계산된 지표를 캔들스틱 차트 PNG로 합성합니다.

pub mod chart;
pub mod error;

pub use chart::ChartComposer;
pub use error::{RenderError, RenderResult};
