//! 기술적 지표 모듈.
//!
//! 대시보드에서 선택 가능한 기술적 지표를 제공합니다.
//! 모든 계산은 입력 시계열의 순수 함수이며, 결과는 입력과 같은 길이로
//! 정렬됩니다 (롤링 윈도우가 채워지기 전 구간은 None).
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (기본 20일)
//! - **EMA**: 지수 이동평균 (기본 span 20)
//! - **MACD**: 이동평균 수렴/확산 (12/26/9)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드 (20일, ±2σ)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (14일)
//!
//! ## 거래량 지표 (Volume Indicators)
//! - **VWAP**: 거래량 가중 평균 가격 (누적)
//!
//! # 사용 예시
//!
//! ```ignore
//! use chartsage_analytics::indicators::IndicatorEngine;
//! use chartsage_core::IndicatorKind;
//!
//! let engine = IndicatorEngine::new();
//! let series = engine.compute(IndicatorKind::Rsi, &ohlcv)?;
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use chartsage_core::{IndicatorKind, OhlcvSeries};

pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, MacdParams, MacdResult, SmaParams, TrendIndicators};
pub use volatility::{BollingerBandsParams, BollingerBandsResult, VolatilityIndicators};
pub use volume::VwapIndicator;

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 계산된 지표 시계열.
///
/// 입력 시계열과 같은 인덱스 도메인을 가지며, 지표 종류별로
/// 단일 시리즈 또는 시리즈 쌍을 담습니다.
#[derive(Debug, Clone)]
pub enum IndicatorSeries {
    /// 단순 이동평균
    Sma(Vec<Option<Decimal>>),
    /// 지수 이동평균
    Ema(Vec<Option<Decimal>>),
    /// 볼린저 밴드 (상단/중간/하단)
    Bollinger(Vec<BollingerBandsResult>),
    /// 거래량 가중 평균 가격
    Vwap(Vec<Option<Decimal>>),
    /// 상대강도지수
    Rsi(Vec<Option<Decimal>>),
    /// MACD (라인/시그널/히스토그램)
    Macd(Vec<MacdResult>),
}

impl IndicatorSeries {
    /// 이 시리즈의 지표 종류.
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorSeries::Sma(_) => IndicatorKind::Sma20,
            IndicatorSeries::Ema(_) => IndicatorKind::Ema20,
            IndicatorSeries::Bollinger(_) => IndicatorKind::BollingerBands,
            IndicatorSeries::Vwap(_) => IndicatorKind::Vwap,
            IndicatorSeries::Rsi(_) => IndicatorKind::Rsi,
            IndicatorSeries::Macd(_) => IndicatorKind::Macd,
        }
    }

    /// 시리즈 길이.
    pub fn len(&self) -> usize {
        match self {
            IndicatorSeries::Sma(v) | IndicatorSeries::Ema(v) => v.len(),
            IndicatorSeries::Vwap(v) | IndicatorSeries::Rsi(v) => v.len(),
            IndicatorSeries::Bollinger(v) => v.len(),
            IndicatorSeries::Macd(v) => v.len(),
        }
    }

    /// 시리즈가 비어 있는지 확인.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 통합 지표 엔진.
///
/// `IndicatorKind`에 따라 각 계산기로 분기하는 통합 인터페이스를
/// 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
    volume: VwapIndicator,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지표 종류에 따라 계산을 분기합니다.
    ///
    /// 모든 지표는 기본 파라미터(SMA/EMA/BB 20, RSI 14, MACD 12/26/9)를
    /// 사용합니다.
    pub fn compute(
        &self,
        kind: IndicatorKind,
        series: &OhlcvSeries,
    ) -> IndicatorResult<IndicatorSeries> {
        let closes = series.closes();

        debug!(indicator = %kind, points = closes.len(), "지표 계산");

        match kind {
            IndicatorKind::Sma20 => {
                let values = self.trend.sma(&closes, SmaParams::default())?;
                Ok(IndicatorSeries::Sma(values))
            }
            IndicatorKind::Ema20 => {
                let values = self.trend.ema(&closes, EmaParams::default())?;
                Ok(IndicatorSeries::Ema(values))
            }
            IndicatorKind::BollingerBands => {
                let bands = self
                    .volatility
                    .bollinger_bands(&closes, BollingerBandsParams::default())?;
                Ok(IndicatorSeries::Bollinger(bands))
            }
            IndicatorKind::Vwap => {
                let values = self.volume.calculate(&closes, &series.volumes())?;
                Ok(IndicatorSeries::Vwap(values))
            }
            IndicatorKind::Rsi => {
                let values = self.momentum.rsi(&closes, RsiParams::default())?;
                Ok(IndicatorSeries::Rsi(values))
            }
            IndicatorKind::Macd => {
                let results = self.trend.macd(&closes, MacdParams::default())?;
                Ok(IndicatorSeries::Macd(results))
            }
        }
    }

    /// 선택된 지표들을 선택 순서대로 계산합니다.
    pub fn compute_all(
        &self,
        kinds: &[IndicatorKind],
        series: &OhlcvSeries,
    ) -> IndicatorResult<Vec<IndicatorSeries>> {
        kinds.iter().map(|&kind| self.compute(kind, series)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartsage_core::Candle;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn sample_series(closes: &[Decimal]) -> OhlcvSeries {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                ticker: "TEST".to_string(),
                open_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close + dec!(1),
                low: close - dec!(1),
                close,
                volume: dec!(1000),
            })
            .collect();

        OhlcvSeries::new(candles).unwrap()
    }

    #[test]
    fn test_engine_dispatch_preserves_length() {
        let engine = IndicatorEngine::new();
        let closes: Vec<Decimal> = (0..40).map(|i| Decimal::from(100 + (i % 6))).collect();
        let series = sample_series(&closes);

        for kind in IndicatorKind::ALL {
            let result = engine.compute(kind, &series).unwrap();
            assert_eq!(result.len(), series.len(), "{} 길이 불일치", kind);
            assert_eq!(result.kind(), kind);
        }
    }

    #[test]
    fn test_engine_insufficient_data() {
        let engine = IndicatorEngine::new();
        let closes = vec![dec!(100), dec!(101)];
        let series = sample_series(&closes);

        let result = engine.compute(IndicatorKind::Sma20, &series);
        assert!(matches!(
            result,
            Err(IndicatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_compute_all_follows_selection_order() {
        let engine = IndicatorEngine::new();
        let closes: Vec<Decimal> = (0..40).map(|i| Decimal::from(100 + (i % 6))).collect();
        let series = sample_series(&closes);

        let kinds = [IndicatorKind::Macd, IndicatorKind::Sma20, IndicatorKind::Rsi];
        let results = engine.compute_all(&kinds, &series).unwrap();

        let result_kinds: Vec<IndicatorKind> = results.iter().map(|r| r.kind()).collect();
        assert_eq!(result_kinds, kinds);
    }
}
