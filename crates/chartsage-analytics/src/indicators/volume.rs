//! 거래량 지표 (Volume Indicators).
//!
//! - VWAP (Volume Weighted Average Price)
//!
//! VWAP는 거래량 가중 평균 가격으로, 시계열 시작부터 누적 계산합니다.
//!
//! # 공식
//! - VWAP = Σ(Close × Volume) / Σ(Volume)
//!
//! # 해석
//! - 가격 > VWAP: 강세 (매수 우위)
//! - 가격 < VWAP: 약세 (매도 우위)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// VWAP 파라미터.
///
/// 세션 리셋 없이 시계열 시작부터 누적합니다.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VwapParams;

/// VWAP 계산기.
#[derive(Debug, Default)]
pub struct VwapIndicator;

impl VwapIndicator {
    /// 새로운 VWAP 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// VWAP (Volume Weighted Average Price) 계산.
    ///
    /// 누적 거래량이 0인 구간에서는 정의되지 않습니다 (None).
    ///
    /// # 인자
    /// * `close` - 종가 데이터
    /// * `volume` - 거래량 데이터
    ///
    /// # 반환
    /// 각 시점의 VWAP 값
    pub fn calculate(
        &self,
        close: &[Decimal],
        volume: &[Decimal],
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        if close.len() != volume.len() {
            return Err(IndicatorError::InvalidParameter(
                "종가와 거래량 데이터의 길이가 일치하지 않습니다".to_string(),
            ));
        }

        if close.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let mut result = Vec::with_capacity(close.len());
        let mut cumulative_turnover = Decimal::ZERO; // Σ(Close × Volume)
        let mut cumulative_volume = Decimal::ZERO; // Σ(Volume)

        for i in 0..close.len() {
            cumulative_turnover += close[i] * volume[i];
            cumulative_volume += volume[i];

            if cumulative_volume > Decimal::ZERO {
                result.push(Some(cumulative_turnover / cumulative_volume));
            } else {
                result.push(None);
            }
        }

        Ok(result)
    }
}
