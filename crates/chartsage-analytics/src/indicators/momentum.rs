//! 모멘텀 지표 (Momentum Indicators).
//!
//! 과매수/과매도 상태를 측정하는 지표를 제공합니다.
//! - RSI (Relative Strength Index)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 상승폭의 단순 이동평균 / 하락폭 절대값의 단순 이동평균
    ///
    /// 가격 변화량(delta)에 대한 단순 롤링 평균을 사용하므로,
    /// 첫 delta가 인덱스 1에서 시작해 RSI는 인덱스 `period`부터 정의됩니다.
    ///
    /// 평균 하락폭이 0이면 RS가 무한대로 발산하므로 RSI는 100으로
    /// 포화시킵니다. 상승폭과 하락폭이 모두 0인 경우(가격 불변)에도
    /// 같은 규칙을 적용해 100을 반환합니다.
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값들 (처음 `period`개는 None)
    pub fn rsi(
        &self,
        prices: &[Decimal],
        params: RsiParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: prices.len(),
            });
        }

        // 가격 변화량 (길이 n-1, deltas[j] = prices[j+1] - prices[j])
        let deltas: Vec<Decimal> = prices.windows(2).map(|w| w[1] - w[0]).collect();

        let gains: Vec<Decimal> = deltas
            .iter()
            .map(|&d| if d > Decimal::ZERO { d } else { Decimal::ZERO })
            .collect();
        let losses: Vec<Decimal> = deltas
            .iter()
            .map(|&d| if d < Decimal::ZERO { d.abs() } else { Decimal::ZERO })
            .collect();

        let period_decimal = Decimal::from(period);
        let mut result = vec![None; period];

        // delta 인덱스 j에 대한 윈도우 [j+1-period, j] → 가격 인덱스 j+1
        for j in period - 1..deltas.len() {
            let window_start = j + 1 - period;
            let avg_gain: Decimal =
                gains[window_start..=j].iter().sum::<Decimal>() / period_decimal;
            let avg_loss: Decimal =
                losses[window_start..=j].iter().sum::<Decimal>() / period_decimal;

            let rsi = if avg_loss == Decimal::ZERO {
                // 하락 없음: RSI 100으로 포화 (가격 불변 구간 포함)
                dec!(100)
            } else {
                let rs = avg_gain / avg_loss;
                dec!(100) - (dec!(100) / (Decimal::ONE + rs))
            };

            result.push(Some(rsi));
        }

        Ok(result)
    }
}
