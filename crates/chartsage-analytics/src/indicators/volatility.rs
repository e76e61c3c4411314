//! 변동성 지표 (Volatility Indicators).
//!
//! 가격 변동성을 측정하는 지표를 제공합니다.
//! - Bollinger Bands (볼린저 밴드)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: Decimal,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: dec!(2.0),
        }
    }
}

/// 볼린저 밴드 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsResult {
    /// 상단 밴드 (MA + k × σ).
    pub upper: Option<Decimal>,
    /// 중간 밴드 (이동평균).
    pub middle: Option<Decimal>,
    /// 하단 밴드 (MA - k × σ).
    pub lower: Option<Decimal>,
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 볼린저 밴드 계산.
    ///
    /// 상단 밴드 = MA + (k × σ)
    /// 중간 밴드 = MA (이동평균)
    /// 하단 밴드 = MA - (k × σ)
    ///
    /// 표준편차는 표본 표준편차(n-1 분모)를 사용합니다.
    ///
    /// # 반환
    /// 상단, 중간, 하단 밴드 값들 (처음 period-1개는 None)
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> IndicatorResult<Vec<BollingerBandsResult>> {
        let period = params.period;

        if period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 2 이상이어야 합니다".to_string(),
            ));
        }

        if prices.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: prices.len(),
            });
        }

        let mut result = Vec::with_capacity(prices.len());
        let period_decimal = Decimal::from(period);
        let ddof_decimal = Decimal::from(period - 1);

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(BollingerBandsResult {
                    upper: None,
                    middle: None,
                    lower: None,
                });
            } else {
                let window = &prices[i + 1 - period..=i];

                // 이동평균 (중간 밴드)
                let sum: Decimal = window.iter().sum();
                let ma = sum / period_decimal;

                // 표본 표준편차
                let variance: Decimal = window
                    .iter()
                    .map(|&p| {
                        let diff = p - ma;
                        diff * diff
                    })
                    .sum::<Decimal>()
                    / ddof_decimal;

                let std_dev = sqrt_decimal(variance);
                let deviation = params.std_dev_multiplier * std_dev;

                result.push(BollingerBandsResult {
                    upper: Some(ma + deviation),
                    middle: Some(ma),
                    lower: Some(ma - deviation),
                });
            }
        }

        Ok(result)
    }
}

/// Decimal 제곱근 계산 (Newton-Raphson 방법).
///
/// Decimal 타입은 기본 제곱근 함수가 없으므로 직접 구현합니다.
pub(crate) fn sqrt_decimal(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut x = value;
    let two = dec!(2);

    // 반복 횟수는 충분한 정밀도 기준
    for _ in 0..20 {
        x = (x + value / x) / two;
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sqrt_decimal() {
        assert!((sqrt_decimal(dec!(4)) - dec!(2)).abs() < dec!(0.0001));
        assert!((sqrt_decimal(dec!(9)) - dec!(3)).abs() < dec!(0.0001));
        assert!((sqrt_decimal(dec!(2)) - dec!(1.4142)).abs() < dec!(0.001));
        assert_eq!(sqrt_decimal(dec!(0)), dec!(0));
    }

    #[test]
    fn test_bollinger_warmup_and_length() {
        let volatility = VolatilityIndicators::new();
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + (i % 4))).collect();

        let bands = volatility
            .bollinger_bands(&prices, BollingerBandsParams::default())
            .unwrap();

        assert_eq!(bands.len(), prices.len());

        // 처음 19개는 None
        for band in bands.iter().take(19) {
            assert!(band.upper.is_none());
            assert!(band.middle.is_none());
            assert!(band.lower.is_none());
        }
        assert!(bands[19].upper.is_some());
    }

    #[test]
    fn test_bollinger_band_width_is_4_sigma() {
        let volatility = VolatilityIndicators::new();
        let prices: Vec<Decimal> = (0i64..30).map(|i| Decimal::from(100 + i * 3 % 7)).collect();

        let params = BollingerBandsParams::default();
        let bands = volatility.bollinger_bands(&prices, params).unwrap();

        // 상단 - 하단 = 2k × σ = 4σ
        for (i, band) in bands.iter().enumerate().skip(params.period - 1) {
            let window = &prices[i + 1 - params.period..=i];
            let ma: Decimal = window.iter().sum::<Decimal>() / Decimal::from(params.period);
            let variance: Decimal = window
                .iter()
                .map(|&p| (p - ma) * (p - ma))
                .sum::<Decimal>()
                / Decimal::from(params.period - 1);
            let expected_width = dec!(4) * sqrt_decimal(variance);

            let width = band.upper.unwrap() - band.lower.unwrap();
            assert!((width - expected_width).abs() < dec!(0.0001));
        }
    }

    #[test]
    fn test_bollinger_collapses_on_constant_series() {
        let volatility = VolatilityIndicators::new();
        let prices = vec![dec!(100); 30];

        let bands = volatility
            .bollinger_bands(&prices, BollingerBandsParams::default())
            .unwrap();

        for band in bands.iter().skip(19) {
            assert_eq!(band.upper, Some(dec!(100)));
            assert_eq!(band.middle, Some(dec!(100)));
            assert_eq!(band.lower, Some(dec!(100)));
        }
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let volatility = VolatilityIndicators::new();
        let prices = vec![dec!(100); 5];

        let result = volatility.bollinger_bands(&prices, BollingerBandsParams::default());
        assert!(result.is_err());
    }
}
