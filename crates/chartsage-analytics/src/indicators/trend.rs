//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 지수 가중 span (기본: 20).
    pub span: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { span: 20 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA span (기본: 12).
    pub fast_span: usize,
    /// 장기 EMA span (기본: 26).
    pub slow_span: usize,
    /// 시그널 라인 span (기본: 9).
    pub signal_span: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_span: 12,
            slow_span: 26,
            signal_span: 9,
        }
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Option<Decimal>,
    /// 시그널 라인 (MACD 라인의 EMA).
    pub signal: Option<Decimal>,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Option<Decimal>,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// 현재 시점을 포함한 직전 `period`개의 평균입니다.
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        prices: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
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

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(None);
            } else {
                let sum: Decimal = prices[i + 1 - period..=i].iter().sum();
                result.push(Some(sum / period_decimal));
            }
        }

        Ok(result)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k)),  k = 2 / (span + 1)
    ///
    /// 첫 번째 값에서 시작하는 재귀식이므로 워밍업 구간 없이
    /// 모든 시점에서 정의됩니다.
    ///
    /// # 반환
    /// 각 시점의 EMA 값 (입력과 같은 길이, 전부 Some)
    pub fn ema(
        &self,
        prices: &[Decimal],
        params: EmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let span = params.span;

        if span == 0 {
            return Err(IndicatorError::InvalidParameter(
                "span은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let multiplier = dec!(2) / Decimal::from(span + 1);
        let mut result = Vec::with_capacity(prices.len());

        let mut prev_ema = prices[0];
        result.push(Some(prev_ema));

        for price in prices.iter().skip(1) {
            let ema = (*price * multiplier) + (prev_ema * (Decimal::ONE - multiplier));
            result.push(Some(ema));
            prev_ema = ema;
        }

        Ok(result)
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// 모든 EMA가 첫 값에서 시작하므로 MACD도 전 구간에서 정의됩니다.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        let fast_ema = self.ema(
            prices,
            EmaParams {
                span: params.fast_span,
            },
        )?;
        let slow_ema = self.ema(
            prices,
            EmaParams {
                span: params.slow_span,
            },
        )?;

        // MACD 라인
        let macd_line: Vec<Decimal> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(fast, slow)| fast.unwrap_or_default() - slow.unwrap_or_default())
            .collect();

        // 시그널 라인 (MACD 라인의 EMA)
        let signal_line = self.ema(
            &macd_line,
            EmaParams {
                span: params.signal_span,
            },
        )?;

        let result = macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, signal)| {
                let histogram = signal.map(|s| macd - s);
                MacdResult {
                    macd: Some(macd),
                    signal: *signal,
                    histogram,
                }
            })
            .collect();

        Ok(result)
    }
}
