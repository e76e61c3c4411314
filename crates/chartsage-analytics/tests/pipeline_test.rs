//! 지표 엔진 + 리포트 조립기 통합 테스트.
//!
//! 합성 시계열에 대한 엔드 투 엔드 시나리오를 검증합니다.

use chartsage_analytics::indicators::{IndicatorEngine, IndicatorSeries};
use chartsage_analytics::report::ReportAssembler;
use chartsage_core::{Candle, IndicatorKind, OhlcvSeries};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 30일 동안 종가 100으로 고정된 합성 시계열.
fn constant_series(value: Decimal, days: usize) -> OhlcvSeries {
    let candles = (0..days)
        .map(|i| Candle {
            ticker: "FLAT".to_string(),
            open_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::days(i as i64),
            open: value,
            high: value,
            low: value,
            close: value,
            volume: dec!(1000),
        })
        .collect();

    OhlcvSeries::new(candles).unwrap()
}

#[test]
fn constant_series_flattens_every_indicator() {
    let engine = IndicatorEngine::new();
    let series = constant_series(dec!(100), 30);

    // SMA(20): 정의된 구간에서 전부 100
    let sma = engine.compute(IndicatorKind::Sma20, &series).unwrap();
    if let IndicatorSeries::Sma(values) = &sma {
        assert_eq!(values.len(), 30);
        for value in values.iter().take(19) {
            assert!(value.is_none());
        }
        for value in values.iter().skip(19) {
            assert_eq!(*value, Some(dec!(100)));
        }
    } else {
        panic!("SMA 결과가 아님");
    }

    // EMA(20): 워밍업 없이 전 구간 100
    let ema = engine.compute(IndicatorKind::Ema20, &series).unwrap();
    if let IndicatorSeries::Ema(values) = &ema {
        for value in values.iter() {
            assert_eq!(*value, Some(dec!(100)));
        }
    } else {
        panic!("EMA 결과가 아님");
    }

    // 볼린저 밴드: 표준편차 0이므로 SMA로 수렴 (폭 0)
    let bands = engine
        .compute(IndicatorKind::BollingerBands, &series)
        .unwrap();
    if let IndicatorSeries::Bollinger(results) = &bands {
        for band in results.iter().skip(19) {
            assert_eq!(band.upper, band.middle);
            assert_eq!(band.lower, band.middle);
            assert_eq!(band.middle, Some(dec!(100)));
        }
    } else {
        panic!("볼린저 밴드 결과가 아님");
    }

    // RSI: 상승폭과 하락폭 모두 0 → 채택한 규약에 따라 100
    let rsi = engine.compute(IndicatorKind::Rsi, &series).unwrap();
    if let IndicatorSeries::Rsi(values) = &rsi {
        for value in values.iter().take(14) {
            assert!(value.is_none());
        }
        for value in values.iter().skip(14) {
            assert_eq!(*value, Some(dec!(100)));
        }
    } else {
        panic!("RSI 결과가 아님");
    }

    // VWAP: 종가가 일정하므로 항상 100
    let vwap = engine.compute(IndicatorKind::Vwap, &series).unwrap();
    if let IndicatorSeries::Vwap(values) = &vwap {
        for value in values.iter() {
            assert_eq!(*value, Some(dec!(100)));
        }
    } else {
        panic!("VWAP 결과가 아님");
    }
}

#[test]
fn no_indicators_selected_yields_empty_technical_block() {
    let series = constant_series(dec!(100), 30);
    let assembler = ReportAssembler::new();

    let prompt = assembler.assemble(&series.timestamps(), &[]);

    assert!(prompt.ends_with("Additional Technical Data:"));
    assert!(!prompt.contains("Recent RSI values:"));
    assert!(!prompt.contains("Recent MACD values:"));
}

#[test]
fn rsi_and_macd_selection_produces_both_blocks() {
    let engine = IndicatorEngine::new();
    let assembler = ReportAssembler::new();

    // 변동이 있는 40일 시계열
    let candles = (0..40)
        .map(|i| {
            let close = Decimal::from(100 + (i * 5 % 11));
            Candle {
                ticker: "WAVY".to_string(),
                open_time: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i),
                open: close,
                high: close + dec!(2),
                low: close - dec!(2),
                close,
                volume: dec!(5000),
            }
        })
        .collect();
    let series = OhlcvSeries::new(candles).unwrap();

    let computed = engine
        .compute_all(&[IndicatorKind::Rsi, IndicatorKind::Macd], &series)
        .unwrap();
    let prompt = assembler.assemble(&series.timestamps(), &computed);

    assert!(prompt.contains("Recent RSI values:"));
    assert!(prompt.contains("Recent MACD values:"));

    // 각 블록에 정확히 10줄
    let rsi_lines = prompt
        .lines()
        .skip_while(|l| !l.contains("Recent RSI values:"))
        .skip(1)
        .take_while(|l| !l.is_empty() && !l.contains("Recent MACD"))
        .count();
    assert_eq!(rsi_lines, 10);

    let macd_lines = prompt.matches("MACD=").count();
    assert_eq!(macd_lines, 10);
}
