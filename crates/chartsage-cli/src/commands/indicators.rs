//! 최근 지표 값 요약 명령어.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use chartsage_analytics::indicators::{IndicatorEngine, IndicatorSeries};
use chartsage_core::{AppConfig, IndicatorKind};
use chartsage_data::Interval;

use super::fetch_session;

/// 지표 요약 설정.
pub struct IndicatorsConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicators: Vec<IndicatorKind>,
    /// 지표별로 출력할 최근 값 개수
    pub recent: usize,
}

/// 선택된 지표의 최근 정의된 값을 출력합니다.
pub async fn run_indicators(config: IndicatorsConfig, app: &AppConfig) -> Result<()> {
    let interval = Interval::parse(&app.data.interval).unwrap_or_default();
    let session =
        fetch_session(&config.ticker, config.start_date, config.end_date, interval).await?;

    let engine = IndicatorEngine::new();
    let computed = engine.compute_all(&config.indicators, &session.series)?;
    let timestamps = session.series.timestamps();

    println!(
        "\n{} 지표 요약 ({} ~ {}, 캔들 {}개)",
        session.ticker,
        config.start_date,
        config.end_date,
        session.series.len()
    );

    for series in &computed {
        println!("\n{}:", series.kind().display_name());
        match series {
            IndicatorSeries::Sma(values)
            | IndicatorSeries::Ema(values)
            | IndicatorSeries::Vwap(values)
            | IndicatorSeries::Rsi(values) => {
                let recent = recent_defined(&timestamps, values, config.recent);
                if recent.is_empty() {
                    println!("  (정의된 값 없음)");
                }
                for (ts, value) in recent {
                    println!("  {}: {:.2}", ts.format("%Y-%m-%d"), value);
                }
            }
            IndicatorSeries::Bollinger(bands) => {
                let defined: Vec<_> = timestamps
                    .iter()
                    .zip(bands.iter())
                    .filter_map(|(ts, b)| match (b.upper, b.middle, b.lower) {
                        (Some(u), Some(m), Some(l)) => Some((ts, u, m, l)),
                        _ => None,
                    })
                    .collect();
                if defined.is_empty() {
                    println!("  (정의된 값 없음)");
                }
                let start = defined.len().saturating_sub(config.recent);
                for (ts, upper, middle, lower) in &defined[start..] {
                    println!(
                        "  {}: 상단={:.2}, 중간={:.2}, 하단={:.2}",
                        ts.format("%Y-%m-%d"),
                        upper,
                        middle,
                        lower
                    );
                }
            }
            IndicatorSeries::Macd(results) => {
                let defined: Vec<_> = timestamps
                    .iter()
                    .zip(results.iter())
                    .filter_map(|(ts, r)| match (r.macd, r.signal, r.histogram) {
                        (Some(macd), Some(signal), Some(histogram)) => {
                            Some((ts, macd, signal, histogram))
                        }
                        _ => None,
                    })
                    .collect();
                if defined.is_empty() {
                    println!("  (정의된 값 없음)");
                }
                let start = defined.len().saturating_sub(config.recent);
                for (ts, macd, signal, histogram) in &defined[start..] {
                    println!(
                        "  {}: MACD={:.2}, Signal={:.2}, Histogram={:.2}",
                        ts.format("%Y-%m-%d"),
                        macd,
                        signal,
                        histogram
                    );
                }
            }
        }
    }

    Ok(())
}

/// 정의된 값만 골라 최근 `count`개를 반환합니다.
fn recent_defined<'a>(
    timestamps: &'a [DateTime<Utc>],
    values: &[Option<Decimal>],
    count: usize,
) -> Vec<(&'a DateTime<Utc>, Decimal)> {
    let defined: Vec<(&DateTime<Utc>, Decimal)> = timestamps
        .iter()
        .zip(values.iter())
        .filter_map(|(ts, v)| v.map(|value| (ts, value)))
        .collect();

    let start = defined.len().saturating_sub(count);
    defined[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn timestamps(n: u32) -> Vec<DateTime<Utc>> {
        (1..=n)
            .map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap())
            .collect()
    }

    #[test]
    fn test_recent_defined_skips_none_and_limits_count() {
        let ts = timestamps(5);
        let values = vec![None, Some(dec!(10)), Some(dec!(11)), None, Some(dec!(12))];

        let recent = recent_defined(&ts, &values, 2);

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0], (&ts[2], dec!(11)));
        assert_eq!(recent[1], (&ts[4], dec!(12)));
    }

    #[test]
    fn test_recent_defined_with_fewer_points_than_count() {
        let ts = timestamps(3);
        let values = vec![None, Some(dec!(10)), None];

        let recent = recent_defined(&ts, &values, 10);
        assert_eq!(recent, vec![(&ts[1], dec!(10))]);
    }

    #[test]
    fn test_recent_defined_empty() {
        let ts: Vec<DateTime<Utc>> = vec![];
        assert!(recent_defined(&ts, &[], 10).is_empty());
    }
}
