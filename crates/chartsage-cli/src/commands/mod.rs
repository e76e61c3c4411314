//! CLI 명령어 모듈.

pub mod analyze;
pub mod chart;
pub mod fetch;
pub mod indicators;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};

use chartsage_data::{HistoricalDataProvider, Interval, YahooFinanceProvider};
use chartsage_core::SessionState;

/// YYYY-MM-DD 형식의 날짜를 파싱합니다.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("잘못된 날짜 형식: '{}' (YYYY-MM-DD 필요)", s))
}

/// 조회 날짜 범위를 결정합니다.
///
/// 종료 날짜 기본값은 오늘, 시작 날짜 기본값은 종료 날짜에서
/// `lookback_days`일 전입니다.
pub fn resolve_date_range(
    from: Option<&str>,
    to: Option<&str>,
    lookback_days: u32,
) -> Result<(NaiveDate, NaiveDate)> {
    let end_date = match to {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let start_date = match from {
        Some(s) => parse_date(s)?,
        None => end_date - chrono::Duration::days(i64::from(lookback_days)),
    };

    if start_date >= end_date {
        bail!(
            "시작 날짜({})는 종료 날짜({})보다 앞서야 합니다",
            start_date,
            end_date
        );
    }

    Ok((start_date, end_date))
}

/// 데이터를 조회하고 세션 상태를 구성합니다.
pub async fn fetch_session(
    ticker: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    interval: Interval,
) -> Result<SessionState> {
    let ticker = ticker.to_uppercase();
    let provider = YahooFinanceProvider::new()?;
    let series = provider
        .fetch_ohlcv(&ticker, start_date, end_date, interval)
        .await?;

    Ok(SessionState::new(ticker, start_date, end_date, series))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert!(parse_date("15/06/2024").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_resolve_explicit_range() {
        let (start, end) =
            resolve_date_range(Some("2024-01-01"), Some("2024-12-31"), 365).unwrap();

        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_resolve_default_range_is_trailing_lookback() {
        let (start, end) = resolve_date_range(None, None, 365).unwrap();

        assert_eq!(end, Utc::now().date_naive());
        assert_eq!(end - start, chrono::Duration::days(365));
    }

    #[test]
    fn test_resolve_rejects_inverted_range() {
        let result = resolve_date_range(Some("2024-12-31"), Some("2024-01-01"), 365);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_rejects_equal_dates() {
        let result = resolve_date_range(Some("2024-06-15"), Some("2024-06-15"), 365);
        assert!(result.is_err());
    }
}
