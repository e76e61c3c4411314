//! Yahoo Finance 과거 데이터 제공자.
//!
//! Yahoo Finance API를 사용하여 과거 캔들(OHLCV) 데이터를 조회합니다.
//!
//! # 심볼 형식
//!
//! 모든 심볼은 Yahoo Finance 형식으로 전달되어야 합니다:
//! - 미국 주식: "AAPL", "NVDA"
//! - 한국 주식: "005930.KS" (코스피) 또는 "124560.KQ" (코스닥)
//! - ETF: "SPY", "QQQ"
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use chartsage_data::{HistoricalDataProvider, Interval, YahooFinanceProvider};
//!
//! let provider = YahooFinanceProvider::new()?;
//! let series = provider.fetch_ohlcv("NVDA", start, end, Interval::D1).await?;
//! ```

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use yahoo_finance_api as yahoo;

use crate::error::{DataError, Result};
use crate::provider::{HistoricalDataProvider, Interval};
use chartsage_core::{Candle, OhlcvSeries};

/// Yahoo Finance 과거 데이터 제공자.
pub struct YahooFinanceProvider {
    connector: yahoo::YahooConnector,
}

impl YahooFinanceProvider {
    /// 새로운 Yahoo Finance 제공자 생성.
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::ConnectionError(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self { connector })
    }

    /// Yahoo Quote를 Candle로 변환.
    fn quote_to_candle(ticker: &str, quote: &yahoo::Quote) -> Candle {
        let open_time = Utc
            .timestamp_opt(quote.timestamp as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Candle {
            ticker: ticker.to_string(),
            open_time,
            open: Decimal::from_f64_retain(quote.open).unwrap_or_default(),
            high: Decimal::from_f64_retain(quote.high).unwrap_or_default(),
            low: Decimal::from_f64_retain(quote.low).unwrap_or_default(),
            close: Decimal::from_f64_retain(quote.close).unwrap_or_default(),
            volume: Decimal::from(quote.volume),
        }
    }
}

#[async_trait]
impl HistoricalDataProvider for YahooFinanceProvider {
    async fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
    ) -> Result<OhlcvSeries> {
        if start_date >= end_date {
            return Err(DataError::InvalidRange(format!(
                "시작 날짜({})가 종료 날짜({}) 이전이어야 합니다",
                start_date, end_date
            )));
        }

        let start = naive_date_to_offset_datetime(start_date)?;
        let end = naive_date_to_offset_datetime(end_date)?;
        let interval_str = interval.to_yahoo_str();

        info!(
            ticker = ticker,
            interval = interval_str,
            start = %start_date,
            end = %end_date,
            "Yahoo Finance 조회"
        );

        let response = self
            .connector
            .get_quote_history_interval(ticker, start, end, interval_str)
            .await
            .map_err(|e| {
                DataError::FetchError(format!("Yahoo Finance API 오류 ({}): {}", ticker, e))
            })?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::ParseError(format!("Quote 파싱 오류: {}", e)))?;

        if quotes.is_empty() {
            warn!(ticker = ticker, "Yahoo Finance 데이터 없음");
            return Err(DataError::EmptyData {
                ticker: ticker.to_string(),
                start: start_date,
                end: end_date,
            });
        }

        debug!(ticker = ticker, count = quotes.len(), "캔들 수신");

        let candles: Vec<Candle> = quotes
            .iter()
            .map(|q| Self::quote_to_candle(ticker, q))
            .collect();

        // OhlcvSeries 생성자가 시간순 정렬과 중복 검사를 수행
        Ok(OhlcvSeries::new(candles)?)
    }
}

/// NaiveDate를 OffsetDateTime으로 변환.
fn naive_date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime> {
    let month = time::Month::try_from(date.month() as u8)
        .map_err(|e| DataError::InvalidRange(e.to_string()))?;

    let date = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
        .map_err(|e| DataError::InvalidRange(e.to_string()))?;

    Ok(date.midnight().assume_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_date_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let offset = naive_date_to_offset_datetime(date).unwrap();

        assert_eq!(offset.year(), 2024);
        assert_eq!(offset.month(), time::Month::June);
        assert_eq!(offset.day(), 15);
        assert_eq!(offset.hour(), 0);
    }

    #[tokio::test]
    async fn test_invalid_range_rejected() {
        let provider = match YahooFinanceProvider::new() {
            Ok(p) => p,
            // 오프라인 환경에서는 커넥터 생성만으로 실패할 수 있음
            Err(_) => return,
        };

        let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let result = provider.fetch_ohlcv("NVDA", start, end, Interval::D1).await;
        assert!(matches!(result, Err(DataError::InvalidRange(_))));
    }
}
