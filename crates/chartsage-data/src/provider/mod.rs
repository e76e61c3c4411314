//! 과거 데이터 제공자 trait 및 공통 타입.

pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use chartsage_core::OhlcvSeries;

pub use yahoo::YahooFinanceProvider;

/// 지원되는 타임프레임 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// 일봉
    D1,
    /// 주봉
    W1,
    /// 월봉
    MN1,
}

impl Interval {
    /// 문자열에서 간격 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1d" | "d1" | "d" | "daily" => Some(Self::D1),
            "1w" | "1wk" | "w1" | "w" | "weekly" => Some(Self::W1),
            "1mo" | "mn1" | "mo" | "monthly" => Some(Self::MN1),
            _ => None,
        }
    }

    /// Yahoo Finance 간격 문자열 반환.
    pub fn to_yahoo_str(&self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::W1 => "1wk",
            Self::MN1 => "1mo",
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::D1
    }
}

/// 과거 OHLCV 데이터 제공자.
///
/// 요청 = (티커, 시작 날짜, 종료 날짜, 간격).
/// 응답 = 시간순으로 정렬된 OHLCV 시계열, 또는 `DataError`.
#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    /// 날짜 범위의 캔들 데이터를 조회합니다.
    async fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
    ) -> Result<OhlcvSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_parse() {
        assert_eq!(Interval::parse("1d"), Some(Interval::D1));
        assert_eq!(Interval::parse("daily"), Some(Interval::D1));
        assert_eq!(Interval::parse("1wk"), Some(Interval::W1));
        assert_eq!(Interval::parse("1mo"), Some(Interval::MN1));
        assert_eq!(Interval::parse("3h"), None);
    }

    #[test]
    fn test_interval_to_yahoo_str() {
        assert_eq!(Interval::D1.to_yahoo_str(), "1d");
        assert_eq!(Interval::W1.to_yahoo_str(), "1wk");
        assert_eq!(Interval::MN1.to_yahoo_str(), "1mo");
    }
}
