//! 시장 데이터 구조체.
//!
//! OHLCV 캔들과 정렬된 시계열, 그리고 조회 단계에서 렌더링/분석 단계로
//! 전달되는 세션 상태를 정의합니다.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// OHLCV 캔들 데이터.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// 종목 티커 (예: "NVDA", "005930.KS")
    pub ticker: String,
    /// 캔들 시작 시간
    pub open_time: DateTime<Utc>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl Candle {
    /// 상승 캔들 여부 (종가 >= 시가).
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// 정렬된 OHLCV 시계열.
///
/// 불변식: 타임스탬프는 엄격하게 증가하며 중복이 없습니다.
/// 생성자가 정렬과 중복 검사를 수행하므로, 이 타입의 인스턴스는
/// 항상 불변식을 만족합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhlcvSeries {
    candles: Vec<Candle>,
}

impl OhlcvSeries {
    /// 캔들 목록에서 시계열을 생성합니다.
    ///
    /// 시간순으로 정렬하고 중복 타임스탬프를 검사합니다.
    pub fn new(mut candles: Vec<Candle>) -> CoreResult<Self> {
        candles.sort_by_key(|c| c.open_time);

        for pair in candles.windows(2) {
            if pair[0].open_time == pair[1].open_time {
                return Err(CoreError::InvalidSeries(format!(
                    "중복 타임스탬프: {}",
                    pair[0].open_time
                )));
            }
        }

        Ok(Self { candles })
    }

    /// 캔들 개수.
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// 시계열이 비어 있는지 확인.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// 캔들 슬라이스 접근.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// 타임스탬프 열.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.candles.iter().map(|c| c.open_time).collect()
    }

    /// 시가 열.
    pub fn opens(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.open).collect()
    }

    /// 고가 열.
    pub fn highs(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// 저가 열.
    pub fn lows(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// 종가 열.
    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// 거래량 열.
    pub fn volumes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

/// 세션 상태.
///
/// 한 번의 조회 결과를 담아 렌더링/분석 단계로 명시적으로 전달됩니다.
/// 조회 단계가 유일한 작성자이며, 이후 단계는 읽기만 합니다.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// 조회한 종목 티커
    pub ticker: String,
    /// 조회 시작 날짜
    pub start_date: NaiveDate,
    /// 조회 종료 날짜
    pub end_date: NaiveDate,
    /// 조회된 OHLCV 시계열
    pub series: OhlcvSeries,
}

impl SessionState {
    /// 새 세션 상태를 생성합니다.
    pub fn new(
        ticker: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        series: OhlcvSeries,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            start_date,
            end_date,
            series,
        }
    }

    /// 차트 제목 (예: "NVDA Performance Chart (2024-01-01 - 2024-12-31)").
    pub fn chart_title(&self) -> String {
        format!(
            "{} Performance Chart ({} - {})",
            self.ticker, self.start_date, self.end_date
        )
    }
}
