//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 조회 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 외부 소스에서 데이터 가져오기 오류 (잘못된 티커, 네트워크 장애 등)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 조회 결과가 비어 있음
    #[error("No data returned for {ticker} ({start} - {end})")]
    EmptyData {
        ticker: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// 잘못된 날짜 범위
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// 잘못된 데이터 (시계열 불변식 위반 등)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 제공자 연결 초기화 오류
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<chartsage_core::CoreError> for DataError {
    fn from(err: chartsage_core::CoreError) -> Self {
        DataError::InvalidData(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
