//! 핵심 에러 타입.
//!
//! 이 모듈은 도메인 모델과 설정에서 사용되는 에러 타입을 정의합니다.
//! 외부 연동(데이터 조회, 차트 렌더링, AI 분석)의 에러는 각 크레이트가
//! 자체 타입으로 정의합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 시계열 (타임스탬프 중복, 정렬 위반 등)
    #[error("잘못된 시계열: {0}")]
    InvalidSeries(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidSeries("중복 타임스탬프".to_string());
        assert!(err.to_string().contains("중복 타임스탬프"));
    }
}
