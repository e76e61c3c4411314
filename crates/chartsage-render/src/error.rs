//! 렌더링 오류 타입.

use thiserror::Error;

/// 차트 렌더링 오류.
#[derive(Debug, Error)]
pub enum RenderError {
    /// 빈 시계열
    #[error("렌더링할 캔들이 없습니다: {0}")]
    EmptySeries(String),

    /// 지표 시리즈 길이 불일치
    #[error("지표 시리즈 길이가 캔들 개수와 일치하지 않습니다: {indicator} ({series_len} != {candle_len})")]
    LengthMismatch {
        indicator: String,
        series_len: usize,
        candle_len: usize,
    },

    /// 백엔드 드로잉 오류
    #[error("드로잉 오류: {0}")]
    Drawing(String),

    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
}

/// 렌더링 결과 타입.
pub type RenderResult<T> = Result<T, RenderError>;

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for RenderError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}
