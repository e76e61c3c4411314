//! AI 분석 오류 타입.

use thiserror::Error;

/// Ollama 분석 요청 오류.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 네트워크/전송 오류
    #[error("Ollama 요청 실패: {0}")]
    Network(#[from] reqwest::Error),

    /// 서비스가 비정상 상태 코드를 반환
    #[error("Ollama 서비스 오류 (HTTP {status}): {body}")]
    Service { status: u16, body: String },

    /// 응답 본문 해석 실패
    #[error("Ollama 응답 해석 실패: {0}")]
    InvalidResponse(String),
}

/// AI 분석 결과 타입.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
