//! ChartSage AI 분석 크레이트.
//!
//! 로컬 Ollama 비전 모델에 차트 이미지와 분석 프롬프트를 전달하고
//! 매수/보유/매도 분석 텍스트를 받아옵니다.

pub mod error;
pub mod ollama;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};
pub use ollama::OllamaClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse};
