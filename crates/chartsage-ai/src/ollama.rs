//! Ollama 비전 모델 클라이언트.
//!
//! 조립된 분석 프롬프트와 렌더링된 차트 이미지를 로컬 Ollama 서버의
//! `/api/chat` 엔드포인트로 전송하고, 모델이 생성한 분석 텍스트를
//! 그대로 반환합니다. 응답 내용은 해석하거나 가공하지 않습니다.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info};

use chartsage_core::OllamaConfig;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Ollama 클라이언트.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    /// 설정으로 클라이언트를 생성합니다.
    pub fn new(config: &OllamaConfig) -> Self {
        Self::from_parts(&config.endpoint, &config.model)
    }

    /// 엔드포인트와 모델 이름으로 클라이언트를 생성합니다.
    pub fn from_parts(endpoint: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// 사용 중인 모델 이름.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 차트 이미지와 프롬프트를 전송하고 분석 텍스트를 받습니다.
    ///
    /// # 인자
    /// * `prompt` - 조립된 분석 프롬프트 (기술 데이터 블록 포함)
    /// * `image_png` - 렌더링된 차트 PNG 바이트
    pub async fn analyze_chart(&self, prompt: &str, image_png: &[u8]) -> AnalysisResult<String> {
        let image_b64 = STANDARD.encode(image_png);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
                images: vec![image_b64],
            }],
            stream: false,
        };

        let url = self.chat_url();
        debug!(
            url = %url,
            model = %self.model,
            prompt_len = prompt.len(),
            image_bytes = image_png.len(),
            "Ollama 분석 요청 전송"
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::InvalidResponse(format!("{e}: {body}")))?;

        info!(
            model = %self.model,
            response_len = chat.message.content.len(),
            "Ollama 분석 응답 수신"
        );
        Ok(chat.message.content)
    }

    /// `/api/chat` 전체 URL.
    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_from_config() {
        let client = OllamaClient::new(&OllamaConfig::default());
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = OllamaClient::from_parts("http://localhost:11434/", "llama3.2-vision");
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(client.model(), "llama3.2-vision");
    }
}
