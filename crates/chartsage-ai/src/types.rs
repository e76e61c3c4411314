//! Ollama `/api/chat` 요청/응답 타입.

use serde::{Deserialize, Serialize};

/// 채팅 요청 본문.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// 모델 이름 (예: "llama3.2-vision")
    pub model: String,
    /// 메시지 목록
    pub messages: Vec<ChatMessage>,
    /// 스트리밍 여부 (단일 응답을 위해 항상 false)
    pub stream: bool,
}

/// 채팅 메시지.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// 역할 ("user")
    pub role: String,
    /// 텍스트 프롬프트
    pub content: String,
    /// base64 인코딩된 이미지 목록
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// 채팅 응답 본문.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// 모델이 생성한 메시지
    pub message: ResponseMessage,
}

/// 응답 메시지.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// 생성된 텍스트
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let request = ChatRequest {
            model: "llama3.2-vision".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "분석해 주세요".to_string(),
                images: vec!["aGVsbG8=".to_string()],
            }],
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "llama3.2-vision");
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["images"][0], "aGVsbG8=");
    }

    #[test]
    fn test_empty_images_field_is_omitted() {
        let message = ChatMessage {
            role: "user".to_string(),
            content: "텍스트만".to_string(),
            images: vec![],
        };

        let value = serde_json::to_value(&message).unwrap();
        assert!(value.get("images").is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "model": "llama3.2-vision",
            "created_at": "2024-06-01T00:00:00Z",
            "message": {"role": "assistant", "content": "Buy. The trend is up."},
            "done": true
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.content, "Buy. The trend is up.");
    }
}
