//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 기본값 → TOML 파일 → 환경 변수(`CHARTSAGE__` 접두사) 순으로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 시장 데이터 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 차트 렌더링 설정
    #[serde(default)]
    pub chart: ChartConfig,
    /// Ollama AI 분석 설정
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 시장 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 기본 조회 간격 (1d: 일봉, 1wk: 주봉, 1mo: 월봉)
    pub interval: String,
    /// 기본 조회 기간 (일 단위, 시작 날짜 미지정 시)
    pub default_lookback_days: u32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            interval: "1d".to_string(),
            default_lookback_days: 365,
        }
    }
}

/// 차트 렌더링 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    /// 차트 너비 (픽셀)
    pub width: u32,
    /// 기본 차트 높이 (픽셀)
    pub height: u32,
    /// RSI와 MACD 패널이 모두 있을 때의 높이 (픽셀)
    pub tall_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            tall_height: 1000,
        }
    }
}

/// Ollama AI 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OllamaConfig {
    /// Ollama 서버 엔드포인트
    pub endpoint: String,
    /// 사용할 비전 모델 이름
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.2-vision".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드 (없으면 기본값 사용)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("CHARTSAGE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data.interval, "1d");
        assert_eq!(config.ollama.model, "llama3.2-vision");
        assert_eq!(config.chart.height, 800);
        assert_eq!(config.chart.tall_height, 1000);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.logging.level, "info");
    }
}
