//! # ChartSage Core
//!
//! 주식 분석 대시보드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 캔들 및 시계열 구조체
//! - 지표 종류 정의
//! - 세션 상태 (조회 → 렌더링 → 분석 단계 간 전달)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
