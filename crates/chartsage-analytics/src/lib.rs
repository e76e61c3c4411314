//! 기술적 지표 계산 및 분석 리포트 조립.
//!
//! 이 crate는 파이프라인의 재현 가능한 계산 부분을 담당합니다:
//! - OHLCV 시계열에서 기술적 지표 계산 (지표 엔진)
//! - 오실레이터 최근 값을 AI 분석 프롬프트로 조립 (리포트 조립기)
//!
//! 모든 계산은 입력 시계열과 고정 파라미터의 순수 함수이며,
//! 공유 상태를 변경하지 않습니다.

pub mod indicators;
pub mod report;

pub use indicators::{
    BollingerBandsParams, BollingerBandsResult, EmaParams, IndicatorEngine, IndicatorError,
    IndicatorResult, IndicatorSeries, MacdParams, MacdResult, RsiParams, SmaParams,
};
pub use report::{ReportAssembler, ANALYSIS_PROMPT_PREAMBLE};
