//! 지표 종류 정의.
//!
//! 문자열 비교 분기 대신 태그드 열거형으로 지표를 선택합니다.
//! 선택 순서는 계산 결과에 영향을 주지 않지만, 차트 범례와
//! 리포트 블록의 표시 순서에는 반영됩니다.

use serde::{Deserialize, Serialize};

/// 지원되는 기술적 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// 20일 단순 이동평균
    Sma20,
    /// 20일 지수 이동평균
    Ema20,
    /// 20일 볼린저 밴드 (±2σ)
    BollingerBands,
    /// 거래량 가중 평균 가격 (누적)
    Vwap,
    /// 상대강도지수 (14일)
    Rsi,
    /// MACD (12/26/9)
    Macd,
}

impl IndicatorKind {
    /// 모든 지표 종류.
    pub const ALL: [IndicatorKind; 6] = [
        IndicatorKind::Sma20,
        IndicatorKind::Ema20,
        IndicatorKind::BollingerBands,
        IndicatorKind::Vwap,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
    ];

    /// 차트 범례에 표시할 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            IndicatorKind::Sma20 => "SMA (20)",
            IndicatorKind::Ema20 => "EMA (20)",
            IndicatorKind::BollingerBands => "Bollinger Bands",
            IndicatorKind::Vwap => "VWAP",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
        }
    }

    /// 가격 패널이 아닌 별도 패널에 그려지는 오실레이터인지 확인.
    pub fn is_oscillator(&self) -> bool {
        matches!(self, IndicatorKind::Rsi | IndicatorKind::Macd)
    }
}

impl std::str::FromStr for IndicatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sma" | "sma20" => Ok(Self::Sma20),
            "ema" | "ema20" => Ok(Self::Ema20),
            "bb" | "bollinger" | "bollinger_bands" => Ok(Self::BollingerBands),
            "vwap" => Ok(Self::Vwap),
            "rsi" => Ok(Self::Rsi),
            "macd" => Ok(Self::Macd),
            _ => Err(format!(
                "알 수 없는 지표: '{}' (사용 가능: sma, ema, bb, vwap, rsi, macd)",
                s
            )),
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// 쉼표로 구분된 지표 목록을 파싱합니다.
///
/// 중복은 처음 나온 위치를 유지하며 제거됩니다.
pub fn parse_indicator_list(input: &str) -> Result<Vec<IndicatorKind>, String> {
    let mut kinds = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let kind: IndicatorKind = part.parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    Ok(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        assert_eq!("rsi".parse::<IndicatorKind>().unwrap(), IndicatorKind::Rsi);
        assert_eq!(
            "Bollinger".parse::<IndicatorKind>().unwrap(),
            IndicatorKind::BollingerBands
        );
        assert!("unknown".parse::<IndicatorKind>().is_err());
    }

    #[test]
    fn test_parse_list_dedupes_preserving_order() {
        let kinds = parse_indicator_list("macd, sma, rsi, sma").unwrap();
        assert_eq!(
            kinds,
            vec![IndicatorKind::Macd, IndicatorKind::Sma20, IndicatorKind::Rsi]
        );
    }

    #[test]
    fn test_oscillator_classification() {
        assert!(IndicatorKind::Rsi.is_oscillator());
        assert!(IndicatorKind::Macd.is_oscillator());
        assert!(!IndicatorKind::Sma20.is_oscillator());
        assert!(!IndicatorKind::Vwap.is_oscillator());
    }
}
