//! 분석 리포트 조립기 (Report Assembler).
//!
//! 선택된 오실레이터 지표(RSI, MACD)의 최근 값을 텍스트 블록으로
//! 포맷하고, 고정 분석 요청 프롬프트 뒤에 붙여 비전 모델에 전달할
//! 최종 프롬프트를 만듭니다.
//!
//! 모델 응답은 이 모듈에서 해석하지 않습니다. 조립된 텍스트는
//! 렌더링된 차트 이미지와 함께 그대로 전달됩니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::indicators::{IndicatorSeries, MacdResult};

/// 고정 분석 요청 프롬프트.
pub const ANALYSIS_PROMPT_PREAMBLE: &str = "You are a Stock Trader specializing in Technical Analysis at a top financial institution.\n\
Analyze the stock chart's technical indicators and provide a buy/hold/sell recommendation.\n\
Base your recommendation only on the candlestick chart and the displayed technical indicators.\n\
First, provide the recommendation, then, provide your detailed reasoning.";

/// 리포트 조립기.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    /// 지표별로 포함할 최근 값 개수.
    recent_points: usize,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self { recent_points: 10 }
    }
}

impl ReportAssembler {
    /// 기본 설정(최근 10개)으로 조립기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 포함할 최근 값 개수를 지정합니다.
    pub fn with_recent_points(mut self, recent_points: usize) -> Self {
        self.recent_points = recent_points;
        self
    }

    /// 기술 데이터 블록을 조립합니다.
    ///
    /// 선택 순서대로 RSI와 MACD 블록을 이어 붙입니다. 오실레이터가
    /// 선택되지 않았으면 빈 문자열을 반환합니다.
    pub fn technical_data_block(
        &self,
        timestamps: &[DateTime<Utc>],
        computed: &[IndicatorSeries],
    ) -> String {
        let mut tech_data = String::new();

        for series in computed {
            match series {
                IndicatorSeries::Rsi(values) => {
                    if !tech_data.is_empty() {
                        tech_data.push('\n');
                    }
                    tech_data.push_str(&self.rsi_block(timestamps, values));
                }
                IndicatorSeries::Macd(results) => {
                    if !tech_data.is_empty() {
                        tech_data.push('\n');
                    }
                    tech_data.push_str(&self.macd_block(timestamps, results));
                }
                // 가격 패널 오버레이는 리포트에 포함하지 않음
                _ => {}
            }
        }

        tech_data
    }

    /// 최종 분석 프롬프트를 조립합니다.
    pub fn assemble(
        &self,
        timestamps: &[DateTime<Utc>],
        computed: &[IndicatorSeries],
    ) -> String {
        let tech_data = self.technical_data_block(timestamps, computed);
        format!(
            "{}\n\nAdditional Technical Data:{}",
            ANALYSIS_PROMPT_PREAMBLE, tech_data
        )
    }

    /// "Recent RSI values" 블록.
    fn rsi_block(&self, timestamps: &[DateTime<Utc>], values: &[Option<Decimal>]) -> String {
        let mut block = String::from("\nRecent RSI values:");

        for (ts, value) in self.recent_defined(timestamps, values) {
            block.push_str(&format!("\n{}: {:.2}", ts.format("%Y-%m-%d"), value));
        }

        block
    }

    /// "Recent MACD values" 블록.
    fn macd_block(&self, timestamps: &[DateTime<Utc>], results: &[MacdResult]) -> String {
        let mut block = String::from("\nRecent MACD values:");

        let defined: Vec<(&DateTime<Utc>, Decimal, Decimal)> = timestamps
            .iter()
            .zip(results.iter())
            .filter_map(|(ts, r)| match (r.macd, r.signal) {
                (Some(macd), Some(signal)) => Some((ts, macd, signal)),
                _ => None,
            })
            .collect();

        let start = defined.len().saturating_sub(self.recent_points);
        for (ts, macd, signal) in &defined[start..] {
            block.push_str(&format!(
                "\n{}: MACD={:.2}, Signal={:.2}",
                ts.format("%Y-%m-%d"),
                macd,
                signal
            ));
        }

        block
    }

    /// 정의된 값만 골라 최근 `recent_points`개를 반환합니다.
    fn recent_defined<'a>(
        &self,
        timestamps: &'a [DateTime<Utc>],
        values: &'a [Option<Decimal>],
    ) -> Vec<(&'a DateTime<Utc>, Decimal)> {
        let defined: Vec<(&DateTime<Utc>, Decimal)> = timestamps
            .iter()
            .zip(values.iter())
            .filter_map(|(ts, v)| v.map(|value| (ts, value)))
            .collect();

        let start = defined.len().saturating_sub(self.recent_points);
        defined[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn timestamps(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| {
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i as i64)
            })
            .collect()
    }

    #[test]
    fn test_empty_block_without_oscillators() {
        let assembler = ReportAssembler::new();
        let ts = timestamps(5);

        let sma = IndicatorSeries::Sma(vec![Some(dec!(100)); 5]);
        let block = assembler.technical_data_block(&ts, &[sma]);

        assert!(block.is_empty());

        let prompt = assembler.assemble(&ts, &[]);
        assert!(prompt.starts_with(ANALYSIS_PROMPT_PREAMBLE));
        assert!(prompt.ends_with("Additional Technical Data:"));
    }

    #[test]
    fn test_rsi_block_has_at_most_10_lines() {
        let assembler = ReportAssembler::new();
        let ts = timestamps(30);

        let mut values = vec![None; 14];
        values.extend((14..30).map(|i| Some(Decimal::from(40 + i))));
        let rsi = IndicatorSeries::Rsi(values);

        let block = assembler.technical_data_block(&ts, &[rsi]);

        assert!(block.contains("Recent RSI values:"));
        let lines: Vec<&str> = block
            .lines()
            .filter(|l| l.starts_with("2024-"))
            .collect();
        assert_eq!(lines.len(), 10);

        // 마지막 값: 2024-01-30, RSI 69
        assert_eq!(lines.last().unwrap(), &"2024-01-30: 69.00");
    }

    #[test]
    fn test_rsi_block_shorter_when_fewer_defined_points() {
        let assembler = ReportAssembler::new();
        let ts = timestamps(5);

        let values = vec![None, None, Some(dec!(55.5)), Some(dec!(60.25)), None];
        let rsi = IndicatorSeries::Rsi(values);

        let block = assembler.technical_data_block(&ts, &[rsi]);

        let lines: Vec<&str> = block
            .lines()
            .filter(|l| l.starts_with("2024-"))
            .collect();
        assert_eq!(lines, vec!["2024-01-03: 55.50", "2024-01-04: 60.25"]);
    }

    #[test]
    fn test_both_oscillator_blocks() {
        let assembler = ReportAssembler::new();
        let ts = timestamps(15);

        let rsi = IndicatorSeries::Rsi(vec![Some(dec!(50)); 15]);
        let macd = IndicatorSeries::Macd(vec![
            MacdResult {
                macd: Some(dec!(1.234)),
                signal: Some(dec!(0.567)),
                histogram: Some(dec!(0.667)),
            };
            15
        ]);

        let prompt = assembler.assemble(&ts, &[rsi, macd]);

        assert!(prompt.contains("Recent RSI values:"));
        assert!(prompt.contains("Recent MACD values:"));
        assert!(prompt.contains("MACD=1.23, Signal=0.57"));

        let rsi_lines = prompt.matches(": 50.00").count();
        assert_eq!(rsi_lines, 10);
        let macd_lines = prompt.matches("MACD=").count();
        assert_eq!(macd_lines, 10);
    }

    #[test]
    fn test_block_separator_independent_of_selection_order() {
        let assembler = ReportAssembler::new();
        let ts = timestamps(12);

        let rsi = IndicatorSeries::Rsi(vec![Some(dec!(50)); 12]);
        let macd = IndicatorSeries::Macd(vec![
            MacdResult {
                macd: Some(dec!(1)),
                signal: Some(dec!(1)),
                histogram: Some(dec!(0)),
            };
            12
        ]);

        // 선택 순서와 무관하게 두 블록 사이에 빈 줄 하나
        let rsi_first = assembler.technical_data_block(&ts, &[rsi.clone(), macd.clone()]);
        let macd_first = assembler.technical_data_block(&ts, &[macd, rsi]);

        assert!(rsi_first.contains("\n\nRecent MACD values:"));
        assert!(macd_first.contains("\n\nRecent RSI values:"));
    }
}
