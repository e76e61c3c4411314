//! 차트 렌더링 + AI 분석 명령어.
//!
//! 파이프라인: 데이터 조회 → 지표 계산 → 차트 PNG 렌더링 →
//! 프롬프트 조립 → Ollama 비전 모델 분석 → 결과 출력.
//!
//! 차트는 임시 파일로 렌더링되며, `--chart-out`을 지정한 경우에만
//! 복사본이 남습니다. 임시 파일은 분석 성공/실패와 무관하게
//! 스코프를 벗어날 때 삭제됩니다.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use chartsage_ai::OllamaClient;
use chartsage_analytics::indicators::IndicatorEngine;
use chartsage_analytics::report::ReportAssembler;
use chartsage_core::{AppConfig, IndicatorKind};
use chartsage_data::Interval;
use chartsage_render::ChartComposer;

use super::fetch_session;

/// 분석 명령어 설정.
pub struct AnalyzeConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicators: Vec<IndicatorKind>,
    /// 렌더링된 차트 PNG 복사본 저장 경로
    pub chart_out: Option<PathBuf>,
    /// 설정 대신 사용할 비전 모델 이름
    pub model: Option<String>,
    /// AI 호출 없이 조립된 프롬프트만 출력
    pub no_ai: bool,
}

/// 분석 파이프라인을 실행합니다.
pub async fn run_analysis(config: AnalyzeConfig, app: &AppConfig) -> Result<()> {
    let interval = Interval::parse(&app.data.interval).unwrap_or_default();
    let session =
        fetch_session(&config.ticker, config.start_date, config.end_date, interval).await?;
    info!(
        ticker = %session.ticker,
        candles = session.series.len(),
        "데이터 조회 완료"
    );

    let engine = IndicatorEngine::new();
    let computed = engine.compute_all(&config.indicators, &session.series)?;

    // 임시 파일은 스코프를 벗어나면 자동 삭제됨
    let chart_file = tempfile::Builder::new()
        .prefix("chartsage_")
        .suffix(".png")
        .tempfile()
        .context("임시 차트 파일 생성 실패")?;

    let composer = ChartComposer::new(app.chart.clone());
    composer.render_png(&session, &computed, chart_file.path())?;

    if let Some(out) = &config.chart_out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("디렉토리 생성 실패: {}", parent.display()))?;
            }
        }
        std::fs::copy(chart_file.path(), out)
            .with_context(|| format!("차트 파일 복사 실패: {}", out.display()))?;
        println!("차트 저장됨: {}", out.display());
    }

    let assembler = ReportAssembler::new();
    let prompt = assembler.assemble(&session.series.timestamps(), &computed);
    debug!(prompt_len = prompt.len(), "분석 프롬프트 조립 완료");

    if config.no_ai {
        println!("\n{}", prompt);
        return Ok(());
    }

    let image = std::fs::read(chart_file.path()).context("렌더링된 차트 읽기 실패")?;
    let client = match &config.model {
        Some(model) => OllamaClient::from_parts(&app.ollama.endpoint, model),
        None => OllamaClient::new(&app.ollama),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner.set_message(format!("{} 모델이 차트를 분석하는 중...", client.model()));

    let analysis = client.analyze_chart(&prompt, &image).await;
    spinner.finish_and_clear();

    let analysis = analysis?;
    println!("\n**AI Analysis Results ({})**\n", session.ticker);
    println!("{}", analysis);

    Ok(())
}
