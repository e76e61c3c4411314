//! 캔들스틱 차트 렌더링 명령어.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use chartsage_analytics::indicators::IndicatorEngine;
use chartsage_core::{AppConfig, IndicatorKind};
use chartsage_data::Interval;
use chartsage_render::ChartComposer;

use super::fetch_session;

/// 차트 명령어 설정.
pub struct ChartCliConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicators: Vec<IndicatorKind>,
    /// 출력 경로 (지정하지 않으면 자동 생성)
    pub output: Option<PathBuf>,
}

/// 차트를 렌더링하고 저장 경로를 반환합니다.
pub async fn run_chart(config: ChartCliConfig, app: &AppConfig) -> Result<PathBuf> {
    let interval = Interval::parse(&app.data.interval).unwrap_or_default();
    let session =
        fetch_session(&config.ticker, config.start_date, config.end_date, interval).await?;

    let engine = IndicatorEngine::new();
    let computed = engine.compute_all(&config.indicators, &session.series)?;

    let output = config.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "charts/{}_{}_to_{}.png",
            session.ticker,
            config.start_date.format("%Y%m%d"),
            config.end_date.format("%Y%m%d")
        ))
    });
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("디렉토리 생성 실패: {}", parent.display()))?;
        }
    }

    let composer = ChartComposer::new(app.chart.clone());
    composer.render_png(&session, &computed, &output)?;

    info!(path = %output.display(), "차트 렌더링 완료");
    Ok(output)
}
