//! 과거 OHLCV 데이터 다운로드 명령어.
//!
//! Yahoo Finance에서 캔들 데이터를 조회하여 CSV 파일로 저장합니다.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use chartsage_data::Interval;

use super::fetch_session;

/// 다운로드 설정.
pub struct FetchConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: Interval,
    pub output_path: String,
}

/// 데이터를 다운로드하고 저장된 캔들 수를 반환합니다.
pub async fn fetch_data(config: FetchConfig) -> Result<usize> {
    let session = fetch_session(
        &config.ticker,
        config.start_date,
        config.end_date,
        config.interval,
    )
    .await?;

    let path = Path::new(&config.output_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("디렉토리 생성 실패: {}", parent.display()))?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("출력 파일 생성 실패: {}", config.output_path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "date,open,high,low,close,volume")?;
    for candle in session.series.candles() {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            candle.open_time.format("%Y-%m-%d"),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume
        )?;
    }
    writer.flush()?;

    let count = session.series.len();
    info!(
        ticker = %session.ticker,
        count,
        path = %config.output_path,
        "CSV 저장 완료"
    );
    Ok(count)
}
