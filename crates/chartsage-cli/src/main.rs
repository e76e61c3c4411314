//! AI 기술적 분석 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # NVDA 최근 1년, SMA 오버레이로 AI 분석
//! chartsage analyze
//!
//! # 지표를 직접 선택하고 차트 사본을 남기기
//! chartsage analyze AAPL -i sma,bb,rsi,macd --chart-out charts/aapl.png
//!
//! # AI 호출 없이 조립된 프롬프트만 확인
//! chartsage analyze NVDA -i rsi --no-ai
//!
//! # 과거 데이터 CSV 다운로드
//! chartsage fetch NVDA -f 2024-01-01 -t 2024-12-31
//!
//! # 차트 PNG만 렌더링
//! chartsage chart 005930.KS -i ema,vwap -o charts/samsung.png
//!
//! # 최근 지표 값 요약
//! chartsage indicators NVDA -i sma,ema,bb,vwap,rsi,macd
//! ```

use clap::{Parser, Subcommand};
use tracing::{error, info};

mod commands;

use commands::analyze::{run_analysis, AnalyzeConfig};
use commands::chart::{run_chart, ChartCliConfig};
use commands::fetch::{fetch_data, FetchConfig};
use commands::indicators::{run_indicators, IndicatorsConfig};
use commands::resolve_date_range;

use chartsage_core::logging::{init_logging, LogConfig};
use chartsage_core::{parse_indicator_list, AppConfig};
use chartsage_data::Interval;

#[derive(Parser)]
#[command(name = "chartsage")]
#[command(about = "AI 기반 기술적 분석 주식 대시보드", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 차트를 렌더링하고 Ollama 비전 모델로 매수/보유/매도 분석
    Analyze {
        /// 종목 티커 (예: NVDA, AAPL, 005930.KS)
        #[arg(default_value = "NVDA")]
        ticker: String,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 종료 날짜 1년 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short = 't', long)]
        to: Option<String>,

        /// 지표 목록 (쉼표 구분: sma, ema, bb, vwap, rsi, macd)
        #[arg(short, long, default_value = "sma")]
        indicators: String,

        /// 렌더링된 차트 PNG 저장 경로 (지정하지 않으면 임시 파일)
        #[arg(long)]
        chart_out: Option<String>,

        /// 설정 대신 사용할 비전 모델 이름 (기본: 설정 파일의 모델)
        #[arg(short, long)]
        model: Option<String>,

        /// AI 호출 없이 조립된 프롬프트만 출력
        #[arg(long, default_value = "false")]
        no_ai: bool,
    },

    /// 과거 OHLCV 데이터를 CSV로 다운로드
    Fetch {
        /// 종목 티커 (예: NVDA, AAPL, 005930.KS)
        #[arg(default_value = "NVDA")]
        ticker: String,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 종료 날짜 1년 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short = 't', long)]
        to: Option<String>,

        /// 타임프레임 간격 (1d: 일봉, 1wk: 주봉, 1mo: 월봉)
        #[arg(short, long, default_value = "1d")]
        interval: String,

        /// 출력 파일 경로 (기본: 자동 생성)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 캔들스틱 차트 PNG만 렌더링
    Chart {
        /// 종목 티커 (예: NVDA, AAPL, 005930.KS)
        #[arg(default_value = "NVDA")]
        ticker: String,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 종료 날짜 1년 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short = 't', long)]
        to: Option<String>,

        /// 지표 목록 (쉼표 구분: sma, ema, bb, vwap, rsi, macd)
        #[arg(short, long, default_value = "sma")]
        indicators: String,

        /// 출력 파일 경로 (기본: charts/ 아래 자동 생성)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 최근 지표 값 요약 출력
    Indicators {
        /// 종목 티커 (예: NVDA, AAPL, 005930.KS)
        #[arg(default_value = "NVDA")]
        ticker: String,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 종료 날짜 1년 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short = 't', long)]
        to: Option<String>,

        /// 지표 목록 (쉼표 구분: sma, ema, bb, vwap, rsi, macd)
        #[arg(short, long, default_value = "sma")]
        indicators: String,

        /// 지표별로 출력할 최근 값 개수
        #[arg(short = 'n', long, default_value = "10")]
        recent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일은 선택 사항
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.config)?;
    init_logging(LogConfig::from(&app_config.logging))?;

    match cli.command {
        Commands::Analyze {
            ticker,
            from,
            to,
            indicators,
            chart_out,
            model,
            no_ai,
        } => {
            let (start_date, end_date) = resolve_date_range(
                from.as_deref(),
                to.as_deref(),
                app_config.data.default_lookback_days,
            )?;
            let indicators = parse_indicator_list(&indicators)?;

            let config = AnalyzeConfig {
                ticker,
                start_date,
                end_date,
                indicators,
                chart_out: chart_out.map(Into::into),
                model,
                no_ai,
            };

            if let Err(e) = run_analysis(config, &app_config).await {
                error!("Analysis failed: {}", e);
                return Err(e.into());
            }
        }

        Commands::Fetch {
            ticker,
            from,
            to,
            interval,
            output,
        } => {
            let (start_date, end_date) = resolve_date_range(
                from.as_deref(),
                to.as_deref(),
                app_config.data.default_lookback_days,
            )?;

            let interval = Interval::parse(&interval).ok_or_else(|| {
                format!(
                    "잘못된 간격: {} (사용 가능: 1d, 1wk, 1mo)",
                    interval
                )
            })?;

            // 출력 경로 자동 생성
            let output_path = output.unwrap_or_else(|| {
                format!(
                    "data/{}_{}_{}_to_{}.csv",
                    ticker.to_uppercase(),
                    interval.to_yahoo_str(),
                    start_date.format("%Y%m%d"),
                    end_date.format("%Y%m%d")
                )
            });

            let config = FetchConfig {
                ticker,
                start_date,
                end_date,
                interval,
                output_path: output_path.clone(),
            };

            match fetch_data(config).await {
                Ok(count) => {
                    info!("Downloaded {} candles", count);
                    println!("\n데이터 다운로드 완료: {} 캔들", count);
                    println!("저장 위치: {}", output_path);
                }
                Err(e) => {
                    error!("Fetch failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Commands::Chart {
            ticker,
            from,
            to,
            indicators,
            output,
        } => {
            let (start_date, end_date) = resolve_date_range(
                from.as_deref(),
                to.as_deref(),
                app_config.data.default_lookback_days,
            )?;
            let indicators = parse_indicator_list(&indicators)?;

            let config = ChartCliConfig {
                ticker,
                start_date,
                end_date,
                indicators,
                output: output.map(Into::into),
            };

            match run_chart(config, &app_config).await {
                Ok(path) => {
                    println!("\n차트 저장됨: {}", path.display());
                }
                Err(e) => {
                    error!("Chart rendering failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Commands::Indicators {
            ticker,
            from,
            to,
            indicators,
            recent,
        } => {
            let (start_date, end_date) = resolve_date_range(
                from.as_deref(),
                to.as_deref(),
                app_config.data.default_lookback_days,
            )?;
            let indicators = parse_indicator_list(&indicators)?;

            let config = IndicatorsConfig {
                ticker,
                start_date,
                end_date,
                indicators,
                recent,
            };

            if let Err(e) = run_indicators(config, &app_config).await {
                error!("Indicator summary failed: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
