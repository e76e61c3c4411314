//! 캔들스틱 차트 컴포저.
//!
//! 조회된 OHLCV 시계열과 계산된 지표를 하나의 PNG 이미지로 합성합니다.
//!
//! # 레이아웃
//!
//! - 가격 패널: 캔들스틱 + 가격 오버레이 (SMA/EMA/볼린저 밴드/VWAP)
//! - RSI 패널: RSI 선 + 과매수(70)/과매도(30) 기준선 (선택 시)
//! - MACD 패널: MACD 선 + 시그널 선 (선택 시)
//!
//! 오실레이터 패널은 선택된 경우에만 가격 패널 아래에 쌓이며,
//! 두 패널이 모두 있으면 전체 높이가 `tall_height`로 늘어납니다.

use std::path::Path;

use chrono::{DateTime, Utc};
use plotters::chart::SeriesLabelPosition;
use plotters::coord::Shift;
use plotters::element::CandleStick;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use chartsage_analytics::indicators::{IndicatorSeries, MacdResult};
use chartsage_core::{ChartConfig, SessionState};

use crate::error::{RenderError, RenderResult};

/// 상승 캔들 색상.
const BULLISH: RGBColor = RGBColor(0x26, 0xA6, 0x9A);
/// 하락 캔들 색상.
const BEARISH: RGBColor = RGBColor(0xEF, 0x53, 0x50);

const SMA_COLOR: RGBColor = RGBColor(0x1F, 0x77, 0xB4);
const EMA_COLOR: RGBColor = RGBColor(0xFF, 0x7F, 0x0E);
const BAND_COLOR: RGBColor = RGBColor(0x94, 0x67, 0xBD);
const VWAP_COLOR: RGBColor = RGBColor(0x8C, 0x56, 0x4B);
const RSI_COLOR: RGBColor = RGBColor(0x94, 0x67, 0xBD);
const MACD_COLOR: RGBColor = RGBColor(0x1F, 0x77, 0xB4);
const SIGNAL_COLOR: RGBColor = RGBColor(0xFF, 0x7F, 0x0E);

/// 차트 컴포저.
#[derive(Debug, Clone)]
pub struct ChartComposer {
    config: ChartConfig,
}

impl ChartComposer {
    /// 설정으로 컴포저를 생성합니다.
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// 세션 상태와 계산된 지표를 PNG 파일로 렌더링합니다.
    ///
    /// 지표 시리즈는 선택 순서대로 전달되며, 가격 오버레이는 가격
    /// 패널에, 오실레이터(RSI/MACD)는 별도 패널에 그립니다.
    pub fn render_png(
        &self,
        session: &SessionState,
        computed: &[IndicatorSeries],
        path: &Path,
    ) -> RenderResult<()> {
        let n = session.series.len();
        if n == 0 {
            return Err(RenderError::EmptySeries(session.ticker.clone()));
        }

        for series in computed {
            if series.len() != n {
                return Err(RenderError::LengthMismatch {
                    indicator: series.kind().to_string(),
                    series_len: series.len(),
                    candle_len: n,
                });
            }
        }

        let overlays: Vec<&IndicatorSeries> = computed
            .iter()
            .filter(|s| !s.kind().is_oscillator())
            .collect();
        let rsi = computed.iter().find_map(|s| match s {
            IndicatorSeries::Rsi(values) => Some(values.as_slice()),
            _ => None,
        });
        let macd = computed.iter().find_map(|s| match s {
            IndicatorSeries::Macd(results) => Some(results.as_slice()),
            _ => None,
        });

        let panels = usize::from(rsi.is_some()) + usize::from(macd.is_some());
        let (total_height, price_height) = self.layout(panels);

        debug!(
            ticker = %session.ticker,
            candles = n,
            overlays = overlays.len(),
            panels,
            width = self.config.width,
            height = total_height,
            "차트 렌더링 시작"
        );

        let timestamps = session.series.timestamps();
        let root =
            BitMapBackend::new(path, (self.config.width, total_height)).into_drawing_area();
        root.fill(&WHITE)?;

        if panels == 0 {
            self.draw_price_panel(&root, session, &timestamps, &overlays)?;
        } else {
            let (price_area, lower) = root.split_vertically(price_height);
            self.draw_price_panel(&price_area, session, &timestamps, &overlays)?;

            let sub_areas = lower.split_evenly((panels, 1));
            let mut panel_index = 0;
            if let Some(values) = rsi {
                self.draw_rsi_panel(&sub_areas[panel_index], &timestamps, values)?;
                panel_index += 1;
            }
            if let Some(results) = macd {
                self.draw_macd_panel(&sub_areas[panel_index], &timestamps, results)?;
            }
        }

        root.present()?;
        info!(ticker = %session.ticker, path = %path.display(), "차트 PNG 저장 완료");
        Ok(())
    }

    /// 패널 구성에 따른 (전체 높이, 가격 패널 높이).
    ///
    /// 오실레이터 패널이 없으면 가격 패널이 전체를 차지하고,
    /// 두 패널이 모두 있으면 전체 높이를 늘립니다.
    fn layout(&self, oscillator_panels: usize) -> (u32, u32) {
        let total = if oscillator_panels >= 2 {
            self.config.tall_height
        } else {
            self.config.height
        };
        let price = if oscillator_panels == 0 {
            total
        } else {
            total * 3 / 5
        };
        (total, price)
    }

    /// 캔들스틱과 가격 오버레이를 그립니다.
    fn draw_price_panel(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        session: &SessionState,
        timestamps: &[DateTime<Utc>],
        overlays: &[&IndicatorSeries],
    ) -> RenderResult<()> {
        let candles = session.series.candles();
        let n = candles.len();

        let mut y_min = f64::MAX;
        let mut y_max = f64::MIN;
        for candle in candles {
            y_min = y_min.min(to_f64(candle.low));
            y_max = y_max.max(to_f64(candle.high));
        }
        for series in overlays {
            extend_bounds(series, &mut y_min, &mut y_max);
        }
        let pad = ((y_max - y_min) * 0.05).max(0.01);

        let mut chart = ChartBuilder::on(area)
            .caption(session.chart_title(), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), (y_min - pad)..(y_max + pad))?;

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|x| format_date_label(timestamps, *x))
            .y_desc("Price")
            .light_line_style(WHITE.mix(0.8))
            .draw()?;

        let body_width = (((self.config.width as f64) * 0.8 / n as f64) * 0.7).max(1.0) as u32;
        chart.draw_series(candles.iter().enumerate().map(|(i, candle)| {
            CandleStick::new(
                i as f64,
                to_f64(candle.open),
                to_f64(candle.high),
                to_f64(candle.low),
                to_f64(candle.close),
                BULLISH.filled(),
                BEARISH.filled(),
                body_width,
            )
        }))?;

        for series in overlays {
            match series {
                IndicatorSeries::Sma(values) => {
                    chart
                        .draw_series(LineSeries::new(
                            defined_points(values),
                            SMA_COLOR.stroke_width(2),
                        ))?
                        .label(series.kind().display_name())
                        .legend(|(x, y)| {
                            PathElement::new(vec![(x, y), (x + 16, y)], SMA_COLOR.stroke_width(2))
                        });
                }
                IndicatorSeries::Ema(values) => {
                    chart
                        .draw_series(LineSeries::new(
                            defined_points(values),
                            EMA_COLOR.stroke_width(2),
                        ))?
                        .label(series.kind().display_name())
                        .legend(|(x, y)| {
                            PathElement::new(vec![(x, y), (x + 16, y)], EMA_COLOR.stroke_width(2))
                        });
                }
                IndicatorSeries::Vwap(values) => {
                    chart
                        .draw_series(LineSeries::new(
                            defined_points(values),
                            VWAP_COLOR.stroke_width(2),
                        ))?
                        .label(series.kind().display_name())
                        .legend(|(x, y)| {
                            PathElement::new(vec![(x, y), (x + 16, y)], VWAP_COLOR.stroke_width(2))
                        });
                }
                IndicatorSeries::Bollinger(bands) => {
                    let upper: Vec<(f64, f64)> = bands
                        .iter()
                        .enumerate()
                        .filter_map(|(i, b)| b.upper.map(|v| (i as f64, to_f64(v))))
                        .collect();
                    let lower: Vec<(f64, f64)> = bands
                        .iter()
                        .enumerate()
                        .filter_map(|(i, b)| b.lower.map(|v| (i as f64, to_f64(v))))
                        .collect();

                    chart
                        .draw_series(LineSeries::new(upper, BAND_COLOR.stroke_width(1)))?
                        .label(series.kind().display_name())
                        .legend(|(x, y)| {
                            PathElement::new(vec![(x, y), (x + 16, y)], BAND_COLOR.stroke_width(1))
                        });
                    chart.draw_series(LineSeries::new(lower, BAND_COLOR.stroke_width(1)))?;
                }
                // 오실레이터는 별도 패널에서 처리
                _ => {}
            }
        }

        if !overlays.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }

    /// RSI 패널 (0-100 고정 축, 70/30 기준선).
    fn draw_rsi_panel(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        timestamps: &[DateTime<Utc>],
        values: &[Option<Decimal>],
    ) -> RenderResult<()> {
        let n = values.len();
        let x_range = -0.5f64..(n as f64 - 0.5);

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), 0f64..100f64)?;

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|x| format_date_label(timestamps, *x))
            .y_desc("RSI")
            .light_line_style(WHITE.mix(0.8))
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                defined_points(values),
                RSI_COLOR.stroke_width(2),
            ))?
            .label("RSI (14)")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], RSI_COLOR.stroke_width(2))
            });

        // 과매수/과매도 기준선
        chart.draw_series(DashedLineSeries::new(
            vec![(x_range.start, 70.0), (x_range.end, 70.0)],
            6,
            4,
            BEARISH.stroke_width(1),
        ))?;
        chart.draw_series(DashedLineSeries::new(
            vec![(x_range.start, 30.0), (x_range.end, 30.0)],
            6,
            4,
            BULLISH.stroke_width(1),
        ))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    /// MACD 패널 (MACD 선 + 시그널 선).
    fn draw_macd_panel(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        timestamps: &[DateTime<Utc>],
        results: &[MacdResult],
    ) -> RenderResult<()> {
        let n = results.len();

        let macd_points: Vec<(f64, f64)> = results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.macd.map(|v| (i as f64, to_f64(v))))
            .collect();
        let signal_points: Vec<(f64, f64)> = results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.signal.map(|v| (i as f64, to_f64(v))))
            .collect();

        let mut y_min = f64::MAX;
        let mut y_max = f64::MIN;
        for &(_, v) in macd_points.iter().chain(signal_points.iter()) {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
        if macd_points.is_empty() && signal_points.is_empty() {
            y_min = -1.0;
            y_max = 1.0;
        }
        let pad = ((y_max - y_min) * 0.1).max(0.1);

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), (y_min - pad)..(y_max + pad))?;

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|x| format_date_label(timestamps, *x))
            .y_desc("MACD")
            .light_line_style(WHITE.mix(0.8))
            .draw()?;

        chart
            .draw_series(LineSeries::new(macd_points, MACD_COLOR.stroke_width(2)))?
            .label("MACD (12, 26)")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], MACD_COLOR.stroke_width(2))
            });
        chart
            .draw_series(LineSeries::new(signal_points, SIGNAL_COLOR.stroke_width(2)))?
            .label("Signal (9)")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], SIGNAL_COLOR.stroke_width(2))
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }
}

/// Decimal을 플롯 좌표로 변환.
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// 정의된 값만 (인덱스, 값) 좌표로 변환.
fn defined_points(values: &[Option<Decimal>]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|d| (i as f64, to_f64(d))))
        .collect()
}

/// 오버레이 시리즈 값으로 y축 범위를 확장.
fn extend_bounds(series: &IndicatorSeries, y_min: &mut f64, y_max: &mut f64) {
    let mut extend = |value: Option<Decimal>| {
        if let Some(v) = value {
            let v = to_f64(v);
            *y_min = y_min.min(v);
            *y_max = y_max.max(v);
        }
    };

    match series {
        IndicatorSeries::Sma(values)
        | IndicatorSeries::Ema(values)
        | IndicatorSeries::Vwap(values) => {
            for &value in values {
                extend(value);
            }
        }
        IndicatorSeries::Bollinger(bands) => {
            for band in bands {
                extend(band.upper);
                extend(band.lower);
            }
        }
        _ => {}
    }
}

/// 반올림한 인덱스에 해당하는 날짜 레이블.
fn format_date_label(timestamps: &[DateTime<Utc>], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 {
        return String::new();
    }
    timestamps
        .get(idx as usize)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
