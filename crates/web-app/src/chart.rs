use std::{borrow::BorrowMut, collections::BTreeMap};

use chrono::NaiveDate;
use gymlog_domain as domain;
use plotters::{
    chart::ChartBuilder,
    prelude::{Circle, DrawingAreaErrorKind, IntoDrawingArea, Polygon, SVGBackend},
    series::{Histogram, LineSeries},
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};

use crate::Theme;

pub const COLOR_WEIGHT: usize = 8;
pub const COLOR_REPS: usize = 4;
pub const COLOR_VOLUME: usize = 3;

pub const OPACITY_LINE: f64 = 0.9;
pub const OPACITY_AREA: f64 = 0.3;
pub const OPACITY_BAR: f64 = 0.7;

pub const WIDTH_LINE: u32 = 2;
pub const SIZE_CIRCLE: u32 = 2;

pub const HEIGHT: u32 = 200;

pub const FONT: (&str, u32) = ("Roboto", 11);

#[derive(Debug, Clone, PartialEq)]
pub enum PlotType {
    Circle(usize, f64, u32),
    Line(usize, f64, u32),
    Histogram(usize, f64),
    Band(usize, f64),
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlotParams {
    pub y_min_opt: Option<f32>,
    pub y_max_opt: Option<f32>,
}

impl PlotParams {
    #[must_use]
    pub fn primary_range(min: f32, max: f32) -> Self {
        Self {
            y_min_opt: Some(min),
            y_max_opt: Some(max),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub values_high: Vec<(NaiveDate, f32)>,
    pub values_low: Option<Vec<(NaiveDate, f32)>>,
    pub plots: Vec<PlotType>,
    pub params: PlotParams,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn min_with_margin(self) -> f32 {
        if self.min <= f32::EPSILON {
            return self.min;
        }
        (self.min - self.margin()).max(0.0)
    }

    fn max_with_margin(self) -> f32 {
        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Plot data onto a chart and return it as SVG.
///
/// The x domain of the chart is given by the interval. Every `PlotData` element holds a
/// series in `values_high` and optionally a second series in `values_low`. All plots of an
/// element are drawn for both series, except for `Band`, which fills the area between them.
///
/// Returns `None` if there is nothing to plot.
#[allow(clippy::missing_errors_doc)]
pub fn plot(
    data: &[PlotData],
    interval: &domain::Interval,
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if all_zeros(data) {
        return Ok(None);
    }

    let Some(bounds) = determine_y_bounds(data) else {
        return Ok(None);
    };

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (width, HEIGHT)).into_drawing_area();
        let (color, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(40f32)
            .build_cartesian_2d(
                interval.first..interval.last,
                bounds.min_with_margin()..bounds.max_with_margin(),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(2)
            .y_labels(6)
            .draw()?;

        for plot_data in data {
            let mut values_high = plot_data.values_high.clone();
            values_high.sort_by_key(|e| e.0);
            let mut values_low = plot_data.values_low.clone();
            if let Some(values) = values_low.as_mut() {
                values.sort_by_key(|e| e.0);
                values.reverse();
            }
            let series = [values_low.as_ref(), Some(&values_high)];

            for plot in &plot_data.plots {
                match *plot {
                    PlotType::Circle(color, opacity, size) => {
                        series.into_iter().flatten().try_for_each(
                            |values| -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
                                chart.draw_series(values.iter().map(|(x, y)| {
                                    Circle::new(
                                        (*x, *y),
                                        size,
                                        Palette99::pick(color).mix(opacity).filled(),
                                    )
                                }))?;
                                Ok(())
                            },
                        )?;
                    }
                    PlotType::Line(color, opacity, size) => {
                        series.into_iter().flatten().try_for_each(
                            |values| -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
                                chart.draw_series(LineSeries::new(
                                    values.iter().copied(),
                                    Palette99::pick(color).mix(opacity).stroke_width(size),
                                ))?;
                                Ok(())
                            },
                        )?;
                    }
                    PlotType::Histogram(color, opacity) => {
                        series.into_iter().flatten().try_for_each(
                            |values| -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
                                let data = Histogram::vertical(&chart)
                                    .style(Palette99::pick(color).mix(opacity).filled())
                                    .margin(0)
                                    .data(values.iter().copied());
                                chart.draw_series(data)?;
                                Ok(())
                            },
                        )?;
                    }
                    PlotType::Band(color, opacity) => {
                        chart.draw_series(std::iter::once(Polygon::new(
                            values_high
                                .iter()
                                .chain(values_low.iter().flatten())
                                .copied()
                                .collect::<Vec<_>>(),
                            Palette99::pick(color).mix(opacity),
                        )))?;
                    }
                }
            }
        }

        root.present()?;
    }

    Ok(Some(result))
}

/// Weight of every set, as band of the daily minimum and maximum and line of the daily
/// average.
#[allow(clippy::missing_errors_doc)]
pub fn plot_weight(
    history: &[domain::HistoryEntry],
    interval: &domain::Interval,
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let values = history
        .iter()
        .map(|e| (e.timestamp.date(), f32::from(e.weight)))
        .collect::<Vec<_>>();
    plot_min_avg_max(&values, interval, COLOR_WEIGHT, theme, width)
}

/// Reps of every set, as points and line of the daily average.
#[allow(clippy::missing_errors_doc, clippy::cast_precision_loss)]
pub fn plot_reps(
    history: &[domain::HistoryEntry],
    interval: &domain::Interval,
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let values = history
        .iter()
        .filter(|e| (interval.first..=interval.last).contains(&e.timestamp.date()))
        .map(|e| (e.timestamp.date(), u32::from(e.reps) as f32))
        .collect::<Vec<_>>();
    let (_, avg, _) = min_avg_max(&values, interval);
    plot(
        &[
            PlotData {
                values_high: values,
                values_low: None,
                plots: vec![PlotType::Circle(COLOR_REPS, OPACITY_AREA, SIZE_CIRCLE)],
                params: PlotParams::primary_range(0.0, 10.0),
            },
            PlotData {
                values_high: avg,
                values_low: None,
                plots: vec![PlotType::Line(COLOR_REPS, OPACITY_LINE, WIDTH_LINE)],
                params: PlotParams::primary_range(0.0, 10.0),
            },
        ],
        interval,
        theme,
        width,
    )
}

/// Total volume per day.
#[allow(clippy::missing_errors_doc)]
pub fn plot_volume(
    history: &[domain::HistoryEntry],
    interval: &domain::Interval,
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    plot(
        &[PlotData {
            values_high: daily_total(history, interval),
            values_low: None,
            plots: vec![PlotType::Histogram(COLOR_VOLUME, OPACITY_BAR)],
            params: PlotParams::default(),
        }],
        interval,
        theme,
        width,
    )
}

#[allow(clippy::missing_errors_doc)]
pub fn plot_min_avg_max(
    values: &[(NaiveDate, f32)],
    interval: &domain::Interval,
    color: usize,
    theme: Theme,
    width: u32,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let (min, avg, max) = min_avg_max(values, interval);
    plot(
        &[
            PlotData {
                values_high: min,
                values_low: Some(max),
                plots: vec![PlotType::Band(color, OPACITY_AREA)],
                params: PlotParams::default(),
            },
            PlotData {
                values_high: avg,
                values_low: None,
                plots: vec![PlotType::Line(color, OPACITY_LINE, WIDTH_LINE)],
                params: PlotParams::default(),
            },
        ],
        interval,
        theme,
        width,
    )
}

type Series = Vec<(NaiveDate, f32)>;

/// Daily minimum, average and maximum of the values inside the interval.
#[allow(clippy::cast_precision_loss)]
fn min_avg_max(values: &[(NaiveDate, f32)], interval: &domain::Interval) -> (Series, Series, Series) {
    let mut date_map: BTreeMap<NaiveDate, Vec<f32>> = BTreeMap::new();

    for (date, value) in values
        .iter()
        .filter(|(d, _)| (interval.first..=interval.last).contains(d))
    {
        date_map.entry(*date).or_default().push(*value);
    }

    let mut min = vec![];
    let mut avg = vec![];
    let mut max = vec![];

    for (date, values) in date_map {
        min.push((date, values.iter().copied().fold(f32::MAX, f32::min)));
        avg.push((date, values.iter().sum::<f32>() / values.len() as f32));
        max.push((date, values.iter().copied().fold(f32::MIN, f32::max)));
    }

    (min, avg, max)
}

fn daily_total(history: &[domain::HistoryEntry], interval: &domain::Interval) -> Series {
    let mut totals: BTreeMap<NaiveDate, f32> = BTreeMap::new();
    for entry in history
        .iter()
        .filter(|e| (interval.first..=interval.last).contains(&e.timestamp.date()))
    {
        *totals.entry(entry.timestamp.date()).or_default() += entry.volume;
    }
    totals.into_iter().collect()
}

fn all_zeros(data: &[PlotData]) -> bool {
    data.iter().all(|v| {
        v.values_high.iter().all(|(_, v)| *v == 0.0)
            && v.values_low
                .as_ref()
                .is_none_or(|v| v.iter().all(|(_, v)| *v == 0.0))
    })
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::System | Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}

fn determine_y_bounds(data: &[PlotData]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;

    for plot in data.iter().filter(|plot| !plot.values_high.is_empty()) {
        let min = plot
            .values_high
            .iter()
            .chain(plot.values_low.iter().flatten())
            .map(|(_, v)| *v)
            .fold(plot.params.y_min_opt.unwrap_or(f32::MAX), f32::min);
        let max = plot
            .values_high
            .iter()
            .chain(plot.values_low.iter().flatten())
            .map(|(_, v)| *v)
            .fold(plot.params.y_max_opt.unwrap_or(0.), f32::max);

        let b = bounds.borrow_mut().get_or_insert(Bounds { min, max });

        b.min = f32::min(b.min, min);
        b.max = f32::max(b.max, max);
    }

    bounds
}

/// CSS color of a legend entry matching a plot of the given color and opacity.
#[must_use]
pub fn legend_color(color: usize, opacity: f64) -> String {
    let (r, g, b) = Palette99::pick(color).rgb();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

/// Width of a chart filling the window.
#[must_use]
pub fn chart_width() -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let inner_width = gloo_utils::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(420.) as u32;
    inner_width.saturating_sub(40).clamp(300, 960)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn interval() -> domain::Interval {
        (date(1)..=date(20)).into()
    }

    fn entry(day: u32, weight: f32, reps: u32) -> domain::HistoryEntry {
        let weight = domain::Weight::new(weight).unwrap();
        let reps = domain::Reps::new(reps).unwrap();
        domain::HistoryEntry {
            session: u128::from(day).into(),
            timestamp: NaiveDateTime::new(date(day), chrono::NaiveTime::MIN),
            set: 1,
            weight,
            reps,
            time: domain::Seconds::default(),
            drop_sets: vec![],
            volume: weight * reps,
        }
    }

    fn line(values: Vec<(NaiveDate, f32)>, params: PlotParams) -> PlotData {
        PlotData {
            values_high: values,
            values_low: None,
            plots: vec![PlotType::Line(0, OPACITY_LINE, WIDTH_LINE)],
            params,
        }
    }

    #[test]
    fn test_min_avg_max() {
        assert_eq!(
            min_avg_max(
                &[
                    (date(3), 50.0),
                    (date(3), 60.0),
                    (date(5), 40.0),
                    (date(3), 55.0),
                    (date(25), 100.0),
                ],
                &interval()
            ),
            (
                vec![(date(3), 50.0), (date(5), 40.0)],
                vec![(date(3), 55.0), (date(5), 40.0)],
                vec![(date(3), 60.0), (date(5), 40.0)],
            )
        );
    }

    #[test]
    fn test_min_avg_max_fractional() {
        let (min, avg, max) = min_avg_max(
            &[(date(7), 62.5), (date(7), 60.0), (date(7), 57.5), (date(7), 61.0)],
            &interval(),
        );
        assert_eq!(min, vec![(date(7), 57.5)]);
        assert_eq!(max, vec![(date(7), 62.5)]);
        assert_eq!(avg.len(), 1);
        assert_approx_eq!(avg[0].1, 60.25);

        let (_, avg, _) = min_avg_max(&[(date(8), 0.1), (date(8), 0.2)], &interval());
        assert_approx_eq!(avg[0].1, 0.15);
    }

    #[test]
    fn test_daily_total() {
        assert_eq!(
            daily_total(
                &[entry(3, 100.0, 5), entry(3, 50.0, 10), entry(4, 20.0, 10)],
                &interval()
            ),
            vec![(date(3), 1000.0), (date(4), 200.0)]
        );
    }

    #[test]
    fn test_determine_y_bounds() {
        assert_eq!(determine_y_bounds(&[]), None);
        assert_eq!(
            determine_y_bounds(&[
                line(vec![(date(1), 20.0), (date(2), 30.0)], PlotParams::default()),
                line(vec![(date(1), 5.0)], PlotParams::primary_range(0.0, 10.0)),
            ]),
            Some(Bounds {
                min: 0.0,
                max: 30.0
            })
        );
    }

    #[test]
    fn test_bounds_margin() {
        let bounds = Bounds {
            min: 50.0,
            max: 100.0,
        };
        assert_approx_eq!(bounds.min_with_margin(), 45.0);
        assert_approx_eq!(bounds.max_with_margin(), 105.0);
        assert_eq!(
            Bounds {
                min: 0.0,
                max: 0.0
            }
            .max_with_margin(),
            0.1
        );
    }

    #[test]
    fn test_plot_without_data() {
        assert_eq!(plot(&[], &interval(), Theme::Light, 400).unwrap(), None);
        assert_eq!(
            plot(
                &[line(vec![(date(1), 0.0)], PlotParams::default())],
                &interval(),
                Theme::Dark,
                400
            )
            .unwrap(),
            None
        );
        assert_eq!(plot_volume(&[], &interval(), Theme::Light, 400).unwrap(), None);
    }

    #[test]
    fn test_legend_color() {
        let color = legend_color(COLOR_WEIGHT, 1.0);
        assert!(color.starts_with('#'));
        assert_eq!(color.len(), 9);
        assert!(color.ends_with("ff"));
        assert!(legend_color(COLOR_WEIGHT, 0.0).ends_with("00"));
        assert_eq!(color[..7], legend_color(COLOR_WEIGHT, OPACITY_AREA)[..7]);
    }
}
