// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::coord::combinators::IntoLogRange;
use plotters::coord::Shift;
use plotters::element::ErrorBar;
use plotters::prelude::*;

use crate::config::Config;
use crate::results::Sweep;

use std::error::Error;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0xAA0000),
    hexcolour!(0x0000FF),
    hexcolour!(0x888888),
    hexcolour!(0xDDCC77),
    hexcolour!(0x999933),
    hexcolour!(0x332288),
    hexcolour!(0x117733),
    hexcolour!(0x88CCEE),
    hexcolour!(0x882255),
    hexcolour!(0x44AA99),
    hexcolour!(0xAA4499),
    hexcolour!(0xCC6677),
];

const SIZE: (u32, u32) = (1080, 720);
const ERRORBAR_CAP_SIZE: u32 = 2;

/// Renders the sweep to the configured output path. The `.svg` extension
/// selects the SVG backend, anything else produces a PNG.
pub fn render(sweep: &Sweep, config: &Config) -> Result<(), Box<dyn Error>> {
    let path = config.output();
    if path.ends_with(".svg") {
        let root = SVGBackend::new(path, SIZE).into_drawing_area();
        draw(sweep, config, &root)
    } else {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        draw(sweep, config, &root)
    }
}

// One expansion per axis-scale combination; the chart type differs with
// the coordinate types, so the drawing code is stamped out per arm.
macro_rules! chart {
    ($root:expr, $sweep:expr, $config:expr, $x:expr, $y:expr) => {{
        let mut chart = ChartBuilder::on($root)
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 100)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d($x, $y)?;

        chart
            .configure_mesh()
            .x_desc($sweep.parameter().unwrap_or_default())
            .y_desc("Time [s]")
            .x_label_style(("sans-serif", 20))
            .y_label_style(("sans-serif", 20))
            .draw()?;

        for (i, series) in $sweep.series().iter().enumerate() {
            let colour = COLOURS[i % COLOURS.len()];

            let line = series.points().map(|(v, m, _)| (v, m));
            let anno = chart.draw_series(LineSeries::new(line, colour.stroke_width(2)))?;
            if let Some(title) = $config.title(i) {
                anno.label(title)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour));
            }

            chart.draw_series(series.points().map(|(v, m, s)| {
                ErrorBar::new_vertical(v, m - s, m, m + s, colour.filled(), ERRORBAR_CAP_SIZE)
            }))?;
        }

        if $config.titles().is_some() {
            chart
                .configure_series_labels()
                .background_style(WHITE.filled())
                .border_style(&BLACK)
                .draw()?;
        }
    }};
}

fn draw<DB>(sweep: &Sweep, config: &Config, root: &DrawingArea<DB, Shift>) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let ((x_min, x_max), (y_lower, y_upper)) = bounds(sweep);

    match (config.log_x(), config.log_time()) {
        (false, false) => {
            chart!(root, sweep, config, pad_linear(x_min, x_max), 0.0..y_upper * 1.05)
        }
        (false, true) => {
            chart!(
                root,
                sweep,
                config,
                pad_linear(x_min, x_max),
                pad_log(y_lower, y_upper).log_scale()
            )
        }
        (true, false) => {
            chart!(
                root,
                sweep,
                config,
                pad_log(x_min, x_max).log_scale(),
                0.0..y_upper * 1.05
            )
        }
        (true, true) => {
            chart!(
                root,
                sweep,
                config,
                pad_log(x_min, x_max).log_scale(),
                pad_log(y_lower, y_upper).log_scale()
            )
        }
    }

    root.present()?;
    Ok(())
}

/// Data extents across all series: the x range over parameter values and
/// the y range over mean ± stddev. The y lower bound only considers
/// positive extents so that it can seed a log axis.
fn bounds(sweep: &Sweep) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_lower = f64::INFINITY;
    let mut y_upper = f64::NEG_INFINITY;

    for series in sweep.series() {
        for (v, m, s) in series.points() {
            x_min = x_min.min(v);
            x_max = x_max.max(v);
            if m - s > 0.0 {
                y_lower = y_lower.min(m - s);
            }
            y_upper = y_upper.max(m + s);
        }
    }

    if !x_min.is_finite() || !x_max.is_finite() {
        x_min = 0.0;
        x_max = 1.0;
    }
    if !y_upper.is_finite() || y_upper <= 0.0 {
        y_upper = 1.0;
    }
    if !y_lower.is_finite() {
        y_lower = y_upper / 1000.0;
    }

    ((x_min, x_max), (y_lower, y_upper))
}

fn pad_linear(min: f64, max: f64) -> std::ops::Range<f64> {
    let span = max - min;
    if span > 0.0 {
        min - span * 0.05..max + span * 0.05
    } else {
        min - 0.5..max + 0.5
    }
}

fn pad_log(min: f64, max: f64) -> std::ops::Range<f64> {
    let min = min.max(f64::EPSILON);
    let max = max.max(min);
    if min < max {
        min * 0.8..max * 1.25
    } else {
        min * 0.5..max * 2.0
    }
}
