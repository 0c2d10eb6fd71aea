use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;
use std::process::Command;
use thousands::Separable;

use crate::error::ReportError;
use crate::perf::Measurements;

const FONT: &str = "sans-serif";
const PLOT_WIDTH: u32 = 1400;
const PLOT_HEIGHT: u32 = 600;
const MARKER_SIZE: u32 = 5;

/// The x axis always shows at least cores 1..=20.
const X_TICKS: Range<u32> = 1..20;

struct Panel<'a> {
    caption: &'a str,
    y_desc: &'a str,
    label: &'a str,
    legend_left: bool,
    y_format: fn(&f64) -> String,
}

const TIME_PANEL: Panel<'static> = Panel {
    caption: "Parallel Execution Time vs Number of CPUs",
    y_desc: "Execution Time (nanoseconds)",
    label: "Parallel Time",
    legend_left: false,
    y_format: format_nanos,
};

const SPEEDUP_PANEL: Panel<'static> = Panel {
    caption: "Parallel Acceleration vs Number of CPUs",
    y_desc: "Acceleration",
    label: "Parallel Acceleration",
    legend_left: true,
    y_format: format_ratio,
};

fn format_nanos(v: &f64) -> String {
    (v.round() as i64).separate_with_commas()
}

fn format_ratio(v: &f64) -> String {
    format!("{:.2}", v)
}

/// Renders execution time and speed-up against thread count side by side and
/// writes the figure to `path` as a PNG, replacing any existing file.
pub fn write_plot(
    measurements: &Measurements,
    speedup: &[f64],
    path: &Path,
) -> Result<(), ReportError> {
    if measurements.is_empty() {
        return Err(ReportError::NoRecords);
    }

    let times: Vec<(u32, f64)> = measurements
        .thread_counts
        .iter()
        .zip(&measurements.parallel_times)
        .map(|(&n, &t)| (n, t as f64))
        .collect();

    let speedups: Vec<(u32, f64)> = measurements
        .thread_counts
        .iter()
        .copied()
        .zip(speedup.iter().copied())
        .collect();

    draw(path, &times, &speedups).map_err(|e| ReportError::Plot(e.to_string()))?;

    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw(path: &Path, times: &[(u32, f64)], speedups: &[(u32, f64)]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 2));
    draw_panel(&panels[0], &TIME_PANEL, times)?;
    draw_panel(&panels[1], &SPEEDUP_PANEL, speedups)?;

    root.present()?;
    Ok(())
}

fn draw_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    points: &[(u32, f64)],
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_range = x_range(points);
    let x_labels = (x_range.end - x_range.start + 1) as usize;

    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .caption(panel.caption, (FONT, 20))
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x_range, y_range(points))?;

    chart
        .configure_mesh()
        .x_labels(x_labels)
        .y_labels(10)
        .x_label_formatter(&|v| format!("{}", v))
        .y_label_formatter(&panel.y_format)
        .x_desc("Number of cores (ncpu)")
        .y_desc(panel.y_desc)
        .draw()?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))?
        .label(panel.label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, MARKER_SIZE, BLUE.filled())),
    )?;

    chart
        .configure_series_labels()
        .position(if panel.legend_left {
            SeriesLabelPosition::UpperLeft
        } else {
            SeriesLabelPosition::UpperRight
        })
        .label_font((FONT, 13))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Widens the fixed 1..20 tick range to cover any data outside it.
fn x_range(points: &[(u32, f64)]) -> Range<u32> {
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(X_TICKS.start);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(X_TICKS.end);

    x_min.min(X_TICKS.start)..x_max.max(X_TICKS.end)
}

fn y_range(points: &[(u32, f64)]) -> Range<f64> {
    let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if !y_min.is_finite() || !y_max.is_finite() {
        return 0.0..1.0;
    }

    let mut y_padding = ((y_max - y_min) / 10.0).min(y_min.abs());
    if y_padding <= 0.0 {
        // flat series
        y_padding = if y_max != 0.0 { y_max.abs() / 10.0 } else { 1.0 };
    }

    y_min - y_padding..y_max + y_padding
}

/// Opens the rendered image in the desktop's default viewer. The viewer runs
/// detached; a launch failure only logs a warning.
pub fn show(path: &Path) {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    match command.arg(path).spawn() {
        Ok(_) => tracing::info!(path = %path.display(), "opened viewer"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not open viewer"),
    }
}
