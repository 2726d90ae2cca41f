//! Interactive backend (plotly).
//!
//! Builds three figures per run: a density panel, a velocity panel, and
//! a combined two-facet comparison. Live mode opens each figure in the
//! browser; document mode serializes each to a standalone HTML file. The
//! displayed y axis is the grid row index resampled onto an evenly
//! spaced time grid between the first and last recorded stamp, which is
//! what the heat-map axis metadata requires; the raw stamps are not used
//! as axis labels directly.

use ndarray::{Array1, Array2};
use plotly::common::{
    Anchor, ColorBar, ColorScale, ColorScaleElement, ColorScalePalette, Orientation,
    ThicknessMode, Title,
};
use plotly::layout::themes::PLOTLY_DARK;
use plotly::layout::{Annotation, Axis, GridPattern, LayoutGrid, Margin};
use plotly::{HeatMap, Layout, Plot};

use super::RenderError;
use crate::loader::SimulationRun;

/// Where finished figures go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Sink {
    /// Open each figure in the default browser
    Browser,
    /// Write each figure to a standalone HTML document
    Document,
}

/// Build and emit the three figures: density, velocity, combined.
pub(super) fn render(run: &SimulationRun, sink: Sink) -> Result<(), RenderError> {
    announce(sink);

    let axis_time = resampled_time(&run.time);

    let density = density_figure(run, &axis_time);
    emit(
        density,
        sink,
        &format!("{}-dens.html", run.output_prefix),
        "density",
    )?;

    let velocity = velocity_figure(run, &axis_time);
    emit(
        velocity,
        sink,
        &format!("{}-veloc.html", run.output_prefix),
        "velocity",
    )?;

    let combined = combined_figure(run, &axis_time);
    emit(
        combined,
        sink,
        &format!("{}.html", run.output_prefix),
        "combined",
    )?;

    Ok(())
}

fn announce(sink: Sink) {
    println!(">> interactive mode detected...");
    println!(
        "\t {} interactive rendering may not work as expected on *large* datasets!",
        warning_tag()
    );
    match sink {
        Sink::Document => println!("\t figures will be saved in HTML files..."),
        Sink::Browser => println!("\t visualizations will be rendered in your browser..."),
    }
}

#[cfg(feature = "colorized_output")]
fn warning_tag() -> String {
    console::style("** WARNING **").yellow().bold().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn warning_tag() -> String {
    "** WARNING **".to_string()
}

/// Evenly spaced display axis with exactly one sample per grid row.
fn resampled_time(time: &Array1<f64>) -> Vec<f64> {
    let first = time[0];
    let last = time[time.len() - 1];
    Array1::linspace(first, last, time.len()).to_vec()
}

fn heat_trace(grid: &Array2<f64>, axis_time: &[f64]) -> Box<HeatMap<f64, f64, Vec<f64>>> {
    let positions: Vec<f64> = (0..grid.ncols()).map(|col| col as f64).collect();
    let cells: Vec<Vec<f64>> = grid.outer_iter().map(|row| row.to_vec()).collect();
    HeatMap::new(positions, axis_time.to_vec(), cells)
}

fn gray_reversed() -> ColorScale {
    ColorScale::Palette(ColorScalePalette::Greys)
}

/// ColorBrewer RdYlGn, matching the static backend's diverging palette.
fn red_yellow_green() -> ColorScale {
    ColorScale::Vector(vec![
        ColorScaleElement(0.0, "#a50026".to_string()),
        ColorScaleElement(0.1, "#d73027".to_string()),
        ColorScaleElement(0.2, "#f46d43".to_string()),
        ColorScaleElement(0.3, "#fdae61".to_string()),
        ColorScaleElement(0.4, "#fee08b".to_string()),
        ColorScaleElement(0.5, "#ffffbf".to_string()),
        ColorScaleElement(0.6, "#d9ef8b".to_string()),
        ColorScaleElement(0.7, "#a6d96a".to_string()),
        ColorScaleElement(0.8, "#66bd63".to_string()),
        ColorScaleElement(0.9, "#1a9850".to_string()),
        ColorScaleElement(1.0, "#006837".to_string()),
    ])
}

fn panel_layout() -> Layout {
    Layout::new()
        .template(&*PLOTLY_DARK)
        .margin(Margin::new().left(10).right(10).top(100).bottom(50))
}

fn density_figure(run: &SimulationRun, axis_time: &[f64]) -> Plot {
    let cols = run.density.ncols() as f64;
    let trace = heat_trace(&run.density, axis_time)
        .color_scale(gray_reversed())
        .reverse_scale(true)
        .color_bar(ColorBar::new().title(Title::with_text("density")));

    let layout = panel_layout()
        .x_axis(
            Axis::new()
                .title(Title::with_text("position"))
                .range(vec![0.0, cols]),
        )
        .y_axis(
            Axis::new()
                .title(Title::with_text("time"))
                .range(vec![0.0, 1000.0])
                .auto_range(true),
        );

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

fn velocity_figure(run: &SimulationRun, axis_time: &[f64]) -> Plot {
    let cols = run.velocity.ncols() as f64;
    let trace = heat_trace(&run.velocity, axis_time)
        .color_scale(red_yellow_green())
        .color_bar(ColorBar::new().title(Title::with_text("velocity")));

    // Unlike the density panel, the y range is a hard ceiling at the last
    // recorded stamp, with no autorange.
    let layout = panel_layout()
        .x_axis(
            Axis::new()
                .title(Title::with_text("position"))
                .range(vec![0.0, cols]),
        )
        .y_axis(
            Axis::new()
                .title(Title::with_text("time"))
                .range(vec![0.0, run.extent.t_max]),
        );

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Two side-by-side facets over one resampled time axis. Each facet's
/// trace carries its own color scale and its own horizontal color bar so
/// the channels never share one encoding.
fn combined_figure(run: &SimulationRun, axis_time: &[f64]) -> Plot {
    let density = heat_trace(&run.density, axis_time)
        .color_scale(gray_reversed())
        .reverse_scale(true)
        .color_bar(facet_color_bar(0.25, "density"))
        .x_axis("x")
        .y_axis("y");
    let velocity = heat_trace(&run.velocity, axis_time)
        .color_scale(red_yellow_green())
        .color_bar(facet_color_bar(0.75, "velocity"))
        .x_axis("x2")
        .y_axis("y2");

    let layout = Layout::new()
        .grid(
            LayoutGrid::new()
                .rows(1)
                .columns(2)
                .pattern(GridPattern::Independent),
        )
        .annotations(vec![
            facet_title(0.225, "density"),
            facet_title(0.775, "velocity"),
        ]);

    let mut plot = Plot::new();
    plot.add_trace(density);
    plot.add_trace(velocity);
    plot.set_layout(layout);
    plot
}

/// Horizontal color bar pinned under one facet; the two bars sit at
/// distinct offsets so they never overlap.
fn facet_color_bar(x: f64, label: &str) -> ColorBar {
    ColorBar::new()
        .orientation(Orientation::Horizontal)
        .x(x)
        .x_anchor(Anchor::Center)
        .y(-0.1)
        .len_mode(ThicknessMode::Pixels)
        .len(300)
        .title(Title::with_text(label))
}

/// Replacement facet caption; the grid machinery's own labels are bare
/// axis names, not meaningful channel names.
fn facet_title(x: f64, text: &str) -> Annotation {
    Annotation::new()
        .text(text)
        .x_ref("paper")
        .y_ref("paper")
        .x(x)
        .y(1.02)
        .x_anchor(Anchor::Center)
        .y_anchor(Anchor::Bottom)
        .show_arrow(false)
}

fn emit(plot: Plot, sink: Sink, path: &str, label: &str) -> Result<(), RenderError> {
    match sink {
        Sink::Document => {
            let html = plot.to_html();
            std::fs::write(path, html).map_err(|source| RenderError::Io {
                path: path.to_string(),
                source,
            })?;
            println!("Created {path}");
        }
        Sink::Browser => {
            plot.show();
            println!("Opened {label} view in browser");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Extent;
    use ndarray::array;
    use tempfile::tempdir;

    fn sample_run(prefix: String) -> SimulationRun {
        SimulationRun {
            time: array![0.0, 1.0, 2.0],
            density: array![
                [0.0, 1.0, 0.0, 1.0],
                [1.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0, 1.0]
            ],
            velocity: array![
                [0.0, 10.0, 20.0, 30.0],
                [40.0, 50.0, 60.0, 0.0],
                [10.0, 20.0, 30.0, 40.0]
            ],
            extent: Extent {
                x_min: 0.0,
                x_max: 3.0,
                t_min: 0.0,
                t_max: 2.0,
            },
            parameters: " L=4 T=3".to_string(),
            output_prefix: prefix,
        }
    }

    #[test]
    fn test_document_mode_writes_three_files() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("run1").display().to_string();
        render(&sample_run(prefix.clone()), Sink::Document).unwrap();

        for suffix in ["-dens.html", "-veloc.html", ".html"] {
            let path = std::path::PathBuf::from(format!("{prefix}{suffix}"));
            assert!(path.is_file(), "missing artifact {}", path.display());
            let body = std::fs::read_to_string(&path).unwrap();
            assert!(body.contains("<html"));
        }
    }

    #[test]
    fn test_resampled_time_is_uniform() {
        let time = array![0.0, 1.0, 5.0];
        assert_eq!(resampled_time(&time), vec![0.0, 2.5, 5.0]);
    }

    #[test]
    fn test_resampled_time_single_sample() {
        let time = array![7.0];
        assert_eq!(resampled_time(&time), vec![7.0]);
    }

    // The next two tests pin the range asymmetry between the panels
    // until product intent is clarified; do not "fix" one to match the
    // other.

    #[test]
    fn test_density_panel_requests_autorange_with_hint() {
        let run = sample_run("unused".to_string());
        let plot = density_figure(&run, &resampled_time(&run.time));
        let json = plot.to_json();
        assert!(json.contains("\"autorange\":true"));
        assert!(json.contains("\"range\":[0.0,1000.0]"));
    }

    #[test]
    fn test_velocity_panel_pins_hard_time_ceiling() {
        let run = sample_run("unused".to_string());
        let plot = velocity_figure(&run, &resampled_time(&run.time));
        let json = plot.to_json();
        assert!(json.contains("\"range\":[0.0,2.0]"));
        assert!(!json.contains("\"autorange\":true"));
    }

    #[test]
    fn test_combined_facets_keep_independent_color_scales() {
        let run = sample_run("unused".to_string());
        let plot = combined_figure(&run, &resampled_time(&run.time));
        let json = plot.to_json();
        assert!(json.contains("Greys"));
        assert!(json.contains("#a50026"));
        assert!(json.contains("\"x\":0.25"));
        assert!(json.contains("\"x\":0.75"));
        assert!(json.contains("\"xaxis\":\"x2\""));
    }

    #[test]
    fn test_combined_facet_titles_are_channel_names() {
        let run = sample_run("unused".to_string());
        let plot = combined_figure(&run, &resampled_time(&run.time));
        let json = plot.to_json();
        assert!(json.contains("\"text\":\"density\""));
        assert!(json.contains("\"text\":\"velocity\""));
    }
}
