//! Static PNG backend (plotters).
//!
//! Draws the density and velocity grids side by side as heat maps with
//! the axis origin at the lower left, so grid row 0 sits at the first
//! recorded time stamp and cell edges are interpolated across the run's
//! extent. Each panel normalizes colors over its own data range and
//! carries a vertical color bar.

use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::RenderError;
use crate::loader::{Extent, SimulationRun};

#[derive(Clone, Copy)]
struct GradientStop {
    at: f64,
    color: RGBColor,
}

/// Reversed grayscale: empty road renders white, jams render black.
const GRAY_R: [GradientStop; 2] = [
    GradientStop {
        at: 0.0,
        color: RGBColor(255, 255, 255),
    },
    GradientStop {
        at: 1.0,
        color: RGBColor(0, 0, 0),
    },
];

/// ColorBrewer RdYlGn: red for standstill through yellow to green for
/// free flow.
const RD_YL_GN: [GradientStop; 11] = [
    GradientStop {
        at: 0.0,
        color: RGBColor(0xa5, 0x00, 0x26),
    },
    GradientStop {
        at: 0.1,
        color: RGBColor(0xd7, 0x30, 0x27),
    },
    GradientStop {
        at: 0.2,
        color: RGBColor(0xf4, 0x6d, 0x43),
    },
    GradientStop {
        at: 0.3,
        color: RGBColor(0xfd, 0xae, 0x61),
    },
    GradientStop {
        at: 0.4,
        color: RGBColor(0xfe, 0xe0, 0x8b),
    },
    GradientStop {
        at: 0.5,
        color: RGBColor(0xff, 0xff, 0xbf),
    },
    GradientStop {
        at: 0.6,
        color: RGBColor(0xd9, 0xef, 0x8b),
    },
    GradientStop {
        at: 0.7,
        color: RGBColor(0xa6, 0xd9, 0x6a),
    },
    GradientStop {
        at: 0.8,
        color: RGBColor(0x66, 0xbd, 0x63),
    },
    GradientStop {
        at: 0.9,
        color: RGBColor(0x1a, 0x98, 0x50),
    },
    GradientStop {
        at: 1.0,
        color: RGBColor(0x00, 0x68, 0x37),
    },
];

/// Render the two-panel figure to `<prefix>.png`.
pub(super) fn render(run: &SimulationRun) -> Result<(), RenderError> {
    let path = format!("{}.png", run.output_prefix);
    draw(run, &path).map_err(|err| RenderError::Raster(err.to_string()))?;
    println!("Created {path}");
    Ok(())
}

fn draw(run: &SimulationRun, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1400, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let titled = root.titled("Nagel-Schreckenberg Traffic Model", ("sans-serif", 28))?;
    let titled = titled.titled(run.parameters.as_str(), ("sans-serif", 16))?;

    let panels = titled.split_evenly((1, 2));
    heat_panel(
        &panels[0],
        &run.density,
        &run.extent,
        "car density",
        &GRAY_R,
        Some("t"),
    )?;
    heat_panel(
        &panels[1],
        &run.velocity,
        &run.extent,
        "car velocity",
        &RD_YL_GN,
        None,
    )?;

    root.present()?;
    Ok(())
}

fn heat_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    grid: &Array2<f64>,
    extent: &Extent,
    caption: &str,
    stops: &[GradientStop],
    y_desc: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, _) = area.dim_in_pixel();
    let (plot_area, cbar_area) = area.split_horizontally(width as i32 - 95);

    let (vmin, vmax) = value_range(grid);
    let (x_lo, x_hi) = padded_range(extent.x_min, extent.x_max);
    let (t_lo, t_hi) = padded_range(extent.t_min, extent.t_max);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_lo..x_hi, t_lo..t_hi)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh().x_desc("x");
    if let Some(desc) = y_desc {
        mesh.y_desc(desc);
    }
    mesh.draw()?;

    let (rows, cols) = grid.dim();
    let cell_w = (x_hi - x_lo) / cols.max(1) as f64;
    let cell_h = (t_hi - t_lo) / rows.max(1) as f64;
    chart.draw_series(grid.indexed_iter().map(|((row, col), &value)| {
        let x0 = x_lo + cell_w * col as f64;
        let y0 = t_lo + cell_h * row as f64;
        let fill = sample_gradient(stops, (value - vmin) / (vmax - vmin));
        Rectangle::new([(x0, y0), (x0 + cell_w, y0 + cell_h)], fill.filled())
    }))?;

    color_bar(&cbar_area, stops, vmin, vmax)?;
    Ok(())
}

/// Vertical gradient strip with value labels, spanning the panel's own
/// data range.
fn color_bar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    stops: &[GradientStop],
    vmin: f64,
    vmax: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chart = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(50)
        .margin_right(12)
        .y_label_area_size(48)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(6)
        .draw()?;

    let strips = 128;
    let step = (vmax - vmin) / strips as f64;
    chart.draw_series((0..strips).map(|i| {
        let v0 = vmin + step * i as f64;
        let fill = sample_gradient(stops, (i as f64 + 0.5) / strips as f64);
        Rectangle::new([(0.0, v0), (1.0, v0 + step)], fill.filled())
    }))?;
    Ok(())
}

fn sample_gradient(stops: &[GradientStop], value: f64) -> RGBColor {
    let clamped = value.clamp(0.0, 1.0);
    if clamped <= stops[0].at {
        return stops[0].color;
    }
    for window in stops.windows(2) {
        if let [start, end] = window {
            if clamped <= end.at {
                let span = (end.at - start.at).max(f64::EPSILON);
                return lerp(start.color, end.color, (clamped - start.at) / span);
            }
        }
    }
    stops[stops.len() - 1].color
}

fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Data min/max, widened to a non-degenerate interval.
fn value_range(grid: &Array2<f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in grid.iter() {
        if value.is_finite() {
            min = min.min(value);
            max = max.max(value);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if (max - min).abs() < f64::EPSILON {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}
