//! Loading of a complete simulation run.
//!
//! A run is stored as a configuration file plus three `.npy` arrays
//! derived from its `outputprefix`: `<prefix>-time.npy` with shape
//! `(T, 1)`, `<prefix>-dens.npy` and `<prefix>-velo.npy` with shape
//! `(T, X)`. [`load`] reconciles the three independently-stored arrays
//! into one spatial/temporal coordinate frame and fails if their shapes
//! disagree.

use std::path::Path;

use log::{info, warn};
use ndarray::{Array1, Array2};

use crate::config::{ConfigError, SimConfig};
use crate::npy::{self, NpyError};

const TIME_SUFFIX: &str = "-time.npy";
const DENS_SUFFIX: &str = "-dens.npy";
const VELO_SUFFIX: &str = "-velo.npy";

/// Errors raised by array loading and cross-array validation
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// An array file could not be read or decoded
    #[error(transparent)]
    Npy(#[from] NpyError),

    /// The time array is not a single-column 2-D array
    #[error("Time array {path} must have shape (T, 1), got ({rows}, {cols})")]
    TimeShape {
        /// Path of the time array file
        path: String,
        /// Number of rows found
        rows: usize,
        /// Number of columns found
        cols: usize,
    },

    /// The time array holds no samples, so no temporal extent exists
    #[error("Time array {path} holds no samples")]
    EmptyTime {
        /// Path of the time array file
        path: String,
    },

    /// The three arrays do not describe one `(T, X)` grid
    #[error(
        "Inconsistent array shapes: density is {dens_rows}x{dens_cols}, \
         velocity is {velo_rows}x{velo_cols}, time holds {time_len} samples"
    )]
    ShapeMismatch {
        /// Density grid row count
        dens_rows: usize,
        /// Density grid column count
        dens_cols: usize,
        /// Velocity grid row count
        velo_rows: usize,
        /// Velocity grid column count
        velo_cols: usize,
        /// Number of time samples
        time_len: usize,
    },
}

/// A load failure is either a configuration problem or an array problem
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Configuration file missing, malformed, or incomplete
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Array files missing, undecodable, or shape-inconsistent
    #[error(transparent)]
    Data(#[from] DataLoadError),
}

/// Bounding box mapping grid indices onto simulation coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Leftmost road position, always 0
    pub x_min: f64,
    /// Rightmost road position, `X - 1`
    pub x_max: f64,
    /// First recorded time stamp
    pub t_min: f64,
    /// Last recorded time stamp
    pub t_max: f64,
}

/// The loaded, immutable bundle of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    /// Recorded time stamps, length `T`
    pub time: Array1<f64>,
    /// Car density per cell, shape `(T, X)`
    pub density: Array2<f64>,
    /// Car velocity per cell, shape `(T, X)`
    pub velocity: Array2<f64>,
    /// Spatial/temporal bounding box of the grids
    pub extent: Extent,
    /// Display summary of every configuration entry, in file order
    pub parameters: String,
    /// Base name for derived output artifacts
    pub output_prefix: String,
}

/// Load a simulation run from its configuration file.
///
/// Reads the `key=value` configuration, derives the three array paths
/// from the `outputprefix` entry (resolved against the working
/// directory, exactly like the simulator wrote them) and validates that
/// the arrays describe one consistent `(T, X)` grid.
pub fn load(config_path: &Path) -> Result<SimulationRun, LoadError> {
    let config = SimConfig::from_file(config_path)?;
    let prefix = config.require("outputprefix")?.to_string();

    let time_path = format!("{prefix}{TIME_SUFFIX}");
    let time_raw = npy::load_grid(Path::new(&time_path)).map_err(DataLoadError::from)?;
    let density =
        npy::load_grid(Path::new(&format!("{prefix}{DENS_SUFFIX}"))).map_err(DataLoadError::from)?;
    let velocity =
        npy::load_grid(Path::new(&format!("{prefix}{VELO_SUFFIX}"))).map_err(DataLoadError::from)?;

    let time = flatten_time(time_raw, &time_path)?;

    if density.dim() != velocity.dim() || density.nrows() != time.len() {
        return Err(LoadError::Data(DataLoadError::ShapeMismatch {
            dens_rows: density.nrows(),
            dens_cols: density.ncols(),
            velo_rows: velocity.nrows(),
            velo_cols: velocity.ncols(),
            time_len: time.len(),
        }));
    }

    if time.windows(2).into_iter().any(|pair| pair[1] < pair[0]) {
        warn!("time stamps in {time_path} are not non-decreasing");
    }

    let (t_len, x_len) = density.dim();
    let extent = Extent {
        x_min: 0.0,
        x_max: x_len as f64 - 1.0,
        t_min: time[0],
        t_max: time[t_len - 1],
    };

    info!(
        "Loaded run `{prefix}`: {t_len}x{x_len} grid, t in [{}, {}]",
        extent.t_min, extent.t_max
    );

    Ok(SimulationRun {
        time,
        density,
        velocity,
        extent,
        parameters: config.summary(),
        output_prefix: prefix,
    })
}

fn flatten_time(raw: Array2<f64>, path: &str) -> Result<Array1<f64>, DataLoadError> {
    let (rows, cols) = raw.dim();
    if cols != 1 {
        return Err(DataLoadError::TimeShape {
            path: path.to_string(),
            rows,
            cols,
        });
    }
    if rows == 0 {
        return Err(DataLoadError::EmptyTime {
            path: path.to_string(),
        });
    }
    Ok(raw.column(0).to_owned())
}
