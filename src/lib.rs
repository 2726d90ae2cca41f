//! # naschviz - Nagel-Schreckenberg Traffic Visualization
//!
//! `naschviz` renders the output of a Nagel-Schreckenberg traffic-flow
//! cellular-automaton simulation into visual artifacts. A simulation run is
//! stored as three NumPy `.npy` arrays (time stamps, per-cell car density,
//! per-cell car velocity) next to a small `key=value` configuration file;
//! this crate loads the three arrays into one spatial/temporal coordinate
//! frame and renders density and velocity as heat maps over road position
//! and simulation time.
//!
//! ## Output modes
//!
//! - **raster**: one static two-panel PNG (`<prefix>.png`) with density and
//!   velocity side by side, each with its own color bar.
//! - **interactive**: three pannable/zoomable figures opened in the browser
//!   (density, velocity, and a combined comparison with independent color
//!   scales per panel).
//! - **html**: the same three figures serialized to standalone documents
//!   (`<prefix>-dens.html`, `<prefix>-veloc.html`, `<prefix>.html`).
//!
//! The two rendering backends sit behind the `raster` and `interactive`
//! cargo features (both on by default), so a build links only the
//! capability it needs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use naschviz::prelude::*;
//!
//! let run = naschviz::loader::load(Path::new("traffic.ini"))?;
//! naschviz::render::render(&run, OutputMode::Raster)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Input layout
//!
//! The configuration file is plain text with one `key=value` pair per line
//! and must contain `outputprefix`. From that prefix the loader derives
//! `<prefix>-time.npy` (shape `(T, 1)`), `<prefix>-dens.npy` and
//! `<prefix>-velo.npy` (both shape `(T, X)`). The three arrays must agree
//! on `T` and `X`; a mismatch is a fatal load error.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod loader;
pub mod npy;
pub mod render;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigError, SimConfig};
    pub use crate::loader::{load, DataLoadError, Extent, LoadError, SimulationRun};
    pub use crate::npy::NpyError;
    pub use crate::render::{render, OutputMode, RenderError, UnknownModeError};
}
