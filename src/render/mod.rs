//! Rendering of a loaded simulation run.
//!
//! Three output modes exist. `raster` draws a static two-panel PNG
//! through the plotters backend; `interactive` and `html` build the same
//! three plotly figures (density, velocity, combined comparison) and
//! differ only in whether each figure opens in the browser or is written
//! to a standalone HTML document. The backends sit behind the `raster`
//! and `interactive` cargo features so that a rendering capability is
//! only linked into builds that need it; requesting a mode whose backend
//! was compiled out is a [`RenderError::Disabled`].

use std::str::FromStr;

use crate::loader::SimulationRun;

#[cfg(feature = "interactive")]
mod interactive;
#[cfg(feature = "raster")]
mod raster;

/// Selects what the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One static two-panel PNG, `<prefix>.png`
    Raster,
    /// Three interactive figures opened in the browser
    InteractiveLive,
    /// Three standalone HTML documents
    InteractiveDocument,
}

impl OutputMode {
    /// Command-line tokens accepted by the [`FromStr`] impl, in display
    /// order.
    pub const TOKENS: [&'static str; 3] = ["raster", "interactive", "html"];
}

/// Error for a mode token outside the accepted set
#[derive(Debug, thiserror::Error)]
#[error("Unrecognized mode <{0}> -- possible options are [raster, interactive, html]")]
pub struct UnknownModeError(String);

impl FromStr for OutputMode {
    type Err = UnknownModeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "raster" => Ok(OutputMode::Raster),
            "interactive" => Ok(OutputMode::InteractiveLive),
            "html" => Ok(OutputMode::InteractiveDocument),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

/// Errors that can occur while producing render artifacts
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The raster backend failed to draw or encode the figure
    #[error("Raster backend error: {0}")]
    Raster(String),

    /// An artifact file could not be written
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Artifact path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The requested mode's backend was compiled out
    #[error("Output mode `{mode}` requires a build with the `{feature}` feature")]
    Disabled {
        /// CLI token of the requested mode
        mode: &'static str,
        /// Cargo feature that enables the backend
        feature: &'static str,
    },
}

/// Render `run` according to `mode`.
///
/// Produces one PNG in raster mode, or three figures (density, velocity,
/// combined) in the interactive modes, strictly in that order. The first
/// failing artifact aborts the remaining ones.
pub fn render(run: &SimulationRun, mode: OutputMode) -> Result<(), RenderError> {
    match mode {
        OutputMode::Raster => raster_mode(run),
        OutputMode::InteractiveLive => interactive_mode(run, true),
        OutputMode::InteractiveDocument => interactive_mode(run, false),
    }
}

#[cfg(feature = "raster")]
fn raster_mode(run: &SimulationRun) -> Result<(), RenderError> {
    raster::render(run)
}

#[cfg(not(feature = "raster"))]
fn raster_mode(_run: &SimulationRun) -> Result<(), RenderError> {
    Err(RenderError::Disabled {
        mode: "raster",
        feature: "raster",
    })
}

#[cfg(feature = "interactive")]
fn interactive_mode(run: &SimulationRun, live: bool) -> Result<(), RenderError> {
    let sink = if live {
        interactive::Sink::Browser
    } else {
        interactive::Sink::Document
    };
    interactive::render(run, sink)
}

#[cfg(not(feature = "interactive"))]
fn interactive_mode(_run: &SimulationRun, live: bool) -> Result<(), RenderError> {
    Err(RenderError::Disabled {
        mode: if live { "interactive" } else { "html" },
        feature: "interactive",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_tokens_parse() {
        assert_eq!("raster".parse::<OutputMode>().unwrap(), OutputMode::Raster);
        assert_eq!(
            "interactive".parse::<OutputMode>().unwrap(),
            OutputMode::InteractiveLive
        );
        assert_eq!(
            "html".parse::<OutputMode>().unwrap(),
            OutputMode::InteractiveDocument
        );
    }

    #[test]
    fn test_unknown_mode_names_valid_set() {
        let err = "svg".parse::<OutputMode>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("svg"));
        for token in OutputMode::TOKENS {
            assert!(message.contains(token), "message should name {token}");
        }
    }
}
