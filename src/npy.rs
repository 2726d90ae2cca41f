//! Decoding of the simulator's NumPy `.npy` array files.
//!
//! The reference simulator writes version-1 `.npy` files holding
//! little-endian `int32` grids; NumPy tooling that touches the data in
//! between may rewrite them as wider integers or floats. Grids are
//! therefore accepted in any of `<i4`, `<i8`, `<f4`, `<f8` and widened
//! to `f64` on load.

use std::io::Cursor;
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::{ReadNpyError, ReadNpyExt};

/// Errors that can occur while loading a `.npy` grid
#[derive(Debug, thiserror::Error)]
pub enum NpyError {
    /// The array file is missing or unreadable
    #[error("Failed to read array file {path}: {source}")]
    Io {
        /// Path of the array file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a supported 2-D numeric array
    #[error("Failed to decode {path} as a 2-D numeric array: {source}")]
    Decode {
        /// Path of the array file
        path: String,
        /// Decode error from the first attempted element type
        #[source]
        source: ReadNpyError,
    },
}

/// Load a 2-D numeric grid, widening whatever supported element type the
/// file stores to `f64`.
pub fn load_grid(path: &Path) -> Result<Array2<f64>, NpyError> {
    let bytes = std::fs::read(path).map_err(|source| NpyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_grid(&bytes).map_err(|source| NpyError::Decode {
        path: path.display().to_string(),
        source,
    })
}

fn decode_grid(bytes: &[u8]) -> Result<Array2<f64>, ReadNpyError> {
    let first = match Array2::<f64>::read_npy(Cursor::new(bytes)) {
        Ok(grid) => return Ok(grid),
        Err(err) => err,
    };
    if let Ok(grid) = Array2::<f32>::read_npy(Cursor::new(bytes)) {
        return Ok(grid.mapv(f64::from));
    }
    if let Ok(grid) = Array2::<i64>::read_npy(Cursor::new(bytes)) {
        return Ok(grid.mapv(|v| v as f64));
    }
    if let Ok(grid) = Array2::<i32>::read_npy(Cursor::new(bytes)) {
        return Ok(grid.mapv(f64::from));
    }
    Err(first)
}
