//! Integration tests for the full load-and-render pipeline.
//!
//! Each test writes a small simulation run (configuration file plus the
//! three `.npy` arrays) into a temporary directory, loads it, and checks
//! the produced artifacts.

use std::path::{Path, PathBuf};

use naschviz::loader::{self, Extent};
use naschviz::render::{self, OutputMode};
use ndarray::array;
use tempfile::tempdir;

fn write_run(dir: &Path) -> PathBuf {
    let prefix = dir.join("run1").display().to_string();
    let time = array![[0.0], [1.0], [2.0]];
    let dens = array![
        [0.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0, 1.0]
    ];
    let velo = array![
        [0.0, 10.0, 20.0, 30.0],
        [40.0, 50.0, 60.0, 0.0],
        [10.0, 20.0, 30.0, 40.0]
    ];
    ndarray_npy::write_npy(format!("{prefix}-time.npy"), &time).unwrap();
    ndarray_npy::write_npy(format!("{prefix}-dens.npy"), &dens).unwrap();
    ndarray_npy::write_npy(format!("{prefix}-velo.npy"), &velo).unwrap();

    let config = dir.join("run1.ini");
    std::fs::write(
        &config,
        format!("L=4\nT=3\nN=2\np=0.2\nvmax=2\noutputprefix={prefix}\n"),
    )
    .unwrap();
    config
}

#[test]
fn test_load_derives_extent_and_summary() {
    let dir = tempdir().unwrap();
    let config = write_run(dir.path());

    let run = loader::load(&config).unwrap();
    assert_eq!(run.density.dim(), run.velocity.dim());
    assert_eq!(run.time.len(), run.density.nrows());
    assert_eq!(
        run.extent,
        Extent {
            x_min: 0.0,
            x_max: 3.0,
            t_min: 0.0,
            t_max: 2.0
        }
    );
    let prefix = &run.output_prefix;
    assert_eq!(
        run.parameters,
        format!(" L=4 T=3 N=2 p=0.2 vmax=2 outputprefix={prefix}")
    );
}

#[cfg(feature = "raster")]
#[test]
fn test_raster_mode_produces_one_png() {
    let dir = tempdir().unwrap();
    let config = write_run(dir.path());

    let run = loader::load(&config).unwrap();
    render::render(&run, OutputMode::Raster).unwrap();

    assert!(dir.path().join("run1.png").is_file());
    for leftover in ["run1-dens.html", "run1-veloc.html", "run1.html"] {
        assert!(!dir.path().join(leftover).exists());
    }
}

#[cfg(feature = "interactive")]
#[test]
fn test_document_mode_produces_three_html_files() {
    let dir = tempdir().unwrap();
    let config = write_run(dir.path());

    let run = loader::load(&config).unwrap();
    render::render(&run, OutputMode::InteractiveDocument).unwrap();

    for name in ["run1-dens.html", "run1-veloc.html", "run1.html"] {
        assert!(dir.path().join(name).is_file(), "missing {name}");
    }
    assert!(!dir.path().join("run1.png").exists());

    // Rendering again targets the same deterministic artifact names.
    render::render(&run, OutputMode::InteractiveDocument).unwrap();
    for name in ["run1-dens.html", "run1-veloc.html", "run1.html"] {
        assert!(dir.path().join(name).is_file(), "missing {name}");
    }
}

#[test]
fn test_unknown_mode_names_the_valid_set() {
    let err = "svg".parse::<OutputMode>().unwrap_err();
    let message = err.to_string();
    for token in ["raster", "interactive", "html"] {
        assert!(message.contains(token), "message should name {token}");
    }
}
