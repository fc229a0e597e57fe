//! Test mesh generator
//!
//! Writes a synthetic solution mesh in the renderer's input format so the
//! whole pipeline can be exercised without running the solver.
//!
//! Usage:
//! ```bash
//! cargo run --bin generate_mesh -- --preset coarse --pattern wave --output testing/MyMesh
//! cargo run --bin mesh_heatmap -- --preset coarse
//! ```

use anyhow::{bail, Context};
use mesh_heatmap::config::GridPreset;
use mesh_heatmap::heatmap::axes::LinearAxis;
use mesh_heatmap::heatmap::grid::Grid;
use mesh_heatmap::heatmap::samples;
use mesh_heatmap::logging;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pattern {
    /// 0.5, -0.5, 0.5, ... in row-major order
    Alternating,
    /// A travelling wave over x ∈ [0, 6], t ∈ [0, 3], amplitude 1.2 so the
    /// crests saturate the default color clip
    Wave,
}

impl Pattern {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "alternating" => Some(Self::Alternating),
            "wave" => Some(Self::Wave),
            _ => None,
        }
    }

    fn build(self, rows: usize, cols: usize) -> Grid {
        match self {
            Pattern::Alternating => {
                Grid::from_fn(rows, cols, |i, j| if (i * cols + j) % 2 == 0 { 0.5 } else { -0.5 })
            }
            Pattern::Wave => {
                let x = LinearAxis::linspace(0.0, 6.0, cols);
                let t = LinearAxis::linspace(0.0, 3.0, rows);
                let (x, t) = (x.values(), t.values());
                Grid::from_fn(rows, cols, |i, j| {
                    1.2 * (std::f64::consts::PI * (x[j] - t[i])).sin() * (-0.2 * t[i]).exp()
                })
            }
        }
    }
}

struct Options {
    rows: usize,
    cols: usize,
    pattern: Pattern,
    output: PathBuf,
}

fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut shape = GridPreset::Coarse.shape();
    let mut pattern = Pattern::Wave;
    let mut output = PathBuf::from("testing/MyMesh");

    let mut i = 1;
    while i < args.len() {
        let Some(value) = args.get(i + 1) else {
            bail!("{} requires a value", args[i]);
        };
        match args[i].as_str() {
            "--preset" => {
                shape = GridPreset::parse(value)
                    .with_context(|| format!("unknown preset '{}'", value))?
                    .shape();
            }
            "--rows" => shape.0 = value.parse().context("--rows expects an integer")?,
            "--cols" => shape.1 = value.parse().context("--cols expects an integer")?,
            "--pattern" => {
                pattern = Pattern::parse(value)
                    .with_context(|| format!("unknown pattern '{}'", value))?;
            }
            "--output" => output = PathBuf::from(value),
            other => bail!("unrecognized argument '{}'", other),
        }
        i += 2;
    }

    if shape.0 == 0 || shape.1 == 0 {
        bail!("grid shape {}×{} must be positive", shape.0, shape.1);
    }

    Ok(Options {
        rows: shape.0,
        cols: shape.1,
        pattern,
        output,
    })
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let options = parse_args(args)?;

    info!(
        "Generating {:?} mesh {}×{}",
        options.pattern, options.rows, options.cols
    );
    let grid = options.pattern.build(options.rows, options.cols);

    if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    samples::write_samples(&options.output, &grid)?;

    info!(
        "✓ Wrote {} samples ({} bytes) to {}",
        options.rows * options.cols,
        options.rows * options.cols * samples::SAMPLE_SIZE,
        options.output.display()
    );
    Ok(())
}

fn main() {
    logging::init_logging();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        error!("✗ {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("generate_mesh")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_alternating_pattern() {
        let grid = Pattern::Alternating.build(3, 3);
        assert_eq!(
            grid.to_flat(),
            vec![0.5, -0.5, 0.5, -0.5, 0.5, -0.5, 0.5, -0.5, 0.5]
        );
    }

    #[test]
    fn test_wave_pattern_saturates() {
        let grid = Pattern::Wave.build(100, 100);
        let (lo, hi) = grid.value_range().unwrap();
        assert!(lo < -1.0);
        assert!(hi > 1.0);
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--preset", "fine", "--pattern", "alternating"])).unwrap();
        assert_eq!((options.rows, options.cols), (1000, 1000));
        assert_eq!(options.pattern, Pattern::Alternating);
        assert_eq!(options.output, PathBuf::from("testing/MyMesh"));

        let options = parse_args(&args(&["--rows", "4", "--cols", "7"])).unwrap();
        assert_eq!((options.rows, options.cols), (4, 7));

        assert!(parse_args(&args(&["--rows", "0"])).is_err());
        assert!(parse_args(&args(&["--pattern", "noise"])).is_err());
        assert!(parse_args(&args(&["--output"])).is_err());
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("MyMesh");
        run(&args(&[
            "--rows", "2", "--cols", "5", "--pattern", "alternating",
            "--output", output.to_str().unwrap(),
        ]))
        .unwrap();

        let values = samples::read_samples(&output).unwrap();
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], 0.5);
        assert_eq!(values[1], -0.5);
    }
}
