//! Mesh Heatmap - Main entry point
//!
//! Reads a solver mesh (flat big-endian f64 samples) and renders it as a
//! pseudocolor heatmap PNG.
//!
//! Usage:
//! ```bash
//! mesh_heatmap --preset coarse
//! mesh_heatmap --rows 1000 --cols 1000 --input testing/MyMesh --output plot.png
//! mesh_heatmap --preset fine --set palette=Viridis --set color.clip=-2,2
//! ```

use anyhow::{bail, Context};
use mesh_heatmap::config::PlotConfig;
use mesh_heatmap::heatmap::palettes::PALETTE_REGISTRY;
use mesh_heatmap::heatmap::plot_properties::{registry, PlotPropertyReader};
use mesh_heatmap::{logging, pipeline};
use std::collections::HashMap;
use tracing::{error, info, warn};

fn main() {
    logging::init_logging();
    info!("Mesh Heatmap v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{}", usage());
        return;
    }

    if let Err(e) = run(&args) {
        error!("✗ Rendering failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let props = PlotPropertyReader::new(parse_args(args)?);
    for name in props.unknown_properties() {
        warn!("⚠ Ignoring unknown property '{}'", name);
    }

    let config = PlotConfig::from_properties(&props).context("invalid configuration")?;
    info!("✓ Configuration loaded");
    info!("  Input: {}", config.input_path.display());
    info!("  Output: {}", config.output_path.display());
    info!("  Grid: {}×{}", config.rows, config.cols);

    let summary = pipeline::render(&config).with_context(|| {
        format!(
            "failed to render {} to {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    info!(
        "✓ {}×{} heatmap saved to {}",
        summary.width,
        summary.height,
        summary.output_path.display()
    );
    Ok(())
}

/// Parse command-line arguments into plot property values
///
/// Flags are shorthands for properties; `--set name=value` sets any property.
fn parse_args(args: &[String]) -> anyhow::Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let property = match flag {
            "--preset" => Some("grid.preset"),
            "--rows" => Some("grid.rows"),
            "--cols" => Some("grid.cols"),
            "--input" => Some("input.path"),
            "--output" => Some("output.path"),
            "--palette" => Some("palette"),
            _ => None,
        };

        match (flag, property, args.get(i + 1)) {
            (_, Some(name), Some(value)) => {
                values.insert(name.to_string(), value.clone());
                i += 2;
            }
            ("--set", None, Some(assignment)) => {
                let Some((name, value)) = assignment.split_once('=') else {
                    bail!("--set expects name=value, got '{}'", assignment);
                };
                values.insert(name.trim().to_string(), value.trim().to_string());
                i += 2;
            }
            (_, Some(_), None) | ("--set", None, None) => {
                bail!("{} requires a value", flag);
            }
            _ => {
                warn!("⚠ Ignoring unrecognized argument '{}'", flag);
                i += 1;
            }
        }
    }
    Ok(values)
}

fn usage() -> String {
    let mut text = String::new();
    text.push_str("Usage: mesh_heatmap [--preset fine|coarse] [--rows N --cols N]\n");
    text.push_str("                    [--input PATH] [--output PATH] [--palette NAME]\n");
    text.push_str("                    [--set name=value]...\n\n");
    text.push_str("A grid shape is required: --preset or both --rows and --cols.\n\n");
    text.push_str("Properties:\n");
    for def in registry().properties() {
        text.push_str(&format!(
            "  {:<16} (default: '{}') {}\n",
            def.name, def.default_value, def.description
        ));
    }

    text.push_str("\nPalettes (append _r to reverse):\n");
    text.push_str(&format!(
        "  diverging:  {}\n",
        PALETTE_REGISTRY.diverging_palettes().join(", ")
    ));
    text.push_str(&format!(
        "  sequential: {}\n",
        PALETTE_REGISTRY.sequential_palettes().join(", ")
    ));
    text
}
