//! Render command implementation.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use qcanvas_render::{CircuitFrame, QuantumCanvas};
use qcanvas_scene::Container;

use crate::config::CliConfig;

/// Id of the container the command's canvas mounts into.
pub const CONTAINER_ID: &str = "canvas-container";

/// Execute the render command.
pub fn execute(
    config: &CliConfig,
    input: &str,
    qubits: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let source = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read frame from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read frame: {input}"))?
    };
    let frame = CircuitFrame::from_json(source.trim())
        .with_context(|| format!("Invalid frame in {input}"))?;

    let svg = render_frame(config, &frame, qubits)?;

    match output {
        Some(path) => {
            fs::write(path, &svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Rendered epoch {}/{} ({} gates) to {}",
                style("✓").green().bold(),
                frame.epoch,
                frame.total_epochs,
                frame.gate_count(),
                style(path.display()).cyan()
            );
        }
        None => print!("{svg}"),
    }
    Ok(())
}

/// Draw `frame` on a fresh canvas and paint it.
pub fn render_frame(
    config: &CliConfig,
    frame: &CircuitFrame,
    qubits: Option<&str>,
) -> Result<String> {
    let mut canvas = mount(config)?;
    canvas.update_qubits(qubits);
    canvas.draw_frame(frame);
    Ok(canvas.to_svg()?)
}

/// Mount a canvas with the configured geometry.
pub fn mount(config: &CliConfig) -> Result<QuantumCanvas> {
    QuantumCanvas::mount(Some(&Container::new(CONTAINER_ID)), config.render_config())
        .ok_or_else(|| anyhow::anyhow!("Canvas container '{CONTAINER_ID}' is missing"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_frame_svg() {
        let frame = CircuitFrame::from_codes(1, 2, [[3, 1], [0, 3]]);
        let svg = render_frame(&CliConfig::default(), &frame, Some("2")).unwrap();
        assert!(svg.contains("Gate 2"));
        assert!(svg.contains("Q1"));
        assert!(!svg.contains("Q2"));
    }

    #[test]
    fn test_render_frame_default_qubits() {
        let frame = CircuitFrame::from_codes(1, 1, [[3]]);
        let svg = render_frame(&CliConfig::default(), &frame, Some("lots")).unwrap();
        assert!(svg.contains("Q2"));
    }
}
