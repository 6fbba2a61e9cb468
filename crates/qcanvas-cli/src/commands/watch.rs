//! Watch command implementation.
//!
//! Streams a run into an in-memory canvas, mirrors the progress overlay on a
//! terminal progress bar, and optionally saves the final canvas and a report.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qcanvas_render::{CircuitFrame, QuantumCanvas};
use qcanvas_stream::{
    CONNECTING_MESSAGE, FrameSink, HttpSource, RunRequest, StreamConsumer, StreamError,
    StreamSummary, epoch_message,
};
use serde::Serialize;
use tracing::info;

use super::render::mount;
use crate::config::CliConfig;

/// Resolved options for one watch run.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub endpoint: String,
    pub qubits: Option<String>,
    pub problem_input: String,
    pub want_output: String,
    pub snapshot: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// JSON summary of a finished run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub endpoint: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub qubits: usize,
    pub frames_rendered: usize,
    pub lines_skipped: usize,
    pub final_frame: Option<CircuitFrame>,
    pub gates_drawn: usize,
}

/// A canvas that also drives a terminal progress bar.
struct TerminalCanvas {
    canvas: QuantumCanvas,
    bar: ProgressBar,
}

impl FrameSink for TerminalCanvas {
    fn connecting(&mut self) {
        self.canvas.connecting();
        self.bar.set_message(CONNECTING_MESSAGE);
    }

    fn frame(&mut self, frame: &CircuitFrame) {
        self.canvas.frame(frame);
        self.bar.set_length(frame.total_epochs);
        self.bar.set_position(frame.epoch);
        self.bar.set_message(epoch_message(frame));
    }

    fn completed(&mut self, summary: &StreamSummary) {
        self.canvas.completed(summary);
        self.bar.finish_and_clear();
    }

    fn failed(&mut self, error: &StreamError) {
        self.canvas.failed(error);
        self.bar.abandon();
    }
}

/// Execute the watch command.
pub async fn execute(config: &CliConfig, options: WatchOptions) -> Result<()> {
    let request = RunRequest::from_json_strs(&options.problem_input, &options.want_output)?;
    let source = HttpSource::new(&options.endpoint)?;

    let mut canvas = mount(config)?;
    canvas.update_qubits(options.qubits.as_deref());
    let qubits = canvas.qubit_count();

    println!(
        "{} Watching {} ({} qubit lines)",
        style("→").cyan().bold(),
        style(&options.endpoint).dim(),
        qubits
    );

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    bar.enable_steady_tick(std::time::Duration::from_millis(100));

    let started_at = Utc::now();
    let mut sink = TerminalCanvas { canvas, bar };
    let outcome = StreamConsumer::new(&mut sink).run(&source, &request).await;
    let finished_at = Utc::now();
    let canvas = sink.canvas;

    if let Some(path) = &options.snapshot {
        let svg = canvas.to_svg()?;
        fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote snapshot");
    }

    let summary = outcome.with_context(|| format!("Run against {} failed", options.endpoint))?;

    println!(
        "{} Completed: {} frames rendered, {} lines skipped",
        style("✓").green().bold(),
        summary.frames_rendered,
        summary.lines_skipped
    );
    if let Some(frame) = &summary.last_frame {
        println!(
            "  Final epoch {}/{} with {} columns",
            frame.epoch,
            frame.total_epochs,
            frame.columns().len()
        );
    }
    if let Some(path) = &options.snapshot {
        println!("  Snapshot: {}", style(path.display()).cyan());
    }

    if let Some(path) = &options.report {
        let report = RunReport {
            endpoint: options.endpoint.clone(),
            started_at,
            finished_at,
            qubits,
            frames_rendered: summary.frames_rendered,
            lines_skipped: summary.lines_skipped,
            gates_drawn: canvas.gates().len(),
            final_frame: summary.last_frame,
        };
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  Report:   {}", style(path.display()).cyan());
    }

    Ok(())
}
