//! Optional YAML defaults for the CLI.
//!
//! ```yaml
//! endpoint: http://127.0.0.1:5000/api/run-algorithm
//! qubits: 4
//! stage:
//!   width: 1600
//!   height: 600
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use qcanvas_render::RenderConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Endpoint used when neither the flag nor the config names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/run-algorithm";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub endpoint: Option<String>,
    pub qubits: Option<usize>,
    pub stage: Option<StageSize>,
}

impl CliConfig {
    /// `~/.qcanvas/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".qcanvas").join("config.yaml"))
    }

    /// Load `path`, or the default file when it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: CliConfig = serde_yaml_ng::from_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// The flag wins over the config, which wins over the default.
    pub fn endpoint(&self, flag: Option<&str>) -> String {
        flag.or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    /// Raw qubit input: the flag as typed, else the configured count.
    pub fn qubit_input(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.qubits.map(|n| n.to_string()))
    }

    pub fn render_config(&self) -> RenderConfig {
        let config = RenderConfig::default();
        match self.stage {
            Some(stage) => config.with_stage_size(stage.width, stage.height),
            None => config,
        }
    }
}
