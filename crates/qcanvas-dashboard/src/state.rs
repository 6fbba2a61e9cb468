//! Application state for the dashboard server.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use qcanvas_render::{DEFAULT_QUBITS, RenderConfig};

/// Environment variable overriding the bind address.
pub const BIND_ENV: &str = "QCANVAS_BIND";

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,
    /// Frames per demo run.
    pub total_epochs: u64,
    /// Delay before each demo frame.
    pub epoch_interval: Duration,
    /// Qubit lines drawn by the render endpoint when the request names none.
    pub default_qubits: usize,
    /// Upper bound on requested qubit lines.
    pub max_qubits: usize,
    /// Stage geometry for rendering.
    pub render: RenderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: ([127, 0, 0, 1], 5000).into(),
            total_epochs: 50,
            epoch_interval: Duration::from_millis(300),
            default_qubits: DEFAULT_QUBITS,
            max_qubits: 64,
            render: RenderConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Defaults with the bind address taken from `QCANVAS_BIND` when set.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.bind_address = bind
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {BIND_ENV} address '{bind}': {e}"))?;
        }
        Ok(config)
    }

    /// Shorter demo runs, mostly for tests.
    pub fn with_demo(mut self, total_epochs: u64, epoch_interval: Duration) -> Self {
        self.total_epochs = total_epochs;
        self.epoch_interval = epoch_interval;
        self
    }
}

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Dashboard configuration.
    pub config: DashboardConfig,
    runs_started: AtomicU64,
}

impl AppState {
    /// Create a new application state with default configuration.
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    /// Create application state with custom configuration.
    pub fn with_config(config: DashboardConfig) -> Self {
        Self {
            config,
            runs_started: AtomicU64::new(0),
        }
    }

    /// Count a new demo run and return its ordinal.
    pub fn start_run(&self) -> u64 {
        self.runs_started.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn runs_started(&self) -> u64 {
        self.runs_started.load(Ordering::Relaxed)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind_address.port(), 5000);
        assert_eq!(config.total_epochs, 50);
        assert_eq!(config.epoch_interval, Duration::from_millis(300));
        assert_eq!(config.default_qubits, 3);
    }

    #[test]
    fn test_run_counter() {
        let state = AppState::new();
        assert_eq!(state.start_run(), 1);
        assert_eq!(state.start_run(), 2);
        assert_eq!(state.runs_started(), 2);
    }
}
