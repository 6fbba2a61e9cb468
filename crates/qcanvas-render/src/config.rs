//! Render geometry and the qubit-count input.

/// Qubit count used when the input is missing or not a number.
pub const DEFAULT_QUBITS: usize = 3;

/// Colours shared by the renderer and the overlay.
pub mod palette {
    pub const TRACK: &str = "#444";
    pub const TEXT: &str = "#1c1c1c";
    pub const CONNECTOR: &str = "#0078d4";
    pub const LABEL: &str = "#4b5b5b";
    pub const BACKDROP: &str = "black";
    pub const BAR_BACKGROUND: &str = "#333";
    pub const BAR_BORDER: &str = "#555";
    pub const BAR_FILL: &str = "#4caf50";
}

/// Stage size and grid geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub stage_width: f64,
    pub stage_height: f64,
    /// Horizontal distance between circuit columns.
    pub grid_step: f64,
    /// X of the first circuit column.
    pub start_x: f64,
    /// Vertical distance between qubit lines.
    pub line_spacing: f64,
    /// Y of qubit line 0.
    pub first_line_y: f64,
    /// X where track lines begin.
    pub track_start_x: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stage_width: 1200.0,
            stage_height: 500.0,
            grid_step: 80.0,
            start_x: 100.0,
            line_spacing: 100.0,
            first_line_y: 120.0,
            track_start_x: 50.0,
        }
    }
}

impl RenderConfig {
    /// Override the stage size, keeping the grid.
    pub fn with_stage_size(mut self, width: f64, height: f64) -> Self {
        self.stage_width = width;
        self.stage_height = height;
        self
    }

    /// X of circuit column `index`.
    pub fn column_x(&self, index: usize) -> f64 {
        self.start_x + index as f64 * self.grid_step
    }
}

/// Read a qubit count from free-form input, falling back to [`DEFAULT_QUBITS`].
pub fn parse_qubit_count(input: Option<&str>) -> usize {
    input
        .map(str::trim)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_QUBITS)
}
