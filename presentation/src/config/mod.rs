//! Presentation-level configuration
//!
//! Resolved output settings for the console formatter.

use mcpmap_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Build from the configured values; an unset format means text.
    pub fn new(format: Option<OutputFormat>, color: bool) -> Self {
        Self {
            format: format.unwrap_or_default(),
            color,
        }
    }

    /// `--json` wins over the configured format.
    pub fn with_json_flag(mut self, json: bool) -> Self {
        if json {
            self.format = OutputFormat::Json;
        }
        self
    }

    /// Apply the color setting to the process-wide `colored` switch.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
