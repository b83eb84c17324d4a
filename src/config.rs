//! Dashboard tunables with sensible defaults.

use crate::core::output::Color;

/// Behavior knobs for a dashboard session.
///
/// The defaults match the stock appearance: green border on the focused
/// panel, gray on the other, a 200ms input poll, and the standard key
/// legend appended to the status line.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Border color of the focused panel.
    pub active_color: Color,
    /// Border color of the unfocused panel.
    pub dim_color: Color,
    /// Input poll timeout per tick, in milliseconds. Bounds how stale the
    /// size query and shutdown-flag check can get while idle.
    pub poll_timeout_ms: i32,
    /// Appended verbatim after the status segments.
    pub status_legend: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            active_color: Color::Green,
            dim_color: Color::Gray,
            poll_timeout_ms: 200,
            status_legend: " | Tab switch | Enter send | Ctrl+C quit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardConfig;
    use crate::core::output::Color;

    #[test]
    fn defaults_match_stock_appearance() {
        let config = DashboardConfig::default();
        assert_eq!(config.active_color, Color::Green);
        assert_eq!(config.dim_color, Color::Gray);
        assert_eq!(config.poll_timeout_ms, 200);
        assert!(config.status_legend.contains("Ctrl+C"));
    }
}
