//! Configuration module.
//!
//! [`WidgetConfig`] is the explicit value the chat widget is constructed
//! with. [`loader`] resolves it from defaults, a TOML file, environment
//! variables and CLI flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{ConfigError, ConfigFile, ResolvedConfig};

/// Pixel dimensions of the fixed widget rectangle and its sub-regions.
///
/// Every value is in host pixels. The derived rectangles live in
/// [`crate::state::region::WidgetLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Total widget width.
    pub width: i32,
    /// Total widget height, including the header strip and input box.
    pub height: i32,
    /// Height of the header strip holding the toggle button.
    pub header_height: i32,
    /// Width of the toggle button inside the header.
    pub toggle_width: i32,
    /// Width of the scrollbar column on the right of the log.
    pub scrollbar_width: i32,
    /// Height of each scroll arrow button.
    pub button_height: i32,
    /// Height of the input box at the bottom.
    pub input_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 150,
            header_height: 20,
            toggle_width: 60,
            scrollbar_width: 20,
            button_height: 20,
            input_height: 30,
        }
    }
}

impl LayoutConfig {
    /// Height of the log area between the header and the input box.
    pub fn log_height(&self) -> i32 {
        self.height - self.header_height - self.input_height
    }

    /// Length of the scrollbar track between the two arrow buttons.
    pub fn track_span(&self) -> i32 {
        self.log_height() - 2 * self.button_height
    }
}

/// Construction-time configuration of the chat widget.
///
/// Replaces global UI preference lookups: everything the widget needs to
/// know about speeds, thresholds and geometry is carried here.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Pixels the overlay moves per animation tick.
    pub slide_speed: i32,
    /// Offset of the fully hidden overlay. Must leave the header visible.
    pub max_offset: i32,
    /// Idle time after which a visible overlay hides itself.
    pub idle_timeout_ms: u64,
    /// Whether idle auto-hide is active at all.
    pub auto_hide_enabled: bool,
    /// Fraction of one scroll step a drag must cover before the index moves.
    pub drag_hysteresis: f64,
    /// Smallest scrollbar thumb, in pixels.
    pub min_thumb_size: i32,
    /// Horizontal pixels reserved around wrapped log lines.
    pub wrap_margin: i32,
    /// Pixel budget of the visible part of the input line.
    pub input_budget: i32,
    /// Maximum number of sent messages kept for recall.
    pub history_capacity: usize,
    /// Widget geometry.
    pub layout: LayoutConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            slide_speed: 5,
            max_offset: 130,
            idle_timeout_ms: 10_000,
            auto_hide_enabled: true,
            drag_hysteresis: 0.5,
            min_thumb_size: 10,
            wrap_margin: 10,
            input_budget: 240,
            history_capacity: 50,
            layout: LayoutConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Check the cross-field constraints the widget relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if self.slide_speed <= 0 {
            return Err(ConfigError::invalid("slide_speed", "must be positive"));
        }
        if self.max_offset < 0 || self.max_offset >= layout.height {
            return Err(ConfigError::invalid(
                "max_offset",
                "must be in [0, layout.height) so the header stays reachable",
            ));
        }
        if !(self.drag_hysteresis > 0.0 && self.drag_hysteresis <= 1.0) {
            return Err(ConfigError::invalid("drag_hysteresis", "must be in (0, 1]"));
        }
        if self.min_thumb_size < 1 {
            return Err(ConfigError::invalid("min_thumb_size", "must be at least 1"));
        }
        if self.wrap_margin < 0 {
            return Err(ConfigError::invalid("wrap_margin", "must not be negative"));
        }
        if self.input_budget < 1 {
            return Err(ConfigError::invalid("input_budget", "must be at least 1"));
        }
        if layout.width <= layout.scrollbar_width || layout.toggle_width > layout.width {
            return Err(ConfigError::invalid(
                "layout.width",
                "must exceed scrollbar_width and toggle_width",
            ));
        }
        if layout.header_height < 1 || layout.input_height < 1 {
            return Err(ConfigError::invalid(
                "layout",
                "header_height and input_height must be at least 1",
            ));
        }
        if layout.track_span() < 1 {
            return Err(ConfigError::invalid(
                "layout.height",
                "leaves no room for the scrollbar track",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(WidgetConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_layout_has_positive_track() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.log_height(), 100);
        assert_eq!(layout.track_span(), 60);
    }

    #[test]
    fn zero_speed_is_rejected() {
        let config = WidgetConfig {
            slide_speed: 0,
            ..WidgetConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("slide_speed"));
    }

    #[test]
    fn max_offset_must_leave_header_visible() {
        let config = WidgetConfig {
            max_offset: 150,
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn hysteresis_outside_unit_interval_is_rejected() {
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let config = WidgetConfig {
                drag_hysteresis: bad,
                ..WidgetConfig::default()
            };
            assert!(config.validate().is_err(), "hysteresis {bad} accepted");
        }
    }

    #[test]
    fn layout_without_track_is_rejected() {
        let config = WidgetConfig {
            layout: LayoutConfig {
                button_height: 60,
                ..LayoutConfig::default()
            },
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
