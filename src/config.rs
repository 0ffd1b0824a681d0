//! Page geometry and layout switches.
//!
//! Every field has a default, so a JSON configuration only needs to name
//! the values it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Page and staff dimensions, in user units (1/96 inch, as in SVG).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Distance between two string lines of the staff
    pub staff_line_height: f64,
    /// Vertical gap inserted between consecutive lines on a page
    pub line_spacing: f64,
    /// Vertical gap between pages when all pages are stacked in one tree
    pub page_spacing: f64,
    /// Stretch the final line of the score to the full content width
    pub stretch_last_line: bool,
    pub show_measure_numbers: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        // US Letter at 96 units per inch with half-inch margins.
        Self {
            page_width: 816.0,
            page_height: 1056.0,
            margin_left: 48.0,
            margin_right: 48.0,
            margin_top: 48.0,
            margin_bottom: 48.0,
            staff_line_height: 12.0,
            line_spacing: 24.0,
            page_spacing: 32.0,
            stretch_last_line: false,
            show_measure_numbers: true,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that leave no room for content.
    pub fn validate(&self) -> Result<()> {
        if self.content_width() <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "content width {} is not positive (page width {}, margins {} + {})",
                self.content_width(),
                self.page_width,
                self.margin_left,
                self.margin_right
            )));
        }
        if self.content_height() <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "content height {} is not positive (page height {}, margins {} + {})",
                self.content_height(),
                self.page_height,
                self.margin_top,
                self.margin_bottom
            )));
        }
        if self.staff_line_height <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "staff line height {} is not positive",
                self.staff_line_height
            )));
        }
        Ok(())
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f64 {
        self.page_height - self.margin_top - self.margin_bottom
    }
}
