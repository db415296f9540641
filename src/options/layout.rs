use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Plot geometry: canvas size, margins, lane padding, and the residue
/// domain shown along the x axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
pub struct LayoutOptions {
    /// Total canvas width in pixels.
    #[schemars(title = "Width", range(min = 100.0, max = 8000.0))]
    pub width: f32,
    /// Total canvas height in pixels.
    #[schemars(title = "Height", range(min = 60.0, max = 4000.0))]
    pub height: f32,
    /// Space left of the plot, where lane labels go.
    #[schemars(title = "Left Margin")]
    pub margin_left: f32,
    /// Space right of the plot.
    #[schemars(title = "Right Margin")]
    pub margin_right: f32,
    /// Space above the plot.
    #[schemars(title = "Top Margin")]
    pub margin_top: f32,
    /// Space below the plot, where tick labels go.
    #[schemars(title = "Bottom Margin")]
    pub margin_bottom: f32,
    /// Fraction of each lane step left empty between lanes.
    #[schemars(title = "Lane Padding", range(min = 0.0, max = 0.95), extend("step" = 0.01))]
    pub band_padding: f32,
    /// Last residue of the domain (first is always 0).
    #[schemars(title = "Sequence Length")]
    pub domain_max: u32,
    /// Minimum pixel distance between adjacent x-axis labels.
    #[schemars(title = "Min Tick Spacing", range(min = 10.0, max = 1000.0))]
    pub min_tick_spacing: f32,
    /// Axis label font size.
    #[schemars(title = "Font Size", range(min = 6.0, max = 48.0))]
    pub font_size: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 300.0,
            margin_left: 200.0,
            margin_right: 40.0,
            margin_top: 20.0,
            margin_bottom: 60.0,
            band_padding: 0.05,
            domain_max: 1863,
            min_tick_spacing: 100.0,
            font_size: 14.0,
        }
    }
}

impl LayoutOptions {
    /// Plot width inside the margins.
    #[must_use]
    pub fn inner_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Plot height inside the margins.
    #[must_use]
    pub fn inner_height(&self) -> f32 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }
}
