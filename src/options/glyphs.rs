use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Glyph sizes in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Glyphs", inline)]
#[serde(default)]
pub struct GlyphOptions {
    /// Height of exon and domain bars.
    #[schemars(title = "Bar Height", range(min = 2.0, max = 100.0))]
    pub bar_height: f32,
    /// Radius of missense circles.
    #[schemars(title = "Missense Radius", range(min = 1.0, max = 30.0))]
    pub missense_radius: f32,
    /// Side of loss-of-function squares.
    #[schemars(title = "LoF Size", range(min = 2.0, max = 60.0))]
    pub lof_size: f32,
    /// Half-width (and half-height) of ClinVar triangles.
    #[schemars(title = "ClinVar Size", range(min = 2.0, max = 60.0))]
    pub clinvar_half_size: f32,
    /// Stroke width of emphasized glyphs.
    #[schemars(title = "Emphasis Stroke", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    pub emphasis_stroke_width: f32,
    /// Narrowest a bar is drawn, so single-residue ranges stay visible.
    #[schemars(title = "Min Bar Width", range(min = 0.0, max = 10.0))]
    pub min_bar_width: f32,
}

impl Default for GlyphOptions {
    fn default() -> Self {
        Self {
            bar_height: 20.0,
            missense_radius: 5.0,
            lof_size: 10.0,
            clinvar_half_size: 10.0,
            emphasis_stroke_width: 2.5,
            min_bar_width: 1.0,
        }
    }
}
