use serde::{Deserialize, Serialize};

use crate::feature::FeatureCategory;
use crate::util::color::Rgb;

/// Color palette for the track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Exon bars.
    pub exon: Rgb,
    /// Domain bars.
    pub domain: Rgb,
    /// Missense circles.
    pub missense: Rgb,
    /// Loss-of-function squares.
    pub loss_of_function: Rgb,
    /// ClinVar triangles.
    pub clinical: Rgb,
    /// Outline of emphasized glyphs.
    pub emphasis_stroke: Rgb,
    /// Axis frame and tick marks.
    pub axis: Rgb,
    /// Vertical grid lines behind the glyphs.
    pub grid: Rgb,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            exon: FeatureCategory::Exon.default_color(),
            domain: FeatureCategory::Domain.default_color(),
            missense: FeatureCategory::MissenseVariant.default_color(),
            loss_of_function: FeatureCategory::LossOfFunctionVariant
                .default_color(),
            clinical: FeatureCategory::ClinicalVariant.default_color(),
            emphasis_stroke: Rgb::BLACK,
            axis: Rgb::BLACK,
            grid: Rgb::new(0xD3, 0xD3, 0xD3),
        }
    }
}

impl ColorOptions {
    /// Base color of a category: its glyph fill and the color it is painted
    /// in the viewer when selected.
    #[must_use]
    pub const fn base(&self, category: FeatureCategory) -> Rgb {
        match category {
            FeatureCategory::Exon => self.exon,
            FeatureCategory::Domain => self.domain,
            FeatureCategory::MissenseVariant => self.missense,
            FeatureCategory::LossOfFunctionVariant => self.loss_of_function,
            FeatureCategory::ClinicalVariant => self.clinical,
        }
    }
}
