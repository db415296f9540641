use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Rgb;
use crate::viewer::{ViewerColor, ViewerStyle};

/// How selections are presented in the structure viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
pub struct ViewerOptions {
    /// Representation of emphasized residues.
    #[schemars(title = "Selected Style")]
    pub emphasized_style: ViewerStyle,
    /// Representation restored when a selection is removed.
    #[schemars(title = "Default Style")]
    pub neutral_style: ViewerStyle,
    /// Coloring restored when a selection is removed.
    #[schemars(title = "Default Color", with = "String")]
    pub neutral_color: ViewerColor,
    /// Residue highlighted once when the track is mounted.
    #[schemars(title = "Focus Residue")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_residue: Option<u32>,
    /// Color of the mount-time focus residue.
    #[schemars(skip)]
    pub focus_color: Rgb,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            emphasized_style: ViewerStyle::Sphere,
            neutral_style: ViewerStyle::Ribbon,
            neutral_color: ViewerColor::Confidence,
            focus_residue: None,
            focus_color: Rgb::new(0xFF, 0x00, 0x00),
        }
    }
}
