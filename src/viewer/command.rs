//! The complete vocabulary understood by the structure viewer.
//!
//! Each command has two wire forms: a tagged JSON object (for script hosts
//! that dispatch on the `command` field) and a one-line script form, via
//! [`Display`](std::fmt::Display), in the viewer's command language:
//!
//! ```text
//! select :12 or :480
//! style proteins sphere
//! color 0000ff
//! clear all
//! clear highlight
//! ```

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Rgb;

// ── Command payload types ────────────────────────────────────────────────

/// What a style or color directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerTarget {
    /// The residues of the most recent `Select`.
    #[default]
    Selection,
}

/// Representation applied to selected residues.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewerStyle {
    /// Space-filling spheres, used for emphasized residues.
    Sphere,
    /// Cartoon ribbon, the viewer's neutral representation.
    Ribbon,
}

impl ViewerStyle {
    /// Script keyword for the style.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Ribbon => "ribbon",
        }
    }
}

/// Color directive: a fixed RGB color or the viewer's per-residue
/// prediction-confidence coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ViewerColor {
    /// A fixed color.
    Rgb(Rgb),
    /// Confidence-based default coloring.
    Confidence,
}

impl ViewerColor {
    const CONFIDENCE: &'static str = "confidence";
}

impl fmt::Display for ViewerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(c) => f.write_str(&c.to_script_hex()),
            Self::Confidence => f.write_str(Self::CONFIDENCE),
        }
    }
}

impl TryFrom<String> for ViewerColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case(Self::CONFIDENCE) {
            return Ok(Self::Confidence);
        }
        Rgb::try_from(value).map(Self::Rgb)
    }
}

impl From<ViewerColor> for String {
    fn from(c: ViewerColor) -> Self {
        match c {
            ViewerColor::Rgb(rgb) => rgb.to_hex(),
            ViewerColor::Confidence => ViewerColor::CONFIDENCE.to_owned(),
        }
    }
}

impl From<Rgb> for ViewerColor {
    fn from(c: Rgb) -> Self {
        Self::Rgb(c)
    }
}

// ── Commands ─────────────────────────────────────────────────────────────

/// One instruction for the structure viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewerCommand {
    /// Make these residues the viewer's current selection.
    Select {
        /// Residue numbers.
        residues: Vec<u32>,
    },
    /// Change the representation of the current selection.
    SetStyle {
        /// Always the current selection.
        target: ViewerTarget,
        /// New representation.
        style: ViewerStyle,
    },
    /// Change the color of the current selection.
    SetColor {
        /// Always the current selection.
        target: ViewerTarget,
        /// New color.
        color: ViewerColor,
    },
    /// Drop the viewer's internal selection context.
    Clear,
    /// Remove any hover/selection highlight the viewer is showing.
    ClearHighlight,
}

impl ViewerCommand {
    /// `Select` over `residues`.
    #[must_use]
    pub fn select(residues: Vec<u32>) -> Self {
        Self::Select { residues }
    }

    /// `SetStyle` on the current selection.
    #[must_use]
    pub const fn style(style: ViewerStyle) -> Self {
        Self::SetStyle {
            target: ViewerTarget::Selection,
            style,
        }
    }

    /// `SetColor` on the current selection.
    #[must_use]
    pub fn color(color: impl Into<ViewerColor>) -> Self {
        Self::SetColor {
            target: ViewerTarget::Selection,
            color: color.into(),
        }
    }

    /// Tagged JSON form.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures (none are expected for this type).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ViewerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select { residues } if residues.is_empty() => {
                f.write_str("select none")
            }
            Self::Select { residues } => {
                f.write_str("select ")?;
                for (i, r) in residues.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, ":{r}")?;
                }
                Ok(())
            }
            Self::SetStyle { style, .. } => {
                write!(f, "style proteins {}", style.keyword())
            }
            Self::SetColor { color, .. } => write!(f, "color {color}"),
            Self::Clear => f.write_str("clear all"),
            Self::ClearHighlight => f.write_str("clear highlight"),
        }
    }
}
