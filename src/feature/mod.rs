//! Feature categories, input records, and their normalization into glyphs.
//!
//! Input arrives as a list of [`FeatureRecord`]s (or the raw JSON shape
//! [`RawRecord`] used by the data collaborators). [`model::normalize`] turns
//! them into [`DrawableGlyph`]s, one per drawable instance, dropping any
//! record that is malformed.

pub mod model;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use model::{
    normalize, normalize_raw, DrawableGlyph, Normalized, PointGlyph,
    SpanGlyph,
};

use crate::error::{RecordError, TrackError};
use crate::util::color::Rgb;

/// Lane identity of a feature.
///
/// Every category has a fixed glyph shape, a fixed base color, and a fixed
/// selectable flag. Exons and domains are informational only.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum FeatureCategory {
    /// Exon boundaries along the transcript.
    #[serde(rename = "Exons")]
    Exon,
    /// Annotated protein domains.
    #[serde(rename = "Domains and annotations")]
    Domain,
    /// Population missense variants.
    #[serde(rename = "gnomAD missense")]
    MissenseVariant,
    /// Population loss-of-function variants.
    #[serde(rename = "gnomAD LoF")]
    LossOfFunctionVariant,
    /// Clinically reported variants.
    #[serde(rename = "ClinVar variants")]
    ClinicalVariant,
}

/// How a category's glyphs are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphShape {
    /// Horizontal bar spanning a residue range.
    Bar,
    /// Circle centered on a residue.
    Circle,
    /// Square anchored at a residue.
    Square,
    /// Downward-pointing triangle centered on a residue.
    Triangle,
}

/// Which extent shape a category's records carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentKind {
    /// One contiguous `[start, end]` run per record.
    Range,
    /// Any number of scattered residue positions per record.
    Positions,
}

impl FeatureCategory {
    /// All categories in lane order, top to bottom.
    pub const LANES: [Self; 5] = [
        Self::Exon,
        Self::MissenseVariant,
        Self::LossOfFunctionVariant,
        Self::ClinicalVariant,
        Self::Domain,
    ];

    /// Lane label, also the category part of selection keys.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exon => "Exons",
            Self::Domain => "Domains and annotations",
            Self::MissenseVariant => "gnomAD missense",
            Self::LossOfFunctionVariant => "gnomAD LoF",
            Self::ClinicalVariant => "ClinVar variants",
        }
    }

    /// Whether clicks on this category's glyphs or lane label do anything.
    #[must_use]
    pub const fn selectable(self) -> bool {
        match self {
            Self::Exon | Self::Domain => false,
            Self::MissenseVariant
            | Self::LossOfFunctionVariant
            | Self::ClinicalVariant => true,
        }
    }

    /// Glyph shape used for this category.
    #[must_use]
    pub const fn shape(self) -> GlyphShape {
        match self {
            Self::Exon | Self::Domain => GlyphShape::Bar,
            Self::MissenseVariant => GlyphShape::Circle,
            Self::LossOfFunctionVariant => GlyphShape::Square,
            Self::ClinicalVariant => GlyphShape::Triangle,
        }
    }

    /// Extent shape this category's records must carry.
    #[must_use]
    pub const fn extent_kind(self) -> ExtentKind {
        match self {
            Self::Exon | Self::Domain => ExtentKind::Range,
            Self::MissenseVariant
            | Self::LossOfFunctionVariant
            | Self::ClinicalVariant => ExtentKind::Positions,
        }
    }

    /// Built-in base color; [`ColorOptions`](crate::options::ColorOptions)
    /// starts from these.
    #[must_use]
    pub const fn default_color(self) -> Rgb {
        match self {
            Self::Exon => Rgb::new(0x00, 0xFF, 0x00),
            Self::Domain => Rgb::new(0x96, 0x4B, 0x00),
            Self::MissenseVariant => Rgb::new(0x00, 0x00, 0xFF),
            Self::LossOfFunctionVariant => Rgb::new(0xFF, 0x00, 0x00),
            Self::ClinicalVariant => Rgb::new(0xFF, 0xA5, 0x00),
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeatureCategory {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::LANES
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| RecordError::UnknownCategory(s.to_owned()))
    }
}

/// Residue coverage of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extent {
    /// Contiguous run `start..=end`.
    Range {
        /// First residue.
        start: i64,
        /// Last residue.
        end: i64,
    },
    /// Scattered residues; duplicates allowed, order irrelevant.
    Positions(Vec<i64>),
}

/// One input feature record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    /// Lane the record belongs to.
    pub category: FeatureCategory,
    /// Residues the record covers.
    pub extent: Extent,
}

impl FeatureRecord {
    /// A range record.
    #[must_use]
    pub const fn range(category: FeatureCategory, start: i64, end: i64) -> Self {
        Self {
            category,
            extent: Extent::Range { start, end },
        }
    }

    /// A point-set record.
    #[must_use]
    pub fn positions(category: FeatureCategory, positions: Vec<i64>) -> Self {
        Self {
            category,
            extent: Extent::Positions(positions),
        }
    }
}

/// Record as supplied by the data collaborators: a category label and a flat
/// coordinate list whose meaning depends on the category.
///
/// ```json
/// [{ "type": "Exons", "data": [1, 100] },
///  { "type": "gnomAD missense", "data": [12, 480, 1033] }]
/// ```
///
/// The JSON object is kept as-is and only interpreted by
/// [`to_record`](Self::to_record), so one malformed entry (missing fields,
/// fractional or oversized coordinates) is rejected on its own instead of
/// failing the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(serde_json::Value);

/// Expected shape of one [`RawRecord`].
#[derive(Deserialize)]
struct RecordShape {
    #[serde(rename = "type")]
    kind: String,
    data: Vec<serde_json::Number>,
}

impl RawRecord {
    /// Raw record for `kind` with integer coordinates.
    #[must_use]
    pub fn new(kind: &str, data: &[i64]) -> Self {
        Self(serde_json::json!({ "type": kind, "data": data }))
    }

    /// The JSON object as received.
    #[must_use]
    pub const fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Resolve the category label and extent shape.
    ///
    /// # Errors
    ///
    /// [`RecordError::MalformedRecord`] when the entry is not a
    /// `{type, data}` object, [`RecordError::UnknownCategory`] for an
    /// unrecognized label, [`RecordError::InvalidCoordinate`] for a
    /// coordinate that is not an integer, and
    /// [`RecordError::ExtentMismatch`] when a range category does not carry
    /// exactly two coordinates.
    pub fn to_record(&self) -> Result<FeatureRecord, RecordError> {
        let shape = RecordShape::deserialize(&self.0)
            .map_err(|e| RecordError::MalformedRecord(e.to_string()))?;
        let category: FeatureCategory = shape.kind.parse()?;
        let data = shape
            .data
            .iter()
            .map(|n| {
                n.as_i64()
                    .ok_or_else(|| RecordError::InvalidCoordinate(n.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match (category.extent_kind(), data.as_slice()) {
            (ExtentKind::Range, &[start, end]) => {
                Ok(FeatureRecord::range(category, start, end))
            }
            (ExtentKind::Range, other) => Err(RecordError::ExtentMismatch {
                category: category.label().to_owned(),
                len: other.len(),
            }),
            (ExtentKind::Positions, _) => {
                Ok(FeatureRecord::positions(category, data))
            }
        }
    }
}

/// Parse the JSON record list.
///
/// # Errors
///
/// [`TrackError::RecordsParse`] if the document is not a JSON list.
/// Individual bad entries are not errors here; they are rejected later by
/// normalization.
pub fn parse_records(json: &str) -> Result<Vec<RawRecord>, TrackError> {
    serde_json::from_str(json).map_err(|e| TrackError::RecordsParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for category in FeatureCategory::LANES {
            assert_eq!(category.label().parse::<FeatureCategory>(), Ok(category));
        }
        assert_eq!(
            "Introns".parse::<FeatureCategory>(),
            Err(RecordError::UnknownCategory("Introns".to_owned()))
        );
    }

    #[test]
    fn only_variant_lanes_are_selectable() {
        assert!(!FeatureCategory::Exon.selectable());
        assert!(!FeatureCategory::Domain.selectable());
        assert!(FeatureCategory::MissenseVariant.selectable());
        assert!(FeatureCategory::LossOfFunctionVariant.selectable());
        assert!(FeatureCategory::ClinicalVariant.selectable());
    }

    #[test]
    fn serde_uses_lane_labels() {
        let json = serde_json::to_string(&FeatureCategory::LossOfFunctionVariant)
            .unwrap();
        assert_eq!(json, "\"gnomAD LoF\"");
    }

    #[test]
    fn raw_records_resolve_by_category() {
        let raw = parse_records(
            r#"[
                {"type": "Exons", "data": [1, 100]},
                {"type": "ClinVar variants", "data": [5, 9, 9]},
                {"type": "Exons", "data": [1, 2, 3]},
                {"type": "Introns", "data": [4, 8]}
            ]"#,
        )
        .unwrap();
        assert_eq!(raw.len(), 4);

        assert_eq!(
            raw[0].to_record(),
            Ok(FeatureRecord::range(FeatureCategory::Exon, 1, 100))
        );
        assert_eq!(
            raw[1].to_record(),
            Ok(FeatureRecord::positions(
                FeatureCategory::ClinicalVariant,
                vec![5, 9, 9]
            ))
        );
        assert_eq!(
            raw[2].to_record(),
            Err(RecordError::ExtentMismatch {
                category: "Exons".to_owned(),
                len: 3
            })
        );
        assert!(matches!(
            raw[3].to_record(),
            Err(RecordError::UnknownCategory(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_records("{\"type\": \"Exons\"}"),
            Err(TrackError::RecordsParse(_))
        ));
    }

    #[test]
    fn bad_entries_do_not_fail_the_list() {
        let raw = parse_records(
            r#"[
                {"type": "Exons", "data": [1, 100]},
                {"type": "gnomAD LoF", "data": [99999999999999999999]},
                {"type": "gnomAD missense", "data": [7.5]},
                {"type": "ClinVar variants"},
                "Exons",
                {"type": "gnomAD LoF", "data": [731]}
            ]"#,
        )
        .unwrap();
        assert_eq!(raw.len(), 6);

        assert_eq!(
            raw[0].to_record(),
            Ok(FeatureRecord::range(FeatureCategory::Exon, 1, 100))
        );
        assert!(matches!(
            raw[1].to_record(),
            Err(RecordError::InvalidCoordinate(_))
        ));
        assert_eq!(
            raw[2].to_record(),
            Err(RecordError::InvalidCoordinate("7.5".to_owned()))
        );
        assert!(matches!(
            raw[3].to_record(),
            Err(RecordError::MalformedRecord(_))
        ));
        assert!(matches!(
            raw[4].to_record(),
            Err(RecordError::MalformedRecord(_))
        ));
        assert_eq!(
            raw[5].to_record(),
            Ok(FeatureRecord::positions(
                FeatureCategory::LossOfFunctionVariant,
                vec![731]
            ))
        );
    }

    #[test]
    fn new_builds_the_wire_shape() {
        let raw = RawRecord::new("gnomAD missense", &[12, 480]);
        assert_eq!(
            raw.value(),
            &serde_json::json!({ "type": "gnomAD missense", "data": [12, 480] })
        );
    }
}
