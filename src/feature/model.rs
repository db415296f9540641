//! Normalization of records into one drawable glyph per feature instance.
//!
//! A range record becomes one glyph; a point-set record becomes one glyph
//! per position, each with its own selection key. Glyph indices count the
//! accepted glyphs of a lane in input order, so `"gnomAD missense-3"` is the
//! fourth missense glyph regardless of how the positions were grouped into
//! records.

use rustc_hash::FxHashMap;

use super::{Extent, FeatureCategory, FeatureRecord, RawRecord};
use crate::error::RecordError;
use crate::selection::SelectionKey;

/// A glyph covering a residue run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanGlyph {
    /// Selection key of this glyph.
    pub key: SelectionKey,
    /// First residue.
    pub start: u32,
    /// Last residue (inclusive).
    pub end: u32,
}

/// A glyph marking a single residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointGlyph {
    /// Selection key of this glyph.
    pub key: SelectionKey,
    /// The residue.
    pub position: u32,
}

/// One drawable feature instance, tagged by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawableGlyph {
    /// Exon bar.
    Exon(SpanGlyph),
    /// Domain bar.
    Domain(SpanGlyph),
    /// Missense circle.
    Missense(PointGlyph),
    /// Loss-of-function square.
    LossOfFunction(PointGlyph),
    /// ClinVar triangle.
    Clinical(PointGlyph),
}

impl DrawableGlyph {
    /// Category of the glyph.
    #[must_use]
    pub const fn category(&self) -> FeatureCategory {
        match self {
            Self::Exon(_) => FeatureCategory::Exon,
            Self::Domain(_) => FeatureCategory::Domain,
            Self::Missense(_) => FeatureCategory::MissenseVariant,
            Self::LossOfFunction(_) => FeatureCategory::LossOfFunctionVariant,
            Self::Clinical(_) => FeatureCategory::ClinicalVariant,
        }
    }

    /// Selection key of the glyph.
    #[must_use]
    pub const fn key(&self) -> &SelectionKey {
        match self {
            Self::Exon(s) | Self::Domain(s) => &s.key,
            Self::Missense(p) | Self::LossOfFunction(p) | Self::Clinical(p) => {
                &p.key
            }
        }
    }

    /// Every residue the glyph covers, in ascending order.
    #[must_use]
    pub fn residues(&self) -> Vec<u32> {
        match self {
            Self::Exon(s) | Self::Domain(s) => (s.start..=s.end).collect(),
            Self::Missense(p) | Self::LossOfFunction(p) | Self::Clinical(p) => {
                vec![p.position]
            }
        }
    }

    /// Hover text: `"Position: {p}"` for points, `"{start}-{end}"` for
    /// ranges.
    #[must_use]
    pub fn tooltip(&self) -> String {
        match self {
            Self::Exon(s) | Self::Domain(s) => format!("{}-{}", s.start, s.end),
            Self::Missense(p) | Self::LossOfFunction(p) | Self::Clinical(p) => {
                format!("Position: {}", p.position)
            }
        }
    }

    /// The residue run, for bar glyphs.
    #[must_use]
    pub const fn as_span(&self) -> Option<&SpanGlyph> {
        match self {
            Self::Exon(s) | Self::Domain(s) => Some(s),
            Self::Missense(_) | Self::LossOfFunction(_) | Self::Clinical(_) => {
                None
            }
        }
    }

    /// The marked residue, for point glyphs.
    #[must_use]
    pub const fn as_point(&self) -> Option<&PointGlyph> {
        match self {
            Self::Missense(p) | Self::LossOfFunction(p) | Self::Clinical(p) => {
                Some(p)
            }
            Self::Exon(_) | Self::Domain(_) => None,
        }
    }

    fn from_span(category: FeatureCategory, glyph: SpanGlyph) -> Option<Self> {
        match category {
            FeatureCategory::Exon => Some(Self::Exon(glyph)),
            FeatureCategory::Domain => Some(Self::Domain(glyph)),
            FeatureCategory::MissenseVariant
            | FeatureCategory::LossOfFunctionVariant
            | FeatureCategory::ClinicalVariant => None,
        }
    }

    fn from_point(category: FeatureCategory, glyph: PointGlyph) -> Option<Self> {
        match category {
            FeatureCategory::MissenseVariant => Some(Self::Missense(glyph)),
            FeatureCategory::LossOfFunctionVariant => {
                Some(Self::LossOfFunction(glyph))
            }
            FeatureCategory::ClinicalVariant => Some(Self::Clinical(glyph)),
            FeatureCategory::Exon | FeatureCategory::Domain => None,
        }
    }
}

/// Output of normalization: accepted glyphs plus the records left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Glyphs in input order.
    pub glyphs: Vec<DrawableGlyph>,
    /// `(record index, reason)` for every excluded record.
    pub rejected: Vec<(usize, RecordError)>,
}

fn check_position(position: i64, domain_max: u32) -> Result<u32, RecordError> {
    u32::try_from(position)
        .ok()
        .filter(|&p| p <= domain_max)
        .ok_or(RecordError::PositionOutOfDomain {
            position,
            domain_max,
        })
}

fn mismatch(record: &FeatureRecord, len: usize) -> RecordError {
    RecordError::ExtentMismatch {
        category: record.category.label().to_owned(),
        len,
    }
}

/// Validate one record and expand it into glyphs. `next_index` hands out
/// per-lane glyph indices and is only advanced for accepted records.
fn expand(
    record: &FeatureRecord,
    domain_max: u32,
    next_index: &mut FxHashMap<FeatureCategory, usize>,
) -> Result<Vec<DrawableGlyph>, RecordError> {
    let category = record.category;
    let base = next_index.get(&category).copied().unwrap_or(0);

    let glyphs = match &record.extent {
        Extent::Range { start, end } => {
            if end < start {
                return Err(RecordError::MalformedRange {
                    start: *start,
                    end: *end,
                });
            }
            let glyph = SpanGlyph {
                key: SelectionKey::instance(category, base),
                start: check_position(*start, domain_max)?,
                end: check_position(*end, domain_max)?,
            };
            vec![DrawableGlyph::from_span(category, glyph)
                .ok_or_else(|| mismatch(record, 2))?]
        }
        Extent::Positions(positions) => {
            let checked = positions
                .iter()
                .map(|&p| check_position(p, domain_max))
                .collect::<Result<Vec<_>, _>>()?;
            checked
                .into_iter()
                .enumerate()
                .map(|(i, position)| {
                    let glyph = PointGlyph {
                        key: SelectionKey::instance(category, base + i),
                        position,
                    };
                    DrawableGlyph::from_point(category, glyph)
                        .ok_or_else(|| mismatch(record, positions.len()))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let _ = next_index.insert(category, base + glyphs.len());
    Ok(glyphs)
}

/// Normalize typed records against the domain `[0, domain_max]`.
///
/// Never fails as a whole: each malformed record is logged, listed in
/// [`Normalized::rejected`], and skipped.
#[must_use]
pub fn normalize(records: &[FeatureRecord], domain_max: u32) -> Normalized {
    let mut out = Normalized::default();
    let mut next_index = FxHashMap::default();

    for (idx, record) in records.iter().enumerate() {
        match expand(record, domain_max, &mut next_index) {
            Ok(glyphs) => out.glyphs.extend(glyphs),
            Err(e) => {
                log::warn!("Skipping feature record {idx}: {e}");
                out.rejected.push((idx, e));
            }
        }
    }

    log::debug!(
        "normalized {} record(s) into {} glyph(s), {} rejected",
        records.len(),
        out.glyphs.len(),
        out.rejected.len()
    );
    out
}

/// Normalize raw `{type, data}` records. Entries that do not resolve to a
/// [`FeatureRecord`] (malformed objects, unknown categories, non-integer
/// coordinates, extent mismatches) are rejected with their input index.
#[must_use]
pub fn normalize_raw(raw: &[RawRecord], domain_max: u32) -> Normalized {
    let mut records = Vec::with_capacity(raw.len());
    let mut origin = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for (idx, r) in raw.iter().enumerate() {
        match r.to_record() {
            Ok(record) => {
                records.push(record);
                origin.push(idx);
            }
            Err(e) => {
                log::warn!("Skipping feature record {idx}: {e}");
                rejected.push((idx, e));
            }
        }
    }

    let mut out = normalize(&records, domain_max);
    for (idx, _) in &mut out.rejected {
        *idx = origin[*idx];
    }
    out.rejected.extend(rejected);
    out.rejected.sort_by_key(|(idx, _)| *idx);
    out
}
