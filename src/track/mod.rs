//! The feature track: lanes of glyphs on a residue axis.
//!
//! A [`FeatureTrack`] owns the normalized glyphs and the two scales derived
//! from the layout options. [`FeatureTrack::render`] is a pure function of
//! the track and a [`SelectionState`]: it returns the full list of
//! [`DrawCommand`]s for one frame (frame, ticks, lane labels, glyphs), in
//! paint order.

pub mod draw;
pub mod surface;

use glam::Vec2;
use rustc_hash::FxHashMap;

pub use draw::{ClickTarget, Cursor, DrawCommand, Shape, Stroke};

use crate::error::RecordError;
use crate::feature::{
    normalize, normalize_raw, DrawableGlyph, FeatureCategory, FeatureRecord,
    GlyphShape, Normalized, RawRecord,
};
use crate::options::Options;
use crate::scale::{BandScale, LinearScale};
use crate::selection::{SelectableUnit, SelectionKey, SelectionState};

/// Tick mark length below the x axis.
const X_TICK_LENGTH: f32 = 6.0;
/// Offset of x tick labels below the axis.
const X_LABEL_OFFSET: f32 = 18.0;
/// Rotation of x tick labels.
const X_LABEL_ROTATION: f32 = -45.0;
/// Gap between a lane label and the y axis.
const Y_LABEL_GAP: f32 = 8.0;
/// Baseline nudge so lane labels sit visually centered on the band.
const Y_LABEL_BASELINE: f32 = 3.0;
/// Tick mark length left of the y axis.
const Y_TICK_LENGTH: f32 = 3.0;

/// Normalized glyphs plus the scales that place them.
#[derive(Debug, Clone)]
pub struct FeatureTrack {
    glyphs: Vec<DrawableGlyph>,
    index: FxHashMap<SelectionKey, usize>,
    rejected: Vec<(usize, RecordError)>,
    x_scale: LinearScale,
    y_scale: BandScale,
    options: Options,
}

impl FeatureTrack {
    /// Build a track from already-normalized glyphs.
    #[must_use]
    pub fn new(normalized: Normalized, options: &Options) -> Self {
        let layout = &options.layout;
        let x_scale = LinearScale::new(layout.domain_max, layout.inner_width());
        let y_scale = BandScale::new(
            &FeatureCategory::LANES,
            layout.inner_height(),
            layout.band_padding,
        );
        let index = normalized
            .glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| (g.key().clone(), i))
            .collect();

        log::info!(
            "Feature track: {} glyph(s) over residues 0..={}",
            normalized.glyphs.len(),
            layout.domain_max
        );
        Self {
            glyphs: normalized.glyphs,
            index,
            rejected: normalized.rejected,
            x_scale,
            y_scale,
            options: options.clone(),
        }
    }

    /// Normalize `records` against the configured domain and build a track.
    #[must_use]
    pub fn from_records(records: &[FeatureRecord], options: &Options) -> Self {
        Self::new(normalize(records, options.layout.domain_max), options)
    }

    /// Same as [`from_records`](Self::from_records) for raw `{type, data}`
    /// records.
    #[must_use]
    pub fn from_raw(raw: &[RawRecord], options: &Options) -> Self {
        Self::new(normalize_raw(raw, options.layout.domain_max), options)
    }

    /// Accepted glyphs in input order.
    #[must_use]
    pub fn glyphs(&self) -> &[DrawableGlyph] {
        &self.glyphs
    }

    /// Glyph with the given key.
    #[must_use]
    pub fn glyph(&self, key: &SelectionKey) -> Option<&DrawableGlyph> {
        self.index.get(key).map(|&i| &self.glyphs[i])
    }

    /// Records left out during normalization, with the reason.
    #[must_use]
    pub fn rejected(&self) -> &[(usize, RecordError)] {
        &self.rejected
    }

    /// Residue → x pixel scale (plot-relative).
    #[must_use]
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Lane → y band scale (plot-relative).
    #[must_use]
    pub fn y_scale(&self) -> &BandScale {
        &self.y_scale
    }

    /// Options the track was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Hover text for the glyph keyed `key`, built on request.
    #[must_use]
    pub fn tooltip(&self, key: &SelectionKey) -> Option<String> {
        self.glyph(key).map(DrawableGlyph::tooltip)
    }

    /// Resolve a glyph or lane key into the unit a click on it refers to.
    ///
    /// A lane unit covers every residue of the lane's glyphs, ascending and
    /// without repeats. Returns `None` for unknown keys and for keys of
    /// non-selectable lanes.
    #[must_use]
    pub fn resolve_key(&self, key: &SelectionKey) -> Option<SelectableUnit> {
        if let Some(glyph) = self.glyph(key) {
            let category = glyph.category();
            return category.selectable().then(|| SelectableUnit {
                key: key.clone(),
                category,
                residues: glyph.residues(),
            });
        }
        let category: FeatureCategory = key.as_str().parse().ok()?;
        category.selectable().then(|| self.lane_unit(category))
    }

    /// Resolve a click handler reference from a [`DrawCommand`].
    #[must_use]
    pub fn resolve_click(&self, target: &ClickTarget) -> Option<SelectableUnit> {
        match target {
            ClickTarget::Glyph(key) => self.resolve_key(key),
            ClickTarget::Lane(category) => {
                self.resolve_key(&SelectionKey::category(*category))
            }
        }
    }

    fn lane_unit(&self, category: FeatureCategory) -> SelectableUnit {
        let mut residues: Vec<u32> = self
            .glyphs
            .iter()
            .filter(|g| g.category() == category)
            .flat_map(DrawableGlyph::residues)
            .collect();
        residues.sort_unstable();
        residues.dedup();
        SelectableUnit {
            key: SelectionKey::category(category),
            category,
            residues,
        }
    }

    /// Draw commands for one frame, in paint order: axis frame, x ticks,
    /// lane labels, glyphs.
    #[must_use]
    pub fn render(&self, selection: &SelectionState) -> Vec<DrawCommand> {
        let mut out = Vec::with_capacity(self.glyphs.len() + 32);
        self.render_frame(&mut out);
        self.render_x_axis(&mut out);
        self.render_lanes(selection, &mut out);
        for glyph in &self.glyphs {
            if let Some(cmd) = self.render_glyph(glyph, selection) {
                out.push(cmd);
            }
        }
        out
    }

    /// Top-left corner of the plot area on the canvas.
    fn origin(&self) -> Vec2 {
        let layout = &self.options.layout;
        Vec2::new(layout.margin_left, layout.margin_top)
    }

    fn plot_size(&self) -> Vec2 {
        let layout = &self.options.layout;
        Vec2::new(layout.inner_width(), layout.inner_height())
    }

    fn render_frame(&self, out: &mut Vec<DrawCommand>) {
        let o = self.origin();
        let size = self.plot_size();
        let axis = self.options.colors.axis;
        let corners = [
            o,
            o + Vec2::new(size.x, 0.0),
            o + size,
            o + Vec2::new(0.0, size.y),
        ];
        for (i, &from) in corners.iter().enumerate() {
            let to = corners[(i + 1) % corners.len()];
            out.push(DrawCommand::line(from, to, axis));
        }
    }

    fn render_x_axis(&self, out: &mut Vec<DrawCommand>) {
        let o = self.origin();
        let height = self.plot_size().y;
        let colors = &self.options.colors;
        let font_size = self.options.layout.font_size;

        for tick in self.x_scale.ticks(self.options.layout.min_tick_spacing) {
            let x = o.x + self.x_scale.map(tick as f32);
            let bottom = o.y + height;
            out.push(DrawCommand::line(
                Vec2::new(x, o.y),
                Vec2::new(x, bottom),
                colors.grid,
            ));
            out.push(DrawCommand::line(
                Vec2::new(x, bottom),
                Vec2::new(x, bottom + X_TICK_LENGTH),
                colors.axis,
            ));
            out.push(
                DrawCommand::new(Shape::Text {
                    anchor: Vec2::new(x, bottom + X_LABEL_OFFSET),
                    content: tick.to_string(),
                    rotation: X_LABEL_ROTATION,
                    font_size,
                    bold: false,
                })
                .with_fill(colors.axis)
                .with_cursor(Cursor::Help),
            );
        }
    }

    fn render_lanes(
        &self,
        selection: &SelectionState,
        out: &mut Vec<DrawCommand>,
    ) {
        let o = self.origin();
        let colors = &self.options.colors;
        let font_size = self.options.layout.font_size;

        for &category in self.y_scale.lanes() {
            let Some(band) = self.y_scale.band(category) else {
                continue;
            };
            let y = o.y + band.center();
            let selected = selection.contains(&SelectionKey::category(category));
            let mut label = DrawCommand::new(Shape::Text {
                anchor: Vec2::new(o.x - Y_LABEL_GAP, y + Y_LABEL_BASELINE),
                content: category.label().to_owned(),
                rotation: 0.0,
                font_size,
                bold: selected,
            })
            .with_fill(colors.axis);
            label.emphasized = selected;
            if category.selectable() {
                label = label.clickable(ClickTarget::Lane(category));
            }
            out.push(label);
            out.push(DrawCommand::line(
                Vec2::new(o.x - Y_TICK_LENGTH, y),
                Vec2::new(o.x, y),
                colors.axis,
            ));
        }
    }

    fn render_glyph(
        &self,
        glyph: &DrawableGlyph,
        selection: &SelectionState,
    ) -> Option<DrawCommand> {
        let category = glyph.category();
        let band = self.y_scale.band(category)?;
        let o = self.origin();
        let sizes = &self.options.glyphs;
        let center_y = o.y + band.center();
        let x = |residue: u32| o.x + self.x_scale.map(residue as f32);

        let shape = match category.shape() {
            GlyphShape::Bar => {
                let span = glyph.as_span()?;
                let x0 = x(span.start);
                let width = (x(span.end) - x0).max(sizes.min_bar_width);
                Shape::Rect {
                    origin: Vec2::new(x0, center_y - sizes.bar_height / 2.0),
                    size: Vec2::new(width, sizes.bar_height),
                }
            }
            GlyphShape::Circle => Shape::Circle {
                center: Vec2::new(x(glyph.as_point()?.position), center_y),
                radius: sizes.missense_radius,
            },
            // Left edge on the residue, vertically centered on the band.
            GlyphShape::Square => Shape::Rect {
                origin: Vec2::new(
                    x(glyph.as_point()?.position),
                    center_y - sizes.lof_size / 2.0,
                ),
                size: Vec2::splat(sizes.lof_size),
            },
            GlyphShape::Triangle => {
                let m = x(glyph.as_point()?.position);
                let h = sizes.clinvar_half_size;
                Shape::Triangle {
                    points: [
                        Vec2::new(m, center_y + h),
                        Vec2::new(m + h, center_y - h),
                        Vec2::new(m - h, center_y - h),
                    ],
                }
            }
        };

        let key = glyph.key();
        let colors = &self.options.colors;
        let mut cmd =
            DrawCommand::new(shape).with_fill(colors.base(category));
        cmd.hover = Some(key.clone());
        if selection.emphasizes(key, category) {
            cmd = cmd
                .with_stroke(colors.emphasis_stroke, sizes.emphasis_stroke_width);
            cmd.emphasized = true;
        }
        if category.selectable() {
            cmd = cmd.clickable(ClickTarget::Glyph(key.clone()));
        }
        Some(cmd)
    }
}
