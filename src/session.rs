//! A mounted feature track and its live viewer connection.
//!
//! [`TrackSession`] is the single entry point a host drives: it owns the
//! [`FeatureTrack`], the [`SelectionSynchronizer`] and the
//! [`ViewerConnection`], and applies [`TrackCommand`]s to all three. Mounting
//! opens the connection; unmounting (or dropping the session) disposes it.

use crate::error::TrackError;
use crate::feature::{FeatureCategory, FeatureRecord, RawRecord};
use crate::options::Options;
use crate::selection::{
    SelectableUnit, SelectionKey, SelectionState, SelectionSynchronizer,
};
use crate::track::{surface, DrawCommand, FeatureTrack};
use crate::viewer::{
    ViewerBackend, ViewerColor, ViewerCommand, ViewerConnection,
};

/// Interaction the host forwards to a mounted track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackCommand {
    // ── Selection ──
    /// Toggle one glyph.
    ClickGlyph {
        /// Glyph key.
        key: SelectionKey,
    },
    /// Toggle a whole lane via its label.
    ClickLane {
        /// Lane clicked.
        category: FeatureCategory,
    },
    /// Drop every selection and restore the viewer default.
    ClearSelection,

    // ── Viewer ──
    /// Color a residue run in the viewer without touching the selection.
    PaintRange {
        /// First residue.
        start: i64,
        /// Last residue (inclusive).
        end: i64,
        /// Color to apply.
        color: ViewerColor,
    },
}

/// A feature track mounted against one structure viewer.
pub struct TrackSession<B: ViewerBackend> {
    track: FeatureTrack,
    sync: SelectionSynchronizer,
    viewer: ViewerConnection<B>,
}

impl<B: ViewerBackend> TrackSession<B> {
    /// Mount a track built from `records`, taking ownership of `backend`.
    ///
    /// Sends the configured focus highlight, if any.
    #[must_use]
    pub fn mount(records: &[FeatureRecord], options: &Options, backend: B) -> Self {
        Self::with_track(FeatureTrack::from_records(records, options), options, backend)
    }

    /// [`mount`](Self::mount) for raw `{type, data}` records.
    #[must_use]
    pub fn mount_raw(raw: &[RawRecord], options: &Options, backend: B) -> Self {
        Self::with_track(FeatureTrack::from_raw(raw, options), options, backend)
    }

    /// Mount an already-built track.
    #[must_use]
    pub fn with_track(track: FeatureTrack, options: &Options, backend: B) -> Self {
        let mut session = Self {
            sync: SelectionSynchronizer::new(options),
            viewer: ViewerConnection::open(backend),
            track,
        };
        session.send_focus(options);
        log::info!(
            "mounted feature track ({} glyph(s), {} rejected record(s))",
            session.track.glyphs().len(),
            session.track.rejected().len()
        );
        session
    }

    fn send_focus(&mut self, options: &Options) {
        let Some(residue) = options.viewer.focus_residue else {
            return;
        };
        if residue > options.layout.domain_max {
            log::warn!(
                "focus residue {residue} outside [0, {}], not highlighting",
                options.layout.domain_max
            );
            return;
        }
        self.viewer.dispatch(&self.sync.focus(residue));
    }

    /// Apply one interaction. Returns whether the selection changed.
    ///
    /// Clicks on unknown keys or on non-selectable lanes are no-ops.
    ///
    /// # Errors
    ///
    /// [`TrackError::InvalidRange`] for a `PaintRange` outside the domain.
    /// Viewer failures are not errors; they are logged by the connection.
    pub fn execute(&mut self, command: TrackCommand) -> Result<bool, TrackError> {
        let commands = match command {
            TrackCommand::ClickGlyph { key } => self.click(&key),
            TrackCommand::ClickLane { category } => {
                self.click(&SelectionKey::category(category))
            }
            TrackCommand::ClearSelection => {
                let units = self.selected_units();
                self.sync.clear(&units)
            }
            TrackCommand::PaintRange { start, end, color } => {
                let commands = self.sync.paint_range(
                    start,
                    end,
                    color,
                    self.track.x_scale().domain_max(),
                )?;
                self.viewer.dispatch(&commands);
                return Ok(false);
            }
        };
        let changed = !commands.is_empty();
        self.viewer.dispatch(&commands);
        Ok(changed)
    }

    fn click(&mut self, key: &SelectionKey) -> Vec<ViewerCommand> {
        match self.track.resolve_key(key) {
            Some(unit) => self.sync.click(&unit),
            None => {
                log::debug!("click on '{key}' ignored");
                Vec::new()
            }
        }
    }

    /// Currently selected keys resolved back into units, sorted by key.
    fn selected_units(&self) -> Vec<SelectableUnit> {
        let mut keys: Vec<&SelectionKey> = self.sync.state().iter().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(|k| self.track.resolve_key(k))
            .collect()
    }

    /// Draw commands for the current selection.
    #[must_use]
    pub fn render(&self) -> Vec<DrawCommand> {
        self.track.render(self.sync.state())
    }

    /// Current frame as SVG markup.
    #[must_use]
    pub fn render_svg(&self) -> String {
        let layout = &self.track.options().layout;
        surface::to_markup(&self.render(), layout.width, layout.height)
    }

    /// Hover text for a glyph.
    #[must_use]
    pub fn tooltip(&self, key: &SelectionKey) -> Option<String> {
        self.track.tooltip(key)
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.sync.state()
    }

    /// The mounted track.
    #[must_use]
    pub fn track(&self) -> &FeatureTrack {
        &self.track
    }

    /// The viewer connection.
    #[must_use]
    pub fn viewer(&self) -> &ViewerConnection<B> {
        &self.viewer
    }

    /// Unmount: dispose the viewer connection and hand the backend back.
    #[must_use]
    pub fn unmount(self) -> Option<B> {
        let Self { viewer, .. } = self;
        let backend = viewer.close();
        log::info!("unmounted feature track");
        backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::color::Rgb;
    use crate::viewer::{CommandLog, ViewerStyle};

    fn records() -> Vec<FeatureRecord> {
        vec![
            FeatureRecord::range(FeatureCategory::Exon, 1, 100),
            FeatureRecord::positions(
                FeatureCategory::MissenseVariant,
                vec![12, 480, 1033],
            ),
            FeatureRecord::range(FeatureCategory::Domain, 50, 20),
            FeatureRecord::positions(
                FeatureCategory::LossOfFunctionVariant,
                vec![731],
            ),
        ]
    }

    fn mount() -> TrackSession<CommandLog> {
        TrackSession::mount(&records(), &Options::default(), CommandLog::new())
    }

    fn sent(session: &TrackSession<CommandLog>) -> Vec<ViewerCommand> {
        session
            .viewer()
            .backend()
            .map(|log| log.commands().to_vec())
            .unwrap_or_default()
    }

    fn missense(i: usize) -> TrackCommand {
        TrackCommand::ClickGlyph {
            key: SelectionKey::instance(FeatureCategory::MissenseVariant, i),
        }
    }

    #[test]
    fn glyph_click_selects_in_viewer() {
        let mut session = mount();
        assert!(session.execute(missense(1)).unwrap());
        assert_eq!(
            sent(&session),
            vec![
                ViewerCommand::select(vec![480]),
                ViewerCommand::style(ViewerStyle::Sphere),
                ViewerCommand::color(Rgb::new(0, 0, 255)),
                ViewerCommand::Clear,
                ViewerCommand::ClearHighlight,
            ]
        );
        let emphasized = session.render().iter().filter(|c| c.emphasized).count();
        assert_eq!(emphasized, 1);
    }

    #[test]
    fn second_click_restores_default() {
        let mut session = mount();
        let _ = session.execute(missense(0)).unwrap();
        let _ = session.execute(missense(0)).unwrap();

        let commands = sent(&session);
        assert_eq!(commands.len(), 11);
        assert_eq!(commands[5], ViewerCommand::select(vec![12]));
        assert_eq!(commands[6], ViewerCommand::style(ViewerStyle::Ribbon));
        assert_eq!(commands[7], ViewerCommand::color(ViewerColor::Confidence));
        assert!(session.selection().is_empty());
        assert!(session.render().iter().all(|c| !c.emphasized));
    }

    #[test]
    fn exon_click_is_inert() {
        let mut session = mount();
        let changed = session
            .execute(TrackCommand::ClickGlyph {
                key: SelectionKey::instance(FeatureCategory::Exon, 0),
            })
            .unwrap();
        assert!(!changed);
        assert!(sent(&session).is_empty());
        assert!(session.selection().is_empty());

        let lane = session
            .execute(TrackCommand::ClickLane {
                category: FeatureCategory::Domain,
            })
            .unwrap();
        assert!(!lane);
        assert!(sent(&session).is_empty());
    }

    #[test]
    fn malformed_record_does_not_block_the_rest() {
        let session = mount();
        assert_eq!(session.track().rejected().len(), 1);
        assert_eq!(session.track().glyphs().len(), 5);
        assert_eq!(
            session.tooltip(&SelectionKey::instance(
                FeatureCategory::LossOfFunctionVariant,
                0
            )),
            Some("Position: 731".to_owned())
        );
    }

    #[test]
    fn lane_click_selects_whole_lane() {
        let mut session = mount();
        let _ = session
            .execute(TrackCommand::ClickLane {
                category: FeatureCategory::MissenseVariant,
            })
            .unwrap();
        assert_eq!(sent(&session)[0], ViewerCommand::select(vec![12, 480, 1033]));
        assert_eq!(session.selection().len(), 1);
        let emphasized = session
            .render()
            .iter()
            .filter(|c| c.emphasized && c.hover.is_some())
            .count();
        assert_eq!(emphasized, 3);
    }

    #[test]
    fn clear_selection_restores_every_unit() {
        let mut session = mount();
        let _ = session.execute(missense(2)).unwrap();
        let _ = session
            .execute(TrackCommand::ClickGlyph {
                key: SelectionKey::instance(
                    FeatureCategory::LossOfFunctionVariant,
                    0,
                ),
            })
            .unwrap();
        assert!(session.execute(TrackCommand::ClearSelection).unwrap());

        let commands = sent(&session);
        assert_eq!(commands[10], ViewerCommand::select(vec![731, 1033]));
        assert!(session.selection().is_empty());
        assert!(!session.execute(TrackCommand::ClearSelection).unwrap());
        assert_eq!(sent(&session).len(), commands.len());
    }

    #[test]
    fn paint_range_is_validated() {
        let mut session = mount();
        let ok = session.execute(TrackCommand::PaintRange {
            start: 10,
            end: 12,
            color: ViewerColor::Rgb(Rgb::new(0, 255, 0)),
        });
        assert!(matches!(ok, Ok(false)));
        assert_eq!(sent(&session).len(), 4);

        let err = session.execute(TrackCommand::PaintRange {
            start: 1800,
            end: 1900,
            color: ViewerColor::Confidence,
        });
        assert!(matches!(err, Err(TrackError::InvalidRange { .. })));
        assert_eq!(sent(&session).len(), 4);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn mount_focus_is_sent_once() {
        let mut options = Options::default();
        options.viewer.focus_residue = Some(500);
        let session =
            TrackSession::mount(&records(), &options, CommandLog::new());
        let commands = sent(&session);
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], ViewerCommand::select(vec![500]));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn unmount_disposes_connection() {
        let session = mount();
        let log = session.unmount().unwrap();
        assert!(log.is_disposed());
    }

    #[test]
    fn svg_reflects_selection() {
        let mut session = mount();
        assert!(!session.render_svg().contains("stroke-width=\"2.5\""));
        let _ = session.execute(missense(0)).unwrap();
        let markup = session.render_svg();
        assert!(markup.contains("stroke-width=\"2.5\""));
        assert!(markup.contains("data-key=\"gnomAD missense-0\""));
    }
}
