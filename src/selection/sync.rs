//! Click → viewer command translation.
//!
//! Every selectable unit is either Neutral (key absent) or Emphasized (key
//! present). A click flips it:
//!
//! ```text
//! Neutral    -> Emphasized: Select(r), SetStyle(sphere), SetColor(base)
//! Emphasized -> Neutral:    Select(r), SetStyle(ribbon), SetColor(confidence),
//!                           ClearHighlight
//! ```
//!
//! and both directions then end with `Clear, ClearHighlight` so the next
//! click starts from a clean viewer context. Deselection restores the one
//! configured default style and color, not whatever the residues looked like
//! before they were selected.

use crate::error::TrackError;
use crate::feature::FeatureCategory;
use crate::options::{ColorOptions, Options, ViewerOptions};
use crate::selection::{SelectionKey, SelectionState};
use crate::viewer::{ViewerColor, ViewerCommand};

/// A clickable unit resolved against the track: its key, lane, and every
/// residue it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableUnit {
    /// Lane or glyph key.
    pub key: SelectionKey,
    /// Lane the unit belongs to.
    pub category: FeatureCategory,
    /// Residues to select in the viewer, ascending.
    pub residues: Vec<u32>,
}

/// Direction of a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Neutral → Emphasized.
    Emphasize,
    /// Emphasized → Neutral.
    Neutralize,
}

/// Owns the [`SelectionState`] and keeps the structure viewer in step with
/// it.
///
/// Commands are fire-and-forget: the state is updated as soon as the
/// commands are produced, without waiting for (or rolling back on) viewer
/// failures.
#[derive(Debug, Clone)]
pub struct SelectionSynchronizer {
    state: SelectionState,
    colors: ColorOptions,
    viewer: ViewerOptions,
}

impl SelectionSynchronizer {
    /// Synchronizer with an empty selection.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            state: SelectionState::new(),
            colors: options.colors.clone(),
            viewer: options.viewer.clone(),
        }
    }

    /// Current selection (read-only).
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Which way a click on `key` would go.
    #[must_use]
    pub fn transition_for(&self, key: &SelectionKey) -> Transition {
        if self.state.contains(key) {
            Transition::Neutralize
        } else {
            Transition::Emphasize
        }
    }

    /// Handle a click on `unit`: emit the transition's commands and flip its
    /// key. Units of non-selectable lanes produce nothing and change nothing.
    pub fn click(&mut self, unit: &SelectableUnit) -> Vec<ViewerCommand> {
        if !unit.category.selectable() {
            log::debug!("ignoring click on non-selectable '{}'", unit.key);
            return Vec::new();
        }

        let transition = self.transition_for(&unit.key);
        let mut commands = vec![ViewerCommand::select(unit.residues.clone())];
        match transition {
            Transition::Emphasize => {
                commands.push(ViewerCommand::style(self.viewer.emphasized_style));
                commands.push(ViewerCommand::color(self.colors.base(unit.category)));
            }
            Transition::Neutralize => {
                commands.extend(self.neutral_commands());
            }
        }
        let selected = self.state.toggle(&unit.key);
        commands.extend(Self::reset_commands());

        log::debug!(
            "{:?} '{}' ({} residue(s)), selected={selected}",
            transition,
            unit.key,
            unit.residues.len()
        );
        commands
    }

    /// Drop every selected key, restoring the viewer default on `units` (the
    /// resolved currently-selected units). Emits nothing if nothing was
    /// selected.
    pub fn clear(&mut self, units: &[SelectableUnit]) -> Vec<ViewerCommand> {
        if !self.state.clear() {
            return Vec::new();
        }
        let mut residues: Vec<u32> = units
            .iter()
            .flat_map(|u| u.residues.iter().copied())
            .collect();
        residues.sort_unstable();
        residues.dedup();

        let mut commands = vec![ViewerCommand::select(residues)];
        commands.extend(self.neutral_commands());
        commands.extend(Self::reset_commands());
        commands
    }

    /// One-off highlight of a single residue, used when a track is mounted.
    /// Leaves the selection untouched.
    #[must_use]
    pub fn focus(&self, residue: u32) -> Vec<ViewerCommand> {
        let mut commands = vec![
            ViewerCommand::select(vec![residue]),
            ViewerCommand::style(self.viewer.emphasized_style),
            ViewerCommand::color(self.viewer.focus_color),
        ];
        commands.extend(Self::reset_commands());
        commands
    }

    /// Color the run `start..=end` in the viewer. Leaves the selection
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`TrackError::InvalidRange`] if the run is reversed or leaves
    /// `[0, domain_max]`.
    pub fn paint_range(
        &self,
        start: i64,
        end: i64,
        color: ViewerColor,
        domain_max: u32,
    ) -> Result<Vec<ViewerCommand>, TrackError> {
        let invalid = || TrackError::InvalidRange { start, end };
        let first = u32::try_from(start).map_err(|_| invalid())?;
        let last = u32::try_from(end).map_err(|_| invalid())?;
        if first > last || last > domain_max {
            return Err(invalid());
        }

        let mut commands = vec![
            ViewerCommand::select((first..=last).collect()),
            ViewerCommand::color(color),
        ];
        commands.extend(Self::reset_commands());
        Ok(commands)
    }

    fn neutral_commands(&self) -> [ViewerCommand; 3] {
        [
            ViewerCommand::style(self.viewer.neutral_style),
            ViewerCommand::color(self.viewer.neutral_color),
            ViewerCommand::ClearHighlight,
        ]
    }

    const fn reset_commands() -> [ViewerCommand; 2] {
        [ViewerCommand::Clear, ViewerCommand::ClearHighlight]
    }
}
