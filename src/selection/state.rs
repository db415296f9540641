//! Selection keys and the set of currently selected keys.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::feature::FeatureCategory;

/// Identity of a selectable unit: a whole lane (`"{category}"`) or a single
/// glyph (`"{category}-{index}"`).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SelectionKey(String);

impl SelectionKey {
    /// Key for a whole lane.
    #[must_use]
    pub fn category(category: FeatureCategory) -> Self {
        Self(category.label().to_owned())
    }

    /// Key for the `index`-th glyph of a lane.
    #[must_use]
    pub fn instance(category: FeatureCategory, index: usize) -> Self {
        Self(format!("{}-{index}", category.label()))
    }

    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SelectionKey {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

/// The set of selected keys.
///
/// Lane keys and glyph keys are independent members: selecting a lane does
/// not insert its glyph keys. Emphasis of a glyph is decided at render time
/// by [`emphasizes`](Self::emphasizes), which checks both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    keys: FxHashSet<SelectionKey>,
}

impl SelectionState {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` if absent, remove it if present. Returns `true` if the key
    /// is selected afterwards.
    pub fn toggle(&mut self, key: &SelectionKey) -> bool {
        if self.keys.remove(key) {
            false
        } else {
            self.keys.insert(key.clone())
        }
    }

    /// Copy of this selection with `key` toggled.
    #[must_use]
    pub fn toggled(&self, key: &SelectionKey) -> Self {
        let mut next = self.clone();
        let _ = next.toggle(key);
        next
    }

    /// Remove every key. Returns `true` if the selection was non-empty.
    pub fn clear(&mut self) -> bool {
        if self.keys.is_empty() {
            false
        } else {
            self.keys.clear();
            true
        }
    }

    /// Whether `key` itself is a member.
    #[must_use]
    pub fn contains(&self, key: &SelectionKey) -> bool {
        self.keys.contains(key)
    }

    /// Whether a glyph keyed `key` in lane `category` is drawn emphasized:
    /// either the glyph or its whole lane is selected.
    #[must_use]
    pub fn emphasizes(
        &self,
        key: &SelectionKey,
        category: FeatureCategory,
    ) -> bool {
        self.keys.contains(key)
            || self.keys.contains(&SelectionKey::category(category))
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selected keys in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectionKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missense(i: usize) -> SelectionKey {
        SelectionKey::instance(FeatureCategory::MissenseVariant, i)
    }

    #[test]
    fn key_formats() {
        assert_eq!(missense(3).as_str(), "gnomAD missense-3");
        assert_eq!(
            SelectionKey::category(FeatureCategory::ClinicalVariant).as_str(),
            "ClinVar variants"
        );
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = SelectionState::new();
        assert!(state.toggle(&missense(1)));
        assert!(state.contains(&missense(1)));
        assert!(!state.toggle(&missense(1)));
        assert!(state.is_empty());
    }

    #[test]
    fn double_toggle_is_identity() {
        let mut base = SelectionState::new();
        let _ = base.toggle(&missense(0));
        let _ = base.toggle(&SelectionKey::category(
            FeatureCategory::LossOfFunctionVariant,
        ));

        for key in [
            missense(0),
            missense(7),
            SelectionKey::category(FeatureCategory::LossOfFunctionVariant),
            SelectionKey::category(FeatureCategory::ClinicalVariant),
        ] {
            assert_eq!(base.toggled(&key).toggled(&key), base);
        }
    }

    #[test]
    fn lane_and_glyph_keys_are_independent() {
        let lane = SelectionKey::category(FeatureCategory::MissenseVariant);
        let mut state = SelectionState::new();
        let _ = state.toggle(&lane);
        assert!(!state.contains(&missense(2)));
        assert!(state.emphasizes(&missense(2), FeatureCategory::MissenseVariant));

        let _ = state.toggle(&missense(2));
        let _ = state.toggle(&lane);
        assert!(state.contains(&missense(2)));
        assert!(!state.contains(&lane));
        assert!(!state.emphasizes(&missense(3), FeatureCategory::MissenseVariant));
    }

    #[test]
    fn clear_reports_change() {
        let mut state = SelectionState::new();
        assert!(!state.clear());
        let _ = state.toggle(&missense(0));
        assert!(state.clear());
        assert_eq!(state.len(), 0);
    }
}
