//! Centralized track/viewer options with TOML preset support.
//!
//! Layout, glyph sizes, colors, and viewer presentation are consolidated
//! here. Options serialize to/from TOML, and can be installed once as the
//! process-wide configuration via [`install`] and read back with [`global`].

mod colors;
mod glyphs;
mod layout;
mod viewer;

use std::path::Path;
use std::sync::OnceLock;

pub use colors::ColorOptions;
pub use glyphs::GlyphOptions;
pub use layout::LayoutOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewer::ViewerOptions;

use crate::error::TrackError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[layout]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Plot geometry and residue domain.
    pub layout: LayoutOptions,
    /// Glyph sizes.
    pub glyphs: GlyphOptions,
    /// Color palette.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Structure viewer presentation.
    pub viewer: ViewerOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`TrackError::OptionsParse`] on malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self, TrackError> {
        toml::from_str(text).map_err(|e| TrackError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`TrackError::Io`] if the file cannot be read,
    /// [`TrackError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, TrackError> {
        let content = std::fs::read_to_string(path).map_err(TrackError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded track options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`TrackError::OptionsParse`] if serialization fails,
    /// [`TrackError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), TrackError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrackError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TrackError::Io)?;
        }
        std::fs::write(path, content).map_err(TrackError::Io)
    }
}

static GLOBAL: OnceLock<Options> = OnceLock::new();

/// Install the process-wide options. Only the first call succeeds; the
/// options are read-only afterwards.
///
/// # Errors
///
/// [`TrackError::OptionsAlreadyInstalled`] if options were already installed
/// or [`global`] was already read.
pub fn install(options: Options) -> Result<(), TrackError> {
    GLOBAL
        .set(options)
        .map_err(|_| TrackError::OptionsAlreadyInstalled)
}

/// The process-wide options, falling back to (and fixing) the defaults if
/// nothing was installed.
pub fn global() -> &'static Options {
    GLOBAL.get_or_init(Options::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureCategory;
    use crate::util::color::Rgb;
    use crate::viewer::{ViewerColor, ViewerStyle};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[layout]
domain_max = 500

[colors]
missense = "#123456"

[viewer]
focus_residue = 42
neutral_color = "#FFFFFF"
"##;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.layout.domain_max, 500);
        assert_eq!(opts.layout.width, 1400.0);
        assert_eq!(
            opts.colors.base(FeatureCategory::MissenseVariant),
            Rgb::new(0x12, 0x34, 0x56)
        );
        assert_eq!(
            opts.colors.base(FeatureCategory::ClinicalVariant),
            Rgb::new(0xFF, 0xA5, 0x00)
        );
        assert_eq!(opts.viewer.focus_residue, Some(42));
        assert_eq!(
            opts.viewer.neutral_color,
            ViewerColor::Rgb(Rgb::new(255, 255, 255))
        );
        assert_eq!(opts.viewer.emphasized_style, ViewerStyle::Sphere);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(
            Options::from_toml("[layout]\nwidth = \"wide\""),
            Err(TrackError::OptionsParse(_))
        ));
    }

    #[test]
    fn inner_plot_size() {
        let layout = LayoutOptions::default();
        assert_eq!(layout.inner_width(), 1160.0);
        assert_eq!(layout.inner_height(), 220.0);
    }

    #[test]
    fn global_is_fixed_after_first_read() {
        let first = global();
        assert!(install(Options::default()).is_err());
        assert!(std::ptr::eq(first, global()));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("layout"));
        assert!(props.contains_key("glyphs"));
        assert!(props.contains_key("viewer"));
        assert!(!props.contains_key("colors"));

        let viewer = &props["viewer"]["properties"];
        assert!(viewer.get("neutral_style").is_some());
        assert!(viewer.get("focus_color").is_none());
    }
}
