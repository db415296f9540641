//! Browser bindings (feature `web`).
//!
//! A host page builds a [`WebTrack`] from the records JSON and a callback
//! that receives each viewer command as a tagged JSON string:
//!
//! ```js
//! const track = new WebTrack(recordsJson, (cmd) => viewer.apply(JSON.parse(cmd)));
//! container.innerHTML = track.render_svg();
//! track.click("gnomAD missense-3");
//! track.free(); // sends {"command":"dispose"}
//! ```

use wasm_bindgen::prelude::*;

use crate::error::{RecordError, TrackError};
use crate::feature::{parse_records, FeatureCategory};
use crate::options::{self, Options};
use crate::selection::SelectionKey;
use crate::session::{TrackCommand, TrackSession};
use crate::viewer::{ViewerBackend, ViewerColor, ViewerCommand};

/// Payload sent to the callback when the connection is released.
const DISPOSE_MESSAGE: &str = r#"{"command":"dispose"}"#;

/// Viewer handle backed by a JS function.
pub struct JsBackend {
    callback: js_sys::Function,
}

impl JsBackend {
    /// Forward commands to `callback`.
    #[must_use]
    pub const fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }

    fn post(&self, message: &str) -> Result<(), TrackError> {
        let _ = self
            .callback
            .call1(&JsValue::NULL, &JsValue::from_str(message))
            .map_err(|e| TrackError::Viewer(format!("{e:?}")))?;
        Ok(())
    }
}

impl ViewerBackend for JsBackend {
    fn send(&mut self, command: &ViewerCommand) -> Result<(), TrackError> {
        let json = command
            .to_json()
            .map_err(|e| TrackError::Viewer(e.to_string()))?;
        self.post(&json)
    }

    fn dispose(&mut self) {
        if let Err(e) = self.post(DISPOSE_MESSAGE) {
            log::warn!("viewer dispose callback failed: {e}");
        }
    }
}

fn to_js(e: &TrackError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Install logging and the panic hook. Runs once when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if the host bundle already installed a logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install process-wide options from TOML. Only the first call succeeds.
///
/// # Errors
///
/// The TOML parse error, or an error if options were already installed.
#[wasm_bindgen]
pub fn install_options(toml: &str) -> Result<(), JsValue> {
    Options::from_toml(toml)
        .and_then(options::install)
        .map_err(|e| to_js(&e))
}

/// A mounted feature track driving a JS structure viewer.
#[wasm_bindgen]
pub struct WebTrack {
    session: TrackSession<JsBackend>,
}

#[wasm_bindgen]
impl WebTrack {
    /// Mount a track from `[{type, data}]` JSON using the installed options.
    ///
    /// # Errors
    ///
    /// If `records_json` is not a record list.
    #[wasm_bindgen(constructor)]
    pub fn new(
        records_json: &str,
        callback: js_sys::Function,
    ) -> Result<WebTrack, JsValue> {
        let raw = parse_records(records_json).map_err(|e| to_js(&e))?;
        let session = TrackSession::mount_raw(
            &raw,
            options::global(),
            JsBackend::new(callback),
        );
        Ok(Self { session })
    }

    /// Toggle the glyph keyed `key`. Returns whether the selection changed.
    ///
    /// # Errors
    ///
    /// Never in practice; kept fallible for a uniform JS surface.
    pub fn click(&mut self, key: &str) -> Result<bool, JsValue> {
        self.session
            .execute(TrackCommand::ClickGlyph {
                key: SelectionKey::from(key),
            })
            .map_err(|e| to_js(&e))
    }

    /// Toggle the lane labelled `label`.
    ///
    /// # Errors
    ///
    /// If `label` is not a lane label.
    pub fn click_lane(&mut self, label: &str) -> Result<bool, JsValue> {
        let category: FeatureCategory = label
            .parse()
            .map_err(|e: RecordError| JsValue::from_str(&e.to_string()))?;
        self.session
            .execute(TrackCommand::ClickLane { category })
            .map_err(|e| to_js(&e))
    }

    /// Drop the whole selection.
    ///
    /// # Errors
    ///
    /// Never in practice; kept fallible for a uniform JS surface.
    pub fn clear(&mut self) -> Result<bool, JsValue> {
        self.session
            .execute(TrackCommand::ClearSelection)
            .map_err(|e| to_js(&e))
    }

    /// Color residues `start..=end` in the viewer (`color` is a hex color
    /// or `"confidence"`).
    ///
    /// # Errors
    ///
    /// On an unparsable color or a range outside the domain.
    pub fn paint_range(
        &mut self,
        start: i32,
        end: i32,
        color: String,
    ) -> Result<(), JsValue> {
        let color =
            ViewerColor::try_from(color).map_err(|e| JsValue::from_str(&e))?;
        let _ = self
            .session
            .execute(TrackCommand::PaintRange {
                start: i64::from(start),
                end: i64::from(end),
                color,
            })
            .map_err(|e| to_js(&e))?;
        Ok(())
    }

    /// Hover text for the glyph keyed `key`.
    #[must_use]
    pub fn tooltip(&self, key: &str) -> Option<String> {
        self.session.tooltip(&SelectionKey::from(key))
    }

    /// Current frame as SVG markup.
    #[must_use]
    pub fn render_svg(&self) -> String {
        self.session.render_svg()
    }
}
