use js_sys::{Array, Date};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use aas_animation_core::{
    AnimationTime, Axis, EditorConfig, EditorSession, Joint, Pose, ReleaseFeed, TickOutcome,
};

/// Editor session exposed to the web page. Freeing it (or letting the JS wrapper
/// be collected) disposes the playback clock.
#[wasm_bindgen]
pub struct AasEditor {
    session: EditorSession,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Host timestamp in ms; falls back to `Date.now()` when the caller passes nothing.
fn host_time(now_ms: Option<f64>) -> AnimationTime {
    AnimationTime::from_millis(now_ms.unwrap_or_else(Date::now))
}

fn parse_joint(joint: &str) -> Result<Joint, JsError> {
    joint
        .parse::<Joint>()
        .map_err(|e| JsError::new(&e.to_string()))
}

fn parse_axis(axis: &str) -> Result<Axis, JsError> {
    axis.parse::<Axis>().map_err(|e| JsError::new(&e.to_string()))
}

/// Shape handed to `pump` callers.
#[derive(Serialize)]
struct TickReport {
    advanced: bool,
    selection: usize,
    playing: bool,
}

#[wasm_bindgen]
impl AasEditor {
    /// Create a session. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new AasEditor({ default_name: "bow", default_interval_ticks: 5 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<AasEditor, JsError> {
        console_error_panic_hook::set_once();

        let cfg: EditorConfig = if jsvalue_is_undefined_or_null(&config) {
            EditorConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(AasEditor {
            session: EditorSession::new(cfg),
        })
    }

    // ----- keyframes -----

    /// Append a copy of the selected keyframe and select it. Returns its index.
    #[wasm_bindgen(js_name = append_keyframe)]
    pub fn append_keyframe(&mut self) -> usize {
        self.session.add_keyframe()
    }

    /// Duplicate the selected keyframe right after it. Returns the new index.
    #[wasm_bindgen(js_name = insert_keyframe)]
    pub fn insert_keyframe(&mut self) -> usize {
        self.session.insert_keyframe()
    }

    /// Remove the selected keyframe. Returns false when it was the only one.
    #[wasm_bindgen(js_name = remove_keyframe)]
    pub fn remove_keyframe(&mut self) -> bool {
        self.session.remove_keyframe().is_some()
    }

    /// Set one angle of the selected keyframe, e.g. `update_selected("left_arm", "x", -45)`.
    /// Values are clamped to [-180, 180].
    #[wasm_bindgen(js_name = update_selected)]
    pub fn update_selected(&mut self, joint: &str, axis: &str, value: f64) -> Result<(), JsError> {
        let joint = parse_joint(joint)?;
        let axis = parse_axis(axis)?;
        self.session.update_selected(joint, axis, value);
        Ok(())
    }

    /// Select a keyframe (clamped into range). Returns the index actually selected.
    #[wasm_bindgen(js_name = set_selection)]
    pub fn set_selection(&mut self, index: f64) -> usize {
        let index = if index.is_finite() && index > 0.0 {
            index as usize
        } else {
            0
        };
        self.session.select(index)
    }

    #[wasm_bindgen]
    pub fn selection(&self) -> usize {
        self.session.timeline().selected_index()
    }

    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.session.timeline().len()
    }

    #[wasm_bindgen(js_name = is_empty)]
    pub fn is_empty(&self) -> bool {
        self.session.timeline().is_empty()
    }

    /// Selected pose as `{ head: {x, y, z}, left_arm: ..., ... }` in degrees.
    #[wasm_bindgen(js_name = current_pose)]
    pub fn current_pose(&self) -> Result<JsValue, JsError> {
        let pose: Pose = self.session.current_pose();
        swb::to_value(&pose).map_err(|e| JsError::new(&format!("pose error: {e}")))
    }

    /// All keyframes as `[{ id, pose }]`.
    #[wasm_bindgen]
    pub fn keyframes(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.session.timeline().keyframes())
            .map_err(|e| JsError::new(&format!("keyframes error: {e}")))
    }

    /// Keyframe ids in order, for keying list items.
    #[wasm_bindgen(js_name = keyframe_ids)]
    pub fn keyframe_ids(&self) -> Array {
        self.session
            .timeline()
            .keyframes()
            .iter()
            .map(|k| JsValue::from_str(&k.id.to_string()))
            .collect()
    }

    /// "Frame N" label for the timeline bar.
    #[wasm_bindgen(js_name = frame_label)]
    pub fn frame_label(&self) -> String {
        self.session.frame_label()
    }

    /// Selection position in [0, 1] for the timeline bar fill.
    #[wasm_bindgen]
    pub fn progress(&self) -> f64 {
        self.session.progress()
    }

    // ----- playback -----

    /// Play/pause toggle. Returns true when playback is now running.
    #[wasm_bindgen(js_name = toggle_playback)]
    pub fn toggle_playback(&mut self, now_ms: Option<f64>) -> bool {
        self.session.toggle_playback(host_time(now_ms)).is_running()
    }

    #[wasm_bindgen(js_name = is_playing)]
    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    /// Call once per animation frame. Returns `{ advanced, selection, playing }`.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: Option<f64>) -> Result<JsValue, JsError> {
        let outcome = self.session.pump(host_time(now_ms));
        let report = TickReport {
            advanced: matches!(outcome, TickOutcome::Advanced(_)),
            selection: self.session.timeline().selected_index(),
            playing: self.session.is_playing(),
        };
        swb::to_value(&report).map_err(|e| JsError::new(&format!("tick error: {e}")))
    }

    /// Milliseconds timestamp at which `tick` next has work to do, if playing.
    #[wasm_bindgen(js_name = next_tick_due)]
    pub fn next_tick_due(&self) -> Option<f64> {
        self.session.next_poll_due().map(|t| t.as_millis())
    }

    // ----- metadata -----

    #[wasm_bindgen(js_name = set_interval)]
    pub fn set_interval(&mut self, ticks: f64) -> u32 {
        self.session.set_interval_ticks(ticks)
    }

    #[wasm_bindgen]
    pub fn interval(&self) -> u32 {
        self.session.interval_ticks()
    }

    #[wasm_bindgen(js_name = set_name)]
    pub fn set_name(&mut self, name: String) {
        self.session.set_name(name);
    }

    #[wasm_bindgen]
    pub fn name(&self) -> String {
        self.session.name().to_string()
    }

    // ----- files -----

    /// Build the download: `{ fileName, mediaType, contents }`.
    #[wasm_bindgen(js_name = export_animation)]
    pub fn export_animation(&self) -> Result<JsValue, JsError> {
        let artifact = self
            .session
            .export()
            .map_err(|e| JsError::new(&format!("export error: {e}")))?;
        swb::to_value(&artifact).map_err(|e| JsError::new(&format!("export error: {e}")))
    }

    /// Load animation `name` from an `animations.yml` text into the editor.
    #[wasm_bindgen(js_name = import_animation)]
    pub fn import_animation(&mut self, yaml: &str, name: &str) -> Result<(), JsError> {
        self.session
            .import_yaml(yaml, name)
            .map_err(|e| JsError::new(&format!("import error: {e}")))
    }
}

/// Parse a release feed body into `{ releases, error }`. Never throws for bad
/// feed content; the `error` field is set instead.
#[wasm_bindgen(js_name = parse_releases)]
pub fn parse_releases(body: &str) -> Result<JsValue, JsError> {
    let feed = ReleaseFeed::from_json(body);
    swb::to_value(&feed).map_err(|e| JsError::new(&format!("release feed error: {e}")))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
