use js_sys::Function;
use log::warn;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use motion_clip_core::{
    ClipCatalog, ClipFamily, ClipId, ClipPlayer, JointSink, PlayerConfig, PoseWrites,
};

/// Browser-facing motion clip player. The host render loop calls `tick`
/// once per animation frame.
#[wasm_bindgen]
pub struct MotionClipPlayer {
    core: ClipPlayer,
    pose: PoseWrites,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Forwards joint writes to JS callbacks. A throwing callback is logged and
/// otherwise ignored so one bad joint does not stall the tick.
struct JsJointSink {
    set_joint: Function,
    set_yaw: Option<Function>,
}

impl JointSink for JsJointSink {
    fn set_joint_value(&mut self, joint: &str, value: f32) {
        let name = JsValue::from_str(joint);
        let v = JsValue::from_f64(value as f64);
        if let Err(e) = self.set_joint.call2(&JsValue::UNDEFINED, &name, &v) {
            warn!("set_joint callback failed for '{joint}': {e:?}");
        }
    }

    fn set_yaw(&mut self, yaw: f32) {
        if let Some(f) = &self.set_yaw {
            if let Err(e) = f.call1(&JsValue::UNDEFINED, &JsValue::from_f64(yaw as f64)) {
                warn!("set_yaw callback failed: {e:?}");
            }
        }
    }
}

#[wasm_bindgen]
impl MotionClipPlayer {
    /// Create a player. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new MotionClipPlayer({ blend_pad: 60 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MotionClipPlayer, JsError> {
        console_error_panic_hook::set_once();
        // Fails harmlessly when a logger is already installed.
        let _ = console_log::init_with_level(log::Level::Warn);

        let cfg: PlayerConfig = if jsvalue_is_undefined_or_null(&config) {
            PlayerConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(MotionClipPlayer {
            core: ClipPlayer::new(cfg),
            pose: PoseWrites::default(),
        })
    }

    /// Load a raw clip buffer (e.g. an ArrayBuffer fetched as Uint8Array).
    /// `family` is "cheetah" or "go1". Returns the clip id.
    #[wasm_bindgen(js_name = load_clip)]
    pub fn load_clip(
        &mut self,
        name: String,
        family: String,
        bytes: &[u8],
    ) -> Result<u32, JsError> {
        let family: ClipFamily = family
            .parse()
            .map_err(|e| JsError::new(&format!("load_clip: {e}")))?;
        let id = self
            .core
            .load_clip(&name, family, bytes)
            .map_err(|e| JsError::new(&format!("load_clip '{name}': {e}")))?;
        Ok(id.0)
    }

    #[wasm_bindgen]
    pub fn select(&mut self, clip_id: u32) -> Result<(), JsError> {
        self.core
            .select(ClipId(clip_id))
            .map_err(|e| JsError::new(&format!("select: {e}")))
    }

    #[wasm_bindgen(js_name = select_by_name)]
    pub fn select_by_name(&mut self, name: String) -> Result<u32, JsError> {
        self.core
            .select_by_name(&name)
            .map(|id| id.0)
            .map_err(|e| JsError::new(&format!("select_by_name: {e}")))
    }

    #[wasm_bindgen(js_name = set_playing)]
    pub fn set_playing(&mut self, playing: bool) {
        self.core.set_playing(playing);
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.core.reset();
    }

    #[wasm_bindgen]
    pub fn cursor(&self) -> u32 {
        self.core.cursor() as u32
    }

    /// "idle", "playing" or "loop_blend".
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        self.core.state().as_str().to_string()
    }

    /// Step one tick and push the frame through `set_joint(name, value)` and
    /// the optional `set_yaw(radians)`. Returns the tick report, or null when
    /// nothing is playing.
    #[wasm_bindgen]
    pub fn tick(&mut self, set_joint: Function, set_yaw: JsValue) -> Result<JsValue, JsError> {
        let mut sink = JsJointSink {
            set_joint,
            set_yaw: set_yaw.dyn_into::<Function>().ok(),
        };
        match self.core.tick_into(&mut sink) {
            Some(report) => {
                swb::to_value(&report).map_err(|e| JsError::new(&format!("report error: {e}")))
            }
            None => Ok(JsValue::NULL),
        }
    }

    /// Step one tick and return the writes as `{ yaw, joints: [{ joint, value }] }`,
    /// or null when nothing is playing.
    #[wasm_bindgen(js_name = tick_pose)]
    pub fn tick_pose(&mut self) -> Result<JsValue, JsError> {
        self.pose.clear();
        if self.core.tick_into(&mut self.pose).is_none() {
            return Ok(JsValue::NULL);
        }
        swb::to_value(&self.pose).map_err(|e| JsError::new(&format!("pose error: {e}")))
    }
}

/// The stock clip catalog as a JS object `{ clips: [{ name, path, family }] }`.
#[wasm_bindgen(js_name = builtin_catalog)]
pub fn builtin_catalog() -> Result<JsValue, JsError> {
    swb::to_value(&ClipCatalog::builtin())
        .map_err(|e| JsError::new(&format!("catalog error: {e}")))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
