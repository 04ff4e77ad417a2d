//! Applying frames to a host robot model.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::family::ClipFamily;
use crate::rig;

/// Host-side robot model capability. Adapters (wasm, native viewers)
/// implement this and pass it to [`apply_frame`] or
/// [`crate::ClipPlayer::tick_into`].
pub trait JointSink {
    /// Exclusive setter for one named joint.
    fn set_joint_value(&mut self, joint: &str, value: f32);
    /// Direct write to the model's yaw rotation (radians).
    fn set_yaw(&mut self, yaw: f32);
}

/// Write every mapped joint of `frame` and the body yaw into `sink`.
/// Joints not in the family's table are left untouched.
pub fn apply_frame(family: ClipFamily, frame: &[f32], sink: &mut dyn JointSink) {
    if let Some(&yaw) = frame.get(family.yaw_channel()) {
        sink.set_yaw(yaw);
    }
    for binding in rig::bindings(family) {
        sink.set_joint_value(binding.joint, binding.value(frame));
    }
}

/// One recorded joint write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointWrite {
    pub joint: String,
    pub value: f32,
}

/// Recording sink: keeps every write of a tick in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseWrites {
    #[serde(default)]
    pub yaw: Option<f32>,
    #[serde(default)]
    pub joints: Vec<JointWrite>,
}

impl PoseWrites {
    pub fn clear(&mut self) {
        self.yaw = None;
        self.joints.clear();
    }

    /// Last value written to `joint`, if any.
    pub fn get(&self, joint: &str) -> Option<f32> {
        self.joints
            .iter()
            .rev()
            .find(|w| w.joint == joint)
            .map(|w| w.value)
    }
}

impl JointSink for PoseWrites {
    fn set_joint_value(&mut self, joint: &str, value: f32) {
        self.joints.push(JointWrite {
            joint: joint.to_string(),
            value,
        });
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = Some(yaw);
    }
}

/// Joint-state map; yaw is stored under the `"yaw"` key.
impl JointSink for HashMap<String, f32> {
    fn set_joint_value(&mut self, joint: &str, value: f32) {
        match self.get_mut(joint) {
            Some(v) => *v = value,
            None => {
                self.insert(joint.to_string(), value);
            }
        }
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.set_joint_value("yaw", yaw);
    }
}
