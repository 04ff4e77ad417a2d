//! Channel-to-joint tables for the supported robot rigs.
//!
//! Every clip family drives the same three rigs. A [`RigMapping`] says which
//! frame channel feeds each leg joint pair and with which sign; the joint
//! names themselves are fixed per rig. Left and right joints of a pair always
//! receive the same value.

use serde::Serialize;

use crate::family::ClipFamily;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rig {
    MitCheetah,
    A1,
    Go1,
}

/// Joint names of one rig, each pair ordered `[right, left]`.
#[derive(Debug)]
pub struct RigJoints {
    pub front_hip: [&'static str; 2],
    pub front_knee: [&'static str; 2],
    pub hind_hip: [&'static str; 2],
    pub hind_knee: [&'static str; 2],
}

static MIT_CHEETAH_JOINTS: RigJoints = RigJoints {
    front_hip: ["abduct_fr_to_thigh_fr_j", "abduct_fl_to_thigh_fl_j"],
    front_knee: ["thigh_fr_to_knee_fr_j", "thigh_fl_to_knee_fl_j"],
    hind_hip: ["abduct_hr_to_thigh_hr_j", "abduct_hl_to_thigh_hl_j"],
    hind_knee: ["thigh_hr_to_knee_hr_j", "thigh_hl_to_knee_hl_j"],
};

static A1_JOINTS: RigJoints = RigJoints {
    front_hip: ["FR_upper_joint", "FL_upper_joint"],
    front_knee: ["FR_lower_joint", "FL_lower_joint"],
    hind_hip: ["RR_upper_joint", "RL_upper_joint"],
    hind_knee: ["RR_lower_joint", "RL_lower_joint"],
};

static GO1_JOINTS: RigJoints = RigJoints {
    front_hip: ["FR_thigh_joint", "FL_thigh_joint"],
    front_knee: ["FR_calf_joint", "FL_calf_joint"],
    hind_hip: ["RR_thigh_joint", "RL_thigh_joint"],
    hind_knee: ["RR_calf_joint", "RL_calf_joint"],
};

impl Rig {
    pub fn joints(self) -> &'static RigJoints {
        match self {
            Rig::MitCheetah => &MIT_CHEETAH_JOINTS,
            Rig::A1 => &A1_JOINTS,
            Rig::Go1 => &GO1_JOINTS,
        }
    }
}

/// Frame channels feeding each leg joint pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LegChannels {
    pub front_hip: usize,
    pub front_knee: usize,
    pub hind_hip: usize,
    pub hind_knee: usize,
}

/// How one clip family drives one rig.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigMapping {
    pub rig: Rig,
    pub channels: LegChannels,
    /// Multiplier applied to every channel value (the A1/Go1 rigs are mirrored).
    pub sign: f32,
}

const HIP_KNEE_3_TO_6: LegChannels = LegChannels {
    front_hip: 3,
    front_knee: 4,
    hind_hip: 5,
    hind_knee: 6,
};

static CHEETAH_MAPPINGS: [RigMapping; 3] = [
    RigMapping {
        rig: Rig::MitCheetah,
        channels: HIP_KNEE_3_TO_6,
        sign: 1.0,
    },
    RigMapping {
        rig: Rig::A1,
        channels: HIP_KNEE_3_TO_6,
        sign: -1.0,
    },
    RigMapping {
        rig: Rig::Go1,
        channels: HIP_KNEE_3_TO_6,
        sign: -1.0,
    },
];

// The Go1 planner layout feeds the MIT rig from channels 2/3 up front.
static GO1_MAPPINGS: [RigMapping; 3] = [
    RigMapping {
        rig: Rig::MitCheetah,
        channels: LegChannels {
            front_hip: 2,
            front_knee: 3,
            hind_hip: 5,
            hind_knee: 6,
        },
        sign: 1.0,
    },
    RigMapping {
        rig: Rig::A1,
        channels: HIP_KNEE_3_TO_6,
        sign: -1.0,
    },
    RigMapping {
        rig: Rig::Go1,
        channels: HIP_KNEE_3_TO_6,
        sign: -1.0,
    },
];

pub fn mappings(family: ClipFamily) -> &'static [RigMapping] {
    match family {
        ClipFamily::Cheetah => &CHEETAH_MAPPINGS,
        ClipFamily::Go1 => &GO1_MAPPINGS,
    }
}

/// One resolved joint write: `joint = sign * frame[channel]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct JointBinding {
    pub rig: Rig,
    pub joint: &'static str,
    pub channel: usize,
    pub sign: f32,
}

impl JointBinding {
    /// Value this binding writes for `frame`. Channels past the end read 0.
    #[inline]
    pub fn value(&self, frame: &[f32]) -> f32 {
        self.sign * frame.get(self.channel).copied().unwrap_or(0.0)
    }
}

impl RigMapping {
    /// Flatten into per-joint bindings in application order:
    /// front hip, front knee, hind hip, hind knee (right before left).
    pub fn bindings(&self) -> impl Iterator<Item = JointBinding> + '_ {
        let joints = self.rig.joints();
        let pairs = [
            (joints.front_hip, self.channels.front_hip),
            (joints.front_knee, self.channels.front_knee),
            (joints.hind_hip, self.channels.hind_hip),
            (joints.hind_knee, self.channels.hind_knee),
        ];
        pairs.into_iter().flat_map(move |(names, channel)| {
            names.into_iter().map(move |joint| JointBinding {
                rig: self.rig,
                joint,
                channel,
                sign: self.sign,
            })
        })
    }
}

/// All joint bindings for a family, across every rig.
pub fn bindings(family: ClipFamily) -> impl Iterator<Item = JointBinding> {
    mappings(family).iter().flat_map(|m| m.bindings())
}
