use hashbrown::HashMap;
use motion_clip_core::{
    rig, ClipFamily, ClipPlayer, JointSink, Phase, PlaybackState, PoseWrites, Rig,
};
use motion_test_fixtures::clips;

#[derive(Default)]
struct CountingSink {
    joints: usize,
    yaw: Option<f32>,
}

impl JointSink for CountingSink {
    fn set_joint_value(&mut self, _joint: &str, _value: f32) {
        self.joints += 1;
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = Some(yaw);
    }
}

#[test]
fn tick_into_applies_every_rig() {
    let mut player = ClipPlayer::default();
    let bytes = clips::sparse(22, &[&[(2, 0.25), (3, 0.5), (6, -0.75)]]).unwrap();
    let id = player.load_clip("one", ClipFamily::Cheetah, &bytes).unwrap();

    let mut pose = PoseWrites::default();
    let report = player.tick_into(&mut pose).unwrap();
    assert_eq!(report.clip, id);
    assert_eq!(report.phase, Phase::Frame);
    assert_eq!(report.state, PlaybackState::Playing);

    assert_eq!(pose.yaw, Some(0.25));
    assert_eq!(pose.get("abduct_fr_to_thigh_fr_j"), Some(0.5));
    assert_eq!(pose.get("FL_upper_joint"), Some(-0.5));
    assert_eq!(pose.get("FR_thigh_joint"), Some(-0.5));
    assert_eq!(pose.get("thigh_hr_to_knee_hr_j"), Some(-0.75));
    assert_eq!(pose.get("RL_lower_joint"), Some(0.75));
    assert_eq!(pose.get("RR_calf_joint"), Some(0.75));
}

#[test]
fn write_order_follows_rig_tables() {
    let mut pose = PoseWrites::default();
    let frame = vec![0.0; 22];
    motion_clip_core::apply_frame(ClipFamily::Cheetah, &frame, &mut pose);
    let names: Vec<&str> = pose.joints.iter().map(|w| w.joint.as_str()).collect();
    let expected: Vec<&str> = rig::bindings(ClipFamily::Cheetah).map(|b| b.joint).collect();
    assert_eq!(names, expected);
    assert_eq!(&names[..2], &["abduct_fr_to_thigh_fr_j", "abduct_fl_to_thigh_fl_j"]);
    assert_eq!(
        rig::bindings(ClipFamily::Cheetah).last().map(|b| b.rig),
        Some(Rig::Go1)
    );
}

#[test]
fn custom_sink_sees_yaw_and_all_joints() {
    let mut player = ClipPlayer::default();
    player
        .load_clip("g", ClipFamily::Go1, &clips::ramp(63, 1))
        .unwrap();
    let mut sink = CountingSink::default();
    player.tick_into(&mut sink).unwrap();
    assert_eq!(sink.joints, 24);
    assert_eq!(sink.yaw, Some(0.0));
}

#[test]
fn joint_map_retains_unmapped_values_across_ticks() {
    let mut player = ClipPlayer::default();
    player
        .load_clip("r", ClipFamily::Cheetah, &clips::ramp(22, 3))
        .unwrap();
    let mut state: HashMap<String, f32> = HashMap::new();
    state.insert("tail_joint".into(), 0.3);
    player.tick_into(&mut state);
    player.tick_into(&mut state);
    assert_eq!(state.get("tail_joint"), Some(&0.3));
    assert_eq!(state.get("abduct_hl_to_thigh_hl_j"), Some(&1.0));
    assert_eq!(state.get("yaw"), Some(&1.0));
}

#[test]
fn paused_player_leaves_sink_untouched() {
    let mut player = ClipPlayer::default();
    player
        .load_clip("p", ClipFamily::Cheetah, &clips::ramp(22, 3))
        .unwrap();
    player.set_playing(false);
    let mut pose = PoseWrites::default();
    assert!(player.tick_into(&mut pose).is_none());
    assert!(pose.joints.is_empty());
    assert_eq!(pose.yaw, None);
}
