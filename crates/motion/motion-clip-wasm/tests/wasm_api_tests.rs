#![cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Reflect};
use motion_clip_wasm::{abi_version, builtin_catalog, MotionClipPlayer};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn ramp(width: usize, frames: usize) -> Vec<u8> {
    (0..frames)
        .flat_map(|i| std::iter::repeat(i as f32).take(width))
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    assert!(MotionClipPlayer::new(JsValue::UNDEFINED).is_ok());
}

#[wasm_bindgen_test]
fn repeated_construction_keeps_logger_setup_quiet() {
    let first = MotionClipPlayer::new(JsValue::UNDEFINED);
    let second = MotionClipPlayer::new(JsValue::NULL);
    assert!(first.is_ok());
    assert!(second.is_ok());
}

#[wasm_bindgen_test]
fn bad_config_errors() {
    assert!(MotionClipPlayer::new(JsValue::from_f64(3.0)).is_err());
}

#[wasm_bindgen_test]
fn unknown_family_errors() {
    let mut p = MotionClipPlayer::new(JsValue::NULL).unwrap();
    assert!(p.load_clip("x".into(), "spot".into(), &ramp(22, 1)).is_err());
}

#[wasm_bindgen_test]
fn malformed_clip_errors() {
    let mut p = MotionClipPlayer::new(JsValue::NULL).unwrap();
    assert!(p.load_clip("x".into(), "cheetah".into(), &[0u8; 7]).is_err());
}

#[wasm_bindgen_test]
fn tick_calls_joint_and_yaw_callbacks() {
    let mut p = MotionClipPlayer::new(JsValue::NULL).unwrap();
    let id = p.load_clip("two".into(), "cheetah".into(), &ramp(22, 2)).unwrap();
    assert_eq!(id, 0);

    let calls = Array::new();
    let sink = Function::new_with_args(
        "arr",
        "return function(name, value) { arr.push([name, value]); };",
    )
    .call1(&JsValue::UNDEFINED, &calls)
    .unwrap();
    let yaws = Array::new();
    let yaw_sink = Function::new_with_args("arr", "return function(y) { arr.push(y); };")
        .call1(&JsValue::UNDEFINED, &yaws)
        .unwrap();

    p.tick(Function::from(sink.clone()), yaw_sink.clone()).unwrap();
    let report = p.tick(Function::from(sink), yaw_sink).unwrap();

    assert_eq!(calls.length(), 48);
    assert_eq!(yaws.length(), 2);
    assert_eq!(yaws.get(1).as_f64(), Some(1.0));
    assert_eq!(get(&report, "cursor").as_f64(), Some(1.0));
    assert_eq!(get(&report, "phase").as_string().as_deref(), Some("frame"));
    assert_eq!(p.state(), "playing");
}

#[wasm_bindgen_test]
fn throwing_callback_is_ignored() {
    let mut p = MotionClipPlayer::new(JsValue::NULL).unwrap();
    p.load_clip("one".into(), "go1".into(), &ramp(63, 1)).unwrap();
    let boom = Function::new_with_args("name, value", "throw new Error('boom');");
    assert!(p.tick(boom, JsValue::UNDEFINED).is_ok());
    assert_eq!(p.cursor(), 1);
}

#[wasm_bindgen_test]
fn tick_pose_returns_writes_or_null() {
    let mut p = MotionClipPlayer::new(JsValue::NULL).unwrap();
    assert!(p.tick_pose().unwrap().is_null());

    p.load_clip("one".into(), "cheetah".into(), &ramp(22, 1)).unwrap();
    let pose = p.tick_pose().unwrap();
    let joints = Array::from(&get(&pose, "joints"));
    assert_eq!(joints.length(), 24);

    p.set_playing(false);
    assert!(p.tick_pose().unwrap().is_null());
}

#[wasm_bindgen_test]
fn builtin_catalog_lists_eleven_clips() {
    let cat = builtin_catalog().unwrap();
    let clips = Array::from(&get(&cat, "clips"));
    assert_eq!(clips.length(), 11);
}
