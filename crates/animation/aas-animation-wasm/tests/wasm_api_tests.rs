#![cfg(target_arch = "wasm32")]
use aas_animation_wasm::{abi_version, parse_releases, AasEditor};
use serde_json::Value as Json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_json(v: JsValue) -> Json {
    swb::from_value(v).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    let editor = AasEditor::new(JsValue::UNDEFINED).unwrap();
    assert_eq!(editor.len(), 1);
    assert_eq!(editor.name(), "wave");
    assert_eq!(editor.interval(), 10);
}

#[wasm_bindgen_test]
fn construct_with_partial_config() {
    let cfg = swb::to_value(&serde_json::json!({ "default_name": "bow" })).unwrap();
    let editor = AasEditor::new(cfg).unwrap();
    assert_eq!(editor.name(), "bow");
    assert_eq!(editor.interval(), 10);
}

#[wasm_bindgen_test]
fn edit_and_read_pose() {
    let mut editor = AasEditor::new(JsValue::NULL).unwrap();
    editor.update_selected("head", "x", 45.0).unwrap();
    editor.update_selected("left_arm", "z", 999.0).unwrap();
    assert!(editor.update_selected("tail", "x", 1.0).is_err());

    let pose = to_json(editor.current_pose().unwrap());
    assert_eq!(pose["head"]["x"], 45.0);
    assert_eq!(pose["left_arm"]["z"], 180.0);
}

#[wasm_bindgen_test]
fn insert_remove_and_select() {
    let mut editor = AasEditor::new(JsValue::NULL).unwrap();
    editor.insert_keyframe();
    editor.insert_keyframe();
    assert_eq!(editor.len(), 3);
    assert_eq!(editor.selection(), 2);
    assert!(editor.remove_keyframe());
    assert_eq!(editor.selection(), 1);
    assert_eq!(editor.set_selection(40.0), 1);
    assert_eq!(editor.set_selection(-3.0), 0);
    assert_eq!(editor.keyframe_ids().length(), 2);
}

#[wasm_bindgen_test]
fn playback_advances_on_tick() {
    let mut editor = AasEditor::new(JsValue::NULL).unwrap();
    editor.append_keyframe();
    editor.set_selection(0.0);
    editor.set_interval(1.0);
    assert!(editor.toggle_playback(Some(0.0)));

    let report = to_json(editor.tick(Some(60.0)).unwrap());
    assert_eq!(report["advanced"], true);
    assert_eq!(report["selection"].as_f64(), Some(1.0));

    assert!(!editor.toggle_playback(Some(70.0)));
    assert!(editor.next_tick_due().is_none());
}

#[wasm_bindgen_test]
fn export_and_import() {
    let mut editor = AasEditor::new(JsValue::NULL).unwrap();
    editor.set_interval(0.0);
    editor.update_selected("right_leg", "y", 12.5).unwrap();
    let artifact = to_json(editor.export_animation().unwrap());
    assert_eq!(artifact["fileName"], "animations.yml");
    assert_eq!(artifact["mediaType"], "text/yaml");
    let contents = artifact["contents"].as_str().unwrap().to_string();
    assert!(contents.contains("interval: 1\n"));

    let mut other = AasEditor::new(JsValue::NULL).unwrap();
    other.import_animation(&contents, "wave").unwrap();
    let pose = to_json(other.current_pose().unwrap());
    assert_eq!(pose["right_leg"]["y"], 12.5);
    assert!(other.import_animation(&contents, "missing").is_err());
}

#[wasm_bindgen_test]
fn releases_never_throw() {
    let feed = to_json(parse_releases("not json").unwrap());
    assert_eq!(feed["releases"].as_array().unwrap().len(), 0);
    assert!(feed["error"].is_string());
}
