#![cfg(target_arch = "wasm32")]

use js_sys::{Reflect, JSON};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use worldmap_wasm::{init_logging, WorldmapGraph, WorldmapPath};

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok"))
        .ok()
        .and_then(|x| x.as_bool())
        .unwrap_or(false)
}

#[wasm_bindgen_test]
fn property_errors_map_to_codes() {
    let mut g = WorldmapGraph::new();
    let ver = g.layout_version();
    let r = g.set_property_res("node_3/position", JsValue::from_f64(1.0));
    assert!(is_err(&r, "type_mismatch") || is_err(&r, "index_out_of_range"));
    assert_eq!(g.layout_version(), ver, "state mutated on error");

    assert!(is_err(&g.set_property_res("nope", JsValue::NULL), "unknown_key"));
    assert!(is_err(
        &g.set_property_res("node_count", JsValue::from_f64(1e9)),
        "limit_exceeded"
    ));
    assert!(is_ok(&g.set_property_res("node_count", JsValue::from_f64(2.0))));

    g.add_node(1.0, 1.0, 0).unwrap();
    let w = JSON::parse(r#"{"x": 2, "y": 2}"#).unwrap();
    assert!(is_err(&g.set_property_res("connection_0/weight", w), "read_only"));
    assert!(is_err(&g.add_node_res(f32::NAN, 0.0, 0), "non_finite"));
    assert!(is_err(&g.add_node_res(0.0, 0.0, 99), "index_out_of_range"));
}

#[wasm_bindgen_test]
fn modes_are_validated() {
    let mut g = WorldmapGraph::new();
    assert!(is_err(&g.set_connection_mode_res(7), "invalid_mode"));
    assert!(is_ok(&g.set_connection_mode_res(2)));
    assert_eq!(g.connection_mode(), 2);

    let mut p = WorldmapPath::new();
    assert!(is_err(&p.set_curve_mode_res(3), "invalid_mode"));
    assert!(is_ok(&p.set_curve_mode_res(1)));
}

#[wasm_bindgen_test]
fn path_needs_activation() {
    let mut p = WorldmapPath::new();
    assert!(is_err(&p.curve_data_res(), "not_ready"));
    assert!(is_err(&p.pick_res(0.0, 0.0, 4.0), "not_ready"));
    assert!(p.shape().is_null());
    p.activate(0.0, 0.0);
    assert!(is_ok(&p.curve_data_res()));
    assert!(is_err(
        &p.set_property_res("point_distance", JsValue::from_f64(3.0)),
        "unsolvable"
    ));
}

#[wasm_bindgen_test]
fn logging_levels() {
    assert!(is_ok(&init_logging("debug")));
    assert!(is_err(&init_logging("loud"), "type_mismatch"));
}
