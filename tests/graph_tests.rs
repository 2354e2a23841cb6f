#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Float32Array, Reflect, Uint32Array, JSON};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use worldmap_wasm::WorldmapGraph;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

fn town() -> JsValue {
    JSON::parse(r#"{"id": "town", "texture_size": {"x": 16, "y": 16}}"#).unwrap()
}

fn graph_with_root() -> WorldmapGraph {
    let mut g = WorldmapGraph::new();
    assert!(g.set_property("node_count", JsValue::from_f64(1.0)));
    assert!(g.set_property("node_0/data", town()));
    g
}

#[wasm_bindgen_test]
fn add_node_and_typed_arrays() {
    let mut g = graph_with_root();
    assert_eq!(g.add_node(10.0, 0.0, 0), Some(1));
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.connection_count(), 1);

    let nd = g.node_data();
    let idx = Uint32Array::new(&get(&nd, "indices"));
    let pos = Float32Array::new(&get(&nd, "positions"));
    assert_eq!(idx.length(), 2);
    assert_eq!(pos.to_vec(), vec![0.0, 0.0, 10.0, 0.0]);

    let cd = g.connection_data();
    let ep = Uint32Array::new(&get(&cd, "endpoints"));
    let w = Float32Array::new(&get(&cd, "weights"));
    assert_eq!(ep.to_vec(), vec![0, 1]);
    assert_eq!(w.to_vec(), vec![1.0, 1.0]);
}

#[wasm_bindgen_test]
fn property_list_and_values() {
    let mut g = graph_with_root();
    g.add_node(10.0, 0.0, 0).unwrap();

    #[derive(Deserialize)]
    struct Desc {
        kind: String,
        name: String,
    }
    let list: Vec<Desc> = serde_wasm_bindgen::from_value(g.list_properties()).unwrap();
    assert_eq!(list[0].kind, "array_count");
    assert_eq!(list[0].name, "node_count");
    assert!(list.iter().all(|d| !d.name.ends_with("/weight")));

    let p = g.get_property("node_1/position");
    assert_eq!(get(&p, "x").as_f64(), Some(10.0));
    assert!(g.get_property("node_9/position").is_null());
    assert!(!g.set_property("bogus", JsValue::from_f64(1.0)));

    let ep = Array::of2(&JsValue::from_f64(-1.0), &JsValue::from_f64(40.0));
    assert!(g.set_property("connection_0/endpoints", ep.into()));
    let back: Vec<i64> = serde_wasm_bindgen::from_value(g.get_property("connection_0/endpoints")).unwrap();
    assert_eq!(back, vec![0, 1]);
}

#[wasm_bindgen_test]
fn signals_drain_as_objects() {
    let mut g = graph_with_root();
    g.take_signals();
    let ev = JSON::parse(r#"{"button": 1}"#).unwrap();
    assert!(g.forward_input(0, ev));
    let signals = Array::from(&g.take_signals());
    assert_eq!(signals.length(), 1);
    let s = signals.get(0);
    assert_eq!(get(&s, "kind").as_string().as_deref(), Some("node_input"));
    assert_eq!(get(&get(&s, "node_type"), "id").as_string().as_deref(), Some("town"));
    assert_eq!(get(&get(&s, "event"), "button").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn pick_then_drag_node() {
    let mut g = graph_with_root();
    g.add_node(100.0, 0.0, 0).unwrap();
    let p = g.pick(101.0, 2.0, 4.0);
    assert_eq!(get(&p, "kind").as_string().as_deref(), Some("node"));
    assert_eq!(get(&p, "index").as_f64(), Some(1.0));
    assert!(g.drag(p, 120.0, 30.0));
    let pos = g.get_property("node_1/position");
    assert_eq!(get(&pos, "x").as_f64(), Some(120.0));

    let edge = g.pick(60.0, 15.0, 4.0);
    assert_eq!(get(&edge, "kind").as_string().as_deref(), Some("connection"));
    assert!(!g.drag(edge, 0.0, 0.0));
}

#[wasm_bindgen_test]
fn activation_rebases_once() {
    let mut g = graph_with_root();
    let o = Float32Array::new(&g.activate(5.0, 7.0));
    assert_eq!(o.to_vec(), vec![0.0, 0.0]);
    let pos = g.get_property("node_0/position");
    assert_eq!(get(&pos, "y").as_f64(), Some(7.0));
}
