use crate::WorldmapGraph;
use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use worldmap::{ConnectionMode, ControlHandle, Pick, RawInput, Value, Vec2};
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{arr_f32, arr_u32, new_obj, set_kv, to_js, vec2_arr};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Shared by both editors

pub(crate) fn parse_value(v: JsValue) -> Result<Value, JsValue> {
    serde_wasm_bindgen::from_value::<Value>(v).map_err(|e| error::bad_value("value", e))
}

pub(crate) fn parse_input(v: JsValue) -> RawInput {
    RawInput(serde_wasm_bindgen::from_value::<serde_json::Value>(v).unwrap_or_default())
}

pub(crate) fn handle_name(h: ControlHandle) -> &'static str {
    match h {
        ControlHandle::Start => "start",
        ControlHandle::End => "end",
        ControlHandle::Handle1 => "handle1",
        ControlHandle::Handle2 => "handle2",
    }
}

pub(crate) fn handle_from_name(s: &str) -> Option<ControlHandle> {
    match s {
        "start" => Some(ControlHandle::Start),
        "end" => Some(ControlHandle::End),
        "handle1" => Some(ControlHandle::Handle1),
        "handle2" => Some(ControlHandle::Handle2),
        _ => None,
    }
}

// Flatten to { kind: 'node'|'connection'|'control', ... }
pub(crate) fn pick_to_js(p: Pick) -> JsValue {
    let obj = new_obj();
    match p {
        Pick::Node { index, dist } => {
            set_kv(&obj, "kind", &JsValue::from_str("node"));
            set_kv(&obj, "index", &JsValue::from_f64(index as f64));
            set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
        }
        Pick::Connection { index, t, dist } => {
            set_kv(&obj, "kind", &JsValue::from_str("connection"));
            set_kv(&obj, "index", &JsValue::from_f64(index as f64));
            set_kv(&obj, "t", &JsValue::from_f64(t as f64));
            set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
        }
        Pick::Control { handle, dist } => {
            set_kv(&obj, "kind", &JsValue::from_str("control"));
            set_kv(&obj, "handle", &JsValue::from_str(handle_name(handle)));
            set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
        }
    }
    obj.into()
}

/// Inverse of `pick_to_js`; distances are not needed to drag.
pub(crate) fn pick_from_js(v: &JsValue) -> Option<Pick> {
    let get = |k: &str| Reflect::get(v, &JsValue::from_str(k)).ok();
    let kind = get("kind")?.as_string()?;
    let index = || get("index").and_then(|i| i.as_f64()).filter(|i| *i >= 0.0).map(|i| i as usize);
    match kind.as_str() {
        "node" => Some(Pick::Node { index: index()?, dist: 0.0 }),
        "connection" => Some(Pick::Connection { index: index()?, t: 0.0, dist: 0.0 }),
        "control" => {
            let handle = handle_from_name(&get("handle")?.as_string()?)?;
            Some(Pick::Control { handle, dist: 0.0 })
        }
        _ => None,
    }
}

pub(crate) fn check_point(x: f32, y: f32) -> Result<Vec2, JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Err(error::non_finite("y"));
    }
    Ok(Vec2::new(x, y))
}

#[wasm_bindgen]
impl WorldmapGraph {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WorldmapGraph {
        crate::WorldmapGraph::rs_new()
    }
    pub fn layout_version(&self) -> u64 {
        self.rs_layout_version()
    }
    pub fn configure(&mut self, json: &str) -> JsValue {
        match crate::parse_config(json) {
            Ok(cfg) => {
                self.inner.set_config(cfg);
                error::ok(JsValue::from_bool(true))
            }
            Err(e) => e,
        }
    }

    // Property protocol
    pub fn list_properties(&self) -> JsValue {
        to_js(&self.inner.list_properties())
    }
    pub fn get_property(&self, key: &str) -> JsValue {
        match self.inner.get_property(key) {
            Some(v) => to_js(&v),
            None => JsValue::NULL,
        }
    }
    pub fn set_property(&mut self, key: &str, value: JsValue) -> bool {
        match parse_value(value) {
            Ok(v) => self.inner.set_property(key, v),
            // Unparseable values are a handled no-op for keys this graph owns.
            Err(_) => self.inner.list_properties().iter().any(|d| d.name() == key),
        }
    }
    pub fn set_property_res(&mut self, key: &str, value: JsValue) -> JsValue {
        let v = match parse_value(value) {
            Ok(v) => v,
            Err(e) => return e,
        };
        match self.inner.try_set_property(key, v) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => error::property(&e),
        }
    }
    pub fn take_signals(&mut self) -> JsValue {
        to_js(&self.inner.take_signals())
    }

    // Static fields
    pub fn connection_mode(&self) -> u8 {
        self.inner.connection_mode() as u8
    }
    pub fn set_connection_mode(&mut self, mode: u8) -> bool {
        match ConnectionMode::from_index(mode as i64) {
            Some(m) => {
                self.inner.set_connection_mode(m);
                true
            }
            None => false,
        }
    }
    pub fn set_connection_mode_res(&mut self, mode: u8) -> JsValue {
        if ConnectionMode::from_index(mode as i64).is_none() {
            return error::invalid_mode(
                "connection mode",
                mode,
                "0:Bidirectional, 1:Unidirectional, 2:Custom",
            );
        }
        error::ok(JsValue::from_bool(self.set_connection_mode(mode)))
    }

    // Editing
    pub fn node_count(&self) -> u32 {
        self.inner.node_count() as u32
    }
    pub fn connection_count(&self) -> u32 {
        self.inner.connection_count() as u32
    }
    pub fn add_node(&mut self, x: f32, y: f32, parent: u32) -> Option<u32> {
        self.inner
            .add_node(Vec2::new(x, y), parent as usize)
            .map(|i| i as u32)
    }
    pub fn add_node_res(&mut self, x: f32, y: f32, parent: u32) -> JsValue {
        let p = match check_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.add_node(p, parent as usize) {
            Some(i) => error::ok(JsValue::from_f64(i as f64)),
            None => error::property(&worldmap::PropertyError::IndexOutOfRange {
                category: "node".to_string(),
                index: parent as usize,
                count: self.inner.node_count(),
            }),
        }
    }
    pub fn remove_node(&mut self, index: u32) -> bool {
        self.inner.remove_node(index as usize)
    }
    pub fn move_node(&mut self, index: u32, x: f32, y: f32) -> bool {
        self.inner.move_node(index as usize, Vec2::new(x, y))
    }
    pub fn activate(&mut self, origin_x: f32, origin_y: f32) -> JsValue {
        let o = self.inner.activate(Vec2::new(origin_x, origin_y));
        vec2_arr(o.x, o.y)
    }
    pub fn forward_input(&mut self, index: u32, event: JsValue) -> bool {
        self.inner.forward_input(index as usize, parse_input(event))
    }

    // Typed arrays getters
    pub fn node_data(&self) -> JsValue {
        let a = self.inner.node_arrays();
        let obj = new_obj();
        set_kv(&obj, "indices", &arr_u32(&a.indices).into());
        set_kv(&obj, "positions", &arr_f32(&a.positions).into());
        set_kv(&obj, "sizes", &arr_f32(&a.sizes).into());
        obj.into()
    }
    pub fn connection_data(&self) -> JsValue {
        let a = self.inner.connection_arrays();
        let obj = new_obj();
        set_kv(&obj, "indices", &arr_u32(&a.indices).into());
        set_kv(&obj, "endpoints", &arr_u32(&a.endpoints).into());
        set_kv(&obj, "segments", &arr_f32(&a.segments).into());
        set_kv(&obj, "weights", &arr_f32(&a.weights).into());
        obj.into()
    }

    // Canvas
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> JsValue {
        match self.inner.pick(Vec2::new(x, y), tol) {
            Some(p) => pick_to_js(p),
            None => JsValue::NULL,
        }
    }
    pub fn pick_res(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if let Err(e) = check_point(x, y) {
            return e;
        }
        if !tol.is_finite() {
            return error::non_finite("tol");
        }
        error::ok(self.pick(x, y, tol))
    }
    pub fn drag(&mut self, pick: JsValue, x: f32, y: f32) -> bool {
        match pick_from_js(&pick) {
            Some(p) => self.inner.drag(&p, Vec2::new(x, y)),
            None => false,
        }
    }
}

impl Default for WorldmapGraph {
    fn default() -> Self {
        Self::new()
    }
}
