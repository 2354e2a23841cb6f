use crate::api::{check_point, handle_from_name, parse_input, parse_value, pick_from_js, pick_to_js};
use crate::WorldmapPath;
use wasm_bindgen::prelude::*;
use worldmap::{CurveMode, PathShape, Vec2};
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop::{arr_f32, arr_u32, new_obj, set_kv, to_js, vec2_arr};

fn flat(points: &[Vec2]) -> Vec<f32> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

#[wasm_bindgen]
impl WorldmapPath {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WorldmapPath {
        crate::WorldmapPath::rs_new()
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
    pub fn can_revert(&self, key: &str) -> bool {
        self.inner.can_revert(key)
    }
    pub fn revert_value(&self, key: &str) -> JsValue {
        match self.inner.revert_value(key) {
            Some(v) => to_js(&v),
            None => JsValue::NULL,
        }
    }
    pub fn revert(&mut self, key: &str) -> bool {
        self.inner.revert(key)
    }
    pub fn take_signals(&mut self) -> JsValue {
        to_js(&self.inner.take_signals())
    }

    // Static fields
    pub fn curve_mode(&self) -> u8 {
        self.inner.mode() as u8
    }
    pub fn set_curve_mode(&mut self, mode: u8) -> bool {
        match CurveMode::from_index(mode as i64) {
            Some(m) => {
                self.inner.set_mode(m);
                true
            }
            None => false,
        }
    }
    pub fn set_curve_mode_res(&mut self, mode: u8) -> JsValue {
        if CurveMode::from_index(mode as i64).is_none() {
            return error::invalid_mode("curve mode", mode, "0:Line, 1:Arc, 2:Bezier");
        }
        error::ok(JsValue::from_bool(self.set_curve_mode(mode)))
    }
    pub fn end_with_empty(&self) -> bool {
        self.inner.end_with_empty()
    }
    pub fn set_end_with_empty(&mut self, v: bool) {
        self.inner.set_end_with_empty(v);
    }
    /// Current curve as `{start, end, handle1, handle2, mode}`, or null before activation.
    pub fn shape(&self) -> JsValue {
        match self.inner.shape() {
            Some(s) => to_js(&s),
            None => JsValue::NULL,
        }
    }
    pub fn set_shape_res(&mut self, shape: JsValue) -> JsValue {
        let s: PathShape = match serde_wasm_bindgen::from_value(shape) {
            Ok(s) => s,
            Err(e) => return error::bad_value("shape", e),
        };
        if !self.inner.set_shape(s) {
            return error::err("non_finite", "shape points must be finite and within bounds", None);
        }
        error::ok(JsValue::from_bool(true))
    }
    pub fn set_control(&mut self, handle: &str, x: f32, y: f32) -> bool {
        match handle_from_name(handle) {
            Some(h) => self.inner.set_control(h, Vec2::new(x, y)),
            None => false,
        }
    }
    pub fn set_control_res(&mut self, handle: &str, x: f32, y: f32) -> JsValue {
        let p = match check_point(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match handle_from_name(handle) {
            Some(h) => error::ok(JsValue::from_bool(self.inner.set_control(h, p))),
            None => error::bad_value("handle", "expected start, end, handle1 or handle2"),
        }
    }

    // Editing
    pub fn node_count(&self) -> u32 {
        self.inner.node_count() as u32
    }
    pub fn segment_count(&self) -> u32 {
        self.inner.segment_count() as u32
    }
    pub fn activate(&mut self, origin_x: f32, origin_y: f32) -> JsValue {
        let o = self.inner.activate(Vec2::new(origin_x, origin_y));
        vec2_arr(o.x, o.y)
    }
    pub fn forward_input(&mut self, index: u32, event: JsValue) -> bool {
        self.inner.forward_input(index as usize, parse_input(event))
    }
    pub fn distance_between_points(&self) -> Option<f32> {
        self.inner.distance_between_points()
    }
    pub fn curve_length(&self) -> f32 {
        self.inner.curve_length()
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
    pub fn node_data_res(&self) -> JsValue {
        if self.inner.shape().is_none() {
            return error::not_ready("node data");
        }
        error::ok(self.node_data())
    }
    /// Flattened curve polyline as `[x0, y0, x1, y1, ...]`.
    pub fn curve_data(&self) -> JsValue {
        arr_f32(&flat(&self.inner.curve_points())).into()
    }
    pub fn curve_data_res(&self) -> JsValue {
        if self.inner.shape().is_none() {
            return error::not_ready("curve data");
        }
        error::ok(self.curve_data())
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
        if self.inner.shape().is_none() {
            return error::not_ready("picking");
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

impl Default for WorldmapPath {
    fn default() -> Self {
        Self::new()
    }
}
