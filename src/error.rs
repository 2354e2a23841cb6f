use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use worldmap::PropertyError;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_mode(kind: &str, got: u8, allowed: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("invalid_mode", format!("{} must be {}", kind, allowed), Some(d.into()))
}

#[inline]
pub fn not_ready(what: &str) -> JsValue {
    err("not_ready", format!("{} is not available before the path is activated", what), None)
}

#[inline]
pub fn bad_value(param: &str, message: impl std::fmt::Display) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("type_mismatch", format!("parameter '{}': {}", param, message), Some(d.into()))
}

/// Envelope for a rejected property write, keyed by the core error code.
pub fn property(e: &PropertyError) -> JsValue {
    let d = new_obj();
    match e {
        PropertyError::UnknownKey(key)
        | PropertyError::NonFinite(key)
        | PropertyError::ReadOnly(key)
        | PropertyError::Unsolvable(key) => set_kv(&d, "key", &JsValue::from_str(key)),
        PropertyError::IndexOutOfRange { category, index, count } => {
            set_kv(&d, "category", &JsValue::from_str(category));
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "count", &JsValue::from_f64(*count as f64));
        }
        PropertyError::TypeMismatch { key, expected } => {
            set_kv(&d, "key", &JsValue::from_str(key));
            set_kv(&d, "expected", &JsValue::from_str(&expected.to_string()));
        }
        PropertyError::LimitExceeded { key, requested, max } => {
            set_kv(&d, "key", &JsValue::from_str(key));
            set_kv(&d, "requested", &JsValue::from_f64(*requested as f64));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
        }
    }
    err(e.code(), e.to_string(), Some(d.into()))
}
