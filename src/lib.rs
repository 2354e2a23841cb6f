use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;
mod path_api;

/// Worldmap graph editor model. Node hit regions are owned by the JS canvas,
/// which hit-tests `node_data()` and calls `forward_input` itself.
#[wasm_bindgen]
pub struct WorldmapGraph { pub(crate) inner: worldmap::WorldmapGraph }

#[wasm_bindgen]
pub struct WorldmapPath { pub(crate) inner: worldmap::WorldmapPath }

impl WorldmapGraph {
    pub fn rs_new() -> WorldmapGraph { WorldmapGraph { inner: worldmap::WorldmapGraph::new() } }
    pub fn rs_layout_version(&self) -> u64 { self.inner.layout_version() }
}

impl WorldmapPath {
    pub fn rs_new() -> WorldmapPath { WorldmapPath { inner: worldmap::WorldmapPath::new() } }
    pub fn rs_layout_version(&self) -> u64 { self.inner.layout_version() }
}

/// Route core logging to the browser console at `level` ("off", "warn", "debug", ...).
#[wasm_bindgen]
pub fn init_logging(level: &str) -> JsValue {
    match logging::parse_level(level) {
        Some(filter) => {
            logging::install(filter);
            error::ok(JsValue::from_bool(true))
        }
        None => error::bad_value("level", "expected off, error, warn, info, debug or trace"),
    }
}

pub(crate) fn parse_config(json: &str) -> Result<worldmap::LayoutConfig, JsValue> {
    worldmap::LayoutConfig::from_json_str(json).map_err(|e| error::bad_value("config", e))
}
