pub mod config;
pub mod error;
pub mod graph;
pub mod hit_region;
pub mod model;
pub mod path;
pub mod picking;
pub mod signal;
pub mod geometry {
    pub mod cubic;
    pub mod flatten;
    pub mod layout;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod property {
    pub mod descriptor;
    pub mod key;
    pub mod store;
    pub mod value;
}

use serde::{Deserialize, Serialize};

pub use config::LayoutConfig;
pub use error::{PropertyError, Result};
pub use graph::{ConnectionArrays, NodeArrays, WorldmapGraph};
pub use hit_region::{Headless, HitRegionHost, RegionTable};
pub use model::{
    Connection, ConnectionMode, CurveMode, GraphNode, NodeType, NodeTypeRef, PathNode, PathShape,
    RawInput, Rect, Vec2,
};
pub use path::WorldmapPath;
pub use property::descriptor::PropertyDescriptor;
pub use property::value::{Value, ValueKind};
pub use signal::Signal;

/// Draggable control point of a path curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlHandle {
    Start,
    End,
    Handle1,
    Handle2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "node")]
    Node { index: usize, dist: f32 },
    #[serde(rename = "connection")]
    Connection { index: usize, t: f32, dist: f32 },
    #[serde(rename = "control")]
    Control { handle: ControlHandle, dist: f32 },
}
