use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

/// Axis-aligned rectangle, `position` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Rect of `size` centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Rect {
            position: center - size * 0.5,
            size,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.position.x
            && p.y >= self.position.y
            && p.x <= self.position.x + self.size.x
            && p.y <= self.position.y + self.size.y
    }
}

/// Node type resource shared by reference between nodes. The core only reads
/// its visual extent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    pub id: String,
    pub texture_size: Vec2,
}

pub type NodeTypeRef = Rc<NodeType>;

impl NodeType {
    pub fn new(id: impl Into<String>, texture_size: Vec2) -> NodeTypeRef {
        Rc::new(NodeType {
            id: id.into(),
            texture_size,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveMode {
    #[default]
    Line = 0,
    Arc = 1,
    Bezier = 2,
}

impl CurveMode {
    pub fn from_index(i: i64) -> Option<CurveMode> {
        match i {
            0 => Some(CurveMode::Line),
            1 => Some(CurveMode::Arc),
            2 => Some(CurveMode::Bezier),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionMode {
    #[default]
    Bidirectional = 0,
    Unidirectional = 1,
    Custom = 2,
}

impl ConnectionMode {
    pub fn from_index(i: i64) -> Option<ConnectionMode> {
        match i {
            0 => Some(ConnectionMode::Bidirectional),
            1 => Some(ConnectionMode::Unidirectional),
            2 => Some(ConnectionMode::Custom),
            _ => None,
        }
    }

    /// Weight every connection is forced to while this mode is active.
    pub fn forced_weight(self) -> Option<Vec2> {
        match self {
            ConnectionMode::Bidirectional => Some(Vec2::new(1.0, 1.0)),
            ConnectionMode::Unidirectional => Some(Vec2::new(1.0, 0.0)),
            ConnectionMode::Custom => None,
        }
    }
}

/// Parameters of the single curve a path lays its nodes along.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub start: Vec2,
    pub end: Vec2,
    pub handle1: Vec2,
    pub handle2: Vec2,
    pub mode: CurveMode,
}

impl PathShape {
    /// Straight line with both handles collapsed onto the endpoints.
    pub fn line(start: Vec2, end: Vec2) -> Self {
        PathShape {
            start,
            end,
            handle1: start,
            handle2: end,
            mode: CurveMode::Line,
        }
    }

    /// Arc around `center` from `start` to `end`.
    pub fn arc(center: Vec2, start: Vec2, end: Vec2) -> Self {
        PathShape {
            start,
            end,
            handle1: center,
            handle2: end,
            mode: CurveMode::Arc,
        }
    }

    pub fn bezier(start: Vec2, handle1: Vec2, handle2: Vec2, end: Vec2) -> Self {
        PathShape {
            start,
            end,
            handle1,
            handle2,
            mode: CurveMode::Bezier,
        }
    }
}

/// Opaque host input event forwarded to listeners untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput(pub serde_json::Value);

/// Node slot of a graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
    pub data: Option<NodeTypeRef>,
    pub position: Vec2,
}

/// Node slot of a path; its position is derived from the curve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathNode {
    pub data: Option<NodeTypeRef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub endpoints: [usize; 2],
    /// (forward cost, backward cost)
    pub weight: Vec2,
}

impl Default for Connection {
    fn default() -> Self {
        Connection {
            endpoints: [0, 0],
            weight: Vec2::new(1.0, 1.0),
        }
    }
}
