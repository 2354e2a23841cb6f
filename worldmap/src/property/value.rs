//! Dynamic values carried by the property protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{NodeTypeRef, Vec2};

/// A property value as the host editor sees it.
///
/// Serialized untagged so a host can pass plain values: `null`, `true`, `3`,
/// `2.5`, `[1, 0]`, `{"x": 1, "y": 2}` or a node type object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f32),
    Int2([i64; 2]),
    Vec2(Vec2),
    NodeType(NodeTypeRef),
}

/// Declared type of a property slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Int2,
    Vec2,
    NodeType,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Int2 => "int2",
            ValueKind::Vec2 => "vec2",
            ValueKind::NodeType => "node type",
        };
        f.write_str(s)
    }
}

impl Value {
    /// Integer value; floats with no fractional part are accepted.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Value::Vec2(v) => Some(*v),
            Value::Int2([x, y]) => Some(Vec2::new(*x as f32, *y as f32)),
            _ => None,
        }
    }

    pub fn as_int2(&self) -> Option<[i64; 2]> {
        match self {
            Value::Int2(p) => Some(*p),
            Value::Vec2(v) if v.x.fract() == 0.0 && v.y.fract() == 0.0 => {
                Some([v.x as i64, v.y as i64])
            }
            _ => None,
        }
    }

    /// `Some(None)` for `Nil`: a null node type is a valid slot value.
    pub fn as_node_type(&self) -> Option<Option<NodeTypeRef>> {
        match self {
            Value::Nil => Some(None),
            Value::NodeType(t) => Some(Some(t.clone())),
            _ => None,
        }
    }
}

impl From<Option<NodeTypeRef>> for Value {
    fn from(t: Option<NodeTypeRef>) -> Self {
        t.map_or(Value::Nil, Value::NodeType)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vec2(v)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
