//! Free-form worldmap graph: positioned nodes joined by weighted connections.

use log::{debug, warn};

use crate::config::LayoutConfig;
use crate::error::{PropertyError, Result};
use crate::geometry::limits::vec_in_bounds;
use crate::hit_region::{Headless, HitRegionHost};
use crate::model::{Connection, ConnectionMode, GraphNode, RawInput, Rect, Vec2};
use crate::picking;
use crate::Pick;
use crate::property::descriptor::PropertyDescriptor;
use crate::property::key::PropertyKey;
use crate::property::store::{Change, FieldRejection, FieldSpec, Record, RecordArray};
use crate::property::value::{Value, ValueKind};
use crate::signal::{Signal, Signals};

const NODE_DATA: FieldSpec = FieldSpec {
    name: "data",
    kind: ValueKind::NodeType,
};
const NODE_POSITION: FieldSpec = FieldSpec {
    name: "position",
    kind: ValueKind::Vec2,
};
const CONNECTION_ENDPOINTS: FieldSpec = FieldSpec {
    name: "endpoints",
    kind: ValueKind::Int2,
};
const CONNECTION_WEIGHT: FieldSpec = FieldSpec {
    name: "weight",
    kind: ValueKind::Vec2,
};

impl Record for GraphNode {
    const FIELDS: &'static [FieldSpec] = &[NODE_DATA, NODE_POSITION];
    const BULK_FIELD: Option<FieldSpec> = Some(NODE_DATA);

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "data" => Some(Value::from(self.data.clone())),
            "position" => Some(Value::Vec2(self.position)),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: &Value) -> std::result::Result<(), FieldRejection> {
        match field {
            "data" => {
                self.data = value
                    .as_node_type()
                    .ok_or(FieldRejection::Type(ValueKind::NodeType))?;
            }
            "position" => {
                let p = value.as_vec2().ok_or(FieldRejection::Type(ValueKind::Vec2))?;
                if !vec_in_bounds(p) {
                    return Err(FieldRejection::NonFinite);
                }
                self.position = p;
            }
            _ => return Err(FieldRejection::Unknown),
        }
        Ok(())
    }
}

impl Record for Connection {
    const FIELDS: &'static [FieldSpec] = &[CONNECTION_ENDPOINTS, CONNECTION_WEIGHT];

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "endpoints" => Some(Value::Int2([
                self.endpoints[0] as i64,
                self.endpoints[1] as i64,
            ])),
            "weight" => Some(Value::Vec2(self.weight)),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: &Value) -> std::result::Result<(), FieldRejection> {
        match field {
            "endpoints" => {
                let [a, b] = value.as_int2().ok_or(FieldRejection::Type(ValueKind::Int2))?;
                self.endpoints = [a.max(0) as usize, b.max(0) as usize];
            }
            "weight" => {
                let w = value.as_vec2().ok_or(FieldRejection::Type(ValueKind::Vec2))?;
                if !w.is_finite() {
                    return Err(FieldRejection::NonFinite);
                }
                self.weight = w;
            }
            _ => return Err(FieldRejection::Unknown),
        }
        Ok(())
    }
}

/// Flat per-node render data; nodes without a node type are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeArrays {
    pub indices: Vec<u32>,
    pub positions: Vec<f32>,
    pub sizes: Vec<f32>,
}

/// Flat per-connection render data; connections with a dangling endpoint are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionArrays {
    pub indices: Vec<u32>,
    pub endpoints: Vec<u32>,
    pub segments: Vec<f32>,
    pub weights: Vec<f32>,
}

pub struct WorldmapGraph<H: HitRegionHost = Headless> {
    pub(crate) nodes: RecordArray<GraphNode, H::Region>,
    pub(crate) connections: RecordArray<Connection>,
    connection_mode: ConnectionMode,
    host: H,
    config: LayoutConfig,
    signals: Signals,
    layout_ver: u64,
    placed_ver: u64,
}

impl WorldmapGraph<Headless> {
    pub fn new() -> Self {
        Self::with_host(Headless)
    }
}

impl Default for WorldmapGraph<Headless> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HitRegionHost> WorldmapGraph<H> {
    pub fn with_host(host: H) -> Self {
        WorldmapGraph {
            nodes: RecordArray::new("node", "Nodes"),
            connections: RecordArray::new("connection", "Connections"),
            connection_mode: ConnectionMode::default(),
            host,
            config: LayoutConfig::default(),
            signals: Signals::default(),
            layout_ver: 1,
            placed_ver: 0,
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.invalidate();
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Monotonic counter bumped by every mutation.
    pub fn layout_version(&self) -> u64 {
        self.layout_ver
    }

    fn invalidate(&mut self) {
        self.layout_ver = self.layout_ver.wrapping_add(1);
        self.signals.redraw();
    }

    pub fn take_signals(&mut self) -> Vec<Signal> {
        self.signals.take()
    }

    pub fn pending_signals(&self) -> &[Signal] {
        self.signals.pending()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    pub fn connection(&self, index: usize) -> Option<&Connection> {
        self.connections.get(index)
    }

    pub fn connection_mode(&self) -> ConnectionMode {
        self.connection_mode
    }

    /// Select a connection mode. Bidirectional and unidirectional overwrite every
    /// weight, each time they are selected; custom leaves weights alone.
    pub fn set_connection_mode(&mut self, mode: ConnectionMode) {
        if self.connection_mode != mode {
            self.signals.property_list_changed();
        }
        self.connection_mode = mode;
        self.normalize_weights();
        debug!("graph: connection mode {:?}", mode);
        self.invalidate();
    }

    fn normalize_weights(&mut self) {
        if let Some(w) = self.connection_mode.forced_weight() {
            for c in self.connections.records_mut() {
                c.weight = w;
            }
        }
    }

    fn weight_visible(&self) -> bool {
        self.connection_mode == ConnectionMode::Custom
    }

    // Property protocol

    pub fn list_properties(&self) -> Vec<PropertyDescriptor> {
        let weight_visible = self.weight_visible();
        let mut out = vec![
            self.nodes.count_descriptor(),
            self.connections.count_descriptor(),
        ];
        out.extend(self.nodes.field_descriptors(|_| true));
        out.extend(
            self.connections
                .field_descriptors(|f| weight_visible || f.name != CONNECTION_WEIGHT.name),
        );
        out.extend(self.nodes.bulk_descriptor());
        out
    }

    pub fn get_property(&self, key: &str) -> Option<Value> {
        let key = PropertyKey::parse(key)?;
        match key.category() {
            "node" => self.nodes.get_property(&key),
            "connection" => self.connections.get_property(&key),
            _ => None,
        }
    }

    /// `false` only when `key` is not a virtual property of this graph.
    pub fn set_property(&mut self, key: &str, value: Value) -> bool {
        match self.try_set_property(key, value) {
            Ok(()) => true,
            Err(e) => {
                if e.is_handled() {
                    warn!("graph: {}", e);
                }
                e.is_handled()
            }
        }
    }

    pub fn try_set_property(&mut self, key: &str, value: Value) -> Result<()> {
        let parsed = PropertyKey::parse(key).ok_or_else(|| PropertyError::UnknownKey(key.to_string()))?;
        let max = self.config.max_records;
        let change = match parsed.category() {
            "node" => self
                .nodes
                .set_property(&parsed, &value, &mut self.host, max)?,
            "connection" => {
                let value = match parsed {
                    PropertyKey::Field { field: "endpoints", .. } => self.clamp_endpoints(&value),
                    PropertyKey::Field { field: "weight", .. } if !self.weight_visible() => {
                        return Err(PropertyError::ReadOnly(key.to_string()));
                    }
                    _ => value,
                };
                let mut no_regions = Headless;
                let change = self
                    .connections
                    .set_property(&parsed, &value, &mut no_regions, max)?;
                if let Change::Resized { .. } = change {
                    self.normalize_weights();
                }
                change
            }
            _ => return Err(PropertyError::UnknownKey(key.to_string())),
        };
        if let Change::Resized { .. } = change {
            self.signals.property_list_changed();
        }
        self.invalidate();
        Ok(())
    }

    /// Clamp both endpoint indices into `[0, node_count - 1]`.
    fn clamp_endpoints(&self, value: &Value) -> Value {
        let hi = self.nodes.len().saturating_sub(1) as i64;
        match value.as_int2() {
            Some([a, b]) => Value::Int2([a.clamp(0, hi), b.clamp(0, hi)]),
            None => value.clone(),
        }
    }

    // Editing

    /// Append a node of the parent's node type at `position`, connected from the
    /// parent. `None` when `parent` is out of range or either array is full.
    pub fn add_node(&mut self, position: Vec2, parent: usize) -> Option<usize> {
        let data = self.nodes.get(parent)?.data.clone();
        if !vec_in_bounds(position) {
            warn!("graph: add_node at non-finite position {:?}", position);
            return None;
        }
        let max = self.config.max_records;
        if self.nodes.len() >= max || self.connections.len() >= max {
            warn!("graph: add_node would exceed {} records", max);
            return None;
        }
        let index = self.nodes.push(GraphNode { data, position }, &mut self.host);
        self.connections.push(
            Connection {
                endpoints: [parent, index],
                weight: Vec2::new(1.0, 1.0),
            },
            &mut Headless,
        );
        self.normalize_weights();
        self.signals.property_list_changed();
        self.invalidate();
        Some(index)
    }

    /// Remove a node and every connection touching it; endpoints above it shift down.
    pub fn remove_node(&mut self, index: usize) -> bool {
        if self.nodes.remove(index, &mut self.host).is_none() {
            return false;
        }
        self.connections
            .retain(|c| !c.endpoints.contains(&index), &mut Headless);
        for c in self.connections.records_mut() {
            for e in c.endpoints.iter_mut() {
                if *e > index {
                    *e -= 1;
                }
            }
        }
        self.signals.property_list_changed();
        self.invalidate();
        true
    }

    pub fn move_node(&mut self, index: usize, position: Vec2) -> bool {
        if !vec_in_bounds(position) {
            return false;
        }
        match self.nodes.get_mut(index) {
            Some(n) => n.position = position,
            None => return false,
        }
        self.invalidate();
        true
    }

    /// Fold the owner's origin into every node position. Returns the origin the
    /// host must now give the owner: zero, or `origin` itself when the shift
    /// would push a coordinate out of bounds and nothing was moved.
    pub fn activate(&mut self, origin: Vec2) -> Vec2 {
        if origin == Vec2::ZERO {
            return Vec2::ZERO;
        }
        if !vec_in_bounds(origin) || !self.nodes.records().all(|n| vec_in_bounds(n.position + origin)) {
            warn!("graph: origin {:?} would leave coordinate bounds, not rebased", origin);
            return origin;
        }
        for n in self.nodes.records_mut() {
            n.position += origin;
        }
        debug!("graph: rebased {} nodes by {:?}", self.nodes.len(), origin);
        self.invalidate();
        Vec2::ZERO
    }

    /// Forward input seen on a node's hit region. Nodes without a node type
    /// swallow it; returns whether a signal was queued.
    pub fn forward_input(&mut self, index: usize, event: RawInput) -> bool {
        match self.nodes.get(index).and_then(|n| n.data.clone()) {
            Some(node_type) => {
                self.signals.node_input(event, index, node_type);
                true
            }
            None => false,
        }
    }

    // Layout

    pub fn node_rect(&self, index: usize) -> Option<Rect> {
        let n = self.nodes.get(index)?;
        Some(node_rect(n))
    }

    /// Place every hit region at its node's rect. Skipped when nothing changed
    /// since the last pass.
    pub fn layout(&mut self) {
        if self.placed_ver == self.layout_ver {
            return;
        }
        for slot in self.nodes.slots_mut() {
            let rect = node_rect(&slot.record);
            self.host
                .place(&mut slot.region, rect, slot.record.data.is_some());
        }
        self.placed_ver = self.layout_ver;
    }

    pub fn node_arrays(&self) -> NodeArrays {
        let mut out = NodeArrays::default();
        for (i, n) in self.nodes.records().enumerate() {
            if let Some(t) = &n.data {
                out.indices.push(i as u32);
                out.positions.extend_from_slice(&[n.position.x, n.position.y]);
                out.sizes.extend_from_slice(&[t.texture_size.x, t.texture_size.y]);
            }
        }
        out
    }

    pub fn connection_arrays(&self) -> ConnectionArrays {
        let mut out = ConnectionArrays::default();
        for (i, c) in self.connections.records().enumerate() {
            let (Some(a), Some(b)) = (self.nodes.get(c.endpoints[0]), self.nodes.get(c.endpoints[1]))
            else {
                continue;
            };
            out.indices.push(i as u32);
            out.endpoints
                .extend_from_slice(&[c.endpoints[0] as u32, c.endpoints[1] as u32]);
            out.segments.extend_from_slice(&[
                a.position.x,
                a.position.y,
                b.position.x,
                b.position.y,
            ]);
            out.weights.extend_from_slice(&[c.weight.x, c.weight.y]);
        }
        out
    }

    // Canvas editing

    pub fn pick(&self, point: Vec2, tolerance: f32) -> Option<Pick> {
        picking::pick_graph(self, point, tolerance)
    }

    /// Pick with the configured tolerance.
    pub fn pick_default(&self, point: Vec2) -> Option<Pick> {
        self.pick(point, self.config.pick_tolerance)
    }

    /// Drag a picked node to `point`; connections and handles cannot be dragged.
    pub fn drag(&mut self, pick: &Pick, point: Vec2) -> bool {
        match *pick {
            Pick::Node { index, .. } => self.move_node(index, point),
            _ => false,
        }
    }
}

fn node_rect(n: &GraphNode) -> Rect {
    let size = n.data.as_ref().map_or(Vec2::ZERO, |t| t.texture_size);
    Rect::centered(n.position, size)
}
