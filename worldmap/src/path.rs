//! Worldmap path: an ordered run of nodes laid out along one line, arc or bezier.
//!
//! Node positions are never stored. Each layout pass samples the curve at
//! `i = 1..=node_count` out of `segment_count` gaps, sample 0 being the anchor at
//! `start`.

use std::cell::RefCell;

use log::{debug, warn};

use crate::config::LayoutConfig;
use crate::error::{PropertyError, Result};
use crate::geometry::layout;
use crate::geometry::limits::vec_in_bounds;
use crate::hit_region::{Headless, HitRegionHost};
use crate::model::{CurveMode, PathNode, PathShape, RawInput, Rect, Vec2};
use crate::picking;
use crate::property::descriptor::PropertyDescriptor;
use crate::property::key::PropertyKey;
use crate::property::store::{Change, FieldRejection, FieldSpec, Record, RecordArray};
use crate::property::value::{Value, ValueKind};
use crate::signal::{Signal, Signals};
use crate::{ControlHandle, NodeArrays, Pick};

pub const POINT_DISTANCE: &str = "point_distance";

const NODE_DATA: FieldSpec = FieldSpec {
    name: "data",
    kind: ValueKind::NodeType,
};

impl Record for PathNode {
    const FIELDS: &'static [FieldSpec] = &[NODE_DATA];
    const BULK_FIELD: Option<FieldSpec> = Some(NODE_DATA);

    fn get(&self, field: &str) -> Option<Value> {
        (field == "data").then(|| Value::from(self.data.clone()))
    }

    fn set(&mut self, field: &str, value: &Value) -> std::result::Result<(), FieldRejection> {
        if field != "data" {
            return Err(FieldRejection::Unknown);
        }
        self.data = value
            .as_node_type()
            .ok_or(FieldRejection::Type(ValueKind::NodeType))?;
        Ok(())
    }
}

pub struct WorldmapPath<H: HitRegionHost = Headless> {
    pub(crate) nodes: RecordArray<PathNode, H::Region>,
    start: Vec2,
    // None until first activation
    end: Option<Vec2>,
    handle1: Vec2,
    handle2: Vec2,
    mode: CurveMode,
    end_with_empty: bool,
    host: H,
    config: LayoutConfig,
    signals: Signals,
    layout_ver: u64,
    placed_ver: u64,
    positions: RefCell<Option<(u64, Vec<Vec2>)>>,
}

impl WorldmapPath<Headless> {
    pub fn new() -> Self {
        Self::with_host(Headless)
    }
}

impl Default for WorldmapPath<Headless> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HitRegionHost> WorldmapPath<H> {
    pub fn with_host(host: H) -> Self {
        WorldmapPath {
            nodes: RecordArray::new("node", "Nodes"),
            start: Vec2::ZERO,
            end: None,
            handle1: Vec2::ZERO,
            handle2: Vec2::ZERO,
            mode: CurveMode::Line,
            end_with_empty: false,
            host,
            config: LayoutConfig::default(),
            signals: Signals::default(),
            layout_ver: 1,
            placed_ver: 0,
            positions: RefCell::new(None),
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

    pub fn node(&self, index: usize) -> Option<&PathNode> {
        self.nodes.get(index)
    }

    // Curve parameters

    /// Current curve, or `None` before the end point is initialized.
    pub fn shape(&self) -> Option<PathShape> {
        Some(PathShape {
            start: self.start,
            end: self.end?,
            handle1: self.handle1,
            handle2: self.handle2,
            mode: self.mode,
        })
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Option<Vec2> {
        self.end
    }

    pub fn handle1(&self) -> Vec2 {
        self.handle1
    }

    pub fn handle2(&self) -> Vec2 {
        self.handle2
    }

    pub fn mode(&self) -> CurveMode {
        self.mode
    }

    pub fn end_with_empty(&self) -> bool {
        self.end_with_empty
    }

    pub fn set_shape(&mut self, shape: PathShape) -> bool {
        if ![shape.start, shape.end, shape.handle1, shape.handle2]
            .into_iter()
            .all(vec_in_bounds)
        {
            return false;
        }
        self.start = shape.start;
        self.end = Some(shape.end);
        self.handle1 = shape.handle1;
        self.handle2 = shape.handle2;
        self.set_mode(shape.mode);
        self.invalidate();
        true
    }

    /// Move one control point. Returns false for non-finite points.
    pub fn set_control(&mut self, handle: ControlHandle, p: Vec2) -> bool {
        if !vec_in_bounds(p) {
            return false;
        }
        match handle {
            ControlHandle::Start => self.start = p,
            ControlHandle::End => self.end = Some(p),
            ControlHandle::Handle1 => self.handle1 = p,
            ControlHandle::Handle2 => self.handle2 = p,
        }
        self.invalidate();
        true
    }

    pub fn set_mode(&mut self, mode: CurveMode) {
        let had_distance = self.mode != CurveMode::Bezier;
        self.mode = mode;
        if had_distance != (mode != CurveMode::Bezier) {
            self.signals.property_list_changed();
        }
        self.invalidate();
    }

    pub fn set_end_with_empty(&mut self, end_with_empty: bool) {
        self.end_with_empty = end_with_empty;
        self.invalidate();
    }

    pub fn segment_count(&self) -> usize {
        layout::segment_count(self.nodes.len(), self.end_with_empty)
    }

    /// Initialize the curve on first activation, then fold the owner's origin into
    /// it. Returns the origin the host must now give the owner: zero, or `origin`
    /// itself when the shift would push a coordinate out of bounds and nothing moved.
    ///
    /// `handle2` is shifted only outside bezier mode: a bezier's second handle is
    /// deliberately left where it is.
    pub fn activate(&mut self, origin: Vec2) -> Vec2 {
        if self.end.is_none() {
            let end = self.start + Vec2::new(self.config.default_path_length, 0.0);
            self.end = Some(end);
            self.handle1 = self.start;
            self.handle2 = end;
            debug!("path: initialized end at {:?}", end);
            self.invalidate();
        }
        if origin == Vec2::ZERO {
            return Vec2::ZERO;
        }
        let shift_handle2 = self.mode != CurveMode::Bezier;
        let mut moved = vec![self.start + origin, self.handle1 + origin];
        moved.extend(self.end.map(|e| e + origin));
        if shift_handle2 {
            moved.push(self.handle2 + origin);
        }
        if !vec_in_bounds(origin) || !moved.into_iter().all(vec_in_bounds) {
            warn!("path: origin {:?} would leave coordinate bounds, not rebased", origin);
            return origin;
        }
        self.start += origin;
        if let Some(end) = self.end.as_mut() {
            *end += origin;
        }
        self.handle1 += origin;
        if shift_handle2 {
            self.handle2 += origin;
        }
        debug!("path: rebased by {:?}", origin);
        self.invalidate();
        Vec2::ZERO
    }

    // Layout

    /// Positions of every node, sampled from the curve. Empty before activation.
    pub fn node_positions(&self) -> Vec<Vec2> {
        if let Some((ver, cached)) = self.positions.borrow().as_ref() {
            if *ver == self.layout_ver {
                return cached.clone();
            }
        }
        let computed = match self.shape() {
            Some(shape) => {
                let segments = self.segment_count();
                (1..=self.nodes.len())
                    .map(|i| layout::point_at(&shape, i, segments))
                    .collect()
            }
            None => Vec::new(),
        };
        *self.positions.borrow_mut() = Some((self.layout_ver, computed.clone()));
        computed
    }

    pub fn node_position(&self, index: usize) -> Option<Vec2> {
        self.node_positions().get(index).copied()
    }

    pub fn node_rect(&self, index: usize) -> Option<Rect> {
        let p = self.node_position(index)?;
        let size = self.nodes.get(index)?.data.as_ref().map_or(Vec2::ZERO, |t| t.texture_size);
        Some(Rect::centered(p, size))
    }

    /// Spacing between adjacent samples; `None` for bezier curves and empty paths.
    pub fn distance_between_points(&self) -> Option<f32> {
        layout::distance_between_points(&self.shape()?, self.segment_count())
    }

    /// Move `end` so adjacent samples sit `target` apart. `start` stays put.
    /// Arcs whose solved sweep passes a half turn wrap, so the spacing read back
    /// afterwards differs from `target`.
    pub fn solve_distance_between_points(&mut self, target: f32) -> bool {
        let Some(shape) = self.shape() else {
            return false;
        };
        match layout::solve_distance_between_points(&shape, self.segment_count(), target) {
            Some(end) if vec_in_bounds(end) => {
                self.end = Some(end);
                self.invalidate();
                true
            }
            _ => false,
        }
    }

    pub fn curve_length(&self) -> f32 {
        self.shape()
            .map_or(0.0, |s| layout::curve_length(&s, self.config.flatten_tolerance))
    }

    /// Polyline through every sample gap of the curve, for drawing.
    pub fn curve_points(&self) -> Vec<Vec2> {
        self.shape()
            .map_or_else(Vec::new, |s| layout::flatten(&s, self.config.flatten_tolerance))
    }

    /// Place every hit region at its node's rect.
    pub fn layout(&mut self) {
        if self.placed_ver == self.layout_ver {
            return;
        }
        let positions = self.node_positions();
        for (slot, p) in self.nodes.slots_mut().zip(positions) {
            let size = slot
                .record
                .data
                .as_ref()
                .map_or(Vec2::ZERO, |t| t.texture_size);
            let active = slot.record.data.is_some();
            self.host
                .place(&mut slot.region, Rect::centered(p, size), active);
        }
        self.placed_ver = self.layout_ver;
    }

    pub fn node_arrays(&self) -> NodeArrays {
        let mut out = NodeArrays::default();
        for (i, (n, p)) in self.nodes.records().zip(self.node_positions()).enumerate() {
            if let Some(t) = &n.data {
                out.indices.push(i as u32);
                out.positions.extend_from_slice(&[p.x, p.y]);
                out.sizes.extend_from_slice(&[t.texture_size.x, t.texture_size.y]);
            }
        }
        out
    }

    // Property protocol

    fn distance_listed(&self) -> bool {
        self.mode != CurveMode::Bezier
    }

    pub fn list_properties(&self) -> Vec<PropertyDescriptor> {
        let mut out = vec![self.nodes.count_descriptor()];
        out.extend(self.nodes.field_descriptors(|_| true));
        out.extend(self.nodes.bulk_descriptor());
        if self.distance_listed() {
            out.push(PropertyDescriptor::Computed {
                name: POINT_DISTANCE.to_string(),
                value: ValueKind::Float,
            });
        }
        out
    }

    pub fn get_property(&self, key: &str) -> Option<Value> {
        if key == POINT_DISTANCE {
            return self.distance_between_points().map(Value::Float);
        }
        let key = PropertyKey::parse(key)?;
        self.nodes.get_property(&key)
    }

    /// `false` only when `key` is not a virtual property of this path.
    pub fn set_property(&mut self, key: &str, value: Value) -> bool {
        match self.try_set_property(key, value) {
            Ok(()) => true,
            Err(e) => {
                if e.is_handled() {
                    warn!("path: {}", e);
                }
                e.is_handled()
            }
        }
    }

    pub fn try_set_property(&mut self, key: &str, value: Value) -> Result<()> {
        if key == POINT_DISTANCE {
            let target = value.as_float().ok_or_else(|| PropertyError::TypeMismatch {
                key: key.to_string(),
                expected: ValueKind::Float,
            })?;
            if !self.solve_distance_between_points(target) {
                return Err(PropertyError::Unsolvable(key.to_string()));
            }
            return Ok(());
        }
        let parsed = PropertyKey::parse(key).ok_or_else(|| PropertyError::UnknownKey(key.to_string()))?;
        let max = self.config.max_records;
        let change = self
            .nodes
            .set_property(&parsed, &value, &mut self.host, max)?;
        if let Change::Resized { .. } = change {
            self.signals.property_list_changed();
        }
        self.invalidate();
        Ok(())
    }

    // Revert hooks: each control point reverts to the point it collapses onto in
    // a straight default curve.

    fn revert_target(&self, key: &str) -> Option<(Vec2, Vec2)> {
        let end = self.end?;
        match key {
            "start" => Some((self.start, end)),
            "end" => Some((end, self.start)),
            "handle1" => Some((self.handle1, self.start)),
            "handle2" => Some((self.handle2, end)),
            _ => None,
        }
    }

    pub fn can_revert(&self, key: &str) -> bool {
        self.revert_target(key).is_some_and(|(current, target)| current != target)
    }

    pub fn revert_value(&self, key: &str) -> Option<Value> {
        self.revert_target(key).map(|(_, target)| Value::Vec2(target))
    }

    /// Apply `revert_value(key)`. Returns false when there is nothing to revert.
    pub fn revert(&mut self, key: &str) -> bool {
        if !self.can_revert(key) {
            return false;
        }
        let Some((_, target)) = self.revert_target(key) else {
            return false;
        };
        let handle = match key {
            "start" => ControlHandle::Start,
            "end" => ControlHandle::End,
            "handle1" => ControlHandle::Handle1,
            _ => ControlHandle::Handle2,
        };
        self.set_control(handle, target)
    }

    // Input

    pub fn forward_input(&mut self, index: usize, event: RawInput) -> bool {
        match self.nodes.get(index).and_then(|n| n.data.clone()) {
            Some(node_type) => {
                self.signals.node_input(event, index, node_type);
                true
            }
            None => false,
        }
    }

    // Canvas editing

    /// Control points the editor shows drag handles for in the current mode.
    pub fn visible_controls(&self) -> &'static [ControlHandle] {
        match self.mode {
            CurveMode::Line => &[ControlHandle::Start, ControlHandle::End],
            CurveMode::Arc => &[ControlHandle::Start, ControlHandle::End, ControlHandle::Handle1],
            CurveMode::Bezier => &[
                ControlHandle::Start,
                ControlHandle::End,
                ControlHandle::Handle1,
                ControlHandle::Handle2,
            ],
        }
    }

    pub fn control_point(&self, handle: ControlHandle) -> Option<Vec2> {
        match handle {
            ControlHandle::Start => Some(self.start),
            ControlHandle::End => self.end,
            ControlHandle::Handle1 => Some(self.handle1),
            ControlHandle::Handle2 => Some(self.handle2),
        }
    }

    pub fn pick(&self, point: Vec2, tolerance: f32) -> Option<Pick> {
        picking::pick_path(self, point, tolerance)
    }

    pub fn pick_default(&self, point: Vec2) -> Option<Pick> {
        self.pick(point, self.config.pick_tolerance)
    }

    /// Drag a picked control point to `point`; nodes follow the curve and cannot be dragged.
    pub fn drag(&mut self, pick: &Pick, point: Vec2) -> bool {
        match *pick {
            Pick::Control { handle, .. } => self.set_control(handle, point),
            _ => false,
        }
    }
}
