use pretty_assertions::assert_eq;
use proptest::prelude::*;
use worldmap::geometry::layout;
use worldmap::{
    ControlHandle, CurveMode, NodeType, PathShape, Pick, RegionTable, Signal, Value, Vec2,
    WorldmapPath,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn close(a: Vec2, b: Vec2, tol: f32) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]
    #[test]
    fn line_solve_then_measure(
        sx in -500.0f32..500.0, sy in -500.0f32..500.0,
        ex in -500.0f32..500.0, ey in -500.0f32..500.0,
        segments in 1usize..40, target in 0.0f32..50.0,
    ) {
        let shape = PathShape::line(Vec2::new(sx, sy), Vec2::new(ex, ey));
        let end = layout::solve_distance_between_points(&shape, segments, target).unwrap();
        let solved = PathShape::line(shape.start, end);
        let d = layout::distance_between_points(&solved, segments).unwrap();
        prop_assert!((d - target).abs() <= 1e-3 * target.max(1.0), "target {} got {}", target, d);
    }

    #[test]
    fn arc_solve_then_measure(
        radius in 10.0f32..400.0,
        start_angle in -3.0f32..3.0,
        sweep in 0.05f32..2.5,
        segments in 1usize..16,
        frac in 0.01f32..0.9,
    ) {
        let center = Vec2::new(20.0, -30.0);
        let at = |a: f32| center + Vec2::new(a.cos(), a.sin()) * radius;
        let shape = PathShape::arc(center, at(start_angle), at(start_angle + sweep));
        // Keep the solved sweep below a half turn so winding cannot flip.
        let target = 2.0 * radius * (frac * std::f32::consts::FRAC_PI_2 / segments as f32).sin();
        let end = layout::solve_distance_between_points(&shape, segments, target).unwrap();
        let solved = PathShape { end, ..shape };
        let d = layout::distance_between_points(&solved, segments).unwrap();
        prop_assert!((d - target).abs() <= 1e-2 * target.max(1.0), "target {} got {}", target, d);
        prop_assert!((end.distance_to(center) - radius).abs() <= 1e-2 * radius);
    }

    #[test]
    fn path_nodes_lie_on_line(n in 0i64..60, end_with_empty in any::<bool>()) {
        let mut p = WorldmapPath::new();
        p.set_shape(PathShape::line(Vec2::ZERO, Vec2::new(0.0, 240.0)));
        p.set_end_with_empty(end_with_empty);
        p.set_property("node_count", Value::Int(n));
        let positions = p.node_positions();
        prop_assert_eq!(positions.len(), n as usize);
        let mut last = 0.0f32;
        for q in positions {
            prop_assert!(q.x.abs() < 1e-3);
            prop_assert!(q.y > last && q.y <= 240.0 + 1e-3);
            last = q.y;
        }
    }
}

#[test]
fn three_nodes_at_thirds() {
    init_logs();
    let mut p = WorldmapPath::new();
    p.set_shape(PathShape::line(Vec2::ZERO, Vec2::new(100.0, 0.0)));
    p.set_property("node_count", Value::Int(3));
    let pos = p.node_positions();
    assert!(close(pos[0], Vec2::new(33.333, 0.0), 1e-2));
    assert!(close(pos[1], Vec2::new(66.667, 0.0), 1e-2));
    assert!(close(pos[2], Vec2::new(100.0, 0.0), 1e-3));
}

#[test]
fn quarter_arc_midpoint() {
    let mut p = WorldmapPath::new();
    p.set_shape(PathShape::arc(
        Vec2::ZERO,
        Vec2::new(10.0, 0.0),
        Vec2::new(0.0, 10.0),
    ));
    p.set_property("node_count", Value::Int(2));
    let h = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
    assert!(close(p.node_position(0).unwrap(), Vec2::new(h, h), 1e-3));
    assert!(close(p.node_position(1).unwrap(), Vec2::new(0.0, 10.0), 1e-3));
}

#[test]
fn bezier_ends_on_end_point() {
    let mut p = WorldmapPath::new();
    p.set_shape(PathShape::bezier(
        Vec2::ZERO,
        Vec2::new(0.0, 40.0),
        Vec2::new(40.0, 40.0),
        Vec2::new(40.0, 0.0),
    ));
    p.set_property("node_count", Value::Int(4));
    assert!(close(p.node_position(3).unwrap(), Vec2::new(40.0, 0.0), 1e-3));
    assert_eq!(p.get_property("point_distance"), None);
    assert!(p.curve_length() > 40.0);
    let pts = p.curve_points();
    assert_eq!(pts[0], Vec2::ZERO);
}

#[test]
fn regions_follow_the_curve() {
    init_logs();
    let mut p = WorldmapPath::with_host(RegionTable::new());
    p.set_shape(PathShape::line(Vec2::ZERO, Vec2::new(90.0, 0.0)));
    p.set_property("node_count", Value::Int(3));
    p.set_property(
        "node_set_all",
        Value::NodeType(NodeType::new("stop", Vec2::new(6.0, 6.0))),
    );
    p.layout();
    assert_eq!(p.host().hit(Vec2::new(31.0, 1.0)), Some(0));
    assert_eq!(p.host().hit(Vec2::new(45.0, 0.0)), None);

    p.set_control(ControlHandle::End, Vec2::new(0.0, 90.0));
    p.layout();
    assert_eq!(p.host().hit(Vec2::new(0.0, 60.0)), Some(1));

    p.set_property("node_count", Value::Int(1));
    assert_eq!(p.host().len(), 1);
    assert_eq!(p.host().disposed, 2);
}

#[test]
fn drag_moves_only_controls() {
    let mut p = WorldmapPath::new();
    p.set_shape(PathShape::line(Vec2::ZERO, Vec2::new(100.0, 0.0)));
    p.set_property("node_count", Value::Int(2));
    p.set_property(
        "node_set_all",
        Value::NodeType(NodeType::new("stop", Vec2::new(4.0, 4.0))),
    );

    let grab = p.pick_default(Vec2::new(99.0, 1.0)).unwrap();
    assert_eq!(
        grab,
        Pick::Control {
            handle: ControlHandle::End,
            dist: 2f32.sqrt()
        }
    );
    assert!(p.drag(&grab, Vec2::new(100.0, 100.0)));
    assert_eq!(p.end(), Some(Vec2::new(100.0, 100.0)));

    let node = p.pick_default(Vec2::new(50.0, 50.0)).unwrap();
    assert!(matches!(node, Pick::Node { index: 0, .. }));
    assert!(!p.drag(&node, Vec2::ZERO));
}

#[test]
fn mode_switch_changes_property_list() {
    let mut p = WorldmapPath::new();
    p.activate(Vec2::ZERO);
    p.take_signals();
    p.set_mode(CurveMode::Arc);
    assert!(!p.take_signals().contains(&Signal::PropertyListChanged));
    p.set_mode(CurveMode::Bezier);
    assert!(p.take_signals().contains(&Signal::PropertyListChanged));
    p.set_mode(CurveMode::Line);
    assert!(p.take_signals().contains(&Signal::PropertyListChanged));
}

#[test]
fn point_distance_on_empty_path_is_unsolvable() {
    let mut p = WorldmapPath::new();
    p.activate(Vec2::ZERO);
    assert_eq!(p.get_property("point_distance"), None);
    let err = p
        .try_set_property("point_distance", Value::Float(4.0))
        .unwrap_err();
    assert_eq!(err.code(), "unsolvable");
    assert!(p.set_property("point_distance", Value::Float(4.0)));
    let err = p
        .try_set_property("point_distance", Value::Bool(false))
        .unwrap_err();
    assert_eq!(err.code(), "type_mismatch");
}
