use std::collections::HashSet;
use std::path::Path;

use bpmn_lanes::{
    DiagramOp, ElementKind, Layout, LayoutConfig, LayoutError, ViewportConfig, compute_layout,
    layout::lane_key, layout_from_json, parse_process, record_operations,
};

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture read failed")
}

fn layout_fixture(name: &str) -> Layout {
    let input = read_fixture(name);
    layout_from_json(&input, &LayoutConfig::default())
        .unwrap_or_else(|err| panic!("{name}: layout failed: {err}"))
}

fn position(layout: &Layout, id: &str) -> (i32, i32) {
    let node = layout.node(id).unwrap_or_else(|| panic!("node {id} missing"));
    (node.x, node.y)
}

fn assert_layout_properties(layout: &Layout, input: &str, fixture: &str) {
    let config = LayoutConfig::default();
    let elements = parse_process(input).expect("parse failed");

    let mut actors: Vec<String> = Vec::new();
    for element in &elements {
        let key = lane_key(&element.actor);
        if !actors.contains(&key) {
            actors.push(key);
        }
    }
    let lane_keys: Vec<String> = layout.lanes.iter().map(|lane| lane.actor_key.clone()).collect();
    assert_eq!(lane_keys, actors, "{fixture}: lanes out of order");

    let mut cells = HashSet::new();
    for node in &layout.nodes {
        assert!(node.x >= 0, "{fixture}: {} has negative x", node.id());
        assert_eq!(node.x % config.column_width, 0, "{fixture}: {} off column", node.id());
        let lane_top = node.lane as i32 * config.lane_height;
        let row = node.y - lane_top;
        assert!(row >= 0, "{fixture}: {} above its lane", node.id());
        assert_eq!(row % config.branch_row_offset, 0, "{fixture}: {} off row", node.id());
        assert!(
            cells.insert((node.x, node.y)),
            "{fixture}: {} shares cell ({}, {})",
            node.id(),
            node.x,
            node.y
        );
    }

    let max_x = layout.nodes.iter().map(|node| node.x).max().unwrap_or(0);
    for lane in &layout.lanes {
        assert_eq!(lane.width, max_x + config.lane_trailing_margin, "{fixture}: lane width");
        assert_eq!(lane.height, config.lane_height, "{fixture}: lane height");
    }

    for edge in &layout.edges {
        let (source, target) = (position(layout, &edge.source), position(layout, &edge.target));
        assert!(
            target.0 > source.0,
            "{fixture}: {} at x={} not after its predecessor {} at x={}",
            edge.target,
            target.0,
            edge.source,
            source.0
        );
    }

    let reference_count: usize = elements.iter().map(|e| e.predecessors.ids().len()).sum();
    assert_eq!(layout.edges.len(), reference_count, "{fixture}: edge count");

    for node in &layout.nodes {
        let outgoing: Vec<_> = layout.outgoing(node.id()).collect();
        let labels: Vec<Option<&str>> = outgoing.iter().map(|e| e.label.as_deref()).collect();
        if node.element.kind == ElementKind::ExclusiveGateway && outgoing.len() == 2 {
            assert_eq!(labels, [Some("Yes"), Some("No")], "{fixture}: {}", node.id());
        } else {
            assert!(labels.iter().all(Option::is_none), "{fixture}: {}", node.id());
        }
    }
}

#[test]
fn fixtures_satisfy_layout_properties() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = [
        "sequential.json",
        "exclusive_merge.json",
        "parallel_join.json",
        "nested_gateways.json",
        "exclusive_end_events.json",
        "nested_longer_primary.json",
        "nested_longer_sibling.json",
    ];

    for fixture in fixtures {
        let input = read_fixture(fixture);
        let layout = layout_fixture(fixture);
        assert_layout_properties(&layout, &input, fixture);

        let again = layout_fixture(fixture);
        assert_eq!(layout, again, "{fixture}: layout not idempotent");
    }
}

#[test]
fn sequential_process_keeps_grid() {
    let layout = layout_fixture("sequential.json");
    assert_eq!(layout.lanes.len(), 2);
    assert_eq!(layout.lanes[0].name, "ActorA");
    assert_eq!(layout.lanes[1].name, "ActorB");
    let pairs: Vec<(&str, &str)> = layout
        .edges
        .iter()
        .map(|edge| (edge.source.as_str(), edge.target.as_str()))
        .collect();
    assert_eq!(pairs, [("S", "T1"), ("T1", "T2")]);
    assert!(layout.spans.is_empty());
    assert_eq!(position(&layout, "T2"), (300, 200));
}

#[test]
fn exclusive_branch_is_displaced_under_primary_flow() {
    let layout = layout_fixture("exclusive_merge.json");
    assert_eq!(position(&layout, "T1"), (300, 0));
    assert_eq!(position(&layout, "T2"), (300, 350));
    assert_eq!(position(&layout, "Merge"), (450, 0));
    assert_eq!(position(&layout, "E"), (600, 0));
    assert_eq!(layout.incoming("Merge").count(), 2);

    let spans = layout.spans_for("G").expect("gateway spans");
    assert_eq!(spans.spans, vec![1, 1]);
    assert_eq!(layout.lanes[0].width, 800);
}

#[test]
fn parallel_branches_share_columns() {
    let layout = layout_fixture("parallel_join.json");
    assert_eq!(position(&layout, "Task_20"), (300, 200));
    assert_eq!(position(&layout, "Task_31"), (450, 200));
    assert_eq!(position(&layout, "Task_44"), (300, 150));
    assert_eq!(position(&layout, "ParallelGateway_Join_60"), (600, 0));
    assert_eq!(position(&layout, "EndEvent_71"), (750, 0));
    let purchasing = layout.lane("Purchasing").expect("purchasing lane");
    assert_eq!((purchasing.index, purchasing.y), (1, 200));
}

#[test]
fn nested_gateways_compose() {
    let layout = layout_fixture("nested_gateways.json");
    assert_eq!(position(&layout, "Task_15"), (450, 0));
    assert_eq!(position(&layout, "Task_22"), (450, 350));
    assert_eq!(position(&layout, "ExclusiveGateway_Join_30"), (600, 0));
    assert_eq!(position(&layout, "Task_41"), (300, 500));
    assert_eq!(position(&layout, "Task_47"), (450, 500));
    assert_eq!(position(&layout, "ExclusiveGateway_Join_55"), (750, 0));
    assert_eq!(position(&layout, "EndEvent_60"), (900, 0));
}

#[test]
fn merge_waits_for_longer_primary_branch() {
    let layout = layout_fixture("nested_longer_primary.json");
    assert_eq!(position(&layout, "Task_14"), (750, 0));
    assert_eq!(position(&layout, "ParallelGateway_18"), (300, 500));
    assert_eq!(position(&layout, "Task_25"), (450, 650));
    assert_eq!(position(&layout, "ParallelGateway_Join_29"), (600, 500));
    assert_eq!(position(&layout, "ExclusiveGateway_Join_33"), (900, 0));
    assert_eq!(position(&layout, "EndEvent_37"), (1050, 0));
}

#[test]
fn nested_merge_does_not_drag_outer_merge() {
    let layout = layout_fixture("nested_longer_sibling.json");
    assert_eq!(position(&layout, "b"), (450, 350));
    assert_eq!(position(&layout, "M2"), (600, 0));
    assert_eq!(position(&layout, "f"), (750, 500));
    assert_eq!(position(&layout, "M1"), (900, 0));
    assert_eq!(position(&layout, "E"), (1050, 0));
}

#[test]
fn diverging_branches_without_merge() {
    let layout = layout_fixture("exclusive_end_events.json");
    assert_eq!(position(&layout, "Task_30"), (300, 150));
    assert_eq!(position(&layout, "EndEvent_Task_30"), (450, 150));
    let spans = layout.spans_for("ExclusiveGateway_8").expect("gateway spans");
    assert_eq!(spans.convergence, None);
}

#[test]
fn undefined_predecessor_aborts() {
    let input = read_fixture("undefined_predecessor.json");
    let elements = parse_process(&input).expect("parse failed");
    let err = compute_layout(&elements, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, LayoutError::MalformedGraph { .. }), "{err:?}");
}

#[test]
fn colliding_lane_ids_abort() {
    let input = read_fixture("lane_collision.json");
    let err = layout_from_json(&input, &LayoutConfig::default()).unwrap_err();
    let layout_err = err.downcast_ref::<LayoutError>().expect("layout error");
    assert!(matches!(layout_err, LayoutError::DuplicateLaneId { lane_id, .. } if lane_id == "SalesTeam"));
}

#[test]
fn operation_batch_starts_clean_and_fits_viewport() {
    let layout = layout_fixture("exclusive_merge.json");
    let ops = record_operations(&layout, &ViewportConfig::default());
    assert_eq!(ops[0], DiagramOp::Clear);
    let shapes = ops
        .iter()
        .filter(|op| matches!(op, DiagramOp::CreateShape { .. }))
        .count();
    assert_eq!(shapes, layout.nodes.len());
    let lanes = ops
        .iter()
        .filter(|op| matches!(op, DiagramOp::ResizeLane { .. }))
        .count();
    assert_eq!(lanes, layout.lanes.len());
    assert!(matches!(ops.last(), Some(DiagramOp::FitViewport { .. })));
}
