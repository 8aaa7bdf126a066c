use super::*;

/// Rebuilds every sequence flow from the predecessor references and the
/// nodes' current positions.
pub(super) fn rewrite_connectors(
    graph: &ElementGraph,
    nodes: &[PlacedNode],
    config: &LayoutConfig,
) -> Vec<EdgeLayout> {
    let mut edges: Vec<EdgeLayout> = Vec::new();
    for (target, element) in graph.elements().iter().enumerate() {
        for &source in graph.incoming(target) {
            let source_node = &nodes[source];
            edges.push(EdgeLayout {
                id: format!("Flow_{}_{}", source_node.id(), element.identifier),
                source: source_node.id().to_string(),
                target: element.identifier.clone(),
                kind: EdgeKind::SequenceFlow,
                label: None,
                waypoints: route(source_node, &nodes[target], config.flow.route_padding),
            });
        }
    }

    label_exclusive_branches(graph, &mut edges, &config.flow);
    debug!(edges = edges.len(), "connectors rewritten");
    edges
}

fn label_exclusive_branches(graph: &ElementGraph, edges: &mut [EdgeLayout], flow: &FlowConfig) {
    for (idx, element) in graph.elements().iter().enumerate() {
        if element.kind != ElementKind::ExclusiveGateway || graph.outgoing(idx).len() != 2 {
            continue;
        }
        let labels = [flow.yes_label.as_str(), flow.no_label.as_str()];
        let mut outgoing: Vec<&mut EdgeLayout> = edges
            .iter_mut()
            .filter(|edge| edge.source == element.identifier)
            .collect();
        // Edges are emitted per target in input order, matching `outgoing`.
        outgoing.sort_by_key(|edge| graph.position(&edge.target));
        for (edge, label) in outgoing.into_iter().zip(labels) {
            edge.label = Some(label.to_string());
        }
    }
}

fn route(source: &PlacedNode, target: &PlacedNode, padding: i32) -> Vec<(i32, i32)> {
    let s = source.bounds();
    let t = target.bounds();
    let (scx, scy) = s.center();
    let (tcx, tcy) = t.center();

    if t.x < s.right() {
        // Target is not ahead of the source: detour underneath both.
        let below = s.bottom().max(t.bottom()) + padding;
        return vec![(scx, s.bottom()), (scx, below), (tcx, below), (tcx, t.bottom())];
    }

    if scy == tcy {
        return vec![(s.right(), scy), (t.x, tcy)];
    }

    let source_edge_y = if tcy > scy { s.bottom() } else { s.y };
    let target_edge_y = if scy > tcy { t.bottom() } else { t.y };
    if source.element.kind.is_gateway() {
        // Leave a split through its top or bottom corner.
        vec![(scx, source_edge_y), (scx, tcy), (t.x, tcy)]
    } else if target.element.kind.is_gateway() {
        // Enter a join through its top or bottom corner.
        vec![(s.right(), scy), (tcx, scy), (tcx, target_edge_y)]
    } else {
        let mid = (s.right() + t.x) / 2;
        vec![(s.right(), scy), (mid, scy), (mid, tcy), (t.x, tcy)]
    }
}
