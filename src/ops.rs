use crate::config::ViewportConfig;
use crate::layout::{Bounds, EdgeLayout, Layout};
use serde::Serialize;

/// One call against the diagram editor, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DiagramOp {
    Clear,
    #[serde(rename_all = "camelCase")]
    CreateParticipant { label: String, lane_count: usize },
    #[serde(rename_all = "camelCase")]
    CreateLane { id: String, name: String, index: usize },
    #[serde(rename_all = "camelCase")]
    CreateShape {
        id: String,
        bpmn_type: String,
        label: String,
        lane: String,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[serde(rename_all = "camelCase")]
    Connect {
        id: String,
        source: String,
        target: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        waypoints: Vec<[i32; 2]>,
    },
    MoveShape { id: String, dx: i32, dy: i32 },
    ResizeLane {
        id: String,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    ResizeParticipant {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    RemoveConnections,
    FitViewport {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

/// Replays a finished layout as the editor call batch: shapes are created
/// on the grid and then moved, exactly as branch resolution moved them.
pub fn record_operations(layout: &Layout, viewport: &ViewportConfig) -> Vec<DiagramOp> {
    let mut ops = vec![
        DiagramOp::Clear,
        DiagramOp::CreateParticipant {
            label: layout.participant.label.clone(),
            lane_count: layout.lanes.len(),
        },
    ];

    ops.extend(layout.lanes.iter().map(|lane| DiagramOp::CreateLane {
        id: lane.actor_key.clone(),
        name: lane.name.clone(),
        index: lane.index,
    }));

    for node in &layout.nodes {
        let bounds = node.grid_bounds();
        ops.push(DiagramOp::CreateShape {
            id: node.id().to_string(),
            bpmn_type: node.element.kind.bpmn_type().to_string(),
            label: node.element.label.clone(),
            lane: layout.lanes[node.lane].actor_key.clone(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        });
    }

    ops.extend(layout.initial_edges.iter().map(|edge| connect(edge, false)));

    for node in &layout.nodes {
        let (dx, dy) = node.displacement();
        if dx != 0 || dy != 0 {
            ops.push(DiagramOp::MoveShape {
                id: node.id().to_string(),
                dx,
                dy,
            });
        }
    }

    ops.extend(layout.lanes.iter().map(|lane| DiagramOp::ResizeLane {
        id: lane.actor_key.clone(),
        x: lane.x,
        y: lane.y,
        width: lane.width,
        height: lane.height,
    }));
    ops.push(DiagramOp::ResizeParticipant {
        x: layout.participant.x,
        y: layout.participant.y,
        width: layout.participant.width,
        height: layout.participant.height,
    });

    ops.push(DiagramOp::RemoveConnections);
    ops.extend(layout.edges.iter().map(|edge| connect(edge, true)));

    let frame = content_bounds(layout);
    ops.push(DiagramOp::FitViewport {
        x: frame.x - viewport.padding,
        y: frame.y - viewport.padding,
        width: frame.width + viewport.padding * 2,
        height: frame.height + viewport.padding * 2,
    });
    ops
}

fn connect(edge: &EdgeLayout, with_route: bool) -> DiagramOp {
    DiagramOp::Connect {
        id: edge.id.clone(),
        source: edge.source.clone(),
        target: edge.target.clone(),
        label: edge.label.clone(),
        waypoints: if with_route {
            edge.waypoints.iter().map(|&(x, y)| [x, y]).collect()
        } else {
            Vec::new()
        },
    }
}

/// Participant plus any shape hanging below the last lane.
fn content_bounds(layout: &Layout) -> Bounds {
    let participant = &layout.participant;
    let mut min_x = participant.x;
    let mut min_y = participant.y;
    let mut max_x = participant.x + participant.width;
    let mut max_y = participant.y + participant.height;
    for node in &layout.nodes {
        let bounds = node.bounds();
        min_x = min_x.min(bounds.x);
        min_y = min_y.min(bounds.y);
        max_x = max_x.max(bounds.right());
        max_y = max_y.max(bounds.bottom());
    }
    Bounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}
