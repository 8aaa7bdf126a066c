use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: i32,
    pub height: i32,
    pub participant: ParticipantDump,
    pub lanes: Vec<LaneDump>,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub gateways: Vec<GatewayDump>,
}

#[derive(Debug, Serialize)]
pub struct ParticipantDump {
    pub label: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Serialize)]
pub struct LaneDump {
    pub id: String,
    pub name: String,
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub lane: String,
    pub x: i32,
    pub y: i32,
    pub bounds: [i32; 4],
    pub moved: [i32; 2],
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub points: Vec<[i32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct GatewayDump {
    pub id: String,
    pub spans: Vec<usize>,
    pub convergence: Option<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let lanes = layout
            .lanes
            .iter()
            .map(|lane| LaneDump {
                id: lane.actor_key.clone(),
                name: lane.name.clone(),
                index: lane.index,
                x: lane.x,
                y: lane.y,
                width: lane.width,
                height: lane.height,
            })
            .collect();

        let nodes = layout
            .nodes
            .iter()
            .map(|node| {
                let bounds = node.bounds();
                let (dx, dy) = node.displacement();
                NodeDump {
                    id: node.id().to_string(),
                    kind: format!("{:?}", node.element.kind),
                    label: node.element.label.clone(),
                    lane: layout.lanes[node.lane].actor_key.clone(),
                    x: node.x,
                    y: node.y,
                    bounds: [bounds.x, bounds.y, bounds.width, bounds.height],
                    moved: [dx, dy],
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                from: edge.source.clone(),
                to: edge.target.clone(),
                label: edge.label.clone(),
                points: edge.waypoints.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        let gateways = layout
            .spans
            .iter()
            .map(|entry| GatewayDump {
                id: entry.gateway.clone(),
                spans: entry.spans.clone(),
                convergence: entry.convergence.clone(),
            })
            .collect();

        let participant = &layout.participant;
        LayoutDump {
            width: layout.width,
            height: layout.height,
            participant: ParticipantDump {
                label: participant.label.clone(),
                x: participant.x,
                y: participant.y,
                width: participant.width,
                height: participant.height,
            },
            lanes,
            nodes,
            edges,
            gateways,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
