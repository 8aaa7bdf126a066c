mod branch;
mod error;
mod graph;
mod grid;
mod lanes;
mod routing;
mod sizing;
pub(crate) mod types;
pub use error::LayoutError;
pub use graph::{ElementGraph, build_element_graph};
pub use lanes::lane_key;
pub use types::*;
use branch::*;
use grid::*;
use lanes::*;
use routing::*;
use sizing::*;

use crate::config::{FlowConfig, LayoutConfig};
use crate::ir::{ElementKind, ProcessElement};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

/// Runs the whole pipeline: graph, lanes, grid, branch resolution, lane
/// sizing and connector rewrite. Pure; nothing is kept between calls.
pub fn compute_layout(
    elements: &[ProcessElement],
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let graph = build_element_graph(elements, &config.flow)?;
    let mut lanes = assign_lanes(&graph, config)?;
    let mut nodes = place_on_grid(&graph, &lanes, config);

    let initial_edges = rewrite_connectors(&graph, &nodes, config);
    let spans = resolve_branches(&graph, &mut nodes, config)?;
    size_lanes(&mut lanes, &nodes, config);
    let edges = rewrite_connectors(&graph, &nodes, config);

    let participant = fit_participant(&lanes, config);
    let width = participant.width;
    let height = participant.height;
    debug!(
        nodes = nodes.len(),
        lanes = lanes.len(),
        width,
        height,
        "layout computed"
    );

    Ok(Layout {
        participant,
        lanes,
        nodes,
        initial_edges,
        edges,
        spans,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ElementKind::*;

    #[test]
    fn sequential_process_needs_no_adjustment() {
        let elements = vec![
            ProcessElement::new("S", StartEvent, "ActorA"),
            ProcessElement::new("T1", Task, "ActorA").after("S"),
            ProcessElement::new("T2", Task, "ActorB").after("T1"),
        ];
        let layout = compute_layout(&elements, &LayoutConfig::default()).unwrap();

        assert_eq!(layout.lanes.len(), 2);
        assert_eq!(layout.edges.len(), 2);
        assert!(layout.spans.is_empty());
        assert_eq!(layout.initial_edges, layout.edges);
        assert!(layout.nodes.iter().all(|node| node.displacement() == (0, 0)));
    }

    #[test]
    fn layout_is_deterministic() {
        let elements = vec![
            ProcessElement::new("G", ExclusiveGateway, "A"),
            ProcessElement::new("T1", Task, "A").after("G"),
            ProcessElement::new("T2", Task, "B").after("G"),
            ProcessElement::new("M", ExclusiveGateway, "A").after_all(&["T1", "T2"]),
        ];
        let config = LayoutConfig::default();
        let first = compute_layout(&elements, &config).unwrap();
        let second = compute_layout(&elements, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn errors_abort_without_partial_layout() {
        let elements = vec![ProcessElement::new("T", Task, "A").after("nowhere")];
        let result = compute_layout(&elements, &LayoutConfig::default());
        assert!(matches!(result, Err(LayoutError::MalformedGraph { .. })));
    }
}
