use super::*;

pub(super) fn place_on_grid(
    graph: &ElementGraph,
    lanes: &[Lane],
    config: &LayoutConfig,
) -> Vec<PlacedNode> {
    let lane_of: HashMap<&str, usize> = lanes
        .iter()
        .map(|lane| (lane.actor_key.as_str(), lane.index))
        .collect();
    let row_height = config.branch_row_offset.min(config.lane_height);

    graph
        .elements()
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            let lane = lane_of
                .get(lane_key(&element.actor).as_str())
                .copied()
                .unwrap_or_default();
            let size = config.shapes.size_for(element.kind);
            let x = config.column_width * idx as i32;
            let y = config.lane_height * lane as i32;
            PlacedNode {
                element: element.clone(),
                lane,
                x,
                y,
                grid_x: x,
                grid_y: y,
                width: size.width,
                height: size.height,
                offset_x: (config.column_width - size.width) / 2,
                offset_y: (row_height - size.height) / 2,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ElementKind::*;

    #[test]
    fn grid_uses_sequence_and_lane_index() {
        let elements = vec![
            ProcessElement::new("S", StartEvent, "A"),
            ProcessElement::new("T1", Task, "A").after("S"),
            ProcessElement::new("T2", Task, "B").after("T1"),
        ];
        let config = LayoutConfig::default();
        let graph = build_element_graph(&elements, &config.flow).unwrap();
        let lanes = assign_lanes(&graph, &config).unwrap();
        let nodes = place_on_grid(&graph, &lanes, &config);

        let positions: Vec<(i32, i32)> = nodes.iter().map(|node| (node.x, node.y)).collect();
        assert_eq!(positions, [(0, 0), (150, 0), (300, 200)]);
        assert_eq!(nodes[2].lane, 1);
        assert_eq!(nodes[0].displacement(), (0, 0));
    }

    #[test]
    fn shapes_are_centred_in_their_cell() {
        let elements = vec![ProcessElement::new("T", Task, "A")];
        let config = LayoutConfig::default();
        let graph = build_element_graph(&elements, &config.flow).unwrap();
        let lanes = assign_lanes(&graph, &config).unwrap();
        let nodes = place_on_grid(&graph, &lanes, &config);
        let bounds = nodes[0].bounds();
        assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (25, 35, 100, 80));
        assert_eq!(bounds.center(), (75, 75));
    }
}
