use super::*;

pub(super) fn size_lanes(lanes: &mut [Lane], nodes: &[PlacedNode], config: &LayoutConfig) {
    let max_x = nodes.iter().map(|node| node.x).max().unwrap_or(0);
    let width = max_x + config.lane_trailing_margin;
    for lane in lanes.iter_mut() {
        lane.width = width;
        lane.height = config.lane_height;
    }
    debug!(max_x, width, "lanes sized");
}

pub(super) fn fit_participant(lanes: &[Lane], config: &LayoutConfig) -> Participant {
    let width = lanes.iter().map(|lane| lane.x + lane.width).max().unwrap_or(0);
    let height = lanes.iter().map(|lane| lane.y + lane.height).max().unwrap_or(0);
    Participant {
        label: config.participant_label.clone(),
        x: -config.participant_header_width,
        y: 0,
        width: width + config.participant_header_width,
        height,
    }
}
