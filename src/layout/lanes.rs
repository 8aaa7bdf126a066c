use super::*;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lane identifiers may not contain whitespace, so actor display names are
/// stripped of it.
pub fn lane_key(actor: &str) -> String {
    WHITESPACE_RE.replace_all(actor, "").into_owned()
}

pub(super) fn assign_lanes(
    graph: &ElementGraph,
    config: &LayoutConfig,
) -> Result<Vec<Lane>, LayoutError> {
    let mut lanes: Vec<Lane> = Vec::with_capacity(graph.actors().len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for actor in graph.actors() {
        let key = lane_key(actor);
        if key.is_empty() {
            let owner = graph
                .members_of(actor)
                .first()
                .map(|&idx| graph.element(idx).identifier.as_str())
                .unwrap_or_default();
            return Err(LayoutError::malformed(format!(
                "element `{owner}` has no actor"
            )));
        }
        if let Some(&existing) = seen.get(&key) {
            return Err(LayoutError::DuplicateLaneId {
                lane_id: key,
                first: lanes[existing].name.clone(),
                second: actor.clone(),
            });
        }
        let index = lanes.len();
        seen.insert(key.clone(), index);
        lanes.push(Lane {
            actor_key: key,
            name: actor.clone(),
            index,
            x: 0,
            y: index as i32 * config.lane_height,
            width: config.column_width,
            height: config.lane_height,
        });
    }

    debug!(lanes = lanes.len(), "lanes assigned");
    Ok(lanes)
}
