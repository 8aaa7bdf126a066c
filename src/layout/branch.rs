use super::*;

/// Ownership of the nodes behind one gateway: which branch reaches each
/// node first, where the branches rejoin, and what follows the rejoin.
#[derive(Debug, Clone)]
struct BranchPlan {
    gateway: usize,
    /// Immediate post-dominator of the gateway; `None` when the branches
    /// only meet at the end of the process.
    convergence: Option<usize>,
    branches: Vec<Vec<usize>>,
    /// The convergence node and everything reachable from it, up to the
    /// merge of any gateway this one is nested in.
    downstream: Vec<usize>,
}

impl BranchPlan {
    fn spans(&self) -> Vec<usize> {
        self.branches.iter().map(Vec::len).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    Active,
    Done,
}

fn is_branch_point(graph: &ElementGraph, idx: usize) -> bool {
    graph.element(idx).kind.is_gateway() && graph.outgoing(idx).len() >= 2
}

pub(super) fn resolve_branches(
    graph: &ElementGraph,
    nodes: &mut [PlacedNode],
    config: &LayoutConfig,
) -> Result<Vec<BranchSpans>, LayoutError> {
    let mut plans: BTreeMap<usize, BranchPlan> = BTreeMap::new();
    for idx in 0..graph.len() {
        if is_branch_point(graph, idx) {
            let plan = plan_gateway(graph, idx, &plans)?;
            plans.insert(idx, plan);
        }
    }

    let mut heights: HashMap<usize, i32> = HashMap::new();
    let mut resolved = Vec::with_capacity(plans.len());
    // Discovery order; every move is relative so nested gateways compose.
    for plan in plans.values() {
        let ranks = branch_ranks(graph, plan, &plans, &mut heights);
        displace_branches(graph, plan, &ranks, nodes, config);
        resolved.push(BranchSpans {
            gateway: graph.element(plan.gateway).identifier.clone(),
            spans: plan.spans(),
            convergence: plan
                .convergence
                .map(|idx| graph.element(idx).identifier.clone()),
        });
    }

    // Innermost merges first, so an outer merge sees its branches at their
    // final width.
    for plan in plans.values().rev() {
        pull_back_merge(graph, plan, nodes, config);
    }

    debug!(gateways = resolved.len(), "gateway branches resolved");
    Ok(resolved)
}

/// `enclosing` holds the plans of every gateway discovered before this one.
fn plan_gateway(
    graph: &ElementGraph,
    gateway: usize,
    enclosing: &BTreeMap<usize, BranchPlan>,
) -> Result<BranchPlan, LayoutError> {
    let convergence = immediate_post_dominator(graph, gateway)?;

    // A nested gateway's region ends at the merge of every gateway it sits in.
    let outer_stops: Vec<usize> = enclosing
        .values()
        .filter(|outer| {
            outer
                .branches
                .iter()
                .any(|members| members.contains(&gateway))
        })
        .filter_map(|outer| outer.convergence)
        .collect();
    let mut branch_stops = outer_stops.clone();
    branch_stops.extend(convergence);

    let mut claimed: HashSet<usize> = HashSet::from([gateway]);
    let branches: Vec<Vec<usize>> = graph
        .outgoing(gateway)
        .iter()
        .map(|&target| walk(graph, target, &branch_stops, &mut claimed))
        .collect();
    let downstream = match convergence {
        Some(join) => walk(graph, join, &outer_stops, &mut claimed),
        None => Vec::new(),
    };

    Ok(BranchPlan {
        gateway,
        convergence,
        branches,
        downstream,
    })
}

/// Breadth-first walk from `start` that never enters a stop node or a node
/// another walk already claimed.
fn walk(
    graph: &ElementGraph,
    start: usize,
    stops: &[usize],
    claimed: &mut HashSet<usize>,
) -> Vec<usize> {
    let mut members = Vec::new();
    if stops.contains(&start) || !claimed.insert(start) {
        return members;
    }
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        members.push(node);
        for &next in graph.outgoing(node) {
            if stops.contains(&next) {
                continue;
            }
            if claimed.insert(next) {
                queue.push_back(next);
            }
        }
    }
    members
}

/// Post-dominator of `gateway` over the subgraph reachable from it, with a
/// virtual exit after every sink. Fails if that subgraph has a cycle.
fn immediate_post_dominator(
    graph: &ElementGraph,
    gateway: usize,
) -> Result<Option<usize>, LayoutError> {
    let mut mark = vec![Mark::Unseen; graph.len()];
    let mut postorder: Vec<usize> = Vec::new();
    let mut stack: Vec<(usize, usize)> = vec![(gateway, 0)];
    mark[gateway] = Mark::Active;

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        if let Some(&next) = graph.outgoing(node).get(cursor) {
            frame.1 += 1;
            match mark[next] {
                Mark::Unseen => {
                    mark[next] = Mark::Active;
                    stack.push((next, 0));
                }
                Mark::Active => {
                    return Err(LayoutError::UnresolvedGatewayBranch {
                        gateway: graph.element(gateway).identifier.clone(),
                        node: graph.element(next).identifier.clone(),
                    });
                }
                Mark::Done => {}
            }
        } else {
            mark[node] = Mark::Done;
            postorder.push(node);
            stack.pop();
        }
    }

    // The exit is numbered 0; a node's post-dominator always finishes
    // before it, so numbers strictly decrease up the tree.
    let mut number = vec![0usize; graph.len()];
    for (pos, &node) in postorder.iter().enumerate() {
        number[node] = pos + 1;
    }
    let mut ipdom: Vec<Option<usize>> = vec![None; graph.len()];
    for &node in &postorder {
        let mut succs = graph.outgoing(node).iter().copied();
        ipdom[node] = match succs.next() {
            None => None,
            Some(first) => succs.fold(Some(first), |acc, next| {
                intersect(acc, Some(next), &ipdom, &number)
            }),
        };
    }
    Ok(ipdom[gateway])
}

fn intersect(
    mut a: Option<usize>,
    mut b: Option<usize>,
    ipdom: &[Option<usize>],
    number: &[usize],
) -> Option<usize> {
    let rank = |node: Option<usize>| node.map_or(0, |idx| number[idx]);
    while a != b {
        if rank(a) > rank(b) {
            a = a.and_then(|idx| ipdom[idx]);
        } else {
            b = b.and_then(|idx| ipdom[idx]);
        }
    }
    a
}

/// Row offset of every branch. A branch sits at least `k` rows below the
/// primary one (one more when the second branch opens with a gateway) and
/// below every row an earlier sibling needs for its own nested branches.
fn branch_ranks(
    graph: &ElementGraph,
    plan: &BranchPlan,
    plans: &BTreeMap<usize, BranchPlan>,
    heights: &mut HashMap<usize, i32>,
) -> Vec<i32> {
    let bump = graph
        .outgoing(plan.gateway)
        .get(1)
        .is_some_and(|&target| graph.element(target).kind.is_gateway()) as i32;

    let mut ranks = Vec::with_capacity(plan.branches.len());
    ranks.push(0);
    for k in 1..plan.branches.len() {
        let stacked = ranks[k - 1] + region_rows(graph, &plan.branches[k - 1], plans, heights);
        ranks.push((k as i32 + bump).max(stacked));
    }
    ranks
}

fn region_rows(
    graph: &ElementGraph,
    members: &[usize],
    plans: &BTreeMap<usize, BranchPlan>,
    heights: &mut HashMap<usize, i32>,
) -> i32 {
    if members.is_empty() {
        return 0;
    }
    members
        .iter()
        .filter(|&&idx| plans.contains_key(&idx))
        .map(|&idx| gateway_height(graph, idx, plans, heights))
        .max()
        .unwrap_or(1)
        .max(1)
}

fn gateway_height(
    graph: &ElementGraph,
    gateway: usize,
    plans: &BTreeMap<usize, BranchPlan>,
    heights: &mut HashMap<usize, i32>,
) -> i32 {
    if let Some(&height) = heights.get(&gateway) {
        return height;
    }
    let Some(plan) = plans.get(&gateway) else {
        return 1;
    };
    let ranks = branch_ranks(graph, plan, plans, heights);
    let height = plan
        .branches
        .iter()
        .zip(&ranks)
        .map(|(members, rank)| rank + region_rows(graph, members, plans, heights))
        .max()
        .unwrap_or(1)
        .max(1);
    heights.insert(gateway, height);
    height
}

fn displace_branches(
    graph: &ElementGraph,
    plan: &BranchPlan,
    ranks: &[i32],
    nodes: &mut [PlacedNode],
    config: &LayoutConfig,
) {
    let column = config.column_width;
    let floor = nodes[plan.gateway].x + column;
    let spans = plan.spans();
    let gateway_id = graph.element(plan.gateway).identifier.as_str();

    let mut preceding = spans[0];
    for k in 1..plan.branches.len() {
        let members = &plan.branches[k];
        let dy = config.branch_row_offset * ranks[k];
        let dx = clamped_shift(nodes, members, preceding as i32 * column, floor);
        for &idx in members {
            nodes[idx].x -= dx;
            nodes[idx].y += dy;
        }
        trace!(
            gateway = gateway_id,
            branch = k,
            nodes = members.len(),
            dx = -dx,
            dy,
            "branch displaced"
        );
        preceding += spans[k];
    }
}

/// Pulls the merge and everything after it left until the merge sits one
/// column after its right-most predecessor. No downstream node may end up
/// at or before a predecessor outside the downstream region.
fn pull_back_merge(
    graph: &ElementGraph,
    plan: &BranchPlan,
    nodes: &mut [PlacedNode],
    config: &LayoutConfig,
) {
    let region: HashSet<usize> = plan.downstream.iter().copied().collect();
    let mut room: Option<i32> = None;
    for &idx in &plan.downstream {
        for &pred in graph.incoming(idx) {
            if region.contains(&pred) {
                continue;
            }
            let gap = nodes[idx].x - nodes[pred].x - config.column_width;
            room = Some(room.map_or(gap, |current| current.min(gap)));
        }
    }

    let dx = room.unwrap_or(0).max(0);
    if dx == 0 {
        return;
    }
    for &idx in &plan.downstream {
        nodes[idx].x -= dx;
    }
    trace!(
        gateway = graph.element(plan.gateway).identifier.as_str(),
        nodes = plan.downstream.len(),
        dx = -dx,
        "merge pulled back"
    );
}

/// Limits a leftward shift so no member lands left of `floor`.
fn clamped_shift(nodes: &[PlacedNode], members: &[usize], wanted: i32, floor: i32) -> i32 {
    let Some(min_x) = members.iter().map(|&idx| nodes[idx].x).min() else {
        return 0;
    };
    let room = (min_x - floor).max(0);
    if wanted > room {
        debug!(wanted, room, "branch shift clamped");
        room
    } else {
        wanted
    }
}
