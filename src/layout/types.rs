use crate::ir::ProcessElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    /// Whitespace-free lane identifier derived from the actor name.
    pub actor_key: String,
    pub name: String,
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedNode {
    pub element: ProcessElement,
    pub lane: usize,
    /// Cell anchor. Branch resolution moves it by relative deltas.
    pub x: i32,
    pub y: i32,
    pub grid_x: i32,
    pub grid_y: i32,
    pub width: i32,
    pub height: i32,
    /// Offset of the shape inside its cell; fixed at placement.
    pub offset_x: i32,
    pub offset_y: i32,
}

impl PlacedNode {
    pub fn id(&self) -> &str {
        &self.element.identifier
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x + self.offset_x,
            y: self.y + self.offset_y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn grid_bounds(&self) -> Bounds {
        Bounds {
            x: self.grid_x + self.offset_x,
            y: self.grid_y + self.offset_y,
            width: self.width,
            height: self.height,
        }
    }

    /// Net displacement applied since grid placement.
    pub fn displacement(&self) -> (i32, i32) {
        (self.x - self.grid_x, self.y - self.grid_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    SequenceFlow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLayout {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub label: Option<String>,
    pub waypoints: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub label: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSpans {
    pub gateway: String,
    /// Distinct node count per outgoing branch, primary branch first.
    pub spans: Vec<usize>,
    pub convergence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub participant: Participant,
    pub lanes: Vec<Lane>,
    /// Nodes in input sequence order.
    pub nodes: Vec<PlacedNode>,
    /// Connectors as they were before branch resolution.
    pub initial_edges: Vec<EdgeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub spans: Vec<BranchSpans>,
    pub width: i32,
    pub height: i32,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn lane(&self, actor_key: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.actor_key == actor_key)
    }

    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeLayout> + 'a {
        self.edges.iter().filter(move |edge| edge.source == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EdgeLayout> + 'a {
        self.edges.iter().filter(move |edge| edge.target == id)
    }

    pub fn spans_for(&self, gateway: &str) -> Option<&BranchSpans> {
        self.spans.iter().find(|entry| entry.gateway == gateway)
    }
}
