use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Task,
    UserTask,
    ServiceTask,
    ManualTask,
    StartEvent,
    EndEvent,
    IntermediateThrowEvent,
    IntermediateCatchEvent,
    ExclusiveGateway,
    ParallelGateway,
    InclusiveGateway,
}

/// Size class used to pick a stable shape region for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    Activity,
    Event,
    Gateway,
}

impl ElementKind {
    /// Accepts both the bare local name (`Task`) and the prefixed bpmn-js
    /// type (`bpmn:Task`).
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let local = token.strip_prefix("bpmn:").unwrap_or(token);
        match local {
            "Task" => Some(Self::Task),
            "UserTask" => Some(Self::UserTask),
            "ServiceTask" => Some(Self::ServiceTask),
            "ManualTask" => Some(Self::ManualTask),
            "StartEvent" => Some(Self::StartEvent),
            "EndEvent" => Some(Self::EndEvent),
            "IntermediateThrowEvent" => Some(Self::IntermediateThrowEvent),
            "IntermediateCatchEvent" => Some(Self::IntermediateCatchEvent),
            "ExclusiveGateway" => Some(Self::ExclusiveGateway),
            "ParallelGateway" => Some(Self::ParallelGateway),
            "InclusiveGateway" => Some(Self::InclusiveGateway),
            _ => None,
        }
    }

    pub fn bpmn_type(self) -> &'static str {
        match self {
            Self::Task => "bpmn:Task",
            Self::UserTask => "bpmn:UserTask",
            Self::ServiceTask => "bpmn:ServiceTask",
            Self::ManualTask => "bpmn:ManualTask",
            Self::StartEvent => "bpmn:StartEvent",
            Self::EndEvent => "bpmn:EndEvent",
            Self::IntermediateThrowEvent => "bpmn:IntermediateThrowEvent",
            Self::IntermediateCatchEvent => "bpmn:IntermediateCatchEvent",
            Self::ExclusiveGateway => "bpmn:ExclusiveGateway",
            Self::ParallelGateway => "bpmn:ParallelGateway",
            Self::InclusiveGateway => "bpmn:InclusiveGateway",
        }
    }

    pub fn shape_class(self) -> ShapeClass {
        match self {
            Self::Task | Self::UserTask | Self::ServiceTask | Self::ManualTask => {
                ShapeClass::Activity
            }
            Self::StartEvent
            | Self::EndEvent
            | Self::IntermediateThrowEvent
            | Self::IntermediateCatchEvent => ShapeClass::Event,
            Self::ExclusiveGateway | Self::ParallelGateway | Self::InclusiveGateway => {
                ShapeClass::Gateway
            }
        }
    }

    pub fn is_gateway(self) -> bool {
        self.shape_class() == ShapeClass::Gateway
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Predecessors {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl Predecessors {
    pub fn ids(&self) -> &[String] {
        match self {
            Predecessors::None => &[],
            Predecessors::Single(id) => std::slice::from_ref(id),
            Predecessors::Many(ids) => ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessElement {
    pub identifier: String,
    pub kind: ElementKind,
    pub actor: String,
    pub label: String,
    pub predecessors: Predecessors,
}

impl ProcessElement {
    pub fn new(identifier: &str, kind: ElementKind, actor: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            kind,
            actor: actor.to_string(),
            label: String::new(),
            predecessors: Predecessors::None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn after(mut self, predecessor: &str) -> Self {
        self.predecessors = Predecessors::Single(predecessor.to_string());
        self
    }

    pub fn after_all(mut self, predecessors: &[&str]) -> Self {
        self.predecessors =
            Predecessors::Many(predecessors.iter().map(|id| id.to_string()).collect());
        self
    }
}
