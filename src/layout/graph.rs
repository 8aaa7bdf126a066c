use super::*;

/// Traversable view of the flat element list.
///
/// Elements keep their input order; `outgoing[i]` lists the indices of the
/// elements naming `i` as a predecessor, in input order.
#[derive(Debug, Clone)]
pub struct ElementGraph {
    pub(super) elements: Vec<ProcessElement>,
    pub(super) index: HashMap<String, usize>,
    pub(super) outgoing: Vec<Vec<usize>>,
    pub(super) incoming: Vec<Vec<usize>>,
    pub(super) actors: Vec<String>,
    pub(super) by_actor: HashMap<String, Vec<usize>>,
}

impl ElementGraph {
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[ProcessElement] {
        &self.elements
    }

    pub fn element(&self, idx: usize) -> &ProcessElement {
        &self.elements[idx]
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn outgoing(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    pub fn incoming(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }

    /// Distinct actor names in first-occurrence order.
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn members_of(&self, actor: &str) -> &[usize] {
        self.by_actor.get(actor).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn build_element_graph(
    elements: &[ProcessElement],
    flow: &FlowConfig,
) -> Result<ElementGraph, LayoutError> {
    if elements.is_empty() {
        return Err(LayoutError::malformed("process description is empty"));
    }

    let mut index: HashMap<String, usize> = HashMap::with_capacity(elements.len());
    let mut actors: Vec<String> = Vec::new();
    let mut by_actor: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, element) in elements.iter().enumerate() {
        if index.insert(element.identifier.clone(), idx).is_some() {
            return Err(LayoutError::malformed(format!(
                "identifier `{}` is defined more than once",
                element.identifier
            )));
        }
        let members = by_actor.entry(element.actor.clone()).or_default();
        if members.is_empty() {
            actors.push(element.actor.clone());
        }
        members.push(idx);
    }

    let mut outgoing = vec![Vec::new(); elements.len()];
    let mut incoming = vec![Vec::new(); elements.len()];
    for (idx, element) in elements.iter().enumerate() {
        for pred in element.predecessors.ids() {
            let Some(&source) = index.get(pred) else {
                return Err(LayoutError::malformed(format!(
                    "element `{}` references undefined predecessor `{}`",
                    element.identifier, pred
                )));
            };
            if source == idx {
                return Err(LayoutError::malformed(format!(
                    "element `{}` lists itself as predecessor",
                    element.identifier
                )));
            }
            if source > idx && !flow.allow_back_references {
                return Err(LayoutError::malformed(format!(
                    "element `{}` references `{}`, which appears later in the sequence",
                    element.identifier, pred
                )));
            }
            outgoing[source].push(idx);
            incoming[idx].push(source);
        }
    }

    debug!(
        elements = elements.len(),
        actors = actors.len(),
        "element graph built"
    );

    Ok(ElementGraph {
        elements: elements.to_vec(),
        index,
        outgoing,
        incoming,
        actors,
        by_actor,
    })
}
