use crate::ir::{ElementKind, Predecessors, ProcessElement};
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(alias = "id")]
    identifier: String,
    #[serde(alias = "type")]
    category: String,
    actor: String,
    #[serde(default, alias = "label")]
    value: Option<String>,
    #[serde(default)]
    predecessor: Option<String>,
    #[serde(default)]
    predecessors: Option<Vec<String>>,
}

/// Parses the element list produced by the text-to-process converter.
///
/// Strict JSON is tried first; JSON5 (single quotes, trailing commas) is the
/// fallback.
pub fn parse_process(input: &str) -> Result<Vec<ProcessElement>> {
    let raw: Vec<RawElement> = match serde_json::from_str(input) {
        Ok(raw) => raw,
        Err(strict_err) => json5::from_str(input).with_context(|| {
            format!("process description is not a valid element array: {strict_err}")
        })?,
    };

    raw.into_iter().map(convert_element).collect()
}

fn convert_element(raw: RawElement) -> Result<ProcessElement> {
    let kind = ElementKind::from_token(&raw.category).ok_or_else(|| {
        anyhow::anyhow!(
            "element `{}` has unsupported type `{}`",
            raw.identifier,
            raw.category
        )
    })?;

    // A populated single predecessor wins over the list.
    let predecessors = match (raw.predecessor, raw.predecessors) {
        (Some(single), _) if !single.trim().is_empty() => Predecessors::Single(single),
        (_, Some(list)) if !list.is_empty() => Predecessors::Many(list),
        _ => Predecessors::None,
    };

    Ok(ProcessElement {
        identifier: raw.identifier,
        kind,
        actor: raw.actor,
        label: raw.value.unwrap_or_default(),
        predecessors,
    })
}
