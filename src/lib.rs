#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod ops;
pub mod parser;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, ViewportConfig, load_config};
pub use ir::{ElementKind, Predecessors, ProcessElement};
pub use layout::{Layout, LayoutError, compute_layout};
pub use ops::{DiagramOp, record_operations};
pub use parser::parse_process;

/// Parses a JSON element list and lays it out in one step.
pub fn layout_from_json(input: &str, config: &LayoutConfig) -> anyhow::Result<Layout> {
    let elements = parse_process(input)?;
    Ok(compute_layout(&elements, config)?)
}
