use crate::ir::{ElementKind, ShapeClass};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSize {
    pub width: i32,
    pub height: i32,
}

impl ShapeSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeConfig {
    pub activity: ShapeSize,
    pub event: ShapeSize,
    pub gateway: ShapeSize,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        // bpmn-js default element sizes.
        Self {
            activity: ShapeSize::new(100, 80),
            event: ShapeSize::new(36, 36),
            gateway: ShapeSize::new(50, 50),
        }
    }
}

impl ShapeConfig {
    pub fn size_for(&self, kind: ElementKind) -> ShapeSize {
        match kind.shape_class() {
            ShapeClass::Activity => self.activity,
            ShapeClass::Event => self.event,
            ShapeClass::Gateway => self.gateway,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Accept predecessor references to elements listed later in the input.
    pub allow_back_references: bool,
    pub yes_label: String,
    pub no_label: String,
    pub route_padding: i32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            allow_back_references: false,
            yes_label: "Yes".to_string(),
            no_label: "No".to_string(),
            route_padding: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub column_width: i32,
    pub lane_height: i32,
    pub branch_row_offset: i32,
    pub lane_trailing_margin: i32,
    pub participant_label: String,
    pub participant_header_width: i32,
    pub flow: FlowConfig,
    pub shapes: ShapeConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 150,
            lane_height: 200,
            branch_row_offset: 150,
            lane_trailing_margin: 200,
            participant_label: "Organisation".to_string(),
            participant_header_width: 30,
            flow: FlowConfig::default(),
            shapes: ShapeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub padding: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { padding: 20 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapeSizeFile {
    width: Option<i32>,
    height: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShapesFile {
    activity: Option<ShapeSizeFile>,
    event: Option<ShapeSizeFile>,
    gateway: Option<ShapeSizeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    column_width: Option<i32>,
    lane_height: Option<i32>,
    branch_row_offset: Option<i32>,
    lane_trailing_margin: Option<i32>,
    participant_label: Option<String>,
    participant_header_width: Option<i32>,
    allow_back_references: Option<bool>,
    yes_label: Option<String>,
    no_label: Option<String>,
    route_padding: Option<i32>,
    viewport_padding: Option<i32>,
    shapes: Option<ShapesFile>,
}

fn merge_shape(target: &mut ShapeSize, file: Option<ShapeSizeFile>) {
    let Some(file) = file else {
        return;
    };
    if let Some(v) = file.width {
        target.width = v;
    }
    if let Some(v) = file.height {
        target.height = v;
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(v) = parsed.column_width {
        config.layout.column_width = v;
    }
    if let Some(v) = parsed.lane_height {
        config.layout.lane_height = v;
    }
    if let Some(v) = parsed.branch_row_offset {
        config.layout.branch_row_offset = v;
    }
    if let Some(v) = parsed.lane_trailing_margin {
        config.layout.lane_trailing_margin = v;
    }
    if let Some(v) = parsed.participant_label {
        config.layout.participant_label = v;
    }
    if let Some(v) = parsed.participant_header_width {
        config.layout.participant_header_width = v;
    }
    if let Some(v) = parsed.allow_back_references {
        config.layout.flow.allow_back_references = v;
    }
    if let Some(v) = parsed.yes_label {
        config.layout.flow.yes_label = v;
    }
    if let Some(v) = parsed.no_label {
        config.layout.flow.no_label = v;
    }
    if let Some(v) = parsed.route_padding {
        config.layout.flow.route_padding = v;
    }
    if let Some(v) = parsed.viewport_padding {
        config.viewport.padding = v;
    }
    if let Some(shapes) = parsed.shapes {
        merge_shape(&mut config.layout.shapes.activity, shapes.activity);
        merge_shape(&mut config.layout.shapes.event, shapes.event);
        merge_shape(&mut config.layout.shapes.gateway, shapes.gateway);
    }

    if config.layout.column_width <= 0 || config.layout.lane_height <= 0 {
        return Err(anyhow::anyhow!(
            "columnWidth and laneHeight must be positive (got {} and {})",
            config.layout.column_width,
            config.layout.lane_height
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_grid_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.column_width, 150);
        assert_eq!(config.lane_height, 200);
        assert_eq!(config.branch_row_offset, 150);
        assert_eq!(config.lane_trailing_margin, 200);
        assert_eq!(config.shapes.size_for(ElementKind::ParallelGateway), ShapeSize::new(50, 50));
    }

    #[test]
    fn parse_config_overrides_selected_fields() {
        let config = parse_config(
            r#"{"columnWidth": 180, "yesLabel": "Ja", "shapes": {"activity": {"width": 120}}}"#,
        )
        .expect("config should parse");
        assert_eq!(config.layout.column_width, 180);
        assert_eq!(config.layout.lane_height, 200);
        assert_eq!(config.layout.flow.yes_label, "Ja");
        assert_eq!(config.layout.shapes.activity, ShapeSize::new(120, 80));
    }

    #[test]
    fn parse_config_rejects_non_positive_grid() {
        assert!(parse_config(r#"{"laneHeight": 0}"#).is_err());
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config.viewport.padding, 20);
    }
}
