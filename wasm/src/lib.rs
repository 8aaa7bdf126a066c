use bpmn_lanes::config::{Config, parse_config};
use bpmn_lanes::layout_dump::LayoutDump;
use bpmn_lanes::{layout_from_json, record_operations};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LaneLayoutOptions {
    /// "ops" (default) or "layout"
    output_format: Option<String>,
    /// Same shape as the CLI config file.
    config: Option<serde_json::Value>,
}

fn build_config(options: &LaneLayoutOptions) -> Result<Config, String> {
    match &options.config {
        Some(raw) => parse_config(&raw.to_string()).map_err(|error| error.to_string()),
        None => Ok(Config::default()),
    }
}

fn lay_out(process_json: &str, options: LaneLayoutOptions) -> Result<String, String> {
    let config = build_config(&options)?;
    let layout = layout_from_json(process_json, &config.layout).map_err(|error| error.to_string())?;
    let json = match options.output_format.as_deref() {
        Some("layout") => serde_json::to_string(&LayoutDump::from_layout(&layout)),
        None | Some("ops") => serde_json::to_string(&record_operations(&layout, &config.viewport)),
        Some(other) => return Err(format!("unknown output format '{other}'")),
    };
    json.map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn layout_bpmn_process(
    process_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<LaneLayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        LaneLayoutOptions::default()
    };

    lay_out(process_json, options).map_err(|error| JsValue::from_str(&error))
}
