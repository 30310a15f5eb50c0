use wasm_bindgen::prelude::*;
use workflow_layout::{LayoutConfig, layout_json};

fn build_config(config_json: Option<String>) -> Result<LayoutConfig, String> {
    let Some(raw) = config_json else {
        return Ok(LayoutConfig::default());
    };
    let config: LayoutConfig = serde_json::from_str(&raw).map_err(|error| error.to_string())?;
    config.validate().map_err(|error| error.to_string())?;
    Ok(config)
}

fn layout_to_json(workflow_json: &str, config_json: Option<String>) -> Result<String, String> {
    let config = build_config(config_json)?;
    layout_json(workflow_json, &config).map_err(|error| error.to_string())
}

/// Lay out a workflow definition and return the layout dump as JSON.
#[wasm_bindgen]
pub fn layout_workflow(workflow_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    layout_to_json(workflow_json, config_json).map_err(|error| JsValue::from_str(&error))
}
