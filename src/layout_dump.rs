use crate::config::LayoutConfig;
use crate::layout::{AddAffordance, LayoutResult, PathOp};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Flat, owned snapshot of a layout for tooling and non-Rust renderers.
#[derive(Debug, Serialize)]
pub struct LayoutDump<'a> {
    pub width: f32,
    pub height: f32,
    pub node_width: f32,
    pub node_height: f32,
    pub nodes: Vec<NodeDump>,
    pub path: Vec<PathOp>,
    pub path_data: String,
    pub affordances: Vec<AddAffordance<'a>>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub key: String,
    pub step: Option<String>,
    pub placeholder: bool,
    pub x: f32,
    pub y: f32,
}

impl<'a> LayoutDump<'a> {
    pub fn from_layout(layout: &LayoutResult<'a>, config: &LayoutConfig) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                key: node.key().into_owned(),
                step: node.step().map(|step| step.name.clone()),
                placeholder: node.is_placeholder(),
                x: node.position.x,
                y: node.position.y,
            })
            .collect();
        let size = layout.bounding_box();

        LayoutDump {
            width: size.width,
            height: size.height,
            node_width: config.node_width,
            node_height: config.node_height,
            nodes,
            path: layout.path.ops().to_vec(),
            path_data: layout.path.to_svg_path_data(config.arrowhead_size),
            affordances: layout.affordances.clone(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_dump(
    path: &Path,
    layout: &LayoutResult<'_>,
    config: &LayoutConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Step;
    use crate::layout::layout_step;

    #[test]
    fn dump_serializes_nodes_paths_and_affordances() {
        let config = LayoutConfig::default();
        let step = Step::looping("each", None).then(Step::action("done"));
        let layout = layout_step(&step, &config).unwrap();
        let dump = LayoutDump::from_layout(&layout, &config);
        let json: serde_json::Value = serde_json::from_str(&dump.to_json().unwrap()).unwrap();

        assert_eq!(json["nodes"][0]["key"], "each");
        assert_eq!(json["nodes"][1]["key"], "each:inside_loop");
        assert_eq!(json["nodes"][1]["placeholder"], true);
        assert!(json["nodes"][1]["step"].is_null());
        assert_eq!(json["path"][0]["op"], "move_to");
        assert_eq!(json["path"][0]["point"]["x"], 130.0);
        assert!(json["path_data"].as_str().unwrap().starts_with("M 130 90 v 80"));
        assert_eq!(json["affordances"][0]["size"], "large");
        assert_eq!(json["affordances"][0]["location"], "inside_loop");
        assert_eq!(json["affordances"][0]["anchor"], "each");
        assert_eq!(json["width"], 260.0);
    }
}
