use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::layout::AffordanceSize;

/// Errors reported by [`LayoutConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("layout config field `{field}` is not finite")]
    NonFinite { field: &'static str },
    #[error("layout config field `{field}` must not be negative")]
    Negative { field: &'static str },
    #[error("layout config field `{field}` must be greater than zero")]
    ZeroNodeSize { field: &'static str },
}

/// Geometry constants for the flow-graph layout, all in pixels.
///
/// Changing any of these moves pixels around but never changes which nodes,
/// connectors or affordances are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Extra footprint reserved below every node box.
    pub node_bottom_padding: f32,
    /// Gap between a node footprint and the next step in the same chain.
    pub sequential_spacing: f32,
    /// Gap between a branch or loop footprint and its nested children, and
    /// between the tallest child and the convergence point.
    pub step_to_child_spacing: f32,
    /// Horizontal gap between sibling branches.
    pub branch_spacing: f32,
    pub arc_radius: f32,
    /// Vertical run from a connector's start to the end of its first arc.
    pub connector_lead: f32,
    pub large_affordance_size: f32,
    pub small_affordance_size: f32,
    /// Gap between an affordance and the arrowhead it sits above.
    pub affordance_arrow_spacing: f32,
    pub arrowhead_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 260.0,
            node_height: 70.0,
            node_bottom_padding: 20.0,
            sequential_spacing: 60.0,
            step_to_child_spacing: 80.0,
            branch_spacing: 80.0,
            arc_radius: 15.0,
            connector_lead: 30.0,
            large_affordance_size: 25.0,
            small_affordance_size: 18.0,
            affordance_arrow_spacing: 5.0,
            arrowhead_size: 6.0,
        }
    }
}

impl LayoutConfig {
    pub fn node_height_with_padding(&self) -> f32 {
        self.node_height + self.node_bottom_padding
    }

    pub fn affordance_size(&self, size: AffordanceSize) -> f32 {
        match size {
            AffordanceSize::Large => self.large_affordance_size,
            AffordanceSize::Small => self.small_affordance_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("node_bottom_padding", self.node_bottom_padding),
            ("sequential_spacing", self.sequential_spacing),
            ("step_to_child_spacing", self.step_to_child_spacing),
            ("branch_spacing", self.branch_spacing),
            ("arc_radius", self.arc_radius),
            ("connector_lead", self.connector_lead),
            ("large_affordance_size", self.large_affordance_size),
            ("small_affordance_size", self.small_affordance_size),
            ("affordance_arrow_spacing", self.affordance_arrow_spacing),
            ("arrowhead_size", self.arrowhead_size),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field });
            }
        }
        if self.node_width == 0.0 {
            return Err(ConfigError::ZeroNodeSize { field: "node_width" });
        }
        if self.node_height == 0.0 {
            return Err(ConfigError::ZeroNodeSize {
                field: "node_height",
            });
        }
        Ok(())
    }
}

/// Load a layout config from a JSON file. Missing fields keep their defaults;
/// `None` yields the default config.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let config: LayoutConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.node_height_with_padding(), 90.0);
        assert_eq!(config.affordance_size(AffordanceSize::Large), 25.0);
        assert_eq!(config.affordance_size(AffordanceSize::Small), 18.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{ "node_width": 100, "arc_radius": 4 }"#).unwrap();
        assert_eq!(config.node_width, 100.0);
        assert_eq!(config.arc_radius, 4.0);
        assert_eq!(config.node_height, LayoutConfig::default().node_height);
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let mut config = LayoutConfig::default();
        config.branch_spacing = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "branch_spacing"
            })
        );

        let mut config = LayoutConfig::default();
        config.arc_radius = f32::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "arc_radius"
            })
        );

        let mut config = LayoutConfig::default();
        config.node_width = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroNodeSize {
                field: "node_width"
            })
        );
    }

    #[test]
    fn load_config_without_path_is_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config, LayoutConfig::default());
    }
}
