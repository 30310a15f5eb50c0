use thiserror::Error;

use crate::config::ConfigError;

use super::Point;

/// Reasons a layout pass is aborted.
///
/// None of these are caused by the shape of the step tree: connector errors
/// mean an offset was mis-computed, config errors mean the geometry constants
/// were unusable. Callers should keep their previous layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("connector from {from} to {to} would run upwards")]
    UpwardConnector { from: Point, to: Point },
    #[error("connector endpoint {point} is not finite")]
    NonFinitePoint { point: Point },
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
