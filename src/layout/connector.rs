//! Connector paths between layout points.
//!
//! A connector always leaves its start point heading down and arrives at its
//! end point heading down. When the two points are not vertically aligned it
//! takes an S-shaped detour: a short vertical lead, a quarter arc toward the
//! target, a horizontal run, a quarter arc back down and a final vertical run.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::log::warn;

use super::{Bounds, LayoutError, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    fn sign(self) -> f32 {
        match self {
            TurnDirection::Left => -1.0,
            TurnDirection::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathOp {
    MoveTo { point: Point },
    Vertical { dy: f32 },
    Horizontal { dx: f32 },
    /// Quarter circle; moves the cursor `radius` toward `direction` and
    /// `radius` down.
    Arc {
        direction: TurnDirection,
        radius: f32,
        sweep: bool,
    },
    Arrowhead,
}

/// An ordered list of path operations. Every connector starts with a `MoveTo`,
/// so concatenated connectors stay independent sub-paths.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ConnectorPath {
    ops: Vec<PathOp>,
}

impl ConnectorPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn arrowhead_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PathOp::Arrowhead))
            .count()
    }

    pub fn concat(mut self, other: ConnectorPath) -> ConnectorPath {
        self.ops.extend(other.ops);
        self
    }

    /// Shift every `MoveTo` anchor; relative operations are unchanged.
    pub fn translate(&self, dx: f32, dy: f32) -> ConnectorPath {
        let ops = self
            .ops
            .iter()
            .map(|op| match *op {
                PathOp::MoveTo { point } => PathOp::MoveTo {
                    point: point.offset(dx, dy),
                },
                other => other,
            })
            .collect();
        ConnectorPath { ops }
    }

    /// Extents visited by replaying the operations. `None` for an empty path.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut cursor = Point::default();
        for op in &self.ops {
            match *op {
                PathOp::MoveTo { point } => cursor = point,
                PathOp::Vertical { dy } => cursor.y += dy,
                PathOp::Horizontal { dx } => cursor.x += dx,
                PathOp::Arc {
                    direction, radius, ..
                } => {
                    cursor.x += direction.sign() * radius;
                    cursor.y += radius;
                }
                PathOp::Arrowhead => {}
            }
            match bounds.as_mut() {
                Some(b) => b.include(cursor),
                None => bounds = Some(Bounds::at(cursor)),
            }
        }
        bounds
    }

    /// SVG path data. The arrowhead is drawn as two strokes ending back at
    /// the tip so the following operations are unaffected.
    pub fn to_svg_path_data(&self, arrowhead_size: f32) -> String {
        let mut d = String::new();
        let s = arrowhead_size;
        for op in &self.ops {
            if !d.is_empty() {
                d.push(' ');
            }
            match *op {
                PathOp::MoveTo { point } => d.push_str(&format!("M {} {}", point.x, point.y)),
                PathOp::Vertical { dy } => d.push_str(&format!("v {dy}")),
                PathOp::Horizontal { dx } => d.push_str(&format!("h {dx}")),
                PathOp::Arc {
                    direction,
                    radius,
                    sweep,
                } => d.push_str(&format!(
                    "a {radius} {radius} 0 0 {} {} {radius}",
                    u8::from(sweep),
                    direction.sign() * radius
                )),
                PathOp::Arrowhead => {
                    d.push_str(&format!("m {} {} l {s} {s} l {s} {} m {} {s}", -s, -s, -s, -s))
                }
            }
        }
        d
    }
}

/// Build a connector from `from` down to `to`.
///
/// `to` must not be above `from`; that can only happen when an offset was
/// mis-computed, and the error aborts the layout pass.
pub fn draw_connector(
    from: Point,
    to: Point,
    arrowhead: bool,
    config: &LayoutConfig,
) -> Result<ConnectorPath, LayoutError> {
    for point in [from, to] {
        if !point.is_finite() {
            warn!(%point, "non-finite connector endpoint");
            return Err(LayoutError::NonFinitePoint { point });
        }
    }
    if to.y < from.y {
        warn!(%from, %to, "connector would run upwards");
        return Err(LayoutError::UpwardConnector { from, to });
    }

    let dy = to.y - from.y;
    let dx = to.x - from.x;
    let mut ops = vec![PathOp::MoveTo { point: from }];
    if dx == 0.0 {
        ops.push(PathOp::Vertical { dy });
    } else {
        // short or narrow connectors shrink the turns so no segment reverses
        let radius = config.arc_radius.min(dx.abs() / 2.0).min(dy / 2.0);
        let lead = config.connector_lead.clamp(radius, dy - radius);
        let direction = if dx > 0.0 {
            TurnDirection::Right
        } else {
            TurnDirection::Left
        };
        let turning_right = direction == TurnDirection::Right;
        ops.push(PathOp::Vertical { dy: lead - radius });
        ops.push(PathOp::Arc {
            direction,
            radius,
            sweep: !turning_right,
        });
        ops.push(PathOp::Horizontal {
            dx: dx - 2.0 * radius * direction.sign(),
        });
        ops.push(PathOp::Arc {
            direction,
            radius,
            sweep: turning_right,
        });
        ops.push(PathOp::Vertical {
            dy: dy - lead - radius,
        });
    }
    if arrowhead {
        ops.push(PathOp::Arrowhead);
    }
    Ok(ConnectorPath { ops })
}
