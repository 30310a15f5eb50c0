//! Flow-graph layout for workflow step trees.
//!
//! Every subtree is laid out in its own local frame, with the top-left corner
//! of its first node box at the origin, and returned as a [`LayoutResult`].
//! Parents translate and merge their children's results. Each result is
//! horizontally symmetric about its spine (`x = node_width / 2`), so centering
//! a child's bounding box also centers its spine.

mod branch;
mod connector;
mod error;
mod loops;
mod result;
pub(crate) mod types;

pub use connector::{ConnectorPath, PathOp, TurnDirection, draw_connector};
pub use error::LayoutError;
pub use result::LayoutResult;
pub use types::*;

use branch::layout_branch;
use loops::layout_loop;

use crate::config::LayoutConfig;
use crate::ir::{Step, StepKind, Workflow};
use crate::log::debug;

/// Lay out a whole workflow, starting at its trigger.
pub fn compute_layout<'a>(
    workflow: &'a Workflow,
    config: &LayoutConfig,
) -> Result<LayoutResult<'a>, LayoutError> {
    debug!(steps = workflow.trigger.count(), "computing workflow layout");
    let result = layout_step(&workflow.trigger, config)?;
    debug!(
        nodes = result.nodes.len(),
        affordances = result.affordances.len(),
        "workflow layout complete"
    );
    Ok(result)
}

/// Lay out `step`, its nested chains and everything after it, as if it were
/// the root of the tree.
pub fn layout_step<'a>(
    step: &'a Step,
    config: &LayoutConfig,
) -> Result<LayoutResult<'a>, LayoutError> {
    config.validate()?;
    TreeLayout::new(config).layout_chain(step, false)
}

/// A laid-out step before its successor is attached, with the vertical space
/// its own construct needs below the node footprint.
pub(crate) struct Subtree<'a> {
    pub(crate) result: LayoutResult<'a>,
    pub(crate) child_offset: f32,
}

/// A child subtree translated into its parent's frame.
pub(crate) struct PlacedChild<'a> {
    pub(crate) result: LayoutResult<'a>,
    /// Top-center of the child's first node.
    pub(crate) entry: Point,
    /// Bottom of the child's spine.
    pub(crate) exit: Point,
    pub(crate) empty: bool,
}

pub(crate) struct TreeLayout<'c> {
    pub(crate) config: &'c LayoutConfig,
}

impl<'c> TreeLayout<'c> {
    pub(crate) fn new(config: &'c LayoutConfig) -> Self {
        Self { config }
    }

    pub(crate) fn node_size(&self) -> Size {
        Size::new(
            self.config.node_width,
            self.config.node_height_with_padding(),
        )
    }

    /// Bottom-center of the node footprint at the local origin.
    pub(crate) fn bottom_center(&self) -> Point {
        Point::new(
            self.config.node_width / 2.0,
            self.config.node_height_with_padding(),
        )
    }

    /// `downstream` is true when something follows the enclosing branch or
    /// loop anywhere up the tree, so a chain end is not the last step.
    pub(crate) fn layout_chain<'a>(
        &self,
        step: &'a Step,
        downstream: bool,
    ) -> Result<LayoutResult<'a>, LayoutError> {
        let continues = step.next.is_some() || downstream;
        let Subtree {
            result,
            child_offset,
        } = match &step.kind {
            StepKind::Action => self.layout_action(step, continues)?,
            StepKind::Branch { success, failure } => layout_branch(
                self,
                step,
                success.as_deref(),
                failure.as_deref(),
                continues,
            )?,
            StepKind::Loop { body } => layout_loop(self, step, body.as_deref(), continues)?,
        };

        let Some(next) = step.next_step() else {
            return Ok(result);
        };
        let rest = self.layout_chain(next, downstream)?;
        let offset = self.config.node_height_with_padding() + child_offset;
        Ok(result.merge(rest.translate(0.0, offset)))
    }

    /// Lay out an optional child chain, substituting a placeholder node for
    /// an empty slot.
    pub(crate) fn layout_slot<'a>(
        &self,
        step: Option<&'a Step>,
        slot: Slot<'a>,
        downstream: bool,
    ) -> Result<LayoutResult<'a>, LayoutError> {
        match step {
            Some(step) => self.layout_chain(step, downstream),
            None => Ok(LayoutResult::placeholder(slot, self.node_size())),
        }
    }

    fn layout_action<'a>(
        &self,
        step: &'a Step,
        continues: bool,
    ) -> Result<Subtree<'a>, LayoutError> {
        let spacing = self.config.sequential_spacing;
        let from = self.bottom_center();
        let to = from.offset(0.0, spacing);
        let path = draw_connector(from, to, continues, self.config)?;
        let mut result =
            LayoutResult::single(NodeContent::Step(step), self.node_size()).with_path(path);
        if step.next.is_some() {
            let center = from.offset(0.0, spacing / 2.0);
            result = result.with_affordance(self.affordance_centered(
                center,
                AffordanceSize::Small,
                &step.name,
                RelativeLocation::After,
            ));
        }
        Ok(Subtree {
            result,
            child_offset: spacing,
        })
    }

    /// Translate `child` so its bounding box starts at `left` and its top sits
    /// at `top`.
    pub(crate) fn place_child<'a>(
        &self,
        child: LayoutResult<'a>,
        left: f32,
        top: f32,
    ) -> PlacedChild<'a> {
        let bounds = child.bounds().unwrap_or(Bounds::at(Point::default()));
        let dx = left - bounds.min_x;
        let dy = top - bounds.min_y;
        let result = child.translate(dx, dy);
        let spine = result
            .first_node()
            .map_or(bounds.center_x() + dx, |node| {
                node.position.x + self.config.node_width / 2.0
            });
        let empty = result.nodes.len() == 1 && result.placeholders().count() == 1;
        PlacedChild {
            entry: Point::new(spine, top),
            exit: Point::new(spine, top + bounds.height()),
            empty,
            result,
        }
    }

    /// Affordance sitting just above the arrowhead at `tip`.
    pub(crate) fn affordance_above<'a>(
        &self,
        tip: Point,
        size: AffordanceSize,
        anchor: &'a str,
        location: RelativeLocation,
    ) -> AddAffordance<'a> {
        let side = self.config.affordance_size(size);
        AddAffordance {
            position: Point::new(
                tip.x - side / 2.0,
                tip.y - self.config.affordance_arrow_spacing - side,
            ),
            size,
            anchor,
            location,
        }
    }

    pub(crate) fn affordance_centered<'a>(
        &self,
        center: Point,
        size: AffordanceSize,
        anchor: &'a str,
        location: RelativeLocation,
    ) -> AddAffordance<'a> {
        let side = self.config.affordance_size(size);
        AddAffordance {
            position: Point::new(center.x - side / 2.0, center.y - side / 2.0),
            size,
            anchor,
            location,
        }
    }

    /// The "insert after" affordance of a branch or loop, on the shared line
    /// above its convergence point.
    pub(crate) fn after_convergence<'a>(&self, converge: Point, anchor: &'a str) -> AddAffordance<'a> {
        let center = converge.offset(0.0, -self.config.sequential_spacing / 2.0);
        self.affordance_centered(
            center,
            AffordanceSize::Small,
            anchor,
            RelativeLocation::After,
        )
    }
}
