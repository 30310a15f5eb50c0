use crate::ir::Step;
use crate::log::debug;

use super::{
    AffordanceSize, LayoutError, LayoutResult, NodeContent, Point, RelativeLocation, Slot,
    Subtree, TreeLayout, draw_connector,
};

/// Lay out a two-way branch: both arms side by side below the branch node,
/// joined back together at a convergence point on the parent's spine.
pub(super) fn layout_branch<'a>(
    tree: &TreeLayout<'_>,
    step: &'a Step,
    success: Option<&'a Step>,
    failure: Option<&'a Step>,
    continues: bool,
) -> Result<Subtree<'a>, LayoutError> {
    let config = tree.config;
    let spacing = config.step_to_child_spacing;
    let start = tree.bottom_center();
    let children_top = start.y + spacing;

    let arms = [
        (success, RelativeLocation::InsideSuccessBranch),
        (failure, RelativeLocation::InsideFailureBranch),
    ];
    let mut children = Vec::with_capacity(arms.len());
    for (child, location) in arms {
        let slot = Slot {
            parent: &step.name,
            location,
        };
        let result = tree.layout_slot(child, slot, continues)?;
        let size = result.bounding_box();
        children.push((result, size, location));
    }

    let total_width = children.iter().map(|(_, size, _)| size.width).sum::<f32>()
        + config.branch_spacing * (children.len() - 1) as f32;
    let max_height = children
        .iter()
        .map(|(_, size, _)| size.height)
        .fold(0.0_f32, f32::max);
    let converge = Point::new(start.x, children_top + max_height + spacing);
    debug!(
        step = %step.name,
        width = total_width,
        height = max_height,
        "placing branch arms"
    );

    let mut layout = LayoutResult::single(NodeContent::Step(step), tree.node_size());
    let mut left = start.x - total_width / 2.0;
    for (child, size, location) in children {
        let placed = tree.place_child(child, left, children_top);
        left += size.width + config.branch_spacing;

        let entry = draw_connector(start, placed.entry, true, config)?;
        let size_class = if placed.empty {
            AffordanceSize::Large
        } else {
            AffordanceSize::Small
        };
        let affordance = tree.affordance_above(placed.entry, size_class, &step.name, location);
        let convergence = draw_connector(placed.exit, converge, continues, config)?;

        layout = layout
            .with_path(entry)
            .with_affordance(affordance)
            .merge(placed.result)
            .with_path(convergence);
    }
    layout = layout.with_affordance(tree.after_convergence(converge, &step.name));

    Ok(Subtree {
        result: layout,
        child_offset: 2.0 * spacing + max_height,
    })
}
