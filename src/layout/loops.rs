use crate::ir::Step;
use crate::log::debug;

use super::{
    AffordanceSize, LayoutError, LayoutResult, NodeContent, Point, RelativeLocation, Slot,
    Subtree, TreeLayout, draw_connector,
};

/// Lay out a loop: the body chain centered below the loop node, entered from
/// above and left through a return connector back onto the loop's spine.
pub(super) fn layout_loop<'a>(
    tree: &TreeLayout<'_>,
    step: &'a Step,
    body: Option<&'a Step>,
    continues: bool,
) -> Result<Subtree<'a>, LayoutError> {
    let config = tree.config;
    let spacing = config.step_to_child_spacing;
    let start = tree.bottom_center();
    let body_top = start.y + spacing;

    let slot = Slot {
        parent: &step.name,
        location: RelativeLocation::InsideLoop,
    };
    let body = tree.layout_slot(body, slot, continues)?;
    let size = body.bounding_box();
    let exit_point = Point::new(start.x, body_top + size.height + spacing);
    debug!(
        step = %step.name,
        width = size.width,
        height = size.height,
        "placing loop body"
    );

    let placed = tree.place_child(body, start.x - size.width / 2.0, body_top);
    let entry = draw_connector(start, placed.entry, true, config)?;
    let size_class = if placed.empty {
        AffordanceSize::Large
    } else {
        AffordanceSize::Small
    };
    let affordance = tree.affordance_above(
        placed.entry,
        size_class,
        &step.name,
        RelativeLocation::InsideLoop,
    );
    let back = draw_connector(placed.exit, exit_point, continues, config)?;

    let layout = LayoutResult::single(NodeContent::Step(step), tree.node_size())
        .with_path(entry)
        .with_affordance(affordance)
        .merge(placed.result)
        .with_path(back)
        .with_affordance(tree.after_convergence(exit_point, &step.name));

    Ok(Subtree {
        result: layout,
        child_offset: 2.0 * spacing + size.height,
    })
}
