use super::{
    AddAffordance, Bounds, ConnectorPath, NodeContent, PositionedNode, Point, RelativeLocation,
    Size, Slot,
};

/// Positioned nodes, one merged connector path and the insertion affordances
/// of a subtree.
///
/// Values are never modified in place: `translate` and `merge` return new
/// results.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult<'a> {
    pub nodes: Vec<PositionedNode<'a>>,
    pub path: ConnectorPath,
    pub affordances: Vec<AddAffordance<'a>>,
    /// Footprint of every node box, bottom padding included.
    pub node_size: Size,
}

impl<'a> LayoutResult<'a> {
    /// One node at the local origin with no connectors.
    pub fn single(content: NodeContent<'a>, node_size: Size) -> Self {
        Self {
            nodes: vec![PositionedNode {
                content,
                position: Point::default(),
            }],
            path: ConnectorPath::new(),
            affordances: Vec::new(),
            node_size,
        }
    }

    pub fn placeholder(slot: Slot<'a>, node_size: Size) -> Self {
        Self::single(NodeContent::Placeholder(slot), node_size)
    }

    pub fn with_path(mut self, path: ConnectorPath) -> Self {
        self.path = self.path.concat(path);
        self
    }

    pub fn with_affordance(mut self, affordance: AddAffordance<'a>) -> Self {
        self.affordances.push(affordance);
        self
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            nodes: self
                .nodes
                .iter()
                .map(|node| PositionedNode {
                    content: node.content,
                    position: node.position.offset(dx, dy),
                })
                .collect(),
            path: self.path.translate(dx, dy),
            affordances: self
                .affordances
                .iter()
                .map(|affordance| affordance.translate(dx, dy))
                .collect(),
            node_size: self.node_size,
        }
    }

    /// Concatenate nodes, affordances and path operations. No deduplication.
    pub fn merge(self, other: LayoutResult<'a>) -> Self {
        debug_assert_eq!(self.node_size, other.node_size);
        let mut nodes = self.nodes;
        nodes.extend(other.nodes);
        let mut affordances = self.affordances;
        affordances.extend(other.affordances);
        Self {
            nodes,
            path: self.path.concat(other.path),
            affordances,
            node_size: self.node_size,
        }
    }

    /// Union of every node footprint and the connector path.
    pub fn bounds(&self) -> Option<Bounds> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| Bounds::from_rect(node.position, self.node_size))
            .reduce(Bounds::union);
        match (nodes, self.path.bounds()) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn bounding_box(&self) -> Size {
        self.bounds().map_or(Size::ZERO, |bounds| bounds.size())
    }

    pub fn first_node(&self) -> Option<&PositionedNode<'a>> {
        self.nodes.first()
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &PositionedNode<'a>> {
        self.nodes.iter().filter(|node| node.is_placeholder())
    }

    pub fn affordances_at(
        &self,
        location: RelativeLocation,
    ) -> impl Iterator<Item = &AddAffordance<'a>> {
        self.affordances
            .iter()
            .filter(move |affordance| affordance.location == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::Step;
    use crate::layout::{AffordanceSize, draw_connector};

    fn node_size() -> Size {
        let config = LayoutConfig::default();
        Size::new(config.node_width, config.node_height_with_padding())
    }

    fn slot(location: RelativeLocation) -> Slot<'static> {
        Slot {
            parent: "parent",
            location,
        }
    }

    #[test]
    fn lone_placeholder_is_one_node_box() {
        let result = LayoutResult::placeholder(slot(RelativeLocation::InsideLoop), node_size());
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.bounding_box(), node_size());
        assert_eq!(result.nodes[0].key(), "parent:inside_loop");
    }

    #[test]
    fn empty_result_has_zero_size() {
        let result = LayoutResult {
            nodes: Vec::new(),
            path: ConnectorPath::new(),
            affordances: Vec::new(),
            node_size: node_size(),
        };
        assert_eq!(result.bounding_box(), Size::ZERO);
    }

    #[test]
    fn translate_keeps_size() {
        let config = LayoutConfig::default();
        let step = Step::action("a");
        let path = draw_connector(Point::new(130.0, 90.0), Point::new(-200.0, 300.0), true, &config)
            .unwrap();
        let result = LayoutResult::single(NodeContent::Step(&step), node_size()).with_path(path);
        let size = result.bounding_box();
        for (dx, dy) in [(0.0, 0.0), (12.5, -40.0), (-1000.0, 1000.0)] {
            let moved = result.translate(dx, dy);
            assert_eq!(moved.bounding_box(), size);
            assert_eq!(moved.nodes[0].position, Point::new(dx, dy));
        }
    }

    #[test]
    fn merge_concatenates_in_order() {
        let config = LayoutConfig::default();
        let a_step = Step::action("a");
        let b_step = Step::action("b");
        let affordance = AddAffordance {
            position: Point::new(1.0, 2.0),
            size: AffordanceSize::Small,
            anchor: "a",
            location: RelativeLocation::After,
        };
        let a = LayoutResult::single(NodeContent::Step(&a_step), node_size())
            .with_path(
                draw_connector(Point::new(0.0, 0.0), Point::new(0.0, 5.0), true, &config).unwrap(),
            )
            .with_affordance(affordance);
        let b = LayoutResult::placeholder(slot(RelativeLocation::InsideFailureBranch), node_size())
            .translate(0.0, 100.0);
        let merged = a.clone().merge(b.clone());

        assert_eq!(merged.nodes, [a.nodes.clone(), b.nodes.clone()].concat());
        assert_eq!(merged.affordances, vec![affordance]);
        assert_eq!(merged.path, a.path.clone().concat(b.path.clone()));
        assert_eq!(merged.placeholders().count(), 1);
        assert_eq!(merged.affordances_at(RelativeLocation::After).count(), 1);
    }

    #[test]
    fn bounds_include_path_extents() {
        let config = LayoutConfig::default();
        let step = Step::action("a");
        let path =
            draw_connector(Point::new(130.0, 90.0), Point::new(130.0, 400.0), false, &config)
                .unwrap();
        let result = LayoutResult::single(NodeContent::Step(&step), node_size()).with_path(path);
        assert_eq!(result.bounding_box(), Size::new(260.0, 400.0));
    }
}
