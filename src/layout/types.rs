use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::ir::Step;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn at(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    pub fn from_rect(origin: Point, size: Size) -> Self {
        Self {
            min_x: origin.x,
            min_y: origin.y,
            max_x: origin.x + size.width,
            max_y: origin.y + size.height,
        }
    }

    pub fn include(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }
}

/// Where a new step would be spliced in, relative to the anchor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeLocation {
    /// Never produced by the layout; kept so callers can build insert
    /// commands from the same vocabulary.
    Before,
    After,
    InsideSuccessBranch,
    InsideFailureBranch,
    InsideLoop,
}

impl RelativeLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            RelativeLocation::Before => "before",
            RelativeLocation::After => "after",
            RelativeLocation::InsideSuccessBranch => "inside_success_branch",
            RelativeLocation::InsideFailureBranch => "inside_failure_branch",
            RelativeLocation::InsideLoop => "inside_loop",
        }
    }
}

impl fmt::Display for RelativeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordanceSize {
    /// Points into an empty branch or loop body.
    Large,
    Small,
}

/// An empty branch or loop slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub parent: &'a str,
    pub location: RelativeLocation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeContent<'a> {
    Step(&'a Step),
    Placeholder(Slot<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedNode<'a> {
    pub content: NodeContent<'a>,
    /// Top-left corner of the node box.
    pub position: Point,
}

impl<'a> PositionedNode<'a> {
    pub fn step(&self) -> Option<&'a Step> {
        match self.content {
            NodeContent::Step(step) => Some(step),
            NodeContent::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, NodeContent::Placeholder(_))
    }

    /// Stable render key: the step name, or `parent:location` for an empty slot.
    pub fn key(&self) -> Cow<'a, str> {
        match self.content {
            NodeContent::Step(step) => Cow::Borrowed(step.name.as_str()),
            NodeContent::Placeholder(slot) => {
                Cow::Owned(format!("{}:{}", slot.parent, slot.location))
            }
        }
    }
}

/// A clickable insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AddAffordance<'a> {
    /// Top-left corner of the square hit region.
    pub position: Point,
    pub size: AffordanceSize,
    pub anchor: &'a str,
    pub location: RelativeLocation,
}

impl AddAffordance<'_> {
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..self
        }
    }
}
