#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Pointer coordinates and scroll offsets are in CSS-style pixels (`f64`),
//! origin at the top-left of the host window. Document positions are
//! 1-based line/column pairs, ordered line-major.

use std::cmp::Ordering;

/// Scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A pointer location in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point lies within the rectangle, edges included.
    ///
    /// Edges are inclusive on both sides so a pointer resting exactly on the
    /// bottom/right border still counts as inside the editor.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Classify a point lying outside the rectangle.
    ///
    /// Above/below take priority over left/right, so a point past a corner
    /// reports the vertical edge. Returns `None` for points inside.
    #[must_use]
    pub fn outside_edge(&self, point: Point) -> Option<OutsideEdge> {
        let (edge, distance) = if point.y < self.top() {
            (Edge::Above, self.top() - point.y)
        } else if point.y > self.bottom() {
            (Edge::Below, point.y - self.bottom())
        } else if point.x < self.left() {
            (Edge::Left, self.left() - point.x)
        } else if point.x > self.right() {
            (Edge::Right, point.x - self.right())
        } else {
            return None;
        };
        Some(OutsideEdge { edge, distance })
    }
}

/// Which side of a rectangle a point escaped through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Above,
    Below,
    Left,
    Right,
}

impl Edge {
    /// Axis along which scrolling toward this edge happens.
    #[inline]
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Above | Self::Below => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// `-1.0` when scrolling toward this edge decreases the offset.
    #[inline]
    #[must_use]
    pub fn direction(self) -> f64 {
        match self {
            Self::Above | Self::Left => -1.0,
            Self::Below | Self::Right => 1.0,
        }
    }
}

/// A point's escape from a rectangle: which edge, and how far past it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutsideEdge {
    pub edge: Edge,
    /// Positive pixel distance beyond the edge.
    pub distance: f64,
}

/// Absolute scroll offsets of a scrollable surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub scroll_left: f64,
    pub scroll_top: f64,
}

impl ScrollPosition {
    /// Create a new scroll position.
    #[inline]
    #[must_use]
    pub const fn new(scroll_left: f64, scroll_top: f64) -> Self {
        Self {
            scroll_left,
            scroll_top,
        }
    }

    /// Offset along one axis.
    #[inline]
    #[must_use]
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.scroll_left,
            Axis::Vertical => self.scroll_top,
        }
    }

    /// Copy with the offset along `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => self.scroll_left = value,
            Axis::Vertical => self.scroll_top = value,
        }
        self
    }
}

/// A logical document position (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    pub line: u32,
    pub column: u32,
}

impl TextPosition {
    /// Create a new text position.
    #[inline]
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Strictly before `other` in document order.
    #[inline]
    #[must_use]
    pub fn is_before(self, other: Self) -> bool {
        self < other
    }
}

impl PartialOrd for TextPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

/// The primary selection: a fixed anchor and a moving active end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Where the selection was started.
    pub anchor: TextPosition,
    /// Where the caret currently is.
    pub active: TextPosition,
}

impl Selection {
    #[must_use]
    pub const fn new(anchor: TextPosition, active: TextPosition) -> Self {
        Self { anchor, active }
    }

    /// Collapsed selection (a bare caret).
    #[must_use]
    pub const fn caret(position: TextPosition) -> Self {
        Self::new(position, position)
    }

    #[must_use]
    pub fn start(&self) -> TextPosition {
        self.anchor.min(self.active)
    }

    #[must_use]
    pub fn end(&self) -> TextPosition {
        self.anchor.max(self.active)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Whether `position` lies within the selection, both ends included.
    #[must_use]
    pub fn contains(&self, position: TextPosition) -> bool {
        self.start() <= position && position <= self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(r.contains(Point::new(110.0, 70.0)));
        assert!(!r.contains(Point::new(9.9, 30.0)));
        assert!(!r.contains(Point::new(50.0, 70.1)));
    }

    #[test]
    fn outside_edge_prefers_vertical() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(r.outside_edge(Point::new(50.0, 50.0)), None);
        assert_eq!(r.outside_edge(Point::new(100.0, 100.0)), None);

        let above = r.outside_edge(Point::new(-30.0, -5.0)).unwrap();
        assert_eq!(above.edge, Edge::Above);
        assert_eq!(above.distance, 5.0);

        let below = r.outside_edge(Point::new(150.0, 112.0)).unwrap();
        assert_eq!(below.edge, Edge::Below);
        assert_eq!(below.distance, 12.0);

        let left = r.outside_edge(Point::new(-8.0, 40.0)).unwrap();
        assert_eq!(left.edge, Edge::Left);
        assert_eq!(left.edge.axis(), Axis::Horizontal);
        assert_eq!(left.distance, 8.0);

        let right = r.outside_edge(Point::new(103.0, 40.0)).unwrap();
        assert_eq!(right.edge, Edge::Right);
        assert_eq!(right.edge.direction(), 1.0);
    }

    #[test]
    fn text_position_ordering_is_line_major() {
        let a = TextPosition::new(3, 40);
        let b = TextPosition::new(4, 1);
        assert!(a.is_before(b));
        assert!(!b.is_before(a));
        assert!(!a.is_before(a));
    }

    #[test]
    fn selection_contains_is_inclusive() {
        let sel = Selection::new(TextPosition::new(5, 10), TextPosition::new(2, 3));
        assert_eq!(sel.start(), TextPosition::new(2, 3));
        assert_eq!(sel.end(), TextPosition::new(5, 10));
        assert!(sel.contains(TextPosition::new(2, 3)));
        assert!(sel.contains(TextPosition::new(4, 99)));
        assert!(sel.contains(TextPosition::new(5, 10)));
        assert!(!sel.contains(TextPosition::new(5, 11)));
    }

    #[test]
    fn caret_is_empty() {
        assert!(Selection::caret(TextPosition::new(1, 1)).is_empty());
    }

    #[test]
    fn scroll_position_axis_access() {
        let p = ScrollPosition::new(5.0, 7.0).with(Axis::Vertical, 9.0);
        assert_eq!(p.along(Axis::Horizontal), 5.0);
        assert_eq!(p.along(Axis::Vertical), 9.0);
    }
}
