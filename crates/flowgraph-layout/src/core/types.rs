//! Core type definitions for flow-graph layout
//!
//! This module contains the fundamental types used throughout the crate:
//! vertex identities, geometry primitives, and the layout result.

use std::collections::HashMap;
use std::fmt;

/// Opaque vertex identity.
///
/// In the CFG domain this is a code address; any 64-bit key works. Callers
/// convert their native identities (addresses, interned names) to `VertexId`
/// once at the boundary; the algorithms never see raw identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u64);

impl From<u64> for VertexId {
    fn from(raw: u64) -> Self {
        VertexId(raw)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Caller-measured box size for a vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point in scene coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle (x, y is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The zero rectangle
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns true if the point lies inside or on the boundary
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` on all four sides
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }
}

/// The routed polyline for a single edge
///
/// Points run from the source box's bottom-center to the destination box's
/// top-center, with one bend per intermediate rank the edge spans. There are
/// always at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    /// Source vertex (true edge direction, never the ranking-reversed one)
    pub from: VertexId,
    /// Destination vertex
    pub to: VertexId,
    /// Route points in drawing order
    pub points: Vec<Point>,
    /// Entry angle at the destination in radians, from the last segment.
    /// Only meaningful for arrowhead orientation.
    pub head_angle: f64,
}

impl EdgePath {
    /// First route point (source bottom-center)
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Last route point (destination top-center)
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

/// The result of one layout call
///
/// Immutable once produced. The caller may translate or scale the
/// coordinates for display but must not feed the result back as input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    /// Top-left corner of each vertex box
    pub positions: HashMap<VertexId, Point>,
    /// One routed path per input edge, in input order
    pub edges: Vec<EdgePath>,
    /// Bounding rectangle of all boxes and routes, padded on all sides
    pub bounds: Rect,
}

impl LayoutResult {
    /// The empty result returned when layout inputs are not yet complete
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if this is the empty (not-ready) result
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.edges.is_empty()
    }

    /// Position of a vertex, if it was laid out
    pub fn position(&self, id: VertexId) -> Option<Point> {
        self.positions.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_display() {
        assert_eq!(VertexId(0x400080).to_string(), "0x400080");
        assert_eq!(VertexId(0).to_string(), "0x0");
    }

    #[test]
    fn test_vertex_id_from_u64() {
        let id: VertexId = 0x1000u64.into();
        assert_eq!(id, VertexId(0x1000));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(r.contains(Point::new(0.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_rect_expanded() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0).expanded(5.0);
        assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn test_empty_result() {
        let result = LayoutResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.bounds, Rect::zero());
        assert_eq!(result.position(VertexId(1)), None);
    }

    #[test]
    fn test_edge_path_endpoints() {
        let path = EdgePath {
            from: VertexId(1),
            to: VertexId(2),
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            head_angle: 0.0,
        };
        assert_eq!(path.start(), Point::new(0.0, 0.0));
        assert_eq!(path.end(), Point::new(1.0, 1.0));
    }
}
