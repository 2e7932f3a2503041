use crate::point::{self, Point, HIT_RADIUS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vertex {
    pub pos: Point,
}

impl Vertex {
    pub fn new(pos: Point) -> Self {
        Self { pos }
    }

    /// Whether `p` falls inside this vertex's hit square.
    pub fn is_near(&self, p: Point) -> bool {
        point::is_near(self.pos, p, HIT_RADIUS)
    }
}

/// A resolved edge of a figure: the positions of two adjacent ring vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub start: Vertex,
    pub end: Vertex,
}

impl Edge {
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }

    pub fn distance_sq(&self, p: Point) -> f64 {
        point::distance_sq_to_segment(p, self.start.pos, self.end.pos)
    }
}

/// One element of a figure's shape sequence. Indices point into the figure's
/// vertex ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeEntry {
    Vertex(usize),
    Edge { from: usize, to: usize },
}

impl ShapeEntry {
    /// Shifts every ring index at or past `at` by one, making room for a
    /// vertex inserted at ring position `at`.
    pub(crate) fn shift_from(self, at: usize) -> Self {
        let bump = |i: usize| if i >= at { i + 1 } else { i };
        match self {
            ShapeEntry::Vertex(i) => ShapeEntry::Vertex(bump(i)),
            ShapeEntry::Edge { from, to } => ShapeEntry::Edge { from: bump(from), to: bump(to) },
        }
    }
}

/// Names an edge by its position in a figure's shape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeRef(pub usize);
