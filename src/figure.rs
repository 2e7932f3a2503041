//! The editable polygon model.
//!
//! A [`Figure`] keeps two views of the same closed polygon: the vertex ring,
//! whose order is the winding order, and the shape sequence, which interleaves
//! vertex and edge entries (`V0, E(0,1), V1, ..., Vn-1, E(n-1,0)`) and drives
//! both rendering order and edge picking.

use euclid::default::Box2D;
use log::{debug, trace};
use macroquad::color::Color;

use crate::{
    common_traits::*,
    geom::{Edge, EdgeRef, ShapeEntry, Vertex},
    point::{Point, HIT_RADIUS},
    raster::{self, PixelSurface},
};

/// Padding around the first vertex's bounding box.
const INITIAL_MARGIN: i32 = 5;
/// Extra slack given to the bounding box when testing containment.
const CONTAINS_MARGIN: i32 = 5;
const VERTEX_SIZE_PADDING: u32 = 6;

#[derive(Clone, Debug)]
pub struct Figure {
    vertices: Vec<Vertex>,
    shapes: Vec<ShapeEntry>,
    bounds: Box2D<i32>,
    color: Color,
    stroke_thickness: u32,
    vertex_size: u32,
}

impl Figure {
    /// Starts a figure with a single vertex at `point`.
    pub fn new(point: Point, color: Color, stroke_thickness: u32) -> Self {
        Self {
            vertices: vec![Vertex::new(point)],
            shapes: vec![ShapeEntry::Vertex(0)],
            bounds: Box2D::new(
                Point::new(point.x.saturating_sub(INITIAL_MARGIN), point.y.saturating_sub(INITIAL_MARGIN)),
                Point::new(point.x.saturating_add(INITIAL_MARGIN), point.y.saturating_add(INITIAL_MARGIN)),
            ),
            color,
            stroke_thickness,
            vertex_size: stroke_thickness.saturating_add(VERTEX_SIZE_PADDING),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn shapes(&self) -> &[ShapeEntry] {
        &self.shapes
    }

    pub fn first_vertex(&self) -> &Vertex {
        &self.vertices[0]
    }

    pub fn last_vertex(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 1]
    }

    /// The expand-only bounding box. It never shrinks, even if the vertex that
    /// widened it later moves into a different place in the ring.
    pub fn bounding_box(&self) -> Box2D<i32> {
        self.bounds
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn stroke_thickness(&self) -> u32 {
        self.stroke_thickness
    }

    /// Changes the stroke width. Vertex markers keep the size they were given
    /// at construction.
    pub fn set_stroke_thickness(&mut self, thickness: u32) {
        self.stroke_thickness = thickness;
    }

    pub fn vertex_size(&self) -> u32 {
        self.vertex_size
    }

    pub fn vertex_radius(&self) -> i32 {
        (self.vertex_size / 2) as i32
    }

    pub fn edge(&self, edge: EdgeRef) -> Option<Edge> {
        match self.shapes.get(edge.0) {
            Some(&ShapeEntry::Edge { from, to }) => Some(Edge::new(self.vertices[from], self.vertices[to])),
            _ => None,
        }
    }

    /// Every edge in shape-sequence order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeRef, Edge)> + '_ {
        self.shapes.iter().enumerate().filter_map(move |(i, entry)| match *entry {
            ShapeEntry::Edge { from, to } => Some((EdgeRef(i), Edge::new(self.vertices[from], self.vertices[to]))),
            ShapeEntry::Vertex(_) => None,
        })
    }

    fn expand_bounds(&mut self, p: Point, margin: i32) {
        let b = &mut self.bounds;
        b.min.x = b.min.x.min(p.x.saturating_sub(margin));
        b.min.y = b.min.y.min(p.y.saturating_sub(margin));
        b.max.x = b.max.x.max(p.x.saturating_add(margin));
        b.max.y = b.max.y.max(p.y.saturating_add(margin));
    }

    /// Whether `p` lies inside the bounding box grown by `margin`.
    fn within_bounds(&self, p: Point, margin: i32) -> bool {
        let b = self.bounds;
        p.x >= b.min.x.saturating_sub(margin) && p.x <= b.max.x.saturating_add(margin)
            && p.y >= b.min.y.saturating_sub(margin) && p.y <= b.max.y.saturating_add(margin)
    }

    /// Appends a vertex to the end of the ring.
    ///
    /// Does nothing when `point` falls inside the hit square of an existing
    /// vertex.
    pub fn add_vertex(&mut self, point: Point) {
        if let Some(v) = self.vertices.iter().find(|v| v.is_near(point)) {
            debug!("ignoring vertex {point:?}, too close to {:?}", v.pos);
            return;
        }

        let idx = self.vertices.len();
        self.vertices.push(Vertex::new(point));

        // the closing edge now leads to the new vertex instead of the first one
        match self.shapes.last_mut() {
            Some(ShapeEntry::Edge { to, .. }) => *to = idx,
            _ => self.shapes.push(ShapeEntry::Edge { from: idx - 1, to: idx }),
        }
        self.shapes.push(ShapeEntry::Vertex(idx));
        self.shapes.push(ShapeEntry::Edge { from: idx, to: 0 });

        self.expand_bounds(point, self.vertex_radius());
        trace!("added vertex {point:?}, {} in figure", self.vertices.len());
    }

    /// Splits `edge` in two at `point`.
    ///
    /// Does nothing when `edge` does not name an edge entry, or when `point`
    /// falls inside the hit square of either of the edge's endpoints.
    pub fn insert_vertex_on_edge(&mut self, point: Point, edge: EdgeRef) {
        let (from, to) = match self.shapes.get(edge.0) {
            Some(&ShapeEntry::Edge { from, to }) => (from, to),
            other => {
                debug!("no edge at shape position {} (found {other:?})", edge.0);
                return;
            }
        };

        let (start, end) = (self.vertices[from], self.vertices[to]);
        if start.is_near(point) || end.is_near(point) {
            debug!("ignoring vertex {point:?}, too close to edge end {:?} or {:?}", start.pos, end.pos);
            return;
        }

        let at = from + 1;
        self.vertices.insert(at, Vertex::new(point));
        for entry in self.shapes.iter_mut() {
            *entry = entry.shift_from(at);
        }
        let to = if to >= at { to + 1 } else { to };
        self.shapes.splice(edge.0..=edge.0, [
            ShapeEntry::Edge { from, to: at },
            ShapeEntry::Vertex(at),
            ShapeEntry::Edge { from: at, to },
        ]);

        self.expand_bounds(point, self.vertex_radius());
        trace!("inserted vertex {point:?} between {:?} and {:?}", start.pos, end.pos);
    }

    /// Even-odd containment test.
    ///
    /// Points lying exactly on an edge count as inside when the edge bounds
    /// the figure from the low-x or low-y side and as outside otherwise.
    pub fn contains_point(&self, p: Point) -> bool {
        if !self.within_bounds(p, CONTAINS_MARGIN) {
            return false;
        }

        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let (vi, vj) = (self.vertices[i].pos, self.vertices[j].pos);
            if (vi.y > p.y) != (vj.y > p.y) && left_of_crossing(p, vi, vj) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// The first vertex, in ring order, whose hit square contains `p`.
    pub fn find_vertex_near(&self, p: Point) -> Option<&Vertex> {
        if !self.within_bounds(p, HIT_RADIUS) {
            return None;
        }
        self.vertices.iter().find(|v| v.is_near(p))
    }

    /// The first edge, in shape-sequence order, within `tolerance` pixels of `p`.
    pub fn find_edge_near(&self, p: Point, tolerance: i32) -> Option<EdgeRef> {
        let limit = (tolerance as f64).powi(2);
        self.edges()
            .find(|(_, edge)| edge.distance_sq(p) <= limit)
            .map(|(edge_ref, _)| edge_ref)
    }

    /// Rasterizes the figure in shape-sequence order.
    pub fn render(&self, surface: &mut dyn PixelSurface, show_vertices: bool) {
        for entry in &self.shapes {
            match *entry {
                ShapeEntry::Edge { from, to } => raster::draw_line(
                    surface,
                    self.vertices[from].pos,
                    self.vertices[to].pos,
                    self.color,
                    self.stroke_thickness,
                ),
                ShapeEntry::Vertex(i) if show_vertices => {
                    raster::fill_circle(surface, self.vertices[i].pos, self.vertex_radius(), self.color)
                }
                ShapeEntry::Vertex(_) => {}
            }
        }
    }
}

/// Whether `p` lies strictly left of where the edge `a`-`b` crosses the
/// horizontal line through `p`. The edge must straddle that line.
fn left_of_crossing(p: Point, a: Point, b: Point) -> bool {
    // differences span 33 bits, their products need more than an i64
    let dy = b.y as i128 - a.y as i128;
    let lhs = (p.x as i128 - a.x as i128) * dy;
    let rhs = (b.x as i128 - a.x as i128) * (p.y as i128 - a.y as i128);
    if dy > 0 { lhs < rhs } else { lhs > rhs }
}

impl Draw for Figure {
    fn draw(&self, surface: &mut dyn PixelSurface) {
        self.render(surface, true);
    }

    fn vertices(&self) -> Vec<Vertex> {
        self.vertices.clone()
    }
}

impl Select for Figure {
    fn compute_aabb(&self) -> Box2D<i32> {
        self.bounds
    }

    fn contains_point(&self, p: Point) -> bool {
        Figure::contains_point(self, p)
    }
}
