use euclid::default::Box2D;

use crate::{geom::Vertex, point::Point, raster::PixelSurface};

pub trait Draw {
    fn draw(&self, surface: &mut dyn PixelSurface);
    fn vertices(&self) -> Vec<Vertex>;
}

pub trait Select {
    fn compute_aabb(&self) -> Box2D<i32>;
    fn contains_point(&self, p: Point) -> bool;
}
