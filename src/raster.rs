//! Integer-only rasterization onto a pixel surface.
//!
//! Lines are drawn with a symmetric Bresenham walk: one cursor leaves the
//! start point, a second leaves the end point, and both advance toward the
//! middle while sharing a single decision variable. The walk mirrors itself,
//! so drawing `a -> b` and `b -> a` sets exactly the same pixels.

use macroquad::color::Color;
use macroquad::texture::Image;

use crate::point::Point;

/// Anything a figure can be rasterized onto.
///
/// Writes outside the surface must be ignored: thick lines and vertex markers
/// routinely spill past the border.
pub trait PixelSurface {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

impl PixelSurface for Image {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        Image::set_pixel(self, x as u32, y as u32, color);
    }
}

/// An owned, row-major buffer of colours.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Coordinates of every pixel that differs from the background.
    pub fn painted(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c != self.background)
            .map(move |(i, _)| Point::new((i % width) as i32, (i / width) as i32))
    }
}

impl PixelSurface for PixelBuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }
}

/// The axis both cursors advance along every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    /// (principal, secondary) coordinates of `p`.
    fn split(self, p: Point) -> (i32, i32) {
        match self {
            Axis::X => (p.x, p.y),
            Axis::Y => (p.y, p.x),
        }
    }

    fn join(self, principal: i32, secondary: i32) -> (i32, i32) {
        match self {
            Axis::X => (principal, secondary),
            Axis::Y => (secondary, principal),
        }
    }
}

/// Cross-section of a thick line: the centre pixel plus `up` pixels on the
/// positive side and `down` on the negative side of the secondary axis.
#[derive(Clone, Copy, Debug)]
struct Pen {
    up: i32,
    down: i32,
}

impl Pen {
    fn new(thickness: u32) -> Self {
        let thickness = thickness.clamp(1, i32::MAX as u32) as i32;
        let up = (thickness - 1) / 2;
        Self { up, down: thickness - 1 - up }
    }

    fn stamp(&self, surface: &mut dyn PixelSurface, axis: Axis, principal: i32, secondary: i32, color: Color) {
        for offset in -self.down..=self.up {
            // pixels past the edge of the grid can't be on any surface
            if let Ok(secondary) = i32::try_from(secondary as i64 + offset as i64) {
                let (x, y) = axis.join(principal, secondary);
                surface.set_pixel(x, y, color);
            }
        }
    }
}

/// Unit direction from `from` toward `to`, and the distance between them.
fn step(from: i32, to: i32) -> (i32, i64) {
    if from < to {
        (1, to as i64 - from as i64)
    } else {
        (-1, from as i64 - to as i64)
    }
}

/// Draws a `thickness`-pixel wide line from `start` to `end`.
///
/// Both endpoints are always plotted as single pixels, so even a zero-length
/// line leaves a mark.
pub fn draw_line(surface: &mut dyn PixelSurface, start: Point, end: Point, color: Color, thickness: u32) {
    surface.set_pixel(start.x, start.y, color);
    surface.set_pixel(end.x, end.y, color);

    let dx = (end.x as i64 - start.x as i64).abs();
    let dy = (end.y as i64 - start.y as i64).abs();
    let axis = if dx > dy { Axis::X } else { Axis::Y };

    symmetric_walk(surface, axis, start, end, color, Pen::new(thickness));
}

fn symmetric_walk(surface: &mut dyn PixelSurface, axis: Axis, start: Point, end: Point, color: Color, pen: Pen) {
    let (mut fwd, mut fwd_minor) = axis.split(start);
    let (mut back, mut back_minor) = axis.split(end);

    let (incr, major) = step(fwd, back);
    let (incr_minor, minor) = step(fwd_minor, back_minor);

    let incr_e = 2 * minor;
    let incr_ne = 2 * (minor - major);
    let mut d = 2 * minor - major;

    // stop once the cursors meet or sit next to each other
    while (fwd as i64 - back as i64).abs() > 1 {
        fwd += incr;
        back -= incr;

        if d < 0 {
            d += incr_e;
        } else {
            d += incr_ne;
            fwd_minor += incr_minor;
            back_minor -= incr_minor;
        }

        pen.stamp(surface, axis, fwd, fwd_minor, color);
        pen.stamp(surface, axis, back, back_minor, color);
    }
}

/// Fills the disc of `radius` pixels around `center`.
pub fn fill_circle(surface: &mut dyn PixelSurface, center: Point, radius: i32, color: Color) {
    let r = radius.max(0) as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let x = i32::try_from(center.x as i64 + dx);
            let y = i32::try_from(center.y as i64 + dy);
            if let (Ok(x), Ok(y)) = (x, y) {
                surface.set_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::pt;
    use macroquad::color::colors::{BLACK, RED, WHITE};
    use std::collections::HashSet;

    /// Keeps every write, including the ones a buffer would clip.
    #[derive(Default)]
    struct Recorder(Vec<Point>);

    impl PixelSurface for Recorder {
        fn set_pixel(&mut self, x: i32, y: i32, _color: Color) {
            self.0.push(pt(x, y));
        }
    }

    fn buffer() -> PixelBuffer {
        PixelBuffer::new(64, 64, BLACK)
    }

    fn painted(buf: &PixelBuffer) -> HashSet<Point> {
        buf.painted().collect()
    }

    fn line(a: Point, b: Point, thickness: u32) -> HashSet<Point> {
        let mut buf = buffer();
        draw_line(&mut buf, a, b, RED, thickness);
        painted(&buf)
    }

    #[test]
    fn zero_length_line_plots_its_endpoint() {
        let mut buf = buffer();
        draw_line(&mut buf, pt(0, 0), pt(0, 0), WHITE, 1);
        assert_eq!(buf.get_pixel(0, 0), Some(WHITE));
        assert_eq!(painted(&buf).len(), 1);
    }

    #[test]
    fn shallow_line_pixels() {
        let expected: HashSet<Point> = [
            (0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2),
            (6, 2), (7, 3), (8, 3), (9, 4), (10, 4),
        ]
        .into_iter()
        .map(|(x, y)| pt(x, y))
        .collect();
        assert_eq!(line(pt(0, 0), pt(10, 4), 1), expected);
    }

    #[test]
    fn drawing_direction_does_not_matter() {
        let cases = [
            (pt(0, 0), pt(10, 4)),
            (pt(3, 2), pt(40, 51)),
            (pt(60, 5), pt(1, 33)),
            (pt(7, 7), pt(30, 7)),
            (pt(12, 50), pt(12, 3)),
            (pt(5, 5), pt(25, 25)),
            (pt(20, 20), pt(21, 40)),
        ];
        for (a, b) in cases {
            for thickness in [1, 2, 3, 6] {
                assert_eq!(line(a, b, thickness), line(b, a, thickness),
                           "{a:?} <-> {b:?} at thickness {thickness}");
            }
        }
    }

    #[test]
    fn axis_aligned_lines_are_straight() {
        let horizontal = line(pt(2, 9), pt(30, 9), 1);
        assert_eq!(horizontal.len(), 29);
        assert!(horizontal.iter().all(|p| p.y == 9));

        let vertical = line(pt(4, 40), pt(4, 1), 1);
        assert_eq!(vertical.len(), 40);
        assert!(vertical.iter().all(|p| p.x == 4));
    }

    #[test]
    fn diagonal_steps_both_axes() {
        let diagonal = line(pt(0, 0), pt(8, 8), 1);
        let expected: HashSet<Point> = (0..=8).map(|i| pt(i, i)).collect();
        assert_eq!(diagonal, expected);
    }

    #[test]
    fn thickness_fans_out_across_the_principal_axis() {
        for thickness in 1..=6u32 {
            let pixels = line(pt(5, 30), pt(40, 30), thickness);
            // the endpoints stay single pixels, every stepped column is full
            for x in 6..40 {
                let column = pixels.iter().filter(|p| p.x == x).count();
                assert_eq!(column, thickness as usize, "column {x} at thickness {thickness}");
            }
            let up = (thickness as i32 - 1) / 2;
            let down = thickness as i32 - 1 - up;
            assert!(pixels.contains(&pt(20, 30 + up)));
            assert!(pixels.contains(&pt(20, 30 - down)));
        }
    }

    #[test]
    fn steep_lines_fan_out_horizontally() {
        let pixels = line(pt(30, 2), pt(34, 50), 3);
        for y in 3..50 {
            let row = pixels.iter().filter(|p| p.y == y).count();
            assert_eq!(row, 3, "row {y}");
        }
    }

    #[test]
    fn zero_thickness_draws_like_one() {
        assert_eq!(line(pt(1, 1), pt(20, 9), 0), line(pt(1, 1), pt(20, 9), 1));
    }

    #[test]
    fn lines_clip_at_the_border() {
        let mut buf = PixelBuffer::new(8, 8, BLACK);
        draw_line(&mut buf, pt(-20, 3), pt(30, 3), RED, 5);
        assert_eq!(painted(&buf).len(), 8 * 5);
    }

    #[test]
    fn thick_lines_stop_at_the_edge_of_the_grid() {
        let mut rec = Recorder::default();
        draw_line(&mut rec, pt(0, i32::MAX), pt(10, i32::MAX), RED, 3);
        assert!(rec.0.iter().all(|p| p.y == i32::MAX || p.y == i32::MAX - 1));
        assert_eq!(rec.0.iter().filter(|p| p.x == 3).count(), 2);

        let mut rec = Recorder::default();
        draw_line(&mut rec, pt(0, i32::MIN), pt(10, i32::MIN), RED, 4);
        assert!(rec.0.iter().all(|p| p.y == i32::MIN || p.y == i32::MIN + 1));
        assert_eq!(rec.0.iter().filter(|p| p.x == 3).count(), 2);

        let mut rec = Recorder::default();
        draw_line(&mut rec, pt(i32::MAX, 7), pt(i32::MAX - 3, 40), RED, 5);
        assert!(rec.0.iter().all(|p| p.x >= i32::MAX - 5));
        assert_eq!(rec.0.iter().filter(|p| p.y == 20).count(), 4);
    }

    #[test]
    fn huge_thickness_keeps_its_sign() {
        let pen = Pen::new(u32::MAX);
        assert!(pen.up >= 0 && pen.down >= 0);
        assert_eq!(pen.up + pen.down, i32::MAX - 1);
    }

    #[test]
    fn circle_at_the_corner_of_the_grid() {
        let mut rec = Recorder::default();
        fill_circle(&mut rec, pt(i32::MAX, i32::MAX), 2, RED);
        assert_eq!(rec.0.len(), 6);
        assert!(rec.0.iter().all(|p| p.x >= i32::MAX - 2 && p.y >= i32::MAX - 2));
    }

    #[test]
    fn filled_circle() {
        let mut buf = buffer();
        fill_circle(&mut buf, pt(10, 10), 2, WHITE);
        let pixels = painted(&buf);
        assert_eq!(pixels.len(), 13);
        assert!(pixels.contains(&pt(12, 10)));
        assert!(!pixels.contains(&pt(12, 12)));

        buf.clear();
        fill_circle(&mut buf, pt(0, 0), 0, WHITE);
        assert_eq!(painted(&buf).len(), 1);
    }

    #[test]
    fn image_surface_clips() {
        let mut image = Image::gen_image_color(4, 4, BLACK);
        draw_line(&mut image, pt(-3, 1), pt(10, 1), WHITE, 1);
        assert_eq!(image.get_pixel(0, 1), WHITE);
        assert_eq!(image.get_pixel(3, 1), WHITE);
        assert_eq!(image.get_pixel(3, 2), BLACK);
    }
}
