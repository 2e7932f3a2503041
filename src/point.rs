use euclid::default::{Point2D, Vector2D};

/// A pixel position. Figures live on the same integer grid as the surface
/// they are rendered to.
pub type Point = Point2D<i32>;

/// Radius of the square a vertex claims for hit testing and for rejecting
/// vertices placed too close to each other.
pub const HIT_RADIUS: i32 = 10;

/// Shorthand for `Point::new`.
pub fn pt(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Whether `a` and `b` are closer than `radius` on *both* axes.
///
/// This is a box test, not a distance: (9, 9) is near (0, 0) for a radius of
/// 10 while (10, 0) is not.
pub fn is_near(a: Point, b: Point, radius: i32) -> bool {
    let radius = radius as i64;
    (a.x as i64 - b.x as i64).abs() < radius && (a.y as i64 - b.y as i64).abs() < radius
}

/// Squared euclidean distance from `p` to the segment `a`-`b`.
pub fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let a: Point2D<f64> = a.cast();
    let ab: Vector2D<f64> = b.cast::<f64>() - a;
    let ap: Vector2D<f64> = p.cast::<f64>() - a;
    let len_sq = ab.square_length();
    if len_sq == 0.0 {
        return ap.square_length();
    }
    let t = (ap.dot(ab) / len_sq).clamp(0.0, 1.0);
    (ap - ab * t).square_length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_is_a_strict_box() {
        assert!(is_near(pt(0, 0), pt(9, -9), HIT_RADIUS));
        assert!(!is_near(pt(0, 0), pt(10, 0), HIT_RADIUS));
        assert!(!is_near(pt(0, 0), pt(0, -10), HIT_RADIUS));
        assert!(!is_near(pt(0, 0), pt(3, 40), HIT_RADIUS));
    }

    #[test]
    fn segment_distance() {
        let a = pt(0, 0);
        let b = pt(10, 0);
        assert_eq!(distance_sq_to_segment(pt(5, 3), a, b), 9.0);
        // past the end the closest point is the endpoint
        assert_eq!(distance_sq_to_segment(pt(13, 4), a, b), 25.0);
        assert_eq!(distance_sq_to_segment(pt(-3, -4), a, b), 25.0);
    }

    #[test]
    fn degenerate_segment_distance() {
        assert_eq!(distance_sq_to_segment(pt(3, 4), pt(0, 0), pt(0, 0)), 25.0);
    }

    #[test]
    fn far_apart_points() {
        assert!(!is_near(pt(i32::MIN, 0), pt(i32::MAX, 0), HIT_RADIUS));
        assert!(!is_near(pt(0, i32::MAX), pt(0, i32::MIN), HIT_RADIUS));
        assert!(is_near(pt(i32::MAX, i32::MIN), pt(i32::MAX - 9, i32::MIN + 9), HIT_RADIUS));

        let span = u32::MAX as f64;
        let origin = pt(i32::MIN, 0);
        assert_eq!(distance_sq_to_segment(pt(i32::MAX, 0), origin, origin), span * span);
        assert!(distance_sq_to_segment(pt(0, 3), pt(i32::MIN, 3), pt(i32::MAX, 3)) < 1e-6);
    }
}
