// Plain 2D vector helpers for the overlay geometry.
// Everything here is a total function except `normalize`, which has no
// answer for a zero-length vector and says so with None.

use crate::types::Point2;

pub fn add(a: Point2, b: Point2) -> Point2 {
    Point2::new(a.x + b.x, a.y + b.y)
}

pub fn subtract(a: Point2, b: Point2) -> Point2 {
    Point2::new(a.x - b.x, a.y - b.y)
}

pub fn scale(v: Point2, s: f32) -> Point2 {
    Point2::new(v.x * s, v.y * s)
}

pub fn length(v: Point2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Unit vector along `v`, or None when `v` has no direction to point in.
pub fn normalize(v: Point2) -> Option<Point2> {
    let len = length(v);
    if len == 0.0 {
        return None;
    }
    Some(scale(v, 1.0 / len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let a = Point2::new(3.0, -1.0);
        let b = Point2::new(1.0, 2.0);
        assert_eq!(add(a, b), Point2::new(4.0, 1.0));
        assert_eq!(subtract(a, b), Point2::new(2.0, -3.0));
        assert_eq!(scale(b, 2.5), Point2::new(2.5, 5.0));
    }

    #[test]
    fn length_is_euclidean() {
        assert_eq!(length(Point2::new(3.0, 4.0)), 5.0);
        assert_eq!(length(Point2::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn normalize_produces_unit_vectors() {
        let unit = normalize(Point2::new(10.0, 0.0)).unwrap();
        assert_eq!(unit, Point2::new(1.0, 0.0));

        let diag = normalize(Point2::new(2.0, 2.0)).unwrap();
        assert!((length(diag) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_refuses_zero_length() {
        assert!(normalize(Point2::new(0.0, 0.0)).is_none());
    }
}
