use crate::model::GeoPoint;
use nalgebra::Vector2;

/// Deviation from a straight line at `p2`, in degrees within [0, 180].
///
/// Latitude and longitude are treated as planar coordinates, which only
/// holds for the small displacements between consecutive fixes.
///
/// Any two of the three points sharing a latitude value yields 0. This
/// also covers coincident points, so the magnitudes below are never zero
/// for finite input.
pub fn turn_angle_degrees(p1: &GeoPoint, p2: &GeoPoint, p3: &GeoPoint) -> f64 {
    if p1.latitude == p2.latitude || p2.latitude == p3.latitude || p1.latitude == p3.latitude {
        return 0.0;
    }

    // vectors in 2d space
    let v2d_ab = Vector2::new(p2.latitude - p1.latitude, p2.longitude - p1.longitude);
    let v2d_bc = Vector2::new(p3.latitude - p2.latitude, p3.longitude - p2.longitude);

    let cos_theta = v2d_ab.dot(&v2d_bc) / (v2d_ab.magnitude() * v2d_bc.magnitude());
    if cos_theta > 1.0 {
        0.0
    } else if cos_theta < -1.0 {
        180.0
    } else {
        cos_theta.acos().to_degrees()
    }
}

#[inline]
pub fn is_collinear(p1: &GeoPoint, p2: &GeoPoint, p3: &GeoPoint, angle_limit_degrees: f64) -> bool {
    turn_angle_degrees(p1, p2, p3) < angle_limit_degrees
}

#[cfg(test)]
mod tests {
    use super::{is_collinear, turn_angle_degrees};
    use crate::model::GeoPoint;
    use approx::assert_relative_eq;

    fn gp(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude)
    }

    #[test]
    fn straight_line() {
        let angle = turn_angle_degrees(&gp(0., 0.), &gp(1., 1.), &gp(2., 2.));
        assert_relative_eq!(angle, 0.0, epsilon = 1e-4);
        assert!(is_collinear(&gp(0., 0.), &gp(1., 1.), &gp(2., 2.), 8.0));
    }

    #[test]
    fn right_angle() {
        let angle = turn_angle_degrees(&gp(0., 0.), &gp(1., 1.), &gp(2., 0.));
        assert_relative_eq!(angle, 90.0, epsilon = 1e-9);
        assert!(!is_collinear(&gp(0., 0.), &gp(1., 1.), &gp(2., 0.), 8.0));
    }

    #[test]
    fn reversal() {
        let angle = turn_angle_degrees(&gp(0., 0.), &gp(1., 1.), &gp(0.5, 0.5));
        assert_relative_eq!(angle, 180.0, epsilon = 1e-4);
    }

    #[test]
    fn shared_latitude_counts_as_straight() {
        // an axis aligned right angle shares latitudes between its points
        assert_eq!(turn_angle_degrees(&gp(0., 0.), &gp(1., 0.), &gp(1., 1.)), 0.0);
        assert_eq!(turn_angle_degrees(&gp(1., 0.), &gp(1., 1.), &gp(2., 5.)), 0.0);
        assert_eq!(turn_angle_degrees(&gp(1., 0.), &gp(2., 1.), &gp(1., 5.)), 0.0);
        // coincident neighbours never reach the division
        assert_eq!(turn_angle_degrees(&gp(1., 0.), &gp(1., 0.), &gp(2., 5.)), 0.0);
    }

    #[test]
    fn limit_is_exclusive() {
        // about 18.4 degrees between (1, 0.5) and (1, 1)
        let (a, b, c) = (gp(0., 0.), gp(1., 0.5), gp(2., 1.5));
        let angle = turn_angle_degrees(&a, &b, &c);
        assert!(angle > 0.0 && angle < 90.0);
        assert!(is_collinear(&a, &b, &c, angle + 1e-9));
        assert!(!is_collinear(&a, &b, &c, angle));
    }

    #[test]
    fn small_deviation_is_collinear() {
        // heading change of roughly 5.7 degrees
        assert!(is_collinear(&gp(0., 0.), &gp(1., 0.), &gp(2., 0.1), 8.0));
        // roughly 11.3 degrees
        assert!(!is_collinear(&gp(0., 0.), &gp(1., 0.), &gp(2., 0.2), 8.0));
    }
}
