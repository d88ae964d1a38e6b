use crate::model::GeoPoint;
use uom::si::f64::Length;
use uom::si::length::meter;

/// mean earth radius used for all distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters using the haversine formula.
///
/// NaN coordinates propagate into the result.
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let phi1 = p1.latitude.to_radians();
    let phi2 = p2.latitude.to_radians();
    let delta_phi = (p2.latitude - p1.latitude).to_radians();
    let delta_lambda = (p2.longitude - p1.longitude).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

pub trait DistanceCovered {
    /// summed distance between consecutive points
    fn distance_covered(&self) -> Length;
}

impl DistanceCovered for [GeoPoint] {
    fn distance_covered(&self) -> Length {
        Length::new::<meter>(
            self.windows(2)
                .map(|window| haversine_distance(&window[0], &window[1]))
                .sum(),
        )
    }
}
