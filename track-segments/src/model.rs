use crate::algo::distance::DistanceCovered;
use crate::error::{Result, SegmentationError};
use geo_types::{Coordinate, LineString};
use ordered_float::OrderedFloat;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use statrs::statistics::{Data, Median};
use std::fmt;
use uom::si::f64::Length;
use uom::si::length::meter;

/// a single fix, in degrees
#[derive(PartialEq, Serialize, Clone, Copy, Debug)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// rejects NaN and infinite coordinates. `index` is only used for the error.
    pub fn try_new(latitude: f64, longitude: f64, index: usize) -> Result<Self> {
        if latitude.is_finite() && longitude.is_finite() {
            Ok(Self::new(latitude, longitude))
        } else {
            Err(SegmentationError::NonFiniteCoordinate { index })
        }
    }

    /// exact coordinate equality, no tolerance
    #[inline]
    pub fn same_location(&self, other: &GeoPoint) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Latitude: {}, Longitude: {}", self.latitude, self.longitude)
    }
}

impl From<GeoPoint> for Coordinate<f64> {
    fn from(gp: GeoPoint) -> Self {
        Coordinate {
            x: gp.longitude,
            y: gp.latitude,
        }
    }
}

/// A run of fixes considered to be straight travel.
///
/// Always holds at least two points. Segments are only grown, never shrunk.
#[derive(PartialEq, Clone, Debug)]
pub struct Segment {
    points: Vec<GeoPoint>,
}

impl Segment {
    pub fn new(first: GeoPoint, second: GeoPoint) -> Self {
        Self {
            points: vec![first, second],
        }
    }

    pub(crate) fn push(&mut self, point: GeoPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn start(&self) -> &GeoPoint {
        &self.points[0]
    }

    pub fn end(&self) -> &GeoPoint {
        &self.points[self.points.len() - 1]
    }

    /// the last two points, oldest first
    pub fn tail(&self) -> (&GeoPoint, &GeoPoint) {
        let n = self.points.len();
        (&self.points[n - 2], &self.points[n - 1])
    }

    /// sum of the great-circle distances between consecutive points
    pub fn length(&self) -> Length {
        self.points.distance_covered()
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::from(
            self.points()
                .iter()
                .map(|gp| Coordinate::from(*gp))
                .collect::<Vec<_>>(),
        )
    }
}

impl Serialize for Segment {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("segment", 2)?;
        state.serialize_field("length_m", &self.length().get::<meter>())?;
        state.serialize_field("points", &self.points)?;
        state.end()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Start: {}, {}, End: {}, {}, Distance: {}, Points: {}",
            self.start().latitude,
            self.start().longitude,
            self.end().latitude,
            self.end().longitude,
            self.length().get::<meter>(),
            self.point_count()
        )
    }
}

/// segmentation result of a single recorded track
#[derive(Serialize, Debug)]
pub struct TrackSegments {
    /// where the fixes were read from
    pub source: String,
    pub fix_count: usize,
    pub distinct_fix_count: usize,
    /// fix with the largest longitude
    pub easternmost: Option<GeoPoint>,

    /// accepted segments, in track order
    pub segments: Vec<Segment>,
}

impl TrackSegments {
    pub fn metrics(&self) -> Metrics {
        let lengths_m: Vec<f64> = self
            .segments
            .iter()
            .map(|segment| segment.length().get::<meter>())
            .collect();

        Metrics {
            segment_count: lengths_m.len(),
            total_length_m: lengths_m.iter().sum(),
            median_length_m: if lengths_m.is_empty() {
                None
            } else {
                Some(Data::new(lengths_m.clone()).median())
            },
            longest_m: lengths_m
                .iter()
                .map(|l| OrderedFloat::from(*l))
                .max()
                .map(|l| l.0),
        }
    }
}

/// easternmost fix of a sequence, the earliest one on ties. NaN longitudes never win.
pub fn easternmost(points: &[GeoPoint]) -> Option<GeoPoint> {
    // max_by_key returns the last maximum, so walk backwards
    points
        .iter()
        .rev()
        .filter(|p| !p.longitude.is_nan())
        .max_by_key(|p| OrderedFloat::from(p.longitude))
        .copied()
}

#[derive(Debug, PartialEq)]
pub struct Metrics {
    pub segment_count: usize,
    pub total_length_m: f64,
    pub median_length_m: Option<f64>,
    pub longest_m: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::{easternmost, GeoPoint, Metrics, Segment, TrackSegments};
    use crate::error::SegmentationError;
    use approx::assert_relative_eq;
    use uom::si::length::meter;

    #[test]
    fn try_new_rejects_non_finite() {
        assert!(GeoPoint::try_new(47.5, 27.3, 0).is_ok());
        assert_eq!(
            GeoPoint::try_new(f64::NAN, 27.3, 4),
            Err(SegmentationError::NonFiniteCoordinate { index: 4 })
        );
        assert_eq!(
            GeoPoint::try_new(47.5, f64::INFINITY, 7),
            Err(SegmentationError::NonFiniteCoordinate { index: 7 })
        );
    }

    #[test]
    fn segment_accessors() {
        let mut segment = Segment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.001, 0.0));
        segment.push(GeoPoint::new(0.002, 0.0));

        assert_eq!(segment.point_count(), 3);
        assert_eq!(segment.start(), &GeoPoint::new(0.0, 0.0));
        assert_eq!(segment.end(), &GeoPoint::new(0.002, 0.0));
        assert_eq!(
            segment.tail(),
            (&GeoPoint::new(0.001, 0.0), &GeoPoint::new(0.002, 0.0))
        );
        // 0.002 degrees along a meridian
        assert_relative_eq!(
            segment.length().get::<meter>(),
            6_371_000.0 * 0.002_f64.to_radians(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn line_string_is_lon_lat() {
        let segment = Segment::new(GeoPoint::new(47.5, 27.3), GeoPoint::new(47.6, 27.4));
        let ls = segment.to_line_string();
        assert_eq!(ls.0[0].x, 27.3);
        assert_eq!(ls.0[0].y, 47.5);
        assert_eq!(ls.0.len(), 2);
    }

    #[test]
    fn display_like_report() {
        let segment = Segment::new(GeoPoint::new(1.5, 2.5), GeoPoint::new(1.5, 2.5));
        assert_eq!(
            segment.to_string(),
            "Start: 1.5, 2.5, End: 1.5, 2.5, Distance: 0, Points: 2"
        );
    }

    #[test]
    fn serializes_length_and_points() {
        let segment = Segment::new(GeoPoint::new(1.0, 2.0), GeoPoint::new(1.0, 2.0));
        let value = serde_json::to_value(&segment).unwrap();
        assert_eq!(value["length_m"], 0.0);
        assert_eq!(value["points"][1]["latitude"], 1.0);
        assert_eq!(value["points"][1]["longitude"], 2.0);
    }

    #[test]
    fn easternmost_fix() {
        let points = vec![
            GeoPoint::new(1.0, 27.1),
            GeoPoint::new(2.0, 27.4),
            GeoPoint::new(3.0, 27.2),
        ];
        assert_eq!(easternmost(&points), Some(GeoPoint::new(2.0, 27.4)));
        assert_eq!(easternmost(&[]), None);

        let tied = vec![
            GeoPoint::new(1.0, 27.4),
            GeoPoint::new(2.0, 27.4),
            GeoPoint::new(3.0, 27.1),
        ];
        assert_eq!(easternmost(&tied), Some(GeoPoint::new(1.0, 27.4)));
        assert_eq!(
            GeoPoint::new(2.0, 27.4).to_string(),
            "Latitude: 2, Longitude: 27.4"
        );
    }

    #[test]
    fn metrics() {
        // 1, 3 and 2 thousandths of a degree along a meridian
        let meridian = |from: f64, to: f64| {
            Segment::new(GeoPoint::new(from, 0.0), GeoPoint::new(to, 0.0))
        };
        let track = TrackSegments {
            source: "test".to_string(),
            fix_count: 6,
            distinct_fix_count: 6,
            easternmost: None,
            segments: vec![
                meridian(0.0, 0.001),
                meridian(0.01, 0.013),
                meridian(0.02, 0.022),
            ],
        };
        let m_per_thousandth = 6_371_000.0 * 0.001_f64.to_radians();
        let metrics = track.metrics();

        assert_eq!(metrics.segment_count, 3);
        assert_relative_eq!(metrics.total_length_m, 6.0 * m_per_thousandth, epsilon = 1e-6);
        assert_relative_eq!(
            metrics.median_length_m.unwrap(),
            2.0 * m_per_thousandth,
            epsilon = 1e-6
        );
        assert_relative_eq!(metrics.longest_m.unwrap(), 3.0 * m_per_thousandth, epsilon = 1e-6);
    }

    #[test]
    fn metrics_without_segments() {
        let track = TrackSegments {
            source: "empty".to_string(),
            fix_count: 4,
            distinct_fix_count: 4,
            easternmost: None,
            segments: vec![],
        };
        assert_eq!(
            track.metrics(),
            Metrics {
                segment_count: 0,
                total_length_m: 0.0,
                median_length_m: None,
                longest_m: None,
            }
        );
    }
}
