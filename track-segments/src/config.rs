use crate::error::{Result, SegmentationError};
use uom::si::f64::Length;
use uom::si::length::meter;

pub const DEFAULT_ANGLE_LIMIT_DEGREES: f64 = 8.0;
pub const DEFAULT_MIN_SEGMENT_LENGTH_M: f64 = 30.0;

/// tunables of the segment builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationConfig {
    /// turn angles below this value are considered a straight continuation
    pub angle_limit_degrees: f64,

    /// closed segments shorter than this are discarded by the builder
    pub min_segment_length: Length,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            angle_limit_degrees: DEFAULT_ANGLE_LIMIT_DEGREES,
            min_segment_length: Length::new::<meter>(DEFAULT_MIN_SEGMENT_LENGTH_M),
        }
    }
}

impl SegmentationConfig {
    pub fn new(angle_limit_degrees: f64, min_segment_length_m: f64) -> Result<Self> {
        let config = Self {
            angle_limit_degrees,
            min_segment_length: Length::new::<meter>(min_segment_length_m),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.angle_limit_degrees.is_finite()
            || self.angle_limit_degrees <= 0.0
            || self.angle_limit_degrees > 180.0
        {
            return Err(SegmentationError::InvalidConfig(format!(
                "angle limit must be within (0, 180] degrees, got {}",
                self.angle_limit_degrees
            )));
        }
        let min_length_m = self.min_segment_length.get::<meter>();
        if !min_length_m.is_finite() || min_length_m < 0.0 {
            return Err(SegmentationError::InvalidConfig(format!(
                "minimum segment length must be a non-negative number of meters, got {}",
                min_length_m
            )));
        }
        Ok(())
    }
}
