//! Greedy left-to-right segmentation of a cleaned fix sequence.
//!
//! The scan keeps a cursor into the fixes and the segment currently being
//! grown. Each [`ScanState::step`] looks at the fix under the cursor, and at
//! the one after it when the first does not continue the current run:
//!
//! * the fix continues the run: it is appended
//! * only the next fix continues the run: the fix under the cursor is an
//!   outlier, it is dropped and the next one appended instead
//! * neither does: the current segment is closed and a new one is seeded with
//!   both fixes
//!
//! The segment still open when the cursor reaches the end of the fixes is
//! never emitted.

use crate::algo::angle::is_collinear;
use crate::config::SegmentationConfig;
use crate::error::{Result, SegmentationError};
use crate::model::{GeoPoint, Segment};
use log::{debug, trace};
use uom::si::length::meter;

/// two seed fixes plus the fix under the cursor and the look-ahead fix
pub const MIN_FIXES: usize = 4;

/// outcome of a single scan step
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// the fix under the cursor was appended
    Extended,

    /// the fix at `dropped` was skipped and its successor appended
    AnomalySkipped { dropped: usize },

    /// the direction changed, `closed` is the finished segment
    Cut { closed: Segment },
}

#[derive(Debug)]
pub struct ScanState {
    cursor: usize,
    current: Segment,
}

impl ScanState {
    /// seeds the scan with the first two fixes
    ///
    /// `points` must hold at least two fixes.
    pub(crate) fn seed(points: &[GeoPoint]) -> Self {
        Self {
            cursor: 2,
            current: Segment::new(points[0], points[1]),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Segment {
        &self.current
    }

    /// the scan stops once the cursor leaves room for less than two fixes
    pub fn is_finished(&self, point_count: usize) -> bool {
        self.cursor >= point_count.saturating_sub(2)
    }

    /// Performs one scan step.
    ///
    /// Requires `cursor + 1 < points.len()`, which holds for every step
    /// taken before [`ScanState::is_finished`] returns true, and for the
    /// first step when there are at least [`MIN_FIXES`] fixes.
    pub(crate) fn step(&mut self, points: &[GeoPoint], angle_limit_degrees: f64) -> Transition {
        let i = self.cursor;
        let (a, b) = {
            let (a, b) = self.current.tail();
            (*a, *b)
        };

        let transition = if is_collinear(&a, &b, &points[i], angle_limit_degrees) {
            self.current.push(points[i]);
            Transition::Extended
        } else if is_collinear(&a, &b, &points[i + 1], angle_limit_degrees) {
            self.current.push(points[i + 1]);
            self.cursor += 1;
            Transition::AnomalySkipped { dropped: i }
        } else {
            let closed =
                std::mem::replace(&mut self.current, Segment::new(points[i], points[i + 1]));
            self.cursor += 1;
            Transition::Cut { closed }
        };
        self.cursor += 1;

        trace!("step at fix {} -> {:?}", i, transition);
        transition
    }
}

/// Checks the entry invariants of [`build_segments`].
fn validate_fixes(points: &[GeoPoint]) -> Result<()> {
    if points.len() < MIN_FIXES {
        return Err(SegmentationError::TooFewPoints {
            count: points.len(),
            required: MIN_FIXES,
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.latitude.is_finite() && p.longitude.is_finite()))
    {
        return Err(SegmentationError::NonFiniteCoordinate { index });
    }
    if let Some(index) = points
        .windows(2)
        .position(|window| window[0].same_location(&window[1]))
    {
        return Err(SegmentationError::ConsecutiveDuplicate { index: index + 1 });
    }
    Ok(())
}

/// Splits fixes without consecutive duplicates into straight segments.
///
/// Closed segments shorter than `config.min_segment_length` are discarded.
/// The returned segments are in the order they were found.
pub fn build_segments(points: &[GeoPoint], config: &SegmentationConfig) -> Result<Vec<Segment>> {
    config.validate()?;
    validate_fixes(points)?;

    let mut segments = Vec::new();
    let mut state = ScanState::seed(points);
    loop {
        match state.step(points, config.angle_limit_degrees) {
            Transition::Extended => {}
            Transition::AnomalySkipped { dropped } => {
                debug!("fix {} skipped as outlier", dropped);
            }
            Transition::Cut { closed } => {
                let length = closed.length();
                if length >= config.min_segment_length {
                    segments.push(closed);
                } else {
                    debug!(
                        "discarding segment of {} fixes, {:.1} m",
                        closed.point_count(),
                        length.get::<meter>()
                    );
                }
            }
        }
        if state.is_finished(points.len()) {
            break;
        }
    }

    debug!(
        "scan ended at fix {}, open segment of {} fixes is not emitted",
        state.cursor(),
        state.current().point_count()
    );
    Ok(segments)
}
