use crate::config::SegmentationConfig;
use crate::error::Result;
use crate::fix::read_fixes;
use crate::model::{easternmost, GeoPoint, TrackSegments};
use eyre::WrapErr;
use log::{info, warn};
use uom::si::f64::Length;

pub mod angle;
pub mod dedup;
pub mod distance;
pub mod filter;
pub mod segment;

pub use dedup::RemoveConsecutiveDuplicates;
pub use filter::SelectByMinimumDistance;

/// Full pipeline for one recorded track.
///
/// Removes repeated fixes, splits the remainder into straight segments and
/// keeps the segments at least `min_distance` long.
pub fn segment_track(
    source: &str,
    raw: &[GeoPoint],
    config: &SegmentationConfig,
    min_distance: Length,
) -> Result<TrackSegments> {
    let cleaned = raw.remove_consecutive_duplicates();
    let committed = segment::build_segments(&cleaned, config)?;
    let segments = committed.select_by_minimum_distance(min_distance);

    info!(
        "{}: {} fixes ({} distinct), {} segments committed, {} accepted",
        source,
        raw.len(),
        cleaned.len(),
        committed.len(),
        segments.len()
    );

    Ok(TrackSegments {
        source: source.to_string(),
        fix_count: raw.len(),
        distinct_fix_count: cleaned.len(),
        easternmost: easternmost(&cleaned),
        segments,
    })
}

/// Reads and segments every file in turn.
///
/// The first file which can not be read or segmented aborts the batch, unless
/// `keep_going` is set. Then the failure is logged and the file skipped.
pub fn segment_tracks(
    json_files: &[String],
    config: &SegmentationConfig,
    min_distance: Length,
    keep_going: bool,
) -> eyre::Result<Vec<TrackSegments>> {
    let mut tracks = Vec::with_capacity(json_files.len());
    for json_filename in json_files.iter() {
        let segmented = read_fixes(json_filename).and_then(|raw| {
            segment_track(json_filename, &raw, config, min_distance)
                .wrap_err_with(|| format!("failed to segment {}", json_filename))
        });
        match segmented {
            Ok(track) => tracks.push(track),
            Err(e) if keep_going => {
                warn!("skipping {}: {:#}", json_filename, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(tracks)
}
