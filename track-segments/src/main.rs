mod algo;
mod config;
mod error;
mod fix;
mod model;

use crate::algo::segment_tracks;
use crate::config::{
    SegmentationConfig, DEFAULT_ANGLE_LIMIT_DEGREES, DEFAULT_MIN_SEGMENT_LENGTH_M,
};
use crate::model::TrackSegments;
use clap::{Args, Parser, Subcommand};
use geo::algorithm::bounding_rect::BoundingRect;
use geojson::{Feature, FeatureCollection, GeoJson, Value};
use serde_json::{to_value, Map};
use uom::si::f64::Length;
use uom::si::length::meter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the accepted segments of each track as text.
    Report(Run),
    /// Convert the tracks to a GeoJSON FeatureCollection containing a LineString for each segment.
    ///
    /// The JSON will be written to stdout
    ToGeoJson(Run),
    /// Write the accepted segments of each track as JSON.
    ///
    /// The JSON will be written to stdout
    ToSegmentJson(Run),
}

#[derive(Args, Debug)]
struct Run {
    /// JSON files containing an array of fix records
    #[clap(required = true)]
    json_files: Vec<String>,

    #[clap(flatten)]
    params: Params,

    /// log tracks which can not be segmented and continue with the next file
    #[clap(long)]
    keep_going: bool,
}

#[derive(Args, Debug)]
struct Params {
    /// turn angles below this limit (degrees) continue a segment
    #[clap(long, default_value_t = DEFAULT_ANGLE_LIMIT_DEGREES)]
    angle_limit: f64,

    /// segments shorter than this (meters) are discarded while scanning
    #[clap(long, default_value_t = DEFAULT_MIN_SEGMENT_LENGTH_M)]
    min_segment_length: f64,

    /// only output segments at least this long (meters)
    #[clap(long, default_value_t = 0.0)]
    min_distance: f64,
}

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    match &args.command {
        Command::Report(run) => {
            for track in run_tracks(run)? {
                print_report(&track);
            }
        }
        Command::ToGeoJson(run) => {
            save_geojson(&run_tracks(run)?)?;
        }
        Command::ToSegmentJson(run) => {
            println!("{}", serde_json::to_string(&run_tracks(run)?)?);
        }
    }
    Ok(())
}

fn run_tracks(run: &Run) -> eyre::Result<Vec<TrackSegments>> {
    let config = SegmentationConfig::new(run.params.angle_limit, run.params.min_segment_length)?;
    let min_distance = Length::new::<meter>(run.params.min_distance);
    segment_tracks(&run.json_files, &config, min_distance, run.keep_going)
}

fn print_report(track: &TrackSegments) {
    println!(
        "Track {}: {} fixes, {} distinct",
        track.source, track.fix_count, track.distinct_fix_count
    );
    if let Some(point) = track.easternmost.as_ref() {
        println!("Easternmost fix: {}", point);
    }
    for (index, segment) in track.segments.iter().enumerate() {
        println!("Segment {}: {}", index + 1, segment);
    }

    let metrics = track.metrics();
    let format_m = |value: Option<f64>| {
        value
            .map(|v| format!("{:.1} m", v))
            .unwrap_or_else(|| "-".to_string())
    };
    println!(
        "Segments: {}, total {:.1} m, median {}, longest {}",
        metrics.segment_count,
        metrics.total_length_m,
        format_m(metrics.median_length_m),
        format_m(metrics.longest_m)
    );
}

fn save_geojson(tracks: &[TrackSegments]) -> eyre::Result<()> {
    let mut features = Vec::new();
    for track in tracks {
        for (index, segment) in track.segments.iter().enumerate() {
            let linestring = segment.to_line_string();
            let bbox = linestring
                .bounding_rect()
                .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

            let mut props = Map::new();
            props.insert("source".to_string(), to_value(&track.source)?);
            props.insert("segment_index".to_string(), to_value(index + 1)?);
            props.insert(
                "length_m".to_string(),
                to_value(segment.length().get::<meter>())?,
            );
            props.insert("point_count".to_string(), to_value(segment.point_count())?);

            features.push(Feature {
                bbox,
                geometry: Some(geojson::Geometry::new(Value::from(&linestring))),
                id: None,
                properties: Some(props),
                foreign_members: None,
            })
        }
    }

    let gj = GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    });

    println!("{}", gj);
    Ok(())
}
