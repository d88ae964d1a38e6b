use crate::model::GeoPoint;
use eyre::WrapErr;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A recorded fix as exported by the tracker.
///
/// Only the coordinates are read, every other field is ignored.
#[derive(Deserialize, Debug)]
pub struct FixRecord {
    pub data: FixData,
}

#[derive(Deserialize, Debug)]
pub struct FixData {
    pub latitude: f64,
    pub longitude: f64,
}

/// parses a JSON array of fix records, in recording order
pub fn parse_fixes<R: Read>(reader: R) -> eyre::Result<Vec<GeoPoint>> {
    let records: Vec<FixRecord> =
        serde_json::from_reader(reader).wrap_err("malformed fix records")?;

    let points = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            GeoPoint::try_new(record.data.latitude, record.data.longitude, index)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(points)
}

pub fn read_fixes<P: AsRef<Path>>(path: P) -> eyre::Result<Vec<GeoPoint>> {
    let path = path.as_ref();
    let file =
        File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    parse_fixes(BufReader::new(file))
        .wrap_err_with(|| format!("failed to read {}", path.display()))
}
