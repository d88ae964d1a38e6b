use crate::model::GeoPoint;

pub trait RemoveConsecutiveDuplicates {
    /// Copy of the sequence without repeated fixes.
    ///
    /// A fix is kept when its coordinates differ from the last *kept* fix.
    fn remove_consecutive_duplicates(&self) -> Vec<GeoPoint>;
}

impl RemoveConsecutiveDuplicates for [GeoPoint] {
    fn remove_consecutive_duplicates(&self) -> Vec<GeoPoint> {
        let mut kept: Vec<GeoPoint> = Vec::with_capacity(self.len());
        for point in self.iter() {
            match kept.last() {
                Some(last) if last.same_location(point) => continue,
                _ => kept.push(*point),
            }
        }
        kept
    }
}
