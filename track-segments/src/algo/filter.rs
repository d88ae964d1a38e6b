use crate::model::Segment;
use uom::si::f64::Length;

pub trait SelectByMinimumDistance {
    /// segments at least `min_distance` long, in their original order
    fn select_by_minimum_distance(&self, min_distance: Length) -> Vec<Segment>;
}

impl SelectByMinimumDistance for [Segment] {
    fn select_by_minimum_distance(&self, min_distance: Length) -> Vec<Segment> {
        self.iter()
            .filter(|segment| segment.length() >= min_distance)
            .cloned()
            .collect()
    }
}
