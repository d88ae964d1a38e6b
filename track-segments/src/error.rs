use thiserror::Error;

/// Errors caused by the fixes or the configuration handed to the segmentation.
#[derive(Error, Debug, PartialEq)]
pub enum SegmentationError {
    #[error("at least {required} distinct consecutive fixes are required, got {count}")]
    TooFewPoints { count: usize, required: usize },

    #[error("fix {index} repeats the coordinates of the fix before it")]
    ConsecutiveDuplicate { index: usize },

    #[error("fix {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SegmentationError>;
