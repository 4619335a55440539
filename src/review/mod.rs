//! Daily missions and rubric review.

pub mod scorer;
pub mod task;

pub use scorer::{score, Review};
pub use task::Task;
