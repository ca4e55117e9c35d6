pub mod geometry;
pub mod location;
pub mod sampling_point;
