//! Floating-point geometric primitives.

mod affine2;
mod interval;
mod point2;
mod segment2;
mod vec2;

pub use affine2::Affine2;
pub use interval::Interval;
pub use point2::Point2;
pub use segment2::Segment2;
pub use vec2::Vec2;
