pub mod geometry;
pub mod money;

pub use geometry::{angle_between, dist_to_line, midpoint, perp_angle_diff, rotate, Point};
pub use money::{Money, PriceParseError};
