use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::{Add, Sub};

/// A point in the normalized image frame ([0,1] × [0,1], y counted top to
/// bottom). Rotated points may leave the unit square; that is fine — all
/// geometry here works on the infinite plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The image center — the pivot used to move between the raw and the
/// upright frame.
pub const IMAGE_CENTER: Point = Point { x: 0.5, y: 0.5 };

/// Rotate `point` about `pivot` by `angle` radians, counterclockwise in the
/// mathematical convention. On an image whose y axis runs top to bottom this
/// reads as a clockwise rotation. Pass the negative writing angle to move a
/// point into the upright frame.
pub fn rotate(angle: f64, point: Point, pivot: Point) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point::new(pivot.x + cos * dx - sin * dy, pivot.y + sin * dx + cos * dy)
}

/// Angle of the line running from `p1` to `p2`, in (−π, π].
pub fn angle_between(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

/// Smallest angle, in [0, π/2], between the perpendiculars of two
/// directions. Zero when the `p1`→`p2` direction of one line is exactly
/// perpendicular to the other.
pub fn perp_angle_diff(angle1: f64, angle2: f64) -> f64 {
    let diff = (angle2 - angle1 + FRAC_PI_2).abs() % PI;
    (PI - diff).min(diff)
}

/// Perpendicular Euclidean distance from `point` to the infinite line
/// through `line1` and `line2`. The two line points must be distinct.
pub fn dist_to_line(line1: Point, line2: Point, point: Point) -> f64 {
    let d = line2 - line1;
    let r = line1 - point;
    // 2D cross product magnitude over segment length.
    (d.x * r.y - d.y * r.x).abs() / (d.x * d.x + d.y * d.y).sqrt()
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
