pub extern crate float_cmp;
pub extern crate log;
pub extern crate nalgebra as na;
pub extern crate noise;
pub extern crate num;
pub extern crate rand;

pub mod almost;
pub mod grid;
pub mod perlin;

pub type M<T> = na::DMatrix<T>;
pub type V2<T> = na::Vector2<T>;
pub type V3<T> = na::Vector3<T>;

pub use grid::*;

use num::Float;
use std::cmp::Ordering;
use std::fmt::Debug;

pub fn v2<T: 'static + Copy + PartialEq + Debug>(x: T, y: T) -> na::Vector2<T> {
    na::Vector2::new(x, y)
}

pub fn v3<T: 'static + Copy + PartialEq + Debug>(x: T, y: T, z: T) -> na::Vector3<T> {
    na::Vector3::new(x, y, z)
}

/// Orders floats, treating NaN as equal to everything.
pub fn float_ordering<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

pub fn min_max<T>(matrix: &M<T>) -> Option<(T, T)>
where
    T: 'static + Float + Debug,
{
    let min = matrix.iter().copied().min_by(float_ordering)?;
    let max = matrix.iter().copied().max_by(float_ordering)?;
    Some((min, max))
}

/// Linearly maps the matrix from its own value range onto `out_range`.
/// A constant or empty matrix is returned filled with the lower bound.
pub fn rescale<T>(matrix: M<T>, out_range: (T, T)) -> M<T>
where
    T: 'static + Float + Debug,
{
    match min_max(&matrix) {
        Some((min, max)) if max > min => {
            let (from, to) = out_range;
            matrix.map(|v| (v - min) / (max - min) * (to - from) + from)
        }
        _ => matrix.map(|_| out_range.0),
    }
}
