use crate::{M, V2, V3};
use float_cmp::approx_eq;

/// Float equality for values produced by iterated arithmetic.
///
/// Values within a small absolute margin count as equal, so results that should be
/// exactly zero (e.g. the horizontal part of a normal on flat ground) compare cleanly.
pub trait Almost {
    fn almost(&self, other: &Self) -> bool;
}

impl Almost for f32 {
    fn almost(&self, other: &f32) -> bool {
        approx_eq!(f32, *self, *other, epsilon = 1e-6, ulps = 5)
    }
}

impl Almost for f64 {
    fn almost(&self, other: &f64) -> bool {
        approx_eq!(f64, *self, *other, epsilon = 1e-9, ulps = 5)
    }
}

impl<T> Almost for Option<T>
where
    T: Almost,
{
    fn almost(&self, other: &Option<T>) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.almost(&b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Almost for [T]
where
    T: Almost,
{
    fn almost(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.almost(b))
    }
}

impl Almost for V2<f64> {
    fn almost(&self, other: &V2<f64>) -> bool {
        self.as_slice().almost(other.as_slice())
    }
}

impl Almost for V3<f64> {
    fn almost(&self, other: &V3<f64>) -> bool {
        self.as_slice().almost(other.as_slice())
    }
}

impl Almost for M<f64> {
    fn almost(&self, other: &M<f64>) -> bool {
        self.shape() == other.shape() && self.as_slice().almost(other.as_slice())
    }
}
