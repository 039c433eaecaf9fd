//! Droplet-based hydraulic erosion over a shared height field.
//!
//! Droplets are simulated one at a time. Each rolls downhill eroding and depositing terrain,
//! and on reaching standing water either raises the pool it lands in or spills out through
//! the lowest outlet.

pub mod droplet;
pub mod erosion;
pub mod field;
pub mod normal;
pub mod params;
pub mod pool;

pub use droplet::{Droplet, Halt};
pub use erosion::{DropletOutcome, Erosion, ErosionReport};
pub use field::{Cell, FieldError, HeightField};
pub use params::{ErosionParams, ParameterError};
pub use pool::Flood;
