use serde::{Deserialize, Serialize};
use std::default::Default;
use std::error::Error;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionParams {
    pub droplets: usize,
    pub initial_volume: f64,
    pub min_volume: f64,
    pub time_step: f64,
    pub density: f64,
    pub friction: f64,
    pub evaporation_rate: f64,
    pub deposition_rate: f64,
    /// Converts height times cell area into droplet volume.
    pub volume_factor: f64,
    /// Vertical exaggeration applied to height differences when estimating normals.
    pub height_scale: f64,
    /// Fraction of the drop from the pool surface to a drain applied each time a lake drains.
    pub drainage: f64,
    pub plane_raise: f64,
    pub flood_retries: usize,
    /// Descend/flood cycles allowed per droplet.
    pub spill_budget: usize,
    pub stall_pool_depth: f64,
    pub stall_acceleration: f64,
}

impl Default for ErosionParams {
    fn default() -> ErosionParams {
        ErosionParams {
            droplets: 1000,
            initial_volume: 1.0,
            min_volume: 0.01,
            time_step: 1.2,
            density: 1.0,
            friction: 0.05,
            evaporation_rate: 0.001,
            deposition_rate: 0.1,
            volume_factor: 100.0,
            height_scale: 80.0,
            drainage: 0.1,
            plane_raise: 0.8,
            flood_retries: 10,
            spill_budget: 5,
            stall_pool_depth: 0.3,
            stall_acceleration: 0.01,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ParameterError {
    NotPositive { name: &'static str, value: f64 },
    Negative { name: &'static str, value: f64 },
    OutOfRange { name: &'static str, value: f64 },
    ZeroBudget { name: &'static str },
    InitialVolumeBelowMinimum { initial_volume: f64, min_volume: f64 },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NotPositive { name, value } => {
                write!(f, "{} must be positive and finite, got {}", name, value)
            }
            ParameterError::Negative { name, value } => {
                write!(f, "{} must be non-negative and finite, got {}", name, value)
            }
            ParameterError::OutOfRange { name, value } => {
                write!(f, "{} is out of range, got {}", name, value)
            }
            ParameterError::ZeroBudget { name } => write!(f, "{} must be at least 1", name),
            ParameterError::InitialVolumeBelowMinimum {
                initial_volume,
                min_volume,
            } => write!(
                f,
                "initial_volume {} must exceed min_volume {}",
                initial_volume, min_volume
            ),
        }
    }
}

impl Error for ParameterError {}

fn positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::Negative { name, value })
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange { name, value })
    }
}

fn budget(name: &'static str, value: usize) -> Result<(), ParameterError> {
    if value == 0 {
        Err(ParameterError::ZeroBudget { name })
    } else {
        Ok(())
    }
}

impl ErosionParams {
    /// `evaporation_rate` and `plane_raise` must be strictly positive: they are what
    /// guarantees descent and flooding terminate.
    pub fn validate(&self) -> Result<(), ParameterError> {
        positive("initial_volume", self.initial_volume)?;
        positive("min_volume", self.min_volume)?;
        positive("time_step", self.time_step)?;
        positive("density", self.density)?;
        positive("evaporation_rate", self.evaporation_rate)?;
        positive("volume_factor", self.volume_factor)?;
        positive("plane_raise", self.plane_raise)?;
        non_negative("friction", self.friction)?;
        non_negative("deposition_rate", self.deposition_rate)?;
        non_negative("height_scale", self.height_scale)?;
        non_negative("stall_pool_depth", self.stall_pool_depth)?;
        non_negative("stall_acceleration", self.stall_acceleration)?;
        unit_interval("drainage", self.drainage)?;
        // Per-step decay factors must stay in (0, 1]
        let evaporation = self.time_step * self.evaporation_rate;
        if evaporation >= 1.0 {
            return Err(ParameterError::OutOfRange {
                name: "time_step * evaporation_rate",
                value: evaporation,
            });
        }
        let friction = self.time_step * self.friction;
        if friction >= 1.0 {
            return Err(ParameterError::OutOfRange {
                name: "time_step * friction",
                value: friction,
            });
        }
        budget("flood_retries", self.flood_retries)?;
        budget("spill_budget", self.spill_budget)?;
        if self.initial_volume <= self.min_volume {
            return Err(ParameterError::InitialVolumeBelowMinimum {
                initial_volume: self.initial_volume,
                min_volume: self.min_volume,
            });
        }
        Ok(())
    }
}
