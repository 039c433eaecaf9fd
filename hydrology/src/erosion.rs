use crate::droplet::{Droplet, Halt};
use crate::field::HeightField;
use crate::params::{ErosionParams, ParameterError};
use crate::pool::Flood;
use commons::log::debug;
use commons::rand::prelude::*;
use commons::*;
use std::ops::AddAssign;

/// Final state of one droplet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropletOutcome {
    Evaporated,
    Lost,
    Stalled,
    Filled,
    Drained,
    Abandoned,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ErosionReport {
    pub evaporated: usize,
    pub lost: usize,
    pub stalled: usize,
    pub filled: usize,
    pub drained: usize,
    pub abandoned: usize,
}

impl ErosionReport {
    pub fn droplets(&self) -> usize {
        self.evaporated + self.lost + self.stalled + self.filled + self.drained + self.abandoned
    }

    pub fn record(&mut self, outcome: DropletOutcome) {
        match outcome {
            DropletOutcome::Evaporated => self.evaporated += 1,
            DropletOutcome::Lost => self.lost += 1,
            DropletOutcome::Stalled => self.stalled += 1,
            DropletOutcome::Filled => self.filled += 1,
            DropletOutcome::Drained => self.drained += 1,
            DropletOutcome::Abandoned => self.abandoned += 1,
        }
    }
}

impl AddAssign for ErosionReport {
    fn add_assign(&mut self, other: ErosionReport) {
        self.evaporated += other.evaporated;
        self.lost += other.lost;
        self.stalled += other.stalled;
        self.filled += other.filled;
        self.drained += other.drained;
        self.abandoned += other.abandoned;
    }
}

pub struct Erosion {
    params: ErosionParams,
}

impl Erosion {
    pub fn new(params: ErosionParams) -> Result<Erosion, ParameterError> {
        params.validate()?;
        Ok(Erosion { params })
    }

    pub fn params(&self) -> &ErosionParams {
        &self.params
    }

    /// Drops `params.droplets` droplets one after another, each on a random cell.
    pub fn erode<R: Rng>(&self, field: &mut HeightField, rng: &mut R) -> ErosionReport {
        let mut report = ErosionReport::default();
        for _ in 0..self.params.droplets {
            let position = v2(
                rng.gen_range(0..field.width()) as f64,
                rng.gen_range(0..field.height()) as f64,
            );
            report.record(self.erode_at(field, position));
        }
        debug!("Eroded with {} droplets: {:?}", report.droplets(), report);
        report
    }

    /// Runs a single droplet from `position` through up to `spill_budget` descend/flood
    /// cycles. A droplet that drains out of a pool resumes descending from the drain.
    pub fn erode_at(&self, field: &mut HeightField, position: V2<f64>) -> DropletOutcome {
        let params = &self.params;
        let mut droplet = Droplet::new(position, params.initial_volume);
        let mut outcome = DropletOutcome::Evaporated;

        for _ in 0..params.spill_budget {
            if droplet.volume <= params.min_volume {
                break;
            }
            outcome = match droplet.descend(field, params) {
                Halt::Evaporated => return DropletOutcome::Evaporated,
                Halt::OutOfBounds => return DropletOutcome::Lost,
                Halt::Stalled => return DropletOutcome::Stalled,
                Halt::EnteredPool | Halt::Trapped => match droplet.flood(field, params) {
                    Flood::Filled => return DropletOutcome::Filled,
                    Flood::Abandoned => return DropletOutcome::Abandoned,
                    Flood::Drained { .. } => DropletOutcome::Drained,
                },
            };
        }

        outcome
    }
}
