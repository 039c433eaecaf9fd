use crate::field::HeightField;
use crate::normal::surface_normal;
use crate::params::ErosionParams;
use commons::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Droplet {
    pub position: V2<f64>,
    pub velocity: V2<f64>,
    pub volume: f64,
    pub sediment: f64,
}

/// Why a descent stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Halt {
    Evaporated,
    OutOfBounds,
    Stalled,
    EnteredPool,
    Trapped,
}

impl Droplet {
    pub fn new(position: V2<f64>, volume: f64) -> Droplet {
        Droplet {
            position,
            velocity: v2(0.0, 0.0),
            volume,
            sediment: 0.0,
        }
    }

    pub fn cell(&self, field: &HeightField) -> Option<V2<usize>> {
        field.cell_at(&self.position)
    }

    /// Rolls the droplet downhill, moving sediment between the terrain and the droplet, until
    /// it evaporates, leaves the field or reaches standing water.
    pub fn descend(&mut self, field: &mut HeightField, params: &ErosionParams) -> Halt {
        let mut cell = match self.cell(field) {
            Some(cell) => cell,
            None => {
                self.volume = 0.0;
                return Halt::OutOfBounds;
            }
        };

        while self.volume > params.min_volume {
            let (pool, plants) = {
                let current = field.mut_cell_unsafe(&cell);
                current.visited = true;
                (current.pool, current.plants)
            };

            let normal = surface_normal(field, &cell, params.height_scale);

            // Streams (standing or flowing water) carry droplets further
            let deposition = params.deposition_rate * (1.0 - plants).max(0.0);
            let friction = params.friction * (1.0 - 0.5 * pool).max(0.0);
            let evaporation = params.evaporation_rate * (1.0 - 0.2 * pool).max(0.0);

            let dt = params.time_step;
            let acceleration = v2(normal.x, normal.z) / (self.volume * params.density);
            self.velocity += acceleration * dt;
            self.position += self.velocity * dt;
            self.velocity *= 1.0 - dt * friction;

            let next = match self.cell(field) {
                Some(next) => next,
                None => {
                    self.volume = 0.0;
                    return Halt::OutOfBounds;
                }
            };

            let next_pool = field.get_cell_unsafe(&next).pool;
            let calm = acceleration.norm() < params.stall_acceleration;
            if next_pool > params.stall_pool_depth && calm {
                return Halt::Stalled;
            }
            if next_pool > 0.0 {
                return Halt::EnteredPool;
            }
            if next == cell && calm && is_pit(field, &cell) {
                return Halt::Trapped;
            }

            let descent = field.get_cell_unsafe(&cell).height - field.get_cell_unsafe(&next).height;
            let equilibrium = (self.velocity.norm() * descent).max(0.0);
            let difference = equilibrium - self.sediment;
            self.sediment += dt * deposition * difference;
            field.mut_cell_unsafe(&cell).height -= self.volume * dt * deposition * difference;

            // Sediment concentrates as water evaporates
            self.sediment /= 1.0 - dt * evaporation;
            self.volume *= 1.0 - dt * evaporation;

            cell = next;
        }

        Halt::Evaporated
    }
}

/// No axis neighbour has a strictly lower water surface.
fn is_pit(field: &HeightField, position: &V2<usize>) -> bool {
    let surface = field.get_cell_unsafe(position).surface();
    field
        .neighbours(position)
        .iter()
        .all(|neighbour| field.get_cell_unsafe(neighbour).surface() >= surface)
}
