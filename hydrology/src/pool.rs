use crate::droplet::Droplet;
use crate::field::HeightField;
use crate::params::ErosionParams;
use commons::*;
use std::cmp::Ordering;

const SEDIMENT_KEPT_ON_DRAINING: f64 = 0.1;

/// How a flood resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Flood {
    /// All water went into raising the pool.
    Filled,
    /// The pool overflowed into a lower cell and the droplet moved there.
    Drained { drain: V2<usize> },
    /// No water level could hold the droplet; its remaining volume was discarded.
    Abandoned,
}

#[derive(Debug, Default, PartialEq)]
struct Basin {
    cells: Vec<V2<usize>>,
    drain: Option<V2<usize>>,
}

fn lower_drain(field: &HeightField, a: &V2<usize>, b: &V2<usize>) -> Ordering {
    float_ordering(
        &field.get_cell_unsafe(a).surface(),
        &field.get_cell_unsafe(b).surface(),
    )
    .then_with(|| (a.x, a.y).cmp(&(b.x, b.y)))
}

/// Cells connected to `start` (including diagonally) whose surface is no higher than `plane`.
/// Cells below `initial_plane` are drain candidates: they end the search in their direction
/// and the lowest of them is the drain.
fn find_basin(
    field: &HeightField,
    start: &V2<usize>,
    plane: f64,
    initial_plane: f64,
) -> Basin {
    let mut out = Basin::default();
    let mut tried = M::from_element(field.width(), field.height(), false);
    let mut stack = vec![*start];
    *tried.mut_cell_unsafe(start) = true;

    while let Some(position) = stack.pop() {
        let surface = field.get_cell_unsafe(&position).surface();
        if surface > plane {
            continue;
        }
        if surface < initial_plane {
            out.drain = match out.drain {
                Some(drain) if lower_drain(field, &drain, &position) != Ordering::Greater => {
                    Some(drain)
                }
                _ => Some(position),
            };
            continue;
        }
        out.cells.push(position);
        for neighbour in field.surrounding(&position) {
            let seen = tried.mut_cell_unsafe(&neighbour);
            if !*seen {
                *seen = true;
                stack.push(neighbour);
            }
        }
    }

    out
}

impl Droplet {
    /// Spreads the droplet's water over the basin around it, raising the pool level step by
    /// step until the water is used up or the pool finds a lower outlet.
    pub fn flood(&mut self, field: &mut HeightField, params: &ErosionParams) -> Flood {
        let start = match self.cell(field) {
            Some(start) => start,
            None => {
                self.volume = 0.0;
                return Flood::Abandoned;
            }
        };

        let mut plane = field.get_cell_unsafe(&start).surface();
        let mut initial_plane = plane;
        let mut retries = params.flood_retries;

        while self.volume > params.min_volume && retries > 0 {
            let basin = find_basin(field, &start, plane, initial_plane);

            if let Some(drain) = basin.drain {
                self.position = v2(drain.x as f64, drain.y as f64);
                let drain_surface = field.get_cell_unsafe(&drain).surface();
                plane = (1.0 - params.drainage) * initial_plane + params.drainage * drain_surface;
                for position in basin.cells.iter() {
                    let cell = field.mut_cell_unsafe(position);
                    cell.pool = (plane - cell.height).max(0.0);
                }
                self.sediment *= SEDIMENT_KEPT_ON_DRAINING;
                return Flood::Drained { drain };
            }

            if basin.cells.is_empty() {
                // The plane sank below the droplet's own cell
                break;
            }

            let mut capacity: f64 = basin
                .cells
                .iter()
                .map(|position| {
                    params.volume_factor * (plane - field.get_cell_unsafe(position).surface())
                })
                .sum();

            if capacity <= self.volume && plane > initial_plane {
                for position in basin.cells.iter() {
                    let cell = field.mut_cell_unsafe(position);
                    cell.pool = plane - cell.height;
                }
                self.volume -= capacity;
                capacity = 0.0;
            } else {
                retries -= 1;
            }

            initial_plane = initial_plane.max(plane);
            plane += params.plane_raise * (self.volume - capacity)
                / basin.cells.len() as f64
                / params.volume_factor;
        }

        if self.volume > params.min_volume {
            self.volume = 0.0;
            Flood::Abandoned
        } else {
            Flood::Filled
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use commons::almost::Almost;

    fn params() -> ErosionParams {
        ErosionParams::default()
    }

    fn bowl(width: usize, height: usize, floor: f64, wall: f64) -> M<f64> {
        M::from_fn(width, height, |x, y| {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                wall
            } else {
                floor
            }
        })
    }

    fn pools_outside(field: &HeightField, except: &[V2<usize>]) -> Vec<f64> {
        let mut out = vec![];
        for x in 0..field.width() {
            for y in 0..field.height() {
                if !except.contains(&v2(x, y)) {
                    out.push(field.get_cell_unsafe(&v2(x, y)).pool);
                }
            }
        }
        out
    }

    #[test]
    fn basin_stops_at_walls() {
        let field = HeightField::new(bowl(5, 5, 0.0, 1.0)).unwrap();
        let basin = find_basin(&field, &v2(2, 2), 0.5, 0.0);
        assert_eq!(basin.cells.len(), 9);
        assert_eq!(basin.drain, None);
        assert!(basin.cells.iter().all(|cell| cell.x >= 1 && cell.x <= 3));
    }

    #[test]
    fn basin_follows_diagonals() {
        let mut heights = M::from_element(3, 3, 5.0);
        heights[(0, 0)] = 0.0;
        heights[(1, 1)] = 0.0;
        heights[(2, 2)] = 0.0;
        let field = HeightField::new(heights).unwrap();
        let basin = find_basin(&field, &v2(1, 1), 0.0, 0.0);
        assert_eq!(basin.cells.len(), 3);
    }

    #[test]
    fn lowest_drain_is_chosen() {
        let heights = M::from_vec(5, 1, vec![0.2, 0.6, 1.0, 0.5, 0.1]);
        let field = HeightField::new(heights).unwrap();
        let basin = find_basin(&field, &v2(2, 0), 1.0, 1.0);
        assert_eq!(basin.drain, Some(v2(3, 0)));
        assert_eq!(basin.cells, vec![v2(2, 0)]);
    }

    #[test]
    fn drain_ties_resolve_by_position() {
        let heights = M::from_vec(3, 1, vec![0.5, 1.0, 0.5]);
        let field = HeightField::new(heights).unwrap();
        let basin = find_basin(&field, &v2(1, 0), 1.0, 1.0);
        assert_eq!(basin.drain, Some(v2(0, 0)));
    }

    #[test]
    fn single_cell_basin_fills() {
        let mut heights = M::from_element(5, 5, 1.0);
        heights[(2, 2)] = 0.0;
        let mut field = HeightField::new(heights).unwrap();
        let mut droplet = Droplet::new(v2(2.0, 2.0), 1.0);
        let params = params();

        let outcome = droplet.flood(&mut field, &params);

        assert_eq!(outcome, Flood::Filled);
        assert!(droplet.volume <= params.min_volume);
        assert!(field.get_cell_unsafe(&v2(2, 2)).pool.almost(&0.00992));
        assert!(pools_outside(&field, &[v2(2, 2)]).iter().all(|pool| *pool == 0.0));
    }

    #[test]
    fn flood_never_adds_volume() {
        let mut field = HeightField::new(bowl(6, 6, 0.0, 3.0)).unwrap();
        let mut droplet = Droplet::new(v2(2.0, 3.0), 1.0);
        droplet.flood(&mut field, &params());
        assert!(droplet.volume <= 1.0);
        assert!(droplet.volume >= 0.0);
    }

    #[test]
    fn wide_basin_fills_evenly() {
        let mut field = HeightField::new(bowl(5, 5, 0.0, 1.0)).unwrap();
        let mut droplet = Droplet::new(v2(2.0, 2.0), 1.0);

        assert_eq!(droplet.flood(&mut field, &params()), Flood::Filled);

        let depth = field.get_cell_unsafe(&v2(1, 1)).pool;
        assert!(depth > 0.0);
        for x in 1..4 {
            for y in 1..4 {
                assert!(field.get_cell_unsafe(&v2(x, y)).pool.almost(&depth));
            }
        }
        assert_eq!(field.get_cell_unsafe(&v2(0, 0)).pool, 0.0);
    }

    #[test]
    fn overflow_drains_lake() {
        // Lake at x = 1..=2 held by a rim at x = 3 that is lower than the left wall
        let heights = M::from_vec(6, 1, vec![5.0, 1.0, 1.0, 1.2, 0.5, 0.0]);
        let mut field = HeightField::new(heights).unwrap();
        field.mut_cell_unsafe(&v2(1, 0)).pool = 0.3;
        field.mut_cell_unsafe(&v2(2, 0)).pool = 0.3;
        let mut droplet = Droplet::new(v2(1.0, 0.0), 1.0);
        droplet.sediment = 0.5;
        let params = ErosionParams {
            volume_factor: 1.0,
            ..params()
        };

        let outcome = droplet.flood(&mut field, &params);

        assert_eq!(outcome, Flood::Drained { drain: v2(3, 0) });
        assert_eq!(droplet.position, v2(3.0, 0.0));
        assert!(droplet.sediment.almost(&0.05));
        assert!(droplet.volume > 0.0);
        let level = 0.9 * 1.3 + 0.1 * 1.2;
        assert!(field.get_cell_unsafe(&v2(1, 0)).pool.almost(&(level - 1.0)));
        assert!(field.get_cell_unsafe(&v2(2, 0)).pool.almost(&(level - 1.0)));
        assert_eq!(field.get_cell_unsafe(&v2(3, 0)).pool, 0.0);
    }

    #[test]
    fn retries_exhausted() {
        let mut heights = M::from_element(5, 5, 10.0);
        for x in 1..4 {
            for y in 1..4 {
                heights[(x, y)] = 0.001;
            }
        }
        heights[(2, 2)] = 0.0;
        let mut field = HeightField::new(heights).unwrap();
        let before = field.clone();
        let mut droplet = Droplet::new(v2(2.0, 2.0), 1.0);
        let params = ErosionParams {
            flood_retries: 2,
            ..params()
        };

        assert_eq!(droplet.flood(&mut field, &params), Flood::Abandoned);
        assert_eq!(droplet.volume, 0.0);
        assert_eq!(field, before);
    }

    #[test]
    fn single_retry_cannot_fill() {
        let mut heights = M::from_element(5, 5, 1.0);
        heights[(2, 2)] = 0.0;
        let mut field = HeightField::new(heights).unwrap();
        let mut droplet = Droplet::new(v2(2.0, 2.0), 1.0);
        let params = ErosionParams {
            flood_retries: 1,
            ..params()
        };

        assert_eq!(droplet.flood(&mut field, &params), Flood::Abandoned);
        assert_eq!(droplet.volume, 0.0);
        assert_eq!(field.pools(), M::zeros(5, 5));
    }

    #[test]
    fn retries_exhausted_keeps_earlier_fills() {
        // A pit inside a shallow shelf: the pit fills once, then the shelf is too wide to fill
        let mut heights = M::from_element(5, 5, 1.0);
        for x in 1..4 {
            for y in 1..4 {
                heights[(x, y)] = 0.009;
            }
        }
        heights[(2, 2)] = 0.0;
        let mut field = HeightField::new(heights).unwrap();
        let mut droplet = Droplet::new(v2(2.0, 2.0), 1.0);
        let params = ErosionParams {
            flood_retries: 2,
            ..params()
        };

        assert_eq!(droplet.flood(&mut field, &params), Flood::Abandoned);
        assert_eq!(droplet.volume, 0.0);
        assert!(field.get_cell_unsafe(&v2(2, 2)).pool.almost(&0.008));
        assert!(pools_outside(&field, &[v2(2, 2)]).iter().all(|pool| *pool == 0.0));
    }

    #[test]
    fn failed_fill_drains_back_into_start() {
        // The first wide probe overshoots; the lowered plane then leaves the start cell below
        // the raised initial plane, so it becomes the drain
        let mut heights = M::from_element(5, 5, 10.0);
        for x in 1..4 {
            for y in 1..4 {
                heights[(x, y)] = 0.001;
            }
        }
        heights[(2, 2)] = 0.0;
        let mut field = HeightField::new(heights).unwrap();
        let before = field.clone();
        let mut droplet = Droplet::new(v2(2.0, 2.0), 1.0);

        assert_eq!(
            droplet.flood(&mut field, &params()),
            Flood::Drained { drain: v2(2, 2) }
        );
        assert_eq!(droplet.volume, 1.0);
        assert_eq!(droplet.position, v2(2.0, 2.0));
        assert_eq!(field, before);
    }

    #[test]
    fn failed_fill_keeps_earlier_pool_and_remaining_volume() {
        let mut heights = M::from_element(5, 5, 1.0);
        for x in 1..4 {
            for y in 1..4 {
                heights[(x, y)] = 0.009;
            }
        }
        heights[(2, 2)] = 0.0;
        let mut field = HeightField::new(heights).unwrap();
        let mut droplet = Droplet::new(v2(2.0, 2.0), 1.0);

        assert_eq!(
            droplet.flood(&mut field, &params()),
            Flood::Drained { drain: v2(2, 2) }
        );
        assert!(droplet.volume.almost(&0.2));
        assert!(field.get_cell_unsafe(&v2(2, 2)).pool.almost(&0.008));
        assert!(pools_outside(&field, &[v2(2, 2)]).iter().all(|pool| *pool == 0.0));
    }

    #[test]
    fn off_field_droplet_is_abandoned() {
        let mut field = HeightField::new(M::zeros(3, 3)).unwrap();
        let mut droplet = Droplet::new(v2(3.5, 0.0), 1.0);
        assert_eq!(droplet.flood(&mut field, &params()), Flood::Abandoned);
        assert_eq!(droplet.volume, 0.0);
    }
}
