use commons::*;
use hydrology::HeightField;

#[derive(Debug, PartialEq)]
pub struct Summary {
    pub removed: f64,
    pub deposited: f64,
    pub wet_cells: usize,
    pub deepest_pool: f64,
    pub visited_cells: usize,
}

impl Summary {
    pub fn new(before: &M<f64>, field: &HeightField) -> Summary {
        let after = field.heights();
        let pools = field.pools();
        let (removed, deposited) = before
            .iter()
            .zip(after.iter())
            .map(|(before, after)| after - before)
            .fold((0.0, 0.0), |(removed, deposited), change| {
                if change < 0.0 {
                    (removed - change, deposited)
                } else {
                    (removed, deposited + change)
                }
            });
        Summary {
            removed,
            deposited,
            wet_cells: pools.iter().filter(|pool| **pool > 0.0).count(),
            deepest_pool: pools.iter().copied().fold(0.0, f64::max),
            visited_cells: field.visited().iter().filter(|visited| **visited).count(),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use commons::almost::Almost;

    #[test]
    fn summary() {
        let before = M::from_vec(2, 2, vec![1.0, 1.0, 1.0, 1.0]);
        let mut field = HeightField::new(before.clone()).unwrap();
        field.mut_cell_unsafe(&v2(0, 0)).height = 0.75;
        field.mut_cell_unsafe(&v2(1, 0)).height = 1.5;
        field.mut_cell_unsafe(&v2(0, 1)).pool = 0.2;
        field.mut_cell_unsafe(&v2(1, 1)).pool = 0.4;
        field.mut_cell_unsafe(&v2(1, 1)).visited = true;

        let actual = Summary::new(&before, &field);

        assert!(actual.removed.almost(&0.25));
        assert!(actual.deposited.almost(&0.5));
        assert_eq!(actual.wet_cells, 2);
        assert!(actual.deepest_pool.almost(&0.4));
        assert_eq!(actual.visited_cells, 1);
    }

    #[test]
    fn untouched_field() {
        let before = M::from_element(3, 3, 2.0);
        let field = HeightField::new(before.clone()).unwrap();
        assert_eq!(
            Summary::new(&before, &field),
            Summary {
                removed: 0.0,
                deposited: 0.0,
                wet_cells: 0,
                deepest_pool: 0.0,
                visited_cells: 0,
            }
        );
    }
}
