use super::*;

const AXIS_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

const SURROUNDING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

pub trait Grid<T> {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn get_cell_unsafe(&self, position: &V2<usize>) -> &T;
    fn mut_cell_unsafe(&mut self, position: &V2<usize>) -> &mut T;

    fn in_bounds(&self, position: &V2<usize>) -> bool {
        position.x < self.width() && position.y < self.height()
    }

    fn get_cell(&self, position: &V2<usize>) -> Option<&T> {
        if self.in_bounds(position) {
            Some(self.get_cell_unsafe(position))
        } else {
            None
        }
    }

    fn mut_cell(&mut self, position: &V2<usize>) -> Option<&mut T> {
        if self.in_bounds(position) {
            Some(self.mut_cell_unsafe(position))
        } else {
            None
        }
    }

    fn cells(&self) -> usize {
        self.width() * self.height()
    }

    /// Cell containing a continuous position, if it lies on the grid.
    fn cell_at(&self, position: &V2<f64>) -> Option<V2<usize>> {
        // Written to reject NaN as well as negative coordinates
        if !(position.x >= 0.0 && position.y >= 0.0) {
            return None;
        }
        let cell = v2(position.x.floor() as usize, position.y.floor() as usize);
        if self.in_bounds(&cell) {
            Some(cell)
        } else {
            None
        }
    }

    fn offset(&self, position: &V2<usize>, offset: V2<i32>) -> Option<V2<usize>> {
        let x = position.x as i64 + offset.x as i64;
        let y = position.y as i64 + offset.y as i64;
        if x < 0 || y < 0 {
            return None;
        }
        let offset = v2(x as usize, y as usize);
        if self.in_bounds(&offset) {
            Some(offset)
        } else {
            None
        }
    }

    fn neighbours(&self, position: &V2<usize>) -> Vec<V2<usize>> {
        AXIS_OFFSETS
            .iter()
            .flat_map(|(x, y)| self.offset(position, v2(*x, *y)))
            .collect()
    }

    fn surrounding(&self, position: &V2<usize>) -> Vec<V2<usize>> {
        SURROUNDING_OFFSETS
            .iter()
            .flat_map(|(x, y)| self.offset(position, v2(*x, *y)))
            .collect()
    }
}

pub fn extract_matrix<T, O>(grid: &dyn Grid<T>, function: &dyn Fn(&T) -> O) -> M<O>
where
    O: 'static + Copy + Debug + Default + PartialEq,
{
    let mut out = M::from_element(grid.width(), grid.height(), O::default());
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            out[(x, y)] = function(grid.get_cell_unsafe(&v2(x, y)));
        }
    }
    out
}

impl<T> Grid<T> for M<T>
where
    T: 'static + Copy + Debug + PartialEq,
{
    fn width(&self) -> usize {
        self.shape().0
    }

    fn height(&self) -> usize {
        self.shape().1
    }

    fn get_cell_unsafe(&self, position: &V2<usize>) -> &T {
        &self[(position.x, position.y)]
    }

    fn mut_cell_unsafe(&mut self, position: &V2<usize>) -> &mut T {
        &mut self[(position.x, position.y)]
    }
}
