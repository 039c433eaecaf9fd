use commons::*;
use std::error::Error;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub height: f64,
    pub pool: f64,
    pub plants: f64,
    pub visited: bool,
}

impl Cell {
    pub fn surface(&self) -> f64 {
        self.height + self.pool
    }
}

#[derive(Debug, PartialEq)]
pub enum FieldError {
    Empty,
    ShapeMismatch {
        heights: (usize, usize),
        plants: (usize, usize),
    },
    PlantDensityOutOfRange {
        position: V2<usize>,
        plants: f64,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Empty => write!(f, "height field has no cells"),
            FieldError::ShapeMismatch { heights, plants } => write!(
                f,
                "plant density shape {:?} does not match height shape {:?}",
                plants, heights
            ),
            FieldError::PlantDensityOutOfRange { position, plants } => write!(
                f,
                "plant density {} at ({}, {}) is outside [0, 1]",
                plants, position.x, position.y
            ),
        }
    }
}

impl Error for FieldError {}

/// Terrain shared by every droplet in a run.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    cells: M<Cell>,
}

impl HeightField {
    pub fn new(heights: M<f64>) -> Result<HeightField, FieldError> {
        if heights.is_empty() {
            return Err(FieldError::Empty);
        }
        Ok(HeightField {
            cells: heights.map(|height| Cell {
                height,
                ..Cell::default()
            }),
        })
    }

    pub fn with_plants(heights: M<f64>, plants: M<f64>) -> Result<HeightField, FieldError> {
        if heights.shape() != plants.shape() {
            return Err(FieldError::ShapeMismatch {
                heights: heights.shape(),
                plants: plants.shape(),
            });
        }
        let mut out = HeightField::new(heights)?;
        for x in 0..out.width() {
            for y in 0..out.height() {
                let position = v2(x, y);
                let density = *plants.get_cell_unsafe(&position);
                if !(0.0..=1.0).contains(&density) {
                    return Err(FieldError::PlantDensityOutOfRange {
                        position,
                        plants: density,
                    });
                }
                out.mut_cell_unsafe(&position).plants = density;
            }
        }
        Ok(out)
    }

    pub fn surface(&self, position: &V2<usize>) -> Option<f64> {
        self.get_cell(position).map(Cell::surface)
    }

    pub fn heights(&self) -> M<f64> {
        extract_matrix(self, &|cell| cell.height)
    }

    pub fn pools(&self) -> M<f64> {
        extract_matrix(self, &|cell| cell.pool)
    }

    pub fn visited(&self) -> M<bool> {
        extract_matrix(self, &|cell| cell.visited)
    }

    pub fn clear_visited(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.visited = false);
    }
}

impl Grid<Cell> for HeightField {
    fn width(&self) -> usize {
        self.cells.width()
    }

    fn height(&self) -> usize {
        self.cells.height()
    }

    fn get_cell_unsafe(&self, position: &V2<usize>) -> &Cell {
        self.cells.get_cell_unsafe(position)
    }

    fn mut_cell_unsafe(&mut self, position: &V2<usize>) -> &mut Cell {
        self.cells.mut_cell_unsafe(position)
    }
}
