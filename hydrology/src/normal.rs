use crate::field::HeightField;
use commons::*;

/// Unit normal of the terrain at `position`, with component 1 pointing up and components 0
/// and 2 along x and y.
///
/// Built from the four triangles between the cell and its axis neighbours. A neighbour off
/// the grid takes the cell's own height, so edge cells see flat ground beyond the border.
pub fn surface_normal(field: &HeightField, position: &V2<usize>, height_scale: f64) -> V3<f64> {
    let centre = field.get_cell_unsafe(position).height;
    let rise = |dx: i32, dy: i32| {
        field
            .offset(position, v2(dx, dy))
            .map(|neighbour| field.get_cell_unsafe(&neighbour).height - centre)
            .unwrap_or(0.0)
            * height_scale
    };

    let px = v3(1.0, rise(1, 0), 0.0);
    let nx = v3(-1.0, rise(-1, 0), 0.0);
    let py = v3(0.0, rise(0, 1), 1.0);
    let ny = v3(0.0, rise(0, -1), -1.0);

    let normal = py.cross(&px) + ny.cross(&nx) + px.cross(&ny) + nx.cross(&py);
    normal.normalize()
}
