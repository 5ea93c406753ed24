use crate::cells::{GridCoordinate, WallDirection};
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::FnvHashSet;

use std::fmt;

/// Render the contents of a grid cell as text.
/// The String should be 3 glyphs long, padded if required.
pub trait GridDisplay {
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

/// Marks the cells on a solution path.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> PathDisplay {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks a start cell and an end cell.
#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: GridCoordinate,
    end: GridCoordinate,
}

impl StartEndPointsDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

impl fmt::Display for Grid {
    /// Text serialization: `+`/`-`/`|` walls, three glyphs of cell body per
    /// cell supplied by the installed `GridDisplay` (blank without one).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let RowsCount(rows) = self.rows();
        let ColumnsCount(columns) = self.columns();

        // 2 lines per row plus the southern boundary.
        let mut output = String::with_capacity((2 * rows + 1) * (4 * columns + 2));

        for row in 0..rows as u32 {
            let mut northern_boundary = String::new();
            let mut cell_bodies = String::new();

            for col in 0..columns as u32 {
                let coord = GridCoordinate::new(row, col);

                northern_boundary.push('+');
                northern_boundary.push_str(if self.has_wall(coord, WallDirection::North) {
                    "---"
                } else {
                    "   "
                });

                cell_bodies.push(if self.has_wall(coord, WallDirection::West) {
                    '|'
                } else {
                    ' '
                });
                match *self.grid_display() {
                    Some(ref displayer) => cell_bodies.push_str(&displayer.render_cell_body(coord)),
                    None => cell_bodies.push_str("   "),
                }
            }

            northern_boundary.push('+');
            let row_end = GridCoordinate::new(row, columns as u32 - 1);
            cell_bodies.push(if self.has_wall(row_end, WallDirection::East) {
                '|'
            } else {
                ' '
            });

            output.push_str(&northern_boundary);
            output.push('\n');
            output.push_str(&cell_bodies);
            output.push('\n');
        }

        for col in 0..columns as u32 {
            let coord = GridCoordinate::new(rows as u32 - 1, col);
            output.push('+');
            output.push_str(if self.has_wall(coord, WallDirection::South) {
                "---"
            } else {
                "   "
            });
        }
        output.push('+');

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::rc::Rc;

    fn gc(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    fn grid_2x2() -> Grid {
        Grid::new(RowsCount(2), ColumnsCount(2)).expect("positive dimensions")
    }

    #[test]
    fn fully_walled_grid_renders_every_wall() {
        let g = grid_2x2();
        let expected = "\
+---+---+
|   |   |
+---+---+
|   |   |
+---+---+";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn carved_passages_open_the_rendering() {
        let mut g = grid_2x2();
        g.carve(gc(0, 0), gc(0, 1)).expect("adjacent carve");
        g.carve(gc(0, 1), gc(1, 1)).expect("adjacent carve");
        let expected = "\
+---+---+
|       |
+---+   +
|   |   |
+---+---+";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn path_display_marks_path_cells() {
        let mut g = grid_2x2();
        g.carve(gc(0, 0), gc(1, 0)).expect("adjacent carve");
        g.carve(gc(1, 0), gc(1, 1)).expect("adjacent carve");
        let path = vec![gc(0, 0), gc(1, 0), gc(1, 1)];
        g.set_grid_display(Some(Rc::new(PathDisplay::new(&path))));

        let expected = "\
+---+---+
| . |   |
+   +---+
| .   . |
+---+---+";
        assert_eq!(format!("{}", g), expected);
    }

    #[test]
    fn start_end_display_marks_the_corners() {
        let mut g = grid_2x2();
        g.set_grid_display(Some(Rc::new(StartEndPointsDisplay::new(gc(0, 0), gc(1, 1)))));
        let rendered = format!("{}", g);
        assert!(rendered.contains(" S "));
        assert!(rendered.contains(" E "));
    }
}
