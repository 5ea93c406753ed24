use crate::cells::{offset_coordinate, GridCoordinate, Neighbour, NeighbourSmallVec,
                   WallDirection, WallSet};
use crate::errors::*;
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnsCount, RowsCount};

use error_chain::bail;
use rand::Rng;
use std::fmt;
use std::rc::Rc;

/// A rectangular grid of cells, each owning its 4-bit wall state.
///
/// The grid starts fully walled. Generation algorithms carve passages into
/// it in place; afterwards it is only read, by the solver and the renderers.
pub struct Grid {
    rows: RowsCount,
    columns: ColumnsCount,
    walls: Vec<WallSet>,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, carved passages: {}",
               self.rows,
               self.columns,
               self.passages_count())
    }
}

impl Grid {
    /// A fully walled grid. Fails with `InvalidDimensions` if either count
    /// is zero.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let (RowsCount(row_count), ColumnsCount(column_count)) = (rows, columns);
        if row_count == 0 || column_count == 0 {
            bail!(ErrorKind::InvalidDimensions(row_count, column_count));
        }

        Ok(Grid {
            rows,
            columns,
            walls: vec![WallSet::all(); row_count * column_count],
            grid_display: None,
        })
    }

    /// Put every wall back up, so the same allocation can be carved again.
    pub fn reset(&mut self) {
        for walls in &mut self.walls {
            *walls = WallSet::all();
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.col as usize) < self.columns.0
    }

    /// Row-major linear index of a coordinate, `None` when out of bounds.
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.col as usize)
        } else {
            None
        }
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        GridCoordinate::from_row_major_index(index, self.columns)
    }

    /// The in-bounds cells adjacent to `coord`, visited North, East, South,
    /// West, each with the wall direction leading to it and the direction
    /// leading back.
    pub fn neighbours(&self, coord: GridCoordinate) -> NeighbourSmallVec {
        WallDirection::ALL
            .iter()
            .filter_map(|&towards| {
                offset_coordinate(coord, towards)
                    .filter(|&neighbour| self.is_valid_coordinate(neighbour))
                    .map(|neighbour| Neighbour {
                        coord: neighbour,
                        towards,
                        opposite: towards.opposite(),
                    })
            })
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: WallDirection)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction).filter(|&neighbour| self.is_valid_coordinate(neighbour))
    }

    /// Carve a passage between two adjacent cells by clearing the wall bit
    /// facing the other cell on each side.
    ///
    /// Fails with `OutOfBounds` or `NotAdjacent` without touching any wall.
    /// Carving an already open passage is a no-op.
    pub fn carve(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        let a_index = self.grid_coordinate_to_index(a)
            .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(a)))?;
        let b_index = self.grid_coordinate_to_index(b)
            .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(b)))?;

        let manhattan_distance = (i64::from(a.row) - i64::from(b.row)).abs() +
                                 (i64::from(a.col) - i64::from(b.col)).abs();
        if manhattan_distance != 1 {
            bail!(ErrorKind::NotAdjacent(a, b));
        }

        let towards = if b.row < a.row {
            WallDirection::North
        } else if b.row > a.row {
            WallDirection::South
        } else if b.col > a.col {
            WallDirection::East
        } else {
            WallDirection::West
        };

        self.walls[a_index].remove(towards);
        self.walls[b_index].remove(towards.opposite());
        Ok(())
    }

    /// Wall bit test. Everything outside the grid counts as walled.
    pub fn has_wall(&self, coord: GridCoordinate, direction: WallDirection) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(true, |index| self.walls[index].contains(direction))
    }

    /// Is there an in-bounds neighbour in that direction with the shared
    /// wall carved?
    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: WallDirection) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |_| !self.has_wall(coord, direction))
    }

    /// Number of carved internal passages. A perfect maze has exactly
    /// `size() - 1` of them.
    pub fn passages_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [WallDirection::East, WallDirection::South]
                    .iter()
                    .filter(|&&direction| self.is_neighbour_linked(coord, direction))
                    .count()
            })
            .sum()
    }

    /// Restartable row-major iteration over every cell coordinate.
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_width: self.columns,
            cells_count: self.size(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_width: ColumnsCount,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number,
                                                             self.row_width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("positive dimensions")
    }

    fn gc(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    #[test]
    fn new_grid_is_fully_walled() {
        let g = small_grid(3, 4);
        assert_eq!(g.size(), 12);
        assert_eq!(g.passages_count(), 0);
        for coord in g.iter() {
            for &direction in &WallDirection::ALL {
                assert!(g.has_wall(coord, direction));
            }
        }
    }

    #[test]
    fn zero_dimension_grids_are_rejected() {
        for &(rows, columns) in &[(0, 5), (5, 0), (0, 0)] {
            let result = Grid::new(RowsCount(rows), ColumnsCount(columns));
            match result {
                Err(Error(ErrorKind::InvalidDimensions(r, c), _)) => {
                    assert_eq!((r, c), (rows, columns));
                }
                _ => panic!("expected InvalidDimensions for {}x{}", rows, columns),
            }
        }
    }

    #[test]
    fn carve_clears_the_two_facing_bits_and_nothing_else() {
        let mut g = small_grid(3, 3);
        g.carve(gc(0, 0), gc(0, 1)).expect("adjacent carve");

        assert!(!g.has_wall(gc(0, 0), WallDirection::East));
        assert!(!g.has_wall(gc(0, 1), WallDirection::West));

        assert!(g.has_wall(gc(0, 0), WallDirection::North));
        assert!(g.has_wall(gc(0, 0), WallDirection::South));
        assert!(g.has_wall(gc(0, 0), WallDirection::West));
        assert!(g.has_wall(gc(0, 1), WallDirection::North));
        assert!(g.has_wall(gc(0, 1), WallDirection::East));
        assert!(g.has_wall(gc(0, 1), WallDirection::South));
        assert_eq!(g.passages_count(), 1);

        // Idempotent.
        g.carve(gc(0, 0), gc(0, 1)).expect("re-carve");
        assert_eq!(g.passages_count(), 1);
    }

    #[test]
    fn carve_works_in_all_four_directions() {
        let mut g = small_grid(3, 3);
        let centre = gc(1, 1);
        for neighbour in g.neighbours(centre) {
            g.carve(centre, neighbour.coord).expect("adjacent carve");
            assert!(!g.has_wall(centre, neighbour.towards));
            assert!(!g.has_wall(neighbour.coord, neighbour.opposite));
        }
        assert_eq!(g.passages_count(), 4);
    }

    #[test]
    fn carve_failures_do_not_mutate() {
        let mut g = small_grid(3, 3);

        match g.carve(gc(0, 0), gc(2, 2)) {
            Err(Error(ErrorKind::NotAdjacent(..), _)) => {}
            _ => panic!("expected NotAdjacent"),
        }
        match g.carve(gc(0, 0), gc(0, 0)) {
            Err(Error(ErrorKind::NotAdjacent(..), _)) => {}
            _ => panic!("expected NotAdjacent for a self carve"),
        }
        match g.carve(gc(0, 0), gc(5, 5)) {
            Err(Error(ErrorKind::OutOfBounds(coord), _)) => assert_eq!(coord, gc(5, 5)),
            _ => panic!("expected OutOfBounds"),
        }

        assert_eq!(g.passages_count(), 0);
        for coord in g.iter() {
            for &direction in &WallDirection::ALL {
                assert!(g.has_wall(coord, direction));
            }
        }
    }

    #[test]
    fn reset_restores_every_wall() {
        let mut g = small_grid(2, 2);
        g.carve(gc(0, 0), gc(0, 1)).expect("adjacent carve");
        g.carve(gc(0, 0), gc(1, 0)).expect("adjacent carve");
        assert_eq!(g.passages_count(), 2);

        g.reset();
        assert_eq!(g.passages_count(), 0);
        for coord in g.iter() {
            for &direction in &WallDirection::ALL {
                assert!(g.has_wall(coord, direction));
            }
        }
    }

    #[test]
    fn neighbours_are_in_bounds_and_ordered() {
        let g = small_grid(3, 3);

        let coords = |neighbours: NeighbourSmallVec| {
            neighbours.iter().map(|n| n.coord).collect::<Vec<_>>()
        };

        // Interior cell sees all four, in N, E, S, W order.
        assert_eq!(coords(g.neighbours(gc(1, 1))),
                   vec![gc(0, 1), gc(1, 2), gc(2, 1), gc(1, 0)]);

        // Corners.
        assert_eq!(coords(g.neighbours(gc(0, 0))), vec![gc(0, 1), gc(1, 0)]);
        assert_eq!(coords(g.neighbours(gc(2, 2))), vec![gc(1, 2), gc(2, 1)]);

        // Edges.
        assert_eq!(coords(g.neighbours(gc(0, 1))),
                   vec![gc(0, 2), gc(1, 1), gc(0, 0)]);
        assert_eq!(coords(g.neighbours(gc(1, 0))),
                   vec![gc(0, 0), gc(1, 1), gc(2, 0)]);
    }

    #[test]
    fn neighbour_directions_face_each_other() {
        let g = small_grid(2, 2);
        for coord in g.iter() {
            for neighbour in g.neighbours(coord) {
                assert_eq!(neighbour.towards.opposite(), neighbour.opposite);
                assert_eq!(g.neighbour_at_direction(coord, neighbour.towards),
                           Some(neighbour.coord));
                assert_eq!(g.neighbour_at_direction(neighbour.coord, neighbour.opposite),
                           Some(coord));
            }
        }
    }

    #[test]
    fn out_of_bounds_queries_report_walls() {
        let g = small_grid(2, 2);
        assert!(g.has_wall(gc(9, 9), WallDirection::North));
        assert_eq!(g.neighbour_at_direction(gc(1, 1), WallDirection::South), None);
        assert!(!g.is_neighbour_linked(gc(1, 1), WallDirection::East));
    }

    #[test]
    fn cell_iter_is_row_major_and_restartable() {
        let g = small_grid(2, 2);
        let expected = vec![gc(0, 0), gc(0, 1), gc(1, 0), gc(1, 1)];
        assert_eq!(g.iter().collect::<Vec<_>>(), expected);
        // A second iteration starts over.
        assert_eq!(g.iter().collect::<Vec<_>>(), expected);
        assert_eq!(g.iter().size_hint(), (4, Some(4)));
        assert_eq!((&g).into_iter().count(), 4);
    }

    #[test]
    fn random_cell_is_always_in_bounds() {
        let g = small_grid(4, 7);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            assert!(g.is_valid_coordinate(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn linear_indices_are_row_major() {
        let g = small_grid(3, 5);
        assert_eq!(g.grid_coordinate_to_index(gc(0, 0)), Some(0));
        assert_eq!(g.grid_coordinate_to_index(gc(1, 0)), Some(5));
        assert_eq!(g.grid_coordinate_to_index(gc(2, 4)), Some(14));
        assert_eq!(g.grid_coordinate_to_index(gc(3, 0)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(0, 5)), None);
    }
}
