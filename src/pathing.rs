use crate::cells::GridCoordinate;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

use bit_set::BitSet;
use std::collections::VecDeque;

/// Shortest path through the maze from the top-left corner (0, 0) to the
/// bottom-right corner (rows-1, cols-1), or `None` when the corners are
/// disconnected. On a perfect maze the path always exists and is the unique
/// route between the corners.
pub fn solve(grid: &Grid) -> Option<Vec<GridCoordinate>> {
    let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
    let start = GridCoordinate::new(0, 0);
    let goal = GridCoordinate::new(rows as u32 - 1, columns as u32 - 1);
    shortest_path(grid, start, goal)
}

/// Breadth-first search over the carved passages. Cells are expanded in
/// nondecreasing distance from `start`, so the first time `goal` is dequeued
/// its accumulated path is a shortest one. `None` when `goal` is unreachable
/// or either endpoint lies outside the grid; absence of a path is an
/// expected outcome for arbitrary wall configurations, not an error.
pub fn shortest_path(grid: &Grid,
                     start: GridCoordinate,
                     goal: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {
    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(goal) {
        return None;
    }

    let ColumnsCount(row_width) = grid.columns();
    let cell_index = |coord: GridCoordinate| coord.row as usize * row_width + coord.col as usize;

    let mut queue: VecDeque<(GridCoordinate, Vec<GridCoordinate>)> = VecDeque::new();
    queue.push_back((start, vec![start]));
    let mut visited = BitSet::with_capacity(grid.size());
    visited.insert(cell_index(start));

    while let Some((current, path)) = queue.pop_front() {
        if current == goal {
            return Some(path);
        }

        for neighbour in grid.neighbours(current) {
            if visited.contains(cell_index(neighbour.coord)) {
                continue;
            }
            if grid.has_wall(current, neighbour.towards) {
                continue;
            }
            visited.insert(cell_index(neighbour.coord));
            let mut extended = path.clone();
            extended.push(neighbour.coord);
            queue.push_back((neighbour.coord, extended));
        }
    }

    None
}
