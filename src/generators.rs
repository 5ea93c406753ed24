use crate::cells::{GridCoordinate, NeighbourSmallVec};
use crate::errors::*;
use crate::grid::Grid;
use crate::union_find::UnionFind;
use crate::units::{ColumnsCount, RowsCount};

use bit_set::BitSet;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use std::str::FromStr;

/// The maze generation algorithms this crate ships.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Algorithm {
    RecursiveBacktracker,
    Prim,
    Kruskal,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Algorithm> {
        match name {
            "backtracker" => Ok(Algorithm::RecursiveBacktracker),
            "prim" => Ok(Algorithm::Prim),
            "kruskal" => Ok(Algorithm::Kruskal),
            _ => Err(ErrorKind::UnknownAlgorithm(name.to_owned()).into()),
        }
    }
}

/// Generate a maze with the algorithm named by `algorithm`, randomized from
/// the thread-local generator.
///
/// Fails with `UnknownAlgorithm` for an unrecognized name and with
/// `InvalidDimensions` for a zero row or column count.
pub fn generate(rows: usize, columns: usize, algorithm: &str) -> Result<Grid> {
    let algorithm = algorithm.parse()?;
    generate_with_rng(rows, columns, algorithm, &mut rand::thread_rng())
}

/// As `generate`, but with a caller supplied random source, so a seeded rng
/// reproduces the same maze.
pub fn generate_with_rng<R: Rng>(rows: usize,
                                 columns: usize,
                                 algorithm: Algorithm,
                                 rng: &mut R)
                                 -> Result<Grid> {
    let mut grid = Grid::new(RowsCount(rows), ColumnsCount(columns))?;
    match algorithm {
        Algorithm::RecursiveBacktracker => recursive_backtracker(&mut grid, rng),
        Algorithm::Prim => prim(&mut grid, rng),
        Algorithm::Kruskal => kruskal(&mut grid, rng),
    }
    Ok(grid)
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
/// A randomized depth-first search run on an explicit stack: keep carving
/// into a random unvisited neighbour of the cell on top of the stack, and
/// pop when there is none. The depth-first bias produces long winding
/// corridors with relatively few junctions.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.reset();

    let cell_index = row_major_indexer(grid);
    let mut visited = BitSet::with_capacity(grid.size());
    let mut stack: Vec<GridCoordinate> = Vec::with_capacity(grid.size());

    let start = grid.random_cell(rng);
    visited.insert(cell_index(start));
    stack.push(start);

    while let Some(&current) = stack.last() {
        let unvisited: NeighbourSmallVec = grid.neighbours(current)
            .into_iter()
            .filter(|neighbour| !visited.contains(cell_index(neighbour.coord)))
            .collect();

        if let Some(next) = unvisited.choose(rng) {
            grid.carve(current, next.coord)
                .expect("backtracker carves only adjacent in-bounds cells");
            visited.insert(cell_index(next.coord));
            stack.push(next.coord);
        } else {
            // Dead end, backtrack.
            stack.pop();
        }
    }
}

/// Apply Prim's maze generation algorithm to a grid.
/// Grows the maze outward from a random start cell by repeatedly carving a
/// uniformly chosen passage from the frontier between visited and unvisited
/// cells. Branches far more evenly than the backtracker.
pub fn prim<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.reset();

    let cell_index = row_major_indexer(grid);
    let mut visited = BitSet::with_capacity(grid.size());
    // The frontier is sampled by index; the set mirrors its contents so the
    // duplicate check is O(1) instead of a scan of the whole frontier.
    let mut frontier: Vec<(GridCoordinate, GridCoordinate)> = Vec::new();
    let mut frontier_members = crate::utils::fnv_hashset(grid.size());

    let start = grid.random_cell(rng);
    visited.insert(cell_index(start));
    for neighbour in grid.neighbours(start) {
        frontier.push((start, neighbour.coord));
        frontier_members.insert((start, neighbour.coord));
    }

    while !frontier.is_empty() {
        let chosen = rng.gen_range(0..frontier.len());
        let passage = frontier.swap_remove(chosen);
        frontier_members.remove(&passage);

        let (from, target) = passage;
        if visited.contains(cell_index(target)) {
            // A stale entry: the target was carved into from another
            // neighbour after this passage joined the frontier.
            continue;
        }

        grid.carve(from, target).expect("prim carves only adjacent in-bounds cells");
        visited.insert(cell_index(target));

        for neighbour in grid.neighbours(target) {
            if visited.contains(cell_index(neighbour.coord)) {
                continue;
            }
            let candidate = (target, neighbour.coord);
            if frontier_members.insert(candidate) {
                frontier.push(candidate);
            }
        }
    }
}

/// Apply Kruskal's maze generation algorithm to a grid.
/// Every internal wall is a candidate edge; visiting them in a uniformly
/// shuffled order and carving exactly those that join two still separate
/// components yields a uniformly random-feeling spanning tree. Component
/// tracking is a disjoint-set-union.
pub fn kruskal<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.reset();

    let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
    let cell_index = row_major_indexer(grid);

    // Each internal wall exactly once: the east wall of every cell not in
    // the last column, the south wall of every cell not in the last row.
    let mut candidate_walls: Vec<(GridCoordinate, GridCoordinate)> =
        Vec::with_capacity(rows * (columns - 1) + columns * (rows - 1));
    for (row, col) in (0..rows as u32).cartesian_product(0..columns as u32) {
        let cell = GridCoordinate::new(row, col);
        if (col as usize) + 1 < columns {
            candidate_walls.push((cell, GridCoordinate::new(row, col + 1)));
        }
        if (row as usize) + 1 < rows {
            candidate_walls.push((cell, GridCoordinate::new(row + 1, col)));
        }
    }
    candidate_walls.shuffle(rng);

    let mut components = UnionFind::new(grid.size());
    for (a, b) in candidate_walls {
        if components.find(cell_index(a)) != components.find(cell_index(b)) {
            grid.carve(a, b).expect("kruskal carves only adjacent in-bounds cells");
            components.union(cell_index(a), cell_index(b));
        }
    }
}

/// Closure mapping a coordinate to its row-major linear index, for keying
/// the visited bit-sets and the disjoint-set structure.
fn row_major_indexer(grid: &Grid) -> impl Fn(GridCoordinate) -> usize {
    let ColumnsCount(row_width) = grid.columns();
    move |coord: GridCoordinate| coord.row as usize * row_width + coord.col as usize
}
