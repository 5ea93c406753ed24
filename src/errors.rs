use crate::cells::GridCoordinate;

use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        /// A grid cannot be built with a zero row or column count.
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: rows and columns must both be positive",
                    rows, columns)
        }
        /// A coordinate handed to `carve` lies outside the grid.
        OutOfBounds(coord: GridCoordinate) {
            description("grid coordinate out of bounds")
            display("cell ({}, {}) is outside the grid", coord.row, coord.col)
        }
        /// Only cells at Manhattan distance 1 can share a carved passage.
        NotAdjacent(a: GridCoordinate, b: GridCoordinate) {
            description("cells are not adjacent")
            display("cells ({}, {}) and ({}, {}) are not adjacent",
                    a.row, a.col, b.row, b.col)
        }
        /// The generation dispatcher was given a name it does not know.
        UnknownAlgorithm(name: String) {
            description("unknown generation algorithm")
            display("unknown algorithm {:?}: expected one of backtracker, prim, kruskal", name)
        }
    }
}
