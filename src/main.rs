use docopt::Docopt;
use mazegen::{
    cells::GridCoordinate,
    generators::{self, Algorithm},
    grid_displays::{PathDisplay, StartEndPointsDisplay},
    pathing,
    renderers,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
    path::Path,
    rc::Rc,
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [--rows=<r>] [--cols=<c>] [--algorithm=<name>] [--seed=<n>] [--solve] [--mark-start-end] [--text-out=<path>] [--image-out=<path>] [--svg-out=<path>] [--cell-pixels=<n>]

Options:
    -h --help            Show this screen.
    --rows=<r>           Grid row count [default: 10].
    --cols=<c>           Grid column count [default: 10].
    --algorithm=<name>   Generation algorithm: backtracker, prim or kruskal [default: backtracker].
    --seed=<n>           Seed the random generator, for reproducible mazes.
    --solve              Show the shortest path from the top-left to the bottom-right corner on every rendering.
    --mark-start-end     Mark the start and end cells instead of a solved path.
    --text-out=<path>    Write the text rendering to a file instead of stdout.
    --image-out=<path>   Write a PNG rendering to the given file path.
    --svg-out=<path>     Write an SVG rendering to the given file path.
    --cell-pixels=<n>    Pixel length of one cell side in image and SVG renderings [default: 10].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_cols: usize,
    flag_algorithm: String,
    flag_seed: Option<u64>,
    flag_solve: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_svg_out: String,
    flag_cell_pixels: u32,
}

mod errors {
    use error_chain::error_chain;
    error_chain! {

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let algorithm = args.flag_algorithm.parse::<Algorithm>()?;
    let mut grid = if let Some(seed) = args.flag_seed {
        let mut rng = StdRng::seed_from_u64(seed);
        generators::generate_with_rng(args.flag_rows, args.flag_cols, algorithm, &mut rng)?
    } else {
        generators::generate_with_rng(args.flag_rows,
                                      args.flag_cols,
                                      algorithm,
                                      &mut rand::thread_rng())?
    };

    let path = if args.flag_solve {
        let solution = pathing::solve(&grid);
        if solution.is_none() {
            eprintln!("no path exists from the top-left to the bottom-right corner");
        }
        solution
    } else {
        None
    };

    // Decide what the cells of the text rendering should contain.
    if let Some(ref solution) = path {
        grid.set_grid_display(Some(Rc::new(PathDisplay::new(solution))));
    } else if args.flag_mark_start_end {
        let start = GridCoordinate::new(0, 0);
        let end = GridCoordinate::new(args.flag_rows as u32 - 1, args.flag_cols as u32 - 1);
        grid.set_grid_display(Some(Rc::new(StartEndPointsDisplay::new(start, end))));
    }

    if !args.flag_text_out.is_empty() {
        write_text_to_file(&format!("{}", grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    } else if args.flag_image_out.is_empty() && args.flag_svg_out.is_empty() {
        // Text to stdout is the default when no file output was asked for.
        println!("{}", grid);
    }

    if !args.flag_image_out.is_empty() || !args.flag_svg_out.is_empty() {
        let render_options = renderers::RenderOptionsBuilder::new()
            .cell_side_pixels(args.flag_cell_pixels)
            .path(path)
            .mark_start_end(args.flag_mark_start_end)
            .build();

        if !args.flag_image_out.is_empty() {
            renderers::render_image(&grid, &render_options, Path::new(&args.flag_image_out))?;
        }
        if !args.flag_svg_out.is_empty() {
            renderers::render_svg(&grid, &render_options, Path::new(&args.flag_svg_out))?;
        }
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
