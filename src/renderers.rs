use crate::cells::{GridCoordinate, WallDirection};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

use image::{Rgb, RgbImage};
use itertools::Itertools;
use std::cmp::{max, min};
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

const BACKGROUND_COLOUR: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const WALL_COLOUR: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);
const PATH_COLOUR: Rgb<u8> = Rgb([0x1e, 0x46, 0xff]);
const START_COLOUR: Rgb<u8> = Rgb([0x00, 0x96, 0x00]);
const END_COLOUR: Rgb<u8> = Rgb([0xc8, 0x00, 0x00]);

/// How a maze should be drawn. Shared by the PNG and SVG renderers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    cell_side_pixels: u32,
    path: Option<Vec<GridCoordinate>>,
    mark_start_end: bool,
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels: 10,
                path: None,
                mark_start_end: false,
            },
        }
    }

    /// Pixel length of one cell side. Clamped to at least 2 when rendering.
    pub fn cell_side_pixels(mut self, pixels: u32) -> RenderOptionsBuilder {
        self.options.cell_side_pixels = pixels;
        self
    }

    /// Solution path to overlay, as produced by `pathing::solve`.
    pub fn path(mut self, path: Option<Vec<GridCoordinate>>) -> RenderOptionsBuilder {
        self.options.path = path;
        self
    }

    /// Mark the path start and end cells.
    pub fn mark_start_end(mut self, mark: bool) -> RenderOptionsBuilder {
        self.options.mark_start_end = mark;
        self
    }

    pub fn build(self) -> RenderOptions {
        self.options
    }
}

/// Render the maze into an RGB pixel buffer: white rooms, black single-pixel
/// wall lines, the optional solution path drawn between cell centres.
pub fn render_image_buffer(grid: &Grid, options: &RenderOptions) -> RgbImage {
    let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
    let cell = max(options.cell_side_pixels, 2);
    // One extra pixel so the east and south boundary lines land in-bounds.
    let width = columns as u32 * cell + 1;
    let height = rows as u32 * cell + 1;
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND_COLOUR);

    for coord in grid.iter() {
        let x1 = coord.col * cell;
        let y1 = coord.row * cell;
        let x2 = x1 + cell;
        let y2 = y1 + cell;

        // North and west walls are drawn only on the grid boundary; interior
        // ones are covered as the south/east walls of the neighbouring cell.
        if grid.neighbour_at_direction(coord, WallDirection::North).is_none() {
            horizontal_line(&mut image, x1, x2, y1, WALL_COLOUR);
        }
        if grid.neighbour_at_direction(coord, WallDirection::West).is_none() {
            vertical_line(&mut image, y1, y2, x1, WALL_COLOUR);
        }
        if !grid.is_neighbour_linked(coord, WallDirection::East) {
            vertical_line(&mut image, y1, y2, x2, WALL_COLOUR);
        }
        if !grid.is_neighbour_linked(coord, WallDirection::South) {
            horizontal_line(&mut image, x1, x2, y2, WALL_COLOUR);
        }
    }

    if let Some(ref path) = options.path {
        for (a, b) in path.iter().tuple_windows() {
            let (ax, ay) = cell_centre(*a, cell);
            let (bx, by) = cell_centre(*b, cell);
            // Path cells are adjacent, so every segment is axis aligned.
            if ay == by {
                horizontal_line(&mut image, min(ax, bx), max(ax, bx), ay, PATH_COLOUR);
            } else {
                vertical_line(&mut image, min(ay, by), max(ay, by), ax, PATH_COLOUR);
            }
        }
    }

    if options.mark_start_end {
        let start = GridCoordinate::new(0, 0);
        let end = GridCoordinate::new(rows as u32 - 1, columns as u32 - 1);
        fill_square(&mut image, cell_centre(start, cell), cell / 3, START_COLOUR);
        fill_square(&mut image, cell_centre(end, cell), cell / 3, END_COLOUR);
    }

    image
}

/// Render the maze to a PNG (or any format the extension names) file.
pub fn render_image(grid: &Grid, options: &RenderOptions, file_path: &Path) -> Result<()> {
    let image = render_image_buffer(grid, options);
    image.save(file_path)?;
    Ok(())
}

/// Assemble the maze as an SVG document: a background rectangle, the
/// solution polyline underneath a group of wall lines, and optional
/// start/end markers.
pub fn svg_document(grid: &Grid, options: &RenderOptions) -> String {
    let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
    let cell = max(options.cell_side_pixels, 2);
    let width = columns as u32 * cell;
    let height = rows as u32 * cell;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width, height));
    svg.push_str(&format!("  <rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
                          width, height));

    // The path goes in first so the walls stay crisp on top of it.
    if let Some(ref path) = options.path {
        if path.len() > 1 {
            let points = path.iter()
                .map(|coord| {
                    let (x, y) = cell_centre(*coord, cell);
                    format!("{},{}", x, y)
                })
                .join(" ");
            svg.push_str(&format!("  <polyline points=\"{}\" fill=\"none\" stroke=\"blue\" \
                                   stroke-width=\"2\" opacity=\"0.8\"/>\n",
                                  points));
        }
    }

    svg.push_str("  <g stroke=\"black\" stroke-width=\"2\" stroke-linecap=\"square\">\n");
    svg.push_str(&svg_line(0, 0, width, 0));
    svg.push_str(&svg_line(0, height, width, height));
    svg.push_str(&svg_line(0, 0, 0, height));
    svg.push_str(&svg_line(width, 0, width, height));

    // Interior walls only; every interior wall is some cell's north or west
    // wall, so each is emitted exactly once.
    for coord in grid.iter() {
        let x1 = coord.col * cell;
        let y1 = coord.row * cell;
        let x2 = x1 + cell;
        let y2 = y1 + cell;
        if coord.row > 0 && grid.has_wall(coord, WallDirection::North) {
            svg.push_str(&svg_line(x1, y1, x2, y1));
        }
        if coord.col > 0 && grid.has_wall(coord, WallDirection::West) {
            svg.push_str(&svg_line(x1, y1, x1, y2));
        }
    }
    svg.push_str("  </g>\n");

    if options.mark_start_end {
        let (start_x, start_y) = cell_centre(GridCoordinate::new(0, 0), cell);
        let end = GridCoordinate::new(rows as u32 - 1, columns as u32 - 1);
        let (end_x, end_y) = cell_centre(end, cell);
        let marker = cell * 3 / 10;
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"green\" opacity=\"0.8\"/>\n",
            start_x, start_y, marker));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"red\" \
             opacity=\"0.8\"/>\n",
            end_x - marker, end_y - marker, 2 * marker, 2 * marker));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render the maze to an SVG file.
pub fn render_svg(grid: &Grid, options: &RenderOptions, file_path: &Path) -> Result<()> {
    write_text_to_file(&svg_document(grid, options), file_path)
}

fn svg_line(x1: u32, y1: u32, x2: u32, y2: u32) -> String {
    format!("    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>\n", x1, y1, x2, y2)
}

fn cell_centre(coord: GridCoordinate, cell_side_pixels: u32) -> (u32, u32) {
    (coord.col * cell_side_pixels + cell_side_pixels / 2,
     coord.row * cell_side_pixels + cell_side_pixels / 2)
}

fn horizontal_line(image: &mut RgbImage, x1: u32, x2: u32, y: u32, colour: Rgb<u8>) {
    for x in x1..=x2 {
        image.put_pixel(x, y, colour);
    }
}

fn vertical_line(image: &mut RgbImage, y1: u32, y2: u32, x: u32, colour: Rgb<u8>) {
    for y in y1..=y2 {
        image.put_pixel(x, y, colour);
    }
}

fn fill_square(image: &mut RgbImage, centre: (u32, u32), half_side: u32, colour: Rgb<u8>) {
    let (centre_x, centre_y) = centre;
    let x1 = centre_x.saturating_sub(half_side);
    let y1 = centre_y.saturating_sub(half_side);
    let x2 = min(centre_x + half_side, image.width() - 1);
    let y2 = min(centre_y + half_side, image.height() - 1);
    for y in y1..=y2 {
        horizontal_line(image, x1, x2, y, colour);
    }
}

fn write_text_to_file(data: &str, file_path: &Path) -> Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}
