use crate::{FrozenLake, Tile};
use itertools::iproduct;
use ndarray::{s, Array3};

const ICE: [u8; 3] = [204, 230, 255];
const HOLE: [u8; 3] = [24, 48, 88];
const CRACKED_HOLE: [u8; 3] = [120, 30, 30];
const STOOL: [u8; 3] = [150, 105, 60];
const GOAL: [u8; 3] = [255, 200, 40];
const AGENT: [u8; 3] = [220, 40, 40];
const BORDER: [u8; 3] = [180, 200, 230];

// Cells are 64px wide until the board would exceed 512px.
const CELL: usize = 64;
const MAX_BOARD: usize = 512;

/// Flat-colour picture of the lake, `height x width x 3`.
pub fn render_rgb(env: &FrozenLake) -> Array3<u8> {
    let grid = env.grid();
    let (nrow, ncol) = (grid.nrow(), grid.ncol());
    let cell_w = ((CELL * ncol).min(MAX_BOARD) / ncol).max(1);
    let cell_h = ((CELL * nrow).min(MAX_BOARD) / nrow).max(1);
    let mut frame = Array3::zeros((nrow * cell_h, ncol * cell_w, 3));

    for (row, col) in iproduct!(0..nrow, 0..ncol) {
        let (top, left) = (row * cell_h, col * cell_w);
        match grid.tile(row, col) {
            Tile::Hole => fill(&mut frame, top, left, cell_h, cell_w, HOLE),
            Tile::Frozen => fill(&mut frame, top, left, cell_h, cell_w, ICE),
            Tile::Start => {
                fill(&mut frame, top, left, cell_h, cell_w, ICE);
                fill_centered(&mut frame, top, left, cell_h, cell_w, STOOL);
            }
            Tile::Goal => {
                fill(&mut frame, top, left, cell_h, cell_w, ICE);
                fill_centered(&mut frame, top, left, cell_h, cell_w, GOAL);
            }
        }
        outline(&mut frame, top, left, cell_h, cell_w);
    }

    let (row, col) = grid.to_rc(env.state());
    let (top, left) = (row * cell_h, col * cell_w);
    if grid.is_hole(row, col) {
        fill(&mut frame, top, left, cell_h, cell_w, CRACKED_HOLE);
    } else {
        fill_centered(&mut frame, top, left, cell_h, cell_w, AGENT);
    }

    frame
}

fn fill(frame: &mut Array3<u8>, top: usize, left: usize, h: usize, w: usize, rgb: [u8; 3]) {
    for (ch, v) in rgb.into_iter().enumerate() {
        frame
            .slice_mut(s![top..top + h, left..left + w, ch])
            .fill(v);
    }
}

// Square at 60% of the cell, centred.
fn fill_centered(
    frame: &mut Array3<u8>,
    top: usize,
    left: usize,
    h: usize,
    w: usize,
    rgb: [u8; 3],
) {
    let (small_h, small_w) = (h * 3 / 5, w * 3 / 5);
    fill(
        frame,
        top + (h - small_h) / 2,
        left + (w - small_w) / 2,
        small_h,
        small_w,
        rgb,
    );
}

fn outline(frame: &mut Array3<u8>, top: usize, left: usize, h: usize, w: usize) {
    fill(frame, top, left, 1, w, BORDER);
    fill(frame, top + h - 1, left, 1, w, BORDER);
    fill(frame, top, left, h, 1, BORDER);
    fill(frame, top, left + w - 1, h, 1, BORDER);
}
