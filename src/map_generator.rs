use crate::{Error, Grid, Result, Tile};
use ndarray::Array2;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Draws random lakes until one has a path from start to goal.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGenerator {
    size: usize,
    frozen_p: f64,
    max_attempts: Option<usize>,
}

impl MapGenerator {
    pub fn new(size: usize, frozen_p: f64) -> Self {
        Self {
            size,
            frozen_p,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid> {
        let size = self.size;
        if size < 2 {
            return Err(Error::InvalidArgument(format!(
                "map size must be at least 2, got {size}"
            )));
        }
        let p = self.frozen_p.min(1.);

        let mut attempts = 0;
        loop {
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(Error::MapGenerationFailed { attempts });
            }
            attempts += 1;

            let mut tiles = Array2::from_shape_fn((size, size), |_| {
                if rng.gen::<f64>() < p {
                    Tile::Frozen
                } else {
                    Tile::Hole
                }
            });

            let start = (rng.gen_range(0..size), rng.gen_range(0..size));
            let goal = loop {
                let goal = (rng.gen_range(0..size), rng.gen_range(0..size));
                if goal != start {
                    break goal;
                }
            };
            tiles[start] = Tile::Start;
            tiles[goal] = Tile::Goal;

            if is_valid(&tiles, start) {
                debug!(attempts, size, frozen_p = p, "generated random map");
                return Grid::from_tiles(tiles);
            }
        }
    }
}

/// Random `size`x`size` lake whose goal is reachable from its start.
/// Keeps sampling until a valid layout turns up.
pub fn generate_random_map<R: Rng + ?Sized>(
    size: usize,
    frozen_p: f64,
    rng: &mut R,
) -> Result<Grid> {
    MapGenerator::new(size, frozen_p).generate(rng)
}

/// Whether the goal can be reached from `start` without crossing a hole.
pub fn path_exists(grid: &Grid, start: (usize, usize)) -> bool {
    is_valid(grid.tiles(), start)
}

// Depth-first over 4-neighbours. Stepping on the goal from any side counts.
fn is_valid(tiles: &Array2<Tile>, start: (usize, usize)) -> bool {
    let (nrow, ncol) = tiles.dim();
    let mut frontier = vec![start];
    let mut discovered = HashSet::new();

    while let Some((r, c)) = frontier.pop() {
        if !discovered.insert((r, c)) {
            continue;
        }
        for (dr, dc) in DIRECTIONS {
            let (Some(r_new), Some(c_new)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
            else {
                continue;
            };
            if r_new >= nrow || c_new >= ncol {
                continue;
            }
            match tiles[(r_new, c_new)] {
                Tile::Goal => return true,
                Tile::Hole => {}
                _ => frontier.push((r_new, c_new)),
            }
        }
    }

    false
}
