use crate::{Discrete, Error, Result};
use itertools::Itertools;
use ndarray::Array2;
use std::fmt;

pub const MAP_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

pub const MAP_8X8: [&str; 8] = [
    "SFFFFFFF",
    "FFFFFFFF",
    "FFFHFFFF",
    "FFFFFHFF",
    "FFFHFFFF",
    "FHHFFFHF",
    "FHFFHFHF",
    "FFFHFFFG",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Start,
    Frozen,
    Hole,
    Goal,
}

impl Tile {
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'S' => Ok(Tile::Start),
            'F' => Ok(Tile::Frozen),
            'H' => Ok(Tile::Hole),
            'G' => Ok(Tile::Goal),
            c => Err(Error::MalformedMap(format!("unknown tile '{c}'"))),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Tile::Start => 'S',
            Tile::Frozen => 'F',
            Tile::Hole => 'H',
            Tile::Goal => 'G',
        }
    }

    /// Holes and the goal end an episode and never move the agent again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Tile::Hole | Tile::Goal)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Immutable lake layout. Always holds exactly one goal and at least one start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Array2<Tile>,
    goal: Discrete,
}

impl Grid {
    pub fn from_desc<S: AsRef<str>>(desc: &[S]) -> Result<Self> {
        let nrow = desc.len();
        let ncol = desc.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if nrow == 0 || ncol == 0 {
            return Err(Error::MalformedMap("map has no tiles".to_string()));
        }

        let mut tiles = Vec::with_capacity(nrow * ncol);
        for (i, row) in desc.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != ncol {
                return Err(Error::MalformedMap(format!(
                    "row {i} has {} tiles, expected {ncol}",
                    row.chars().count()
                )));
            }
            for c in row.chars() {
                tiles.push(Tile::from_char(c)?);
            }
        }

        let tiles = Array2::from_shape_vec((nrow, ncol), tiles)
            .map_err(|e| Error::MalformedMap(e.to_string()))?;
        Self::from_tiles(tiles)
    }

    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "4x4" => Self::from_desc(&MAP_4X4),
            "8x8" => Self::from_desc(&MAP_8X8),
            name => Err(Error::InvalidArgument(format!("unknown map name '{name}'"))),
        }
    }

    pub(crate) fn from_tiles(tiles: Array2<Tile>) -> Result<Self> {
        let goals = tiles
            .iter()
            .positions(|&t| t == Tile::Goal)
            .collect::<Vec<_>>();
        let goal = match goals[..] {
            [goal] => goal,
            _ => {
                return Err(Error::MalformedMap(format!(
                    "expected exactly one goal tile, found {}",
                    goals.len()
                )))
            }
        };

        if !tiles.iter().any(|&t| t == Tile::Start) {
            return Err(Error::MalformedMap("map has no start tile".to_string()));
        }

        Ok(Self { tiles, goal })
    }

    pub fn nrow(&self) -> usize {
        self.tiles.nrows()
    }

    pub fn ncol(&self) -> usize {
        self.tiles.ncols()
    }

    pub fn n_s(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[[row, col]]
    }

    pub fn tile_at(&self, s: Discrete) -> Tile {
        let (row, col) = self.to_rc(s);
        self.tile(row, col)
    }

    pub fn to_s(&self, row: usize, col: usize) -> Discrete {
        row * self.ncol() + col
    }

    pub fn to_rc(&self, s: Discrete) -> (usize, usize) {
        (s / self.ncol(), s % self.ncol())
    }

    pub fn goal(&self) -> Discrete {
        self.goal
    }

    pub fn starts(&self) -> impl Iterator<Item = Discrete> + '_ {
        self.tiles.iter().positions(|&t| t == Tile::Start)
    }

    pub fn is_hole(&self, row: usize, col: usize) -> bool {
        self.tile(row, col) == Tile::Hole
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// The layout in the row-of-letters form accepted by [`Grid::from_desc`].
    pub fn desc(&self) -> Vec<String> {
        self.tiles
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|t| t.as_char()).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.desc().join("\n"))
    }
}
