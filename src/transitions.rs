use crate::{Discrete, Error, Grid, ObsActSpace, Tile};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Left, Action::Down, Action::Right, Action::Up];

    /// The four moves as a discrete space.
    pub fn space() -> ObsActSpace {
        ObsActSpace::Discrete {
            n: Self::ALL.len(),
        }
    }

    pub fn index(self) -> Discrete {
        self as Discrete
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Left => "Left",
            Action::Down => "Down",
            Action::Right => "Right",
            Action::Up => "Up",
        }
    }

    /// Directions actually executed on slippery ice, in table order:
    /// `(a - 1) mod 4`, `a`, `(a + 1) mod 4`.
    pub fn slip_directions(self) -> [Action; 3] {
        let a = self.index();
        [Self::ALL[(a + 3) % 4], self, Self::ALL[(a + 1) % 4]]
    }
}

impl TryFrom<Discrete> for Action {
    type Error = Error;

    fn try_from(a: Discrete) -> Result<Self, Self::Error> {
        Self::ALL
            .get(a)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("action must be in 0..=3, got {a}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub probability: f64,
    pub next_state: Discrete,
    pub reward: f64,
    pub done: bool,
}

/// Outcome lists for every (state, action) pair. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionTable {
    p: Vec<[Vec<Transition>; 4]>,
}

impl TransitionTable {
    pub fn build(grid: &Grid, slippery: bool) -> Self {
        let mut p = Vec::with_capacity(grid.n_s());
        for row in 0..grid.nrow() {
            for col in 0..grid.ncol() {
                let s = grid.to_s(row, col);
                p.push(Action::ALL.map(|a| {
                    if grid.tile(row, col).is_terminal() {
                        vec![Transition {
                            probability: 1.,
                            next_state: s,
                            reward: 0.,
                            done: true,
                        }]
                    } else if slippery {
                        a.slip_directions()
                            .into_iter()
                            .map(|b| outcome(grid, row, col, b, 1. / 3.))
                            .collect()
                    } else {
                        vec![outcome(grid, row, col, a, 1.)]
                    }
                }));
            }
        }

        debug!(n_s = p.len(), slippery, "built transition table");
        Self { p }
    }

    /// Outcomes of `a` in `s`, or `None` when `s` is not a state of the lake.
    pub fn get(&self, s: Discrete, a: Action) -> Option<&[Transition]> {
        self.p.get(s).map(|ts| ts[a.index()].as_slice())
    }

    // Callers guarantee `s < n_s`.
    pub(crate) fn outcomes(&self, s: Discrete, a: Action) -> &[Transition] {
        &self.p[s][a.index()]
    }

    pub fn n_s(&self) -> usize {
        self.p.len()
    }

    pub fn n_a(&self) -> usize {
        Action::ALL.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Discrete, Action, &[Transition])> + '_ {
        self.p.iter().enumerate().flat_map(|(s, ts)| {
            Action::ALL
                .into_iter()
                .map(move |a| (s, a, ts[a.index()].as_slice()))
        })
    }
}

/// Clamped one-cell move. Walking into a wall leaves the agent in place.
pub fn inc(grid: &Grid, row: usize, col: usize, a: Action) -> (usize, usize) {
    match a {
        Action::Left => (row, col.saturating_sub(1)),
        Action::Down => ((row + 1).min(grid.nrow() - 1), col),
        Action::Right => (row, (col + 1).min(grid.ncol() - 1)),
        Action::Up => (row.saturating_sub(1), col),
    }
}

fn outcome(grid: &Grid, row: usize, col: usize, a: Action, probability: f64) -> Transition {
    let (row, col) = inc(grid, row, col, a);
    let tile = grid.tile(row, col);
    let reward = match tile {
        Tile::Goal => 1.,
        Tile::Hole => -1.,
        Tile::Start | Tile::Frozen => 0.,
    };

    Transition {
        probability,
        next_state: grid.to_s(row, col),
        reward,
        done: tile.is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAP_4X4;
    use float_eq::*;
    use rstest::rstest;

    fn lake(slippery: bool) -> (Grid, TransitionTable) {
        let grid = Grid::from_desc(&MAP_4X4).unwrap();
        let table = TransitionTable::build(&grid, slippery);
        (grid, table)
    }

    #[rstest]
    fn covers_every_pair_and_sums_to_one(#[values(true, false)] slippery: bool) {
        let (_, table) = lake(slippery);

        assert_eq!(table.iter().count(), 16 * 4);
        for (_, _, ts) in table.iter() {
            let total: f64 = ts.iter().map(|t| t.probability).sum();
            assert_float_eq!(total, 1., abs <= 1e-9);
        }
    }

    #[rstest]
    fn terminal_tiles_are_absorbing(#[values(true, false)] slippery: bool) {
        let (grid, table) = lake(slippery);

        for s in [5, 7, 11, 12, 15] {
            assert!(grid.tile_at(s).is_terminal());
            for a in Action::ALL {
                assert_eq!(
                    table.get(s, a).unwrap(),
                    [Transition {
                        probability: 1.,
                        next_state: s,
                        reward: 0.,
                        done: true
                    }]
                );
            }
        }
    }

    #[rstest]
    #[case(Action::Left, 8)]
    #[case(Action::Down, 13)]
    #[case(Action::Right, 10)]
    #[case(Action::Up, 5)]
    fn deterministic_moves_follow_the_action(#[case] a: Action, #[case] expected: Discrete) {
        let (_, table) = lake(false);

        let ts = table.get(9, a).unwrap();
        assert_eq!(ts.len(), 1);
        assert_eq!(ts[0].next_state, expected);
        assert_float_eq!(ts[0].probability, 1., abs <= 1e-12);
    }

    #[test]
    fn slippery_moves_keep_duplicates_in_order() {
        let (_, table) = lake(true);

        // From the top-left corner, Left slips to Up (stay), Left (stay) and Down.
        let next = table
            .get(0, Action::Left)
            .unwrap()
            .iter()
            .map(|t| t.next_state)
            .collect::<Vec<_>>();
        assert_eq!(next, vec![0, 0, 4]);
        for t in table.get(0, Action::Left).unwrap() {
            assert_float_eq!(t.probability, 1. / 3., abs <= 1e-12);
        }
    }

    #[test]
    fn rewards_depend_on_destination() {
        let (_, table) = lake(false);

        let goal = table.get(14, Action::Right).unwrap()[0];
        assert_eq!((goal.next_state, goal.reward, goal.done), (15, 1., true));

        let hole = table.get(1, Action::Down).unwrap()[0];
        assert_eq!((hole.next_state, hole.reward, hole.done), (5, -1., true));

        let ice = table.get(0, Action::Right).unwrap()[0];
        assert_eq!((ice.next_state, ice.reward, ice.done), (1, 0., false));
    }

    #[test]
    fn corner_walls_are_no_ops() {
        let (grid, _) = lake(false);

        assert_eq!(inc(&grid, 0, 0, Action::Up), (0, 0));
        assert_eq!(inc(&grid, 0, 0, Action::Left), (0, 0));
        assert_eq!(inc(&grid, 3, 3, Action::Down), (3, 3));
        assert_eq!(inc(&grid, 3, 3, Action::Right), (3, 3));
    }

    #[test]
    fn lookups_outside_the_lake_are_none() {
        let (_, table) = lake(true);

        assert!(table.get(15, Action::Up).is_some());
        assert_eq!(table.get(16, Action::Up), None);
        assert_eq!(table.get(100, Action::Left), None);
    }

    #[test]
    fn raw_actions_are_checked() {
        assert_eq!(Action::try_from(2).unwrap(), Action::Right);
        assert!(matches!(Action::try_from(4), Err(Error::InvalidArgument(_))));
    }
}
