use crate::{
    weighted_index, Action, Discrete, FrozenLakeConfig, Grid, ObsActSpace, Result, Tile,
    TransitionTable,
};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{info, trace};

/// What the agent gets to see after `reset` and `step`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationMode {
    /// 4-bit mask of holes around the agent: bit 0 left, 1 down, 2 right, 3 up.
    #[default]
    HoleMask,
    /// The hole mask plus the dominant direction toward the goal.
    HoleMaskAndGoalDirection,
    /// Raw `row * ncol + col` position.
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    HoleMask(u8),
    HoleMaskAndGoalDirection(u8, Action),
    Position(Discrete),
}

impl Observation {
    /// Single-integer observations. `None` for the tuple mode.
    pub fn discrete_value(&self) -> Option<Discrete> {
        match self {
            Self::HoleMask(mask) => Some(*mask as Discrete),
            Self::Position(s) => Some(*s),
            Self::HoleMaskAndGoalDirection(..) => None,
        }
    }

    pub fn items(&self) -> Vec<Discrete> {
        match self {
            Self::HoleMask(mask) => vec![*mask as Discrete],
            Self::HoleMaskAndGoalDirection(mask, dir) => vec![*mask as Discrete, dir.index()],
            Self::Position(s) => vec![*s],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepDetails {
    /// Probability of the transition that was sampled.
    pub prob: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    pub observation: Observation,
    pub reward: f64,
    pub truncated: bool,
    pub terminated: bool,
    pub info: StepDetails,
}

/// Frozen lake simulation: layout, precomputed dynamics and the agent's position.
///
/// Not meant to be shared. Every mutating call takes `&mut self`.
#[derive(Debug, Clone)]
pub struct FrozenLake {
    grid: Grid,
    is_slippery: bool,
    transitions: Rc<TransitionTable>,
    initial_state_distrib: Vec<f64>,
    start_sampler: WeightedIndex<f64>,
    // One per (state, action), laid out as `s * 4 + a`.
    samplers: Vec<WeightedIndex<f64>>,
    observation_mode: ObservationMode,
    s: Discrete,
    last_action: Option<Action>,
    rng: StdRng,
}

impl FrozenLake {
    pub fn new(config: &FrozenLakeConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = config.grid(&mut rng)?;

        Ok(Self::from_grid(grid, config.is_slippery, rng)?
            .with_observation_mode(config.observation_mode))
    }

    pub fn from_grid(grid: Grid, is_slippery: bool, mut rng: StdRng) -> Result<Self> {
        let transitions = Rc::new(TransitionTable::build(&grid, is_slippery));

        let mut initial_state_distrib = grid
            .tiles()
            .iter()
            .map(|&t| if t == Tile::Start { 1. } else { 0. })
            .collect::<Vec<f64>>();
        let total: f64 = initial_state_distrib.iter().sum();
        initial_state_distrib.iter_mut().for_each(|p| *p /= total);

        let start_sampler = weighted_index(initial_state_distrib.as_slice())?;
        let samplers = transitions
            .iter()
            .map(|(_, _, ts)| weighted_index(ts))
            .collect::<Result<Vec<_>>>()?;
        let s = start_sampler.sample(&mut rng);
        info!(
            nrow = grid.nrow(),
            ncol = grid.ncol(),
            is_slippery,
            "created frozen lake"
        );

        Ok(Self {
            grid,
            is_slippery,
            transitions,
            initial_state_distrib,
            start_sampler,
            samplers,
            observation_mode: ObservationMode::default(),
            s,
            last_action: None,
            rng,
        })
    }

    pub fn with_observation_mode(mut self, observation_mode: ObservationMode) -> Self {
        self.observation_mode = observation_mode;
        self
    }

    /// Puts the agent back on a start tile. A seed reseeds the environment's generator.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.s = self.start_sampler.sample(&mut self.rng);
        self.last_action = None;

        self.observation()
    }

    /// [`FrozenLake::reset`] plus step details. Starting is always certain.
    pub fn reset_with_info(&mut self, seed: Option<u64>) -> (Observation, StepDetails) {
        (self.reset(seed), StepDetails { prob: 1. })
    }

    pub fn step(&mut self, a: Action) -> StepInfo {
        let i = self.samplers[self.s * Action::ALL.len() + a.index()].sample(&mut self.rng);
        let t = self.transitions.outcomes(self.s, a)[i];
        trace!(from = self.s, action = a.name(), to = t.next_state, "step");

        self.s = t.next_state;
        self.last_action = Some(a);

        StepInfo {
            observation: self.observation(),
            reward: t.reward,
            truncated: false,
            terminated: t.done,
            info: StepDetails {
                prob: t.probability,
            },
        }
    }

    /// [`FrozenLake::step`] for raw action indices.
    pub fn step_discrete(&mut self, a: Discrete) -> Result<StepInfo> {
        let a = Action::try_from(a)?;
        Ok(self.step(a))
    }

    pub fn observation(&self) -> Observation {
        match self.observation_mode {
            ObservationMode::HoleMask => Observation::HoleMask(self.mask_at(self.s)),
            ObservationMode::HoleMaskAndGoalDirection => Observation::HoleMaskAndGoalDirection(
                self.mask_at(self.s),
                self.direction_at(self.s),
            ),
            ObservationMode::Position => Observation::Position(self.s),
        }
    }

    /// Holes next to `s`. Neighbours outside the lake count as solid ice.
    /// `None` when `s` is not a state of the lake.
    pub fn hole_mask(&self, s: Discrete) -> Option<u8> {
        (s < self.grid.n_s()).then(|| self.mask_at(s))
    }

    /// Direction along the axis with the larger offset to the goal. Ties go
    /// to the row axis; standing on the goal reports `Left`.
    pub fn goal_direction(&self, s: Discrete) -> Option<Action> {
        (s < self.grid.n_s()).then(|| self.direction_at(s))
    }

    fn mask_at(&self, s: Discrete) -> u8 {
        let grid = &self.grid;
        let (row, col) = grid.to_rc(s);
        let mut mask = 0b0000;

        if col > 0 && grid.is_hole(row, col - 1) {
            mask |= 0b0001;
        }
        if row + 1 < grid.nrow() && grid.is_hole(row + 1, col) {
            mask |= 0b0010;
        }
        if col + 1 < grid.ncol() && grid.is_hole(row, col + 1) {
            mask |= 0b0100;
        }
        if row > 0 && grid.is_hole(row - 1, col) {
            mask |= 0b1000;
        }

        mask
    }

    fn direction_at(&self, s: Discrete) -> Action {
        let (row, col) = self.grid.to_rc(s);
        let (goal_row, goal_col) = self.grid.to_rc(self.grid.goal());
        let dr = goal_row as isize - row as isize;
        let dc = goal_col as isize - col as isize;

        if dr.abs() >= dc.abs() {
            match dr.signum() {
                -1 => Action::Up,
                1 => Action::Down,
                _ => Action::Left,
            }
        } else if dc < 0 {
            Action::Left
        } else {
            Action::Right
        }
    }

    pub fn observation_space(&self) -> ObsActSpace {
        match self.observation_mode {
            ObservationMode::HoleMask => ObsActSpace::Discrete { n: 16 },
            ObservationMode::HoleMaskAndGoalDirection => ObsActSpace::Tuple {
                spaces: vec![
                    ObsActSpace::Discrete { n: 16 },
                    ObsActSpace::Discrete { n: 4 },
                ],
            },
            ObservationMode::Position => ObsActSpace::Discrete {
                n: self.grid.n_s(),
            },
        }
    }

    pub fn action_space(&self) -> ObsActSpace {
        Action::space()
    }

    pub fn state(&self) -> Discrete {
        self.s
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_slippery(&self) -> bool {
        self.is_slippery
    }

    pub fn observation_mode(&self) -> ObservationMode {
        self.observation_mode
    }

    pub fn transitions(&self) -> Rc<TransitionTable> {
        Rc::clone(&self.transitions)
    }

    pub fn initial_state_distrib(&self) -> &[f64] {
        &self.initial_state_distrib
    }
}
