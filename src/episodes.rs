use crate::{Discrete, FrozenLake, Policy};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpisodeEvent {
    pub s: Vec<Discrete>,
    pub r: f64,
}

/// Observations and rewards of one run. The first event is the reset
/// observation with zero reward.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Episode {
    pub events: Vec<EpisodeEvent>,
    pub terminated: bool,
    pub truncated: bool,
}

impl Episode {
    pub fn total_reward(&self) -> f64 {
        self.events.iter().map(|e| e.r).sum()
    }

    /// Number of steps taken.
    pub fn len(&self) -> usize {
        self.events.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resets `env` and follows `policy` until a terminal tile or `max_steps`.
pub fn run_episode<P: Policy + ?Sized>(
    env: &mut FrozenLake,
    policy: &mut P,
    max_steps: usize,
    seed: Option<u64>,
) -> Episode {
    let mut obs = env.reset(seed);
    let mut events = vec![EpisodeEvent {
        s: obs.items(),
        r: Default::default(),
    }];

    let mut terminated = false;
    for _ in 0..max_steps {
        let si = env.step(policy.policy(&obs));
        events.push(EpisodeEvent {
            s: si.observation.items(),
            r: si.reward,
        });
        obs = si.observation;
        if si.terminated {
            terminated = true;
            break;
        }
    }

    let episode = Episode {
        events,
        terminated,
        truncated: !terminated,
    };
    debug!(
        steps = episode.len(),
        reward = episode.total_reward(),
        terminated,
        "episode finished"
    );
    episode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Grid, Observation, ObservationMode, RandomPolicy, MAP_4X4};
    use rand::prelude::*;

    fn lake(slippery: bool) -> FrozenLake {
        let grid = Grid::from_desc(&MAP_4X4).unwrap();
        FrozenLake::from_grid(grid, slippery, StdRng::seed_from_u64(0)).unwrap()
            .with_observation_mode(ObservationMode::Position)
    }

    #[test]
    fn scripted_run_reaches_goal() {
        let mut env = lake(false);
        let mut script = [
            Action::Down,
            Action::Down,
            Action::Right,
            Action::Down,
            Action::Right,
            Action::Right,
        ]
        .into_iter();
        let mut policy = |_: &Observation| script.next().unwrap_or(Action::Left);

        let ep = run_episode(&mut env, &mut policy, 100, None);

        let states = ep.events.iter().map(|e| e.s[0]).collect::<Vec<_>>();
        assert_eq!(states, vec![0, 4, 8, 9, 13, 14, 15]);
        assert_eq!(ep.len(), 6);
        assert_eq!(ep.total_reward(), 1.);
        assert!(ep.terminated);
        assert!(!ep.truncated);
    }

    #[test]
    fn step_limit_truncates() {
        let mut env = lake(false);
        let mut policy = |_: &Observation| Action::Up;

        let ep = run_episode(&mut env, &mut policy, 5, None);

        assert_eq!(ep.len(), 5);
        assert!(ep.truncated);
        assert!(!ep.terminated);
        assert_eq!(ep.total_reward(), 0.);
    }

    #[test]
    fn random_episodes_end_on_terminal_tiles() {
        let mut env = lake(true);
        let mut policy = RandomPolicy::new(Some(2718));

        for i in 0..20 {
            let ep = run_episode(&mut env, &mut policy, 1000, Some(i));
            assert!(ep.terminated);
            let last = ep.events.last().unwrap();
            assert!(env.grid().tile_at(last.s[0]).is_terminal());
            assert!(last.r == 1. || last.r == -1.);
        }
    }
}
