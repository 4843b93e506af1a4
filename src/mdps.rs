use crate::{Action, Discrete, FrozenLake, ObsActSpace, Observation, TransitionTable};
use rand::prelude::*;
use std::rc::Rc;

/// Markov Decision Process - Sutton & Barto 2018.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn transitions(&self) -> Rc<TransitionTable>;

    fn gamma(&self) -> f64;

    /// Expected return of taking `a` in `s`, then following state values `v`.
    /// `None` when `s` is not a state of the MDP.
    fn q(&self, s: Discrete, a: Action, v: &[f64]) -> Option<f64> {
        let gamma = self.gamma();
        let q = self
            .transitions()
            .get(s, a)?
            .iter()
            .map(|t| {
                let future = if t.done { 0. } else { gamma * v[t.next_state] };
                t.probability * (t.reward + future)
            })
            .sum();
        Some(q)
    }
}

/// A lake's dynamics paired with a discount factor.
#[derive(Debug, Clone)]
pub struct LakeMdp {
    gamma: f64,
    transitions: Rc<TransitionTable>,
}

impl LakeMdp {
    pub fn new(env: &FrozenLake, gamma: f64) -> Self {
        Self {
            gamma,
            transitions: env.transitions(),
        }
    }
}

impl Mdp for LakeMdp {
    fn n_s(&self) -> usize {
        self.transitions.n_s()
    }

    fn n_a(&self) -> usize {
        self.transitions.n_a()
    }

    fn transitions(&self) -> Rc<TransitionTable> {
        Rc::clone(&self.transitions)
    }

    fn gamma(&self) -> f64 {
        self.gamma
    }
}

pub trait Policy {
    fn policy(&mut self, s: &Observation) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&Observation) -> Action,
{
    fn policy(&mut self, s: &Observation) -> Action {
        self(s)
    }
}

/// Ignores the observation and picks uniformly among the four moves.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    space: ObsActSpace,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            space: Action::space(),
            rng,
        }
    }
}

impl Policy for RandomPolicy {
    fn policy(&mut self, _s: &Observation) -> Action {
        Action::ALL[self.space.sample(&mut self.rng)[0]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, ObservationMode, MAP_4X4};
    use float_eq::*;

    fn mdp(slippery: bool) -> (FrozenLake, LakeMdp) {
        let grid = Grid::from_desc(&MAP_4X4).unwrap();
        let env = FrozenLake::from_grid(grid, slippery, StdRng::seed_from_u64(0)).unwrap()
            .with_observation_mode(ObservationMode::Position);
        let mdp = LakeMdp::new(&env, 0.9);
        (env, mdp)
    }

    fn value_iteration(mdp: &dyn Mdp, theta: f64) -> Vec<f64> {
        let mut v = vec![0.; mdp.n_s()];
        loop {
            let mut delta: f64 = 0.;
            for s in 0..mdp.n_s() {
                let best = Action::ALL
                    .iter()
                    .filter_map(|&a| mdp.q(s, a, &v))
                    .fold(f64::NEG_INFINITY, f64::max);
                delta = delta.max((best - v[s]).abs());
                v[s] = best;
            }
            if delta < theta {
                return v;
            }
        }
    }

    #[test]
    fn exposes_lake_dimensions() {
        let (_, mdp) = mdp(true);

        assert_eq!(mdp.n_s(), 16);
        assert_eq!(mdp.n_a(), 4);
        assert_float_eq!(mdp.gamma(), 0.9, abs <= 1e-12);
    }

    #[test]
    fn q_discounts_future_value() {
        let (_, mdp) = mdp(false);
        let v = vec![1.; 16];

        // 14 -> 15 is the goal: reward only, nothing after.
        assert_float_eq!(mdp.q(14, Action::Right, &v).unwrap(), 1., abs <= 1e-12);
        // 0 -> 1 is plain ice.
        assert_float_eq!(mdp.q(0, Action::Right, &v).unwrap(), 0.9, abs <= 1e-12);
        // Falling in a hole.
        assert_float_eq!(mdp.q(1, Action::Down, &v).unwrap(), -1., abs <= 1e-12);
        // Terminal tiles are worth nothing.
        assert_float_eq!(mdp.q(5, Action::Up, &v).unwrap(), 0., abs <= 1e-12);
        assert_eq!(mdp.q(16, Action::Up, &v), None);
    }

    #[test]
    fn greedy_policy_from_values_reaches_goal() {
        let (mut env, mdp) = mdp(false);
        let v = value_iteration(&mdp, 1e-10);
        assert_float_eq!(v[0], 0.9f64.powi(5), abs <= 1e-9);

        let mut greedy = |s: &Observation| {
            let s = s.discrete_value().unwrap();
            let q = |a| mdp.q(s, a, &v).unwrap();
            *Action::ALL
                .iter()
                .max_by(|&&a, &&b| q(a).total_cmp(&q(b)))
                .unwrap()
        };

        env.reset(None);
        let mut obs = env.observation();
        for _ in 0..6 {
            let si = env.step(greedy.policy(&obs));
            obs = si.observation;
            if si.terminated {
                assert_eq!(si.reward, 1.);
                return;
            }
        }
        panic!("greedy policy did not reach the goal");
    }

    #[test]
    fn random_policy_is_reproducible() {
        let obs = Observation::HoleMask(0);
        let mut a = RandomPolicy::new(Some(3));
        let mut b = RandomPolicy::new(Some(3));
        let picks = (0..100).map(|_| a.policy(&obs)).collect::<Vec<_>>();

        assert_eq!(picks, (0..100).map(|_| b.policy(&obs)).collect::<Vec<_>>());
        for action in Action::ALL {
            assert!(picks.contains(&action));
        }
    }
}
