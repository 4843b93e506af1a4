pub mod config;
pub mod env;
pub mod episodes;
pub mod error;
pub mod map;
pub mod map_generator;
pub mod mdps;
pub mod render;
pub mod sampling;
pub mod transitions;

pub use config::FrozenLakeConfig;
pub use env::{FrozenLake, Observation, ObservationMode, StepDetails, StepInfo};
pub use episodes::{run_episode, Episode, EpisodeEvent};
pub use error::{Error, Result};
pub use map::{Grid, Tile, MAP_4X4, MAP_8X8};
pub use map_generator::{generate_random_map, path_exists, MapGenerator};
pub use mdps::{LakeMdp, Mdp, Policy, RandomPolicy};
pub use render::{RenderFrame, RenderMode, Renderer, HUMAN_RENDER_FPS};
pub use sampling::{categorical_sample, weighted_index, Weighted};
pub use transitions::{Action, Transition, TransitionTable};

use rand::Rng;

pub type Discrete = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObsActSpace {
    /// Refer: https://www.gymlibrary.dev/api/spaces/#discrete
    Discrete { n: Discrete },

    // Refer: https://www.gymlibrary.dev/api/spaces/#tuple
    Tuple { spaces: Vec<ObsActSpace> },
}

impl ObsActSpace {
    /// Number of discrete values per component, flattened in order.
    pub fn sizes(&self) -> Vec<Discrete> {
        match self {
            ObsActSpace::Discrete { n } => vec![*n],
            ObsActSpace::Tuple { spaces } => spaces.iter().flat_map(|s| s.sizes()).collect(),
        }
    }

    pub fn contains(&self, items: &[Discrete]) -> bool {
        let sizes = self.sizes();
        sizes.len() == items.len() && items.iter().zip(sizes).all(|(&x, n)| x < n)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Discrete> {
        self.sizes().into_iter().map(|n| rng.gen_range(0..n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn tuple_space_flattens_components() {
        let space = ObsActSpace::Tuple {
            spaces: vec![ObsActSpace::Discrete { n: 16 }, ObsActSpace::Discrete { n: 4 }],
        };

        assert_eq!(space.sizes(), vec![16, 4]);
        assert!(space.contains(&[15, 3]));
        assert!(!space.contains(&[16, 0]));
        assert!(!space.contains(&[1]));
    }

    #[test]
    fn samples_stay_inside_space() {
        let space = ObsActSpace::Discrete { n: 4 };
        let rng = &mut StdRng::seed_from_u64(2718);
        for _ in 0..100 {
            assert!(space.contains(&space.sample(rng)));
        }
    }
}
