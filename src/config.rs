use crate::{Grid, MapGenerator, ObservationMode, RenderMode, Renderer, Result, HUMAN_RENDER_FPS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Construction parameters, named as FrozenLake-v1 names its kwargs.
///
/// `desc` wins over `map_name`; with neither, a `map_size` lake is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrozenLakeConfig {
    pub desc: Option<Vec<String>>,
    pub map_name: Option<String>,
    pub is_slippery: bool,
    pub map_size: usize,
    pub frozen_p: f64,
    pub observation_mode: ObservationMode,
    pub seed: Option<u64>,
    pub max_map_attempts: Option<usize>,
    pub render_mode: Option<RenderMode>,
    /// Pace of `human` frames. Zero draws them unpaced.
    pub render_fps: u32,
}

impl Default for FrozenLakeConfig {
    fn default() -> Self {
        Self {
            desc: None,
            map_name: None,
            is_slippery: true,
            map_size: 8,
            frozen_p: 0.8,
            observation_mode: ObservationMode::default(),
            seed: None,
            max_map_attempts: None,
            render_mode: None,
            render_fps: HUMAN_RENDER_FPS,
        }
    }
}

impl FrozenLakeConfig {
    /// Parses `("is_slippery", to_value(false)?)` style pairs. Unknown keys are rejected.
    pub fn from_kwargs(kwargs: &[(&str, Value)]) -> Result<Self> {
        let obj = kwargs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<Map<String, Value>>();

        Ok(serde_json::from_value(Value::Object(obj))?)
    }

    pub fn with_desc<S: AsRef<str>>(mut self, desc: &[S]) -> Self {
        self.desc = Some(desc.iter().map(|r| r.as_ref().to_string()).collect());
        self
    }

    pub fn with_map_name(mut self, map_name: &str) -> Self {
        self.map_name = Some(map_name.to_string());
        self
    }

    pub fn with_slippery(mut self, is_slippery: bool) -> Self {
        self.is_slippery = is_slippery;
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_frozen_p(mut self, frozen_p: f64) -> Self {
        self.frozen_p = frozen_p;
        self
    }

    pub fn with_observation_mode(mut self, observation_mode: ObservationMode) -> Self {
        self.observation_mode = observation_mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_map_attempts(mut self, max_map_attempts: usize) -> Self {
        self.max_map_attempts = Some(max_map_attempts);
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = Some(render_mode);
        self
    }

    pub fn with_render_fps(mut self, render_fps: u32) -> Self {
        self.render_fps = render_fps;
        self
    }

    pub fn grid<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid> {
        match (&self.desc, &self.map_name) {
            (Some(desc), _) => Grid::from_desc(desc.as_slice()),
            (None, Some(name)) => Grid::preset(name),
            (None, None) => MapGenerator::new(self.map_size, self.frozen_p)
                .with_max_attempts(self.max_map_attempts)
                .generate(rng),
        }
    }

    /// Renderer for the configured `render_mode`, if one was asked for.
    pub fn renderer(&self) -> Option<Renderer> {
        self.render_mode
            .map(|mode| Renderer::new(mode).with_fps(Some(self.render_fps)))
    }
}
