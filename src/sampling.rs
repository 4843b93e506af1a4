use crate::{Error, Result, Transition};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

pub trait Weighted {
    fn p(&self) -> f64;
}

impl Weighted for f64 {
    fn p(&self) -> f64 {
        *self
    }
}

impl Weighted for Transition {
    fn p(&self) -> f64 {
        self.probability
    }
}

/// Reusable sampler over the weights of `items`.
pub fn weighted_index<T: Weighted>(items: &[T]) -> Result<WeightedIndex<f64>> {
    WeightedIndex::new(items.iter().map(|item| item.p()))
        .map_err(|e| Error::InvalidArgument(format!("cannot sample from weights: {e}")))
}

/// Draws one index of `items`, proportionally to their weights.
pub fn categorical_sample<T, R>(items: &[T], rng: &mut R) -> Result<usize>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    Ok(weighted_index(items)?.sample(rng))
}
