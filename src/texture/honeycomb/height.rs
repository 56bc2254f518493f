use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::HoneycombTexture;
use super::grid::CandidateHex;

/// Hexagons sharing one discretized height, keyed by that height.
pub type HeightGroups = BTreeMap<OrderedFloat<f64>, Vec<CandidateHex>>;

/// Draws hexagon heights for one face.
pub struct HeightSampler {
    min: f64,
    max: f64,
    steps: u32,
    rng: StdRng,
}

impl HeightSampler {
    /// Seeds from the texture's `random_seed`, or from OS entropy when unset.
    #[must_use]
    pub fn new(texture: &HoneycombTexture) -> Self {
        let rng = match texture.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            min: texture.hex_height_min,
            max: texture.hex_height_max,
            steps: texture.height_steps,
            rng,
        }
    }

    /// A raw uniform sample in `[min, max]`.
    pub fn sample_raw(&mut self) -> f64 {
        if self.max > self.min {
            self.rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    /// A sample snapped to its height step.
    pub fn sample(&mut self) -> f64 {
        let raw = self.sample_raw();
        quantize(raw, self.min, self.max, self.steps)
    }
}

/// Snaps `height` down to the lower edge of its bucket.
///
/// `[min, max]` is split into `steps` equal buckets; `max` itself falls in
/// the last one. With fewer than two steps the height passes through.
#[must_use]
pub fn quantize(height: f64, min: f64, max: f64, steps: u32) -> f64 {
    if steps <= 1 {
        return height;
    }
    let width = (max - min) / f64::from(steps);
    if width <= 0.0 {
        return min;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (((height - min) / width).floor().max(0.0) as u32).min(steps - 1);
    min + f64::from(index) * width
}

/// Pairs every candidate with a sampled height, in candidate order.
pub fn assign_heights(
    candidates: impl IntoIterator<Item = CandidateHex>,
    sampler: &mut HeightSampler,
) -> Vec<(f64, CandidateHex)> {
    candidates
        .into_iter()
        .map(|hex| (sampler.sample(), hex))
        .collect()
}

/// Groups height assignments by height, keeping candidate order within a group.
#[must_use]
pub fn group_by_height(assigned: Vec<(f64, CandidateHex)>) -> HeightGroups {
    assigned
        .into_iter()
        .fold(HeightGroups::new(), |mut groups, (height, hex)| {
            groups.entry(OrderedFloat(height)).or_default().push(hex);
            groups
        })
}
