use crate::error::{Result, TextureError};

/// Parameters of a honeycomb texture.
///
/// `hex_side_len` is the hexagon radius (center to vertex). Heights are drawn
/// uniformly from `[hex_height_min, hex_height_max]` and snapped to
/// `height_steps` equal buckets; with one step heights are used as drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct HoneycombTexture {
    pub hex_side_len: f64,
    pub hex_height_min: f64,
    pub hex_height_max: f64,
    pub height_steps: u32,
    pub rotation_degrees: f64,
    pub spacing_coefficient: f64,
    pub random_seed: Option<u64>,
}

impl HoneycombTexture {
    /// Creates a texture with ten height steps, no rotation, unit spacing
    /// and no seed.
    #[must_use]
    pub fn new(hex_side_len: f64, hex_height_min: f64, hex_height_max: f64) -> Self {
        Self {
            hex_side_len,
            hex_height_min,
            hex_height_max,
            height_steps: 10,
            rotation_degrees: 0.0,
            spacing_coefficient: 1.0,
            random_seed: None,
        }
    }

    #[must_use]
    pub fn height_steps(mut self, steps: u32) -> Self {
        self.height_steps = steps;
        self
    }

    #[must_use]
    pub fn rotation_degrees(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    #[must_use]
    pub fn spacing_coefficient(mut self, coefficient: f64) -> Self {
        self.spacing_coefficient = coefficient;
        self
    }

    /// Fixes the random sequence so repeated runs give identical heights.
    #[must_use]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Checks the parameter invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::InvalidParameter`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        let checks: [(&'static str, f64, bool, &'static str); 6] = [
            (
                "hex_side_len",
                self.hex_side_len,
                self.hex_side_len.is_finite() && self.hex_side_len > 0.0,
                "must be positive",
            ),
            (
                "hex_height_min",
                self.hex_height_min,
                self.hex_height_min.is_finite() && self.hex_height_min >= 0.0,
                "must be non-negative",
            ),
            (
                "hex_height_max",
                self.hex_height_max,
                self.hex_height_max.is_finite() && self.hex_height_max >= self.hex_height_min,
                "must not be below hex_height_min",
            ),
            (
                "height_steps",
                f64::from(self.height_steps),
                self.height_steps >= 1,
                "must be at least 1",
            ),
            (
                "rotation_degrees",
                self.rotation_degrees,
                self.rotation_degrees.is_finite(),
                "must be finite",
            ),
            (
                "spacing_coefficient",
                self.spacing_coefficient,
                self.spacing_coefficient.is_finite() && self.spacing_coefficient > 0.0,
                "must be positive",
            ),
        ];
        match checks.into_iter().find(|&(_, _, ok, _)| !ok) {
            Some((name, value, _, reason)) => Err(TextureError::InvalidParameter {
                name,
                value,
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }
}
