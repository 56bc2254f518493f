use crate::error::Result;
use crate::topology::{SolidData, SolidId, TopologyStore};

use super::check_operands;

/// Computes the boolean difference `solid_a - solid_b`.
pub struct Subtract {
    solid_a: SolidId,
    solid_b: SolidId,
}

impl Subtract {
    /// Creates a new `Subtract` operation.
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the subtraction, creating the result solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if either operand is not in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        check_operands(store, self.solid_a, self.solid_b)?;
        Ok(store.add_solid(SolidData::Difference(self.solid_a, self.solid_b)))
    }
}
