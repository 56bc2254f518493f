use crate::error::Result;
use crate::topology::{SolidData, SolidId, TopologyStore};

use super::check_operands;

/// Whether a union may simplify the structure of its result.
///
/// Passed explicitly to every union instead of living on the operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clean {
    /// Flatten nested compounds into one and drop repeated operands.
    #[default]
    Yes,
    /// Keep the result as a binary node over the two operands.
    No,
}

/// Computes the boolean union of two solids.
pub struct Union {
    solid_a: SolidId,
    solid_b: SolidId,
    clean: Clean,
}

impl Union {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self {
            solid_a,
            solid_b,
            clean: Clean::default(),
        }
    }

    /// Sets the clean mode for this union.
    #[must_use]
    pub fn with_clean(mut self, clean: Clean) -> Self {
        self.clean = clean;
        self
    }

    /// Executes the union, creating the result solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if either operand is not in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        check_operands(store, self.solid_a, self.solid_b)?;

        let children = match self.clean {
            Clean::No => vec![self.solid_a, self.solid_b],
            Clean::Yes => {
                let mut children = Vec::new();
                for operand in [self.solid_a, self.solid_b] {
                    match store.solid(operand)? {
                        SolidData::Compound(nested) => children.extend_from_slice(nested),
                        _ => children.push(operand),
                    }
                }
                let mut seen = std::collections::HashSet::with_capacity(children.len());
                children.retain(|id| seen.insert(*id));
                children
            }
        };

        Ok(store.add_solid(SolidData::Compound(children)))
    }
}
