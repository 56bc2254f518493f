mod intersect_op;
mod subtract;
mod union;

pub use intersect_op::Intersect;
pub use subtract::Subtract;
pub use union::{Clean, Union};

use crate::error::Result;
use crate::topology::{SolidId, TopologyStore};

/// Fails unless both operands are alive in the store.
fn check_operands(store: &TopologyStore, a: SolidId, b: SolidId) -> Result<()> {
    store.solid(a)?;
    store.solid(b)?;
    Ok(())
}
