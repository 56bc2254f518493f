use tracing::warn;

use crate::error::Result;
use crate::geometry::Plane;
use crate::operations::boolean::{Clean, Union};
use crate::operations::shaping::Extrude;
use crate::topology::{SolidId, TopologyStore};

use super::filter::hexagon;
use super::grid::CandidateHex;

/// Prisms built for one height group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSolid {
    /// Union of the group's prisms, `None` if every hexagon failed.
    pub solid: Option<SolidId>,
    pub built: usize,
    pub skipped: usize,
}

/// Extrudes every hexagon of a group by `height` from `plane` and unions
/// them in order.
///
/// A hexagon that cannot be extruded is logged and left out; the rest of the
/// group is still built.
///
/// # Errors
///
/// Returns an error only if a union fails.
pub fn build_group(
    store: &mut TopologyStore,
    plane: &Plane,
    height: f64,
    hexes: &[CandidateHex],
    side_len: f64,
    clean: Clean,
) -> Result<GroupSolid> {
    let mut solid: Option<SolidId> = None;
    let mut built = 0;
    let mut skipped = 0;
    for hex in hexes {
        let profile = hexagon(&hex.center, side_len);
        let prism = match Extrude::new(plane.clone(), profile, height).execute(store) {
            Ok(prism) => prism,
            Err(e) => {
                warn!(
                    x = hex.center.x,
                    y = hex.center.y,
                    error = %e,
                    "could not create hexagon"
                );
                skipped += 1;
                continue;
            }
        };
        built += 1;
        solid = Some(match solid {
            Some(acc) => Union::new(acc, prism).with_clean(clean).execute(store)?,
            None => prism,
        });
    }
    Ok(GroupSolid {
        solid,
        built,
        skipped,
    })
}
