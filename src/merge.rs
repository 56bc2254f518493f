use tracing::debug;

use crate::error::{Result, TextureError};
use crate::operations::boolean::{Clean, Union};
use crate::progress::{Progress, ProgressEvent};
use crate::topology::{SolidId, TopologyStore};

/// Settings for [`union_hierarchical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Operands per accumulator. Must be at least 2.
    pub batch_size: usize,
    /// Clean mode passed to every union.
    pub clean: Clean,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            clean: Clean::Yes,
        }
    }
}

impl MergeOptions {
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn clean(mut self, clean: Clean) -> Self {
        self.clean = clean;
        self
    }

    /// # Errors
    ///
    /// Returns [`TextureError::InvalidParameter`] if `batch_size < 2`, which
    /// would never shrink a level.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size < 2 {
            #[allow(clippy::cast_precision_loss)]
            return Err(TextureError::InvalidParameter {
                name: "batch_size",
                value: self.batch_size as f64,
                reason: "must be at least 2",
            }
            .into());
        }
        Ok(())
    }
}

/// Unions the solids left to right in a single chain.
///
/// # Errors
///
/// Returns an error if any union fails.
pub fn union_sequential(
    store: &mut TopologyStore,
    solids: &[SolidId],
    clean: Clean,
) -> Result<Option<SolidId>> {
    let Some((&first, rest)) = solids.split_first() else {
        return Ok(None);
    };
    let mut acc = first;
    for &solid in rest {
        acc = Union::new(acc, solid).with_clean(clean).execute(store)?;
    }
    Ok(Some(acc))
}

/// Unions the solids level by level in batches of `options.batch_size`.
///
/// Each batch is unioned on its own, then the batch results are unioned the
/// same way until one solid is left, so no accumulator grows past
/// `batch_size` operands.
///
/// No input gives `None`; a single input is returned as is. Union failures
/// propagate.
///
/// # Errors
///
/// Returns an error if the options are invalid or any union fails.
pub fn union_hierarchical(
    store: &mut TopologyStore,
    solids: &[SolidId],
    options: &MergeOptions,
    progress: &mut dyn Progress,
) -> Result<Option<SolidId>> {
    options.validate()?;
    let mut level: Vec<SolidId> = solids.to_vec();
    let mut depth = 0;
    while level.len() > 1 {
        depth += 1;
        let batches = level.len().div_ceil(options.batch_size);
        debug!(depth, operands = level.len(), batches, "merge level");
        let mut next = Vec::with_capacity(batches);
        for (done, batch) in level.chunks(options.batch_size).enumerate() {
            if let Some(merged) = union_sequential(store, batch, options.clean)? {
                next.push(merged);
            }
            progress.report(&ProgressEvent::new("merge", done + 1, batches));
        }
        level = next;
    }
    Ok(level.first().copied())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;
    use crate::operations::query::{classify_point_in_solid, BoundingBox, PointClassification};
    use crate::progress::NoProgress;
    use crate::topology::SolidData;

    fn tiles(store: &mut TopologyStore, n: usize) -> Vec<SolidId> {
        let mut x = 0.0;
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let z = if i % 3 == 0 { 2.0 } else { 1.0 };
            out.push(
                MakeBox::new(Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 1.0, z))
                    .execute(store)
                    .unwrap(),
            );
            x += 1.0;
        }
        out
    }

    fn depth(store: &TopologyStore, id: SolidId) -> usize {
        match store.solid(id).unwrap() {
            SolidData::Compound(children) => {
                1 + children.iter().map(|&c| depth(store, c)).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    #[test]
    fn no_tiles_is_empty() {
        let mut store = TopologyStore::new();
        let merged =
            union_hierarchical(&mut store, &[], &MergeOptions::default(), &mut NoProgress).unwrap();
        assert!(merged.is_none());
    }

    #[test]
    fn single_tile_is_returned_unchanged() {
        let mut store = TopologyStore::new();
        let one = tiles(&mut store, 1);
        let merged =
            union_hierarchical(&mut store, &one, &MergeOptions::default(), &mut NoProgress).unwrap();
        assert_eq!(merged, Some(one[0]));
        assert_eq!(store.solid_count(), 1);
    }

    #[test]
    fn matches_sequential_union() {
        let mut store = TopologyStore::new();
        let parts = tiles(&mut store, 23);
        let options = MergeOptions::default().batch_size(10);
        let batched = union_hierarchical(&mut store, &parts, &options, &mut NoProgress)
            .unwrap()
            .unwrap();
        let chained = union_sequential(&mut store, &parts, Clean::Yes).unwrap().unwrap();

        let a = BoundingBox::new(batched).execute(&store).unwrap();
        let b = BoundingBox::new(chained).execute(&store).unwrap();
        assert_eq!(a, b);

        for x in [0.5, 3.5, 9.5, 10.5, 22.5] {
            for z in [0.5, 1.5] {
                let p = Point3::new(x, 0.5, z);
                assert_eq!(
                    classify_point_in_solid(&p, batched, &store).unwrap(),
                    classify_point_in_solid(&p, chained, &store).unwrap()
                );
            }
        }
        assert_eq!(
            classify_point_in_solid(&Point3::new(23.5, 0.5, 0.5), batched, &store).unwrap(),
            PointClassification::Outside
        );
    }

    #[test]
    fn batches_bound_chain_length() {
        let mut store = TopologyStore::new();
        let parts = tiles(&mut store, 23);
        let options = MergeOptions::default().batch_size(10).clean(Clean::No);
        let batched = union_hierarchical(&mut store, &parts, &options, &mut NoProgress)
            .unwrap()
            .unwrap();
        let chained = union_sequential(&mut store, &parts, Clean::No).unwrap().unwrap();
        // 9 unions inside the first batch, then 2 joining the three batches
        assert_eq!(depth(&store, batched), 11);
        assert_eq!(depth(&store, chained), 22);
    }

    #[test]
    fn reports_progress_per_batch() {
        let mut store = TopologyStore::new();
        let parts = tiles(&mut store, 23);
        let mut events = Vec::new();
        let mut sink = |e: &ProgressEvent| events.push((e.done, e.total));
        union_hierarchical(&mut store, &parts, &MergeOptions::default(), &mut sink).unwrap();
        assert_eq!(events, vec![(1, 3), (2, 3), (3, 3), (1, 1)]);
    }

    #[test]
    fn batch_size_below_two_is_rejected() {
        let mut store = TopologyStore::new();
        let parts = tiles(&mut store, 3);
        let options = MergeOptions::default().batch_size(1);
        assert!(union_hierarchical(&mut store, &parts, &options, &mut NoProgress).is_err());
    }
}
