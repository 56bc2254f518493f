use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::error::{OperationError, Result, TextureError};
use crate::math::Point3;
use crate::merge::{union_hierarchical, union_sequential, MergeOptions};
use crate::operations::boolean::Clean;
use crate::operations::creation::MakeBox;
use crate::progress::{Progress, ProgressEvent};
use crate::topology::{SolidId, TopologyStore};

/// Row-major grid of luminance levels, row 0 at the top.
///
/// Images are decoded and quantized by the caller; the relief raises one
/// box per pixel in proportion to its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGrid {
    rows: usize,
    cols: usize,
    levels: Vec<u32>,
}

impl LevelGrid {
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if either dimension is zero
    /// or `levels` does not hold `rows × cols` values.
    pub fn new(rows: usize, cols: usize, levels: Vec<u32>) -> Result<Self> {
        if rows == 0 || cols == 0 || levels.len() != rows * cols {
            return Err(OperationError::InvalidInput(format!(
                "level grid {rows}x{cols} needs {} values, got {}",
                rows * cols,
                levels.len()
            ))
            .into());
        }
        Ok(Self { rows, cols, levels })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Level at `(row, col)`, `None` outside the grid.
    #[must_use]
    pub fn level(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.levels.get(row * self.cols + col).copied()
    }

    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.levels.iter().copied().max().unwrap_or(0)
    }

    /// Swaps dark and bright: every level becomes `max_level - level`.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let max = self.max_level();
        Self {
            rows: self.rows,
            cols: self.cols,
            levels: self.levels.iter().map(|&l| max - l).collect(),
        }
    }
}

/// Size and depth range of a relief.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliefParams {
    pub width: f64,
    pub height: f64,
    /// Depth of level 0.
    pub min_depth: f64,
    /// Depth of the grid's highest level.
    pub max_depth: f64,
    /// Makes the darkest pixels the tallest.
    pub invert: bool,
}

impl Default for ReliefParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            min_depth: 0.2,
            max_depth: 5.0,
            invert: false,
        }
    }
}

impl ReliefParams {
    /// # Errors
    ///
    /// Returns [`TextureError::InvalidParameter`] for a non-positive size, a
    /// negative `min_depth` or a `max_depth` not above `min_depth`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |name: &'static str, value: f64, reason: &'static str| -> Result<()> {
            Err(TextureError::InvalidParameter {
                name,
                value,
                reason,
            }
            .into())
        };
        if !(self.width.is_finite() && self.width > 0.0) {
            return invalid("width", self.width, "must be positive");
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return invalid("height", self.height, "must be positive");
        }
        if !(self.min_depth.is_finite() && self.min_depth >= 0.0) {
            return invalid("min_depth", self.min_depth, "must be non-negative");
        }
        if !(self.max_depth.is_finite() && self.max_depth > self.min_depth) {
            return invalid("max_depth", self.max_depth, "must exceed min_depth");
        }
        Ok(())
    }
}

/// A pixel box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub solid: SolidId,
    pub row: usize,
    pub col: usize,
    pub depth: f64,
}

/// Depth of every pixel, row-major.
///
/// Levels scale linearly from `min_depth` at 0 to `max_depth` at the grid's
/// highest level; a grid of all zeros stays at `min_depth`.
#[must_use]
pub fn tile_depths(grid: &LevelGrid, params: &ReliefParams) -> Vec<f64> {
    let grid = if params.invert {
        grid.inverted()
    } else {
        grid.clone()
    };
    let max_level = grid.max_level();
    let per_level = if max_level > 0 {
        (params.max_depth - params.min_depth) / f64::from(max_level)
    } else {
        0.0
    };
    grid.levels
        .iter()
        .map(|&level| params.min_depth + f64::from(level) * per_level)
        .collect()
}

/// Builds one box per pixel, centered on the origin and standing on z = 0.
///
/// Pixels whose depth is zero have no volume and get no tile.
///
/// # Errors
///
/// Returns an error if `params` is invalid.
pub fn create_base_tiles(
    store: &mut TopologyStore,
    grid: &LevelGrid,
    params: &ReliefParams,
) -> Result<Vec<Tile>> {
    params.validate()?;
    #[allow(clippy::cast_precision_loss)]
    let (rows, cols) = (grid.rows as f64, grid.cols as f64);
    let pixel_w = params.width / cols;
    let pixel_h = params.height / rows;

    let depths = tile_depths(grid, params);
    let mut tiles = Vec::with_capacity(depths.len());
    let mut flat = 0;
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let depth = depths[row * grid.cols + col];
            if depth <= 0.0 {
                flat += 1;
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let (i, j) = (row as f64, col as f64);
            let x = (j - cols / 2.0 + 0.5) * pixel_w;
            let y = (rows / 2.0 - i - 0.5) * pixel_h;
            let solid = MakeBox::new(
                Point3::new(x - pixel_w / 2.0, y - pixel_h / 2.0, 0.0),
                Point3::new(x + pixel_w / 2.0, y + pixel_h / 2.0, depth),
            )
            .execute(store)?;
            tiles.push(Tile {
                solid,
                row,
                col,
                depth,
            });
        }
    }
    debug!(tiles = tiles.len(), flat, "created base tiles");
    Ok(tiles)
}

/// Groups tiles into 4-connected regions of equal depth.
///
/// A region grows from its first tile and takes every neighbor whose depth
/// is within `tolerance` of that tile's. Returns indices into `tiles`.
#[must_use]
pub fn group_adjacent_tiles(tiles: &[Tile], tolerance: f64) -> Vec<Vec<usize>> {
    let by_cell: HashMap<(usize, usize), usize> = tiles
        .iter()
        .enumerate()
        .map(|(i, t)| ((t.row, t.col), i))
        .collect();
    let mut visited = vec![false; tiles.len()];
    let mut groups = Vec::new();

    for seed in 0..tiles.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let depth = tiles[seed].depth;
        let mut group = vec![seed];
        let mut queue = VecDeque::from([seed]);
        while let Some(current) = queue.pop_front() {
            let (r, c) = (tiles[current].row, tiles[current].col);
            let neighbors = [
                r.checked_sub(1).map(|r| (r, c)),
                Some((r + 1, c)),
                c.checked_sub(1).map(|c| (r, c)),
                Some((r, c + 1)),
            ];
            for cell in neighbors.into_iter().flatten() {
                let Some(&next) = by_cell.get(&cell) else {
                    continue;
                };
                if !visited[next] && (tiles[next].depth - depth).abs() <= tolerance {
                    visited[next] = true;
                    group.push(next);
                    queue.push_back(next);
                }
            }
        }
        groups.push(group);
    }
    groups
}

/// Unions each region from [`group_adjacent_tiles`] into one solid.
///
/// # Errors
///
/// Returns an error if any union fails.
pub fn merge_adjacent_tiles(
    store: &mut TopologyStore,
    tiles: &[Tile],
    tolerance: f64,
    clean: Clean,
) -> Result<Vec<SolidId>> {
    let groups = group_adjacent_tiles(tiles, tolerance);
    let mut merged = Vec::with_capacity(groups.len());
    for group in &groups {
        let solids: Vec<SolidId> = group.iter().map(|&i| tiles[i].solid).collect();
        merged.extend(union_sequential(store, &solids, clean)?);
    }
    debug!(tiles = tiles.len(), groups = merged.len(), "merged adjacent tiles");
    Ok(merged)
}

/// Builds the full relief for a level grid.
///
/// Returns `None` if no pixel has depth.
///
/// # Errors
///
/// Returns an error if `params` or `options` are invalid or a union fails.
pub fn relief_from_levels(
    store: &mut TopologyStore,
    grid: &LevelGrid,
    params: &ReliefParams,
    options: &MergeOptions,
    progress: &mut dyn Progress,
) -> Result<Option<SolidId>> {
    options.validate()?;
    let tiles = create_base_tiles(store, grid, params)?;
    progress.report(&ProgressEvent::new("tiles", tiles.len(), tiles.len()));
    let solids: Vec<SolidId> = tiles.iter().map(|t| t.solid).collect();
    union_hierarchical(store, &solids, options, progress)
}
