use crate::math::polygon_2d::Bounds2;
use crate::math::Point2;

/// A hexagon position considered for the texture, in face-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateHex {
    pub center: Point2,
    pub row: usize,
    pub col: usize,
}

/// Staggered grid of hexagon centers covering a face's projected extent.
///
/// Rows advance by half a side length and odd rows shift right by half a
/// column, so neighboring rows interleave. Row 0, column 0 sits on the
/// lower-left corner of the extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    /// Lower-left corner of the boundary's extent.
    pub origin: Point2,
    pub rows: usize,
    pub cols: usize,
    pub x_spacing: f64,
    pub y_spacing: f64,
    pub width: f64,
    pub height: f64,
}

impl HexGrid {
    /// Lays a grid over `boundary`, given in the face frame.
    ///
    /// Returns `None` for an empty boundary.
    #[must_use]
    pub fn new(boundary: &[Point2], hex_side_len: f64, spacing_coefficient: f64) -> Option<Self> {
        let bounds = Bounds2::from_points(boundary)?;
        let width = bounds.width();
        let height = bounds.height();
        let x_spacing = hex_side_len * 3.0_f64.sqrt() * spacing_coefficient;
        let y_spacing = hex_side_len * 0.5 * spacing_coefficient;
        Some(Self {
            origin: bounds.min,
            rows: cells(height, y_spacing) + 1,
            cols: cells(width, x_spacing) + 1,
            x_spacing,
            y_spacing,
            width,
            height,
        })
    }

    /// Number of candidate positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidate at `(row, col)`.
    #[must_use]
    pub fn candidate(&self, row: usize, col: usize) -> CandidateHex {
        #[allow(clippy::cast_precision_loss)]
        let (r, c) = (row as f64, col as f64);
        let mut x = self.origin.x + c * self.x_spacing;
        if row % 2 == 1 {
            x += self.x_spacing / 2.0;
        }
        let y = self.origin.y + r * self.y_spacing;
        CandidateHex {
            center: Point2::new(x, y),
            row,
            col,
        }
    }

    /// All candidates in row-major order.
    pub fn candidates(&self) -> impl Iterator<Item = CandidateHex> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.candidate(row, col)))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells(extent: f64, spacing: f64) -> usize {
    (extent / spacing).ceil().max(0.0) as usize
}
