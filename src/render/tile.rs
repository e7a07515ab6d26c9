use crate::foundation::error::{TileshadeError, TileshadeResult};

/// Half-open, axis-aligned pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Inclusive start column.
    pub x0: u32,
    /// Inclusive start row.
    pub y0: u32,
    /// Exclusive end column.
    pub x1: u32,
    /// Exclusive end row.
    pub y1: u32,
}

impl Tile {
    /// Tile covering `[x0, x1) x [y0, y1)`.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Number of pixels covered.
    pub fn area(self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// `true` when the tile covers no pixel.
    pub fn is_empty(self) -> bool {
        self.area() == 0
    }

    /// `true` when `(x, y)` lies inside the tile.
    pub fn contains(self, x: u32, y: u32) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }
}

/// How the image domain is split into tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartitionScheme {
    /// One full-height strip per worker along x.
    #[default]
    VerticalStrips,
    /// One full-width strip per worker along y.
    HorizontalStrips,
    /// `columns x rows` tiles, independent of the worker count.
    Grid {
        /// Splits along x.
        columns: u32,
        /// Splits along y.
        rows: u32,
    },
}

/// Split `[0, len)` into `parts` consecutive spans.
///
/// Every span has length `len / parts` except the last, which absorbs the remainder. `parts`
/// must be non-zero.
pub fn split_span(len: u32, parts: u32) -> Vec<(u32, u32)> {
    debug_assert!(parts > 0);
    let stride = len / parts;
    (0..parts)
        .map(|i| {
            let start = i * stride;
            let end = if i + 1 == parts { len } else { start + stride };
            (start, end)
        })
        .collect()
}

/// Partition `[0, width) x [0, height)` into tiles, in row-then-column order.
///
/// The result is an exact partition: pairwise disjoint and covering every pixel. Strips may be
/// empty when there are more workers than columns (or rows).
pub fn partition(
    width: u32,
    height: u32,
    scheme: PartitionScheme,
    workers: usize,
) -> TileshadeResult<Vec<Tile>> {
    let workers = u32::try_from(workers)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| TileshadeError::validation(format!("invalid worker count {workers}")))?;

    let (columns, rows) = match scheme {
        PartitionScheme::VerticalStrips => (workers, 1),
        PartitionScheme::HorizontalStrips => (1, workers),
        PartitionScheme::Grid { columns, rows } => {
            if columns == 0 || rows == 0 {
                return Err(TileshadeError::validation(
                    "grid partition needs at least one column and one row",
                ));
            }
            (columns, rows)
        }
    };

    let xs = split_span(width, columns);
    let ys = split_span(height, rows);
    let mut tiles = Vec::with_capacity(xs.len() * ys.len());
    for &(y0, y1) in &ys {
        for &(x0, x1) in &xs {
            tiles.push(Tile::new(x0, y0, x1, y1));
        }
    }
    Ok(tiles)
}

#[cfg(test)]
#[path = "../../tests/unit/render/tile.rs"]
mod tests;
