use macroquad::prelude::*;

use crate::error::AnimationError;

/// A texture laid out as a fixed grid of equal-size tiles.
///
/// Tiles are numbered row-major from zero: tile `i` sits at row `i / cols`
/// and column `i % cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spritesheet {
    rows: usize,
    cols: usize,
    tile_w: u32,
    tile_h: u32,
}

impl Spritesheet {
    /// Builds a sheet of `rows x cols` tiles of `tile_w x tile_h` pixels.
    ///
    /// Every dimension must be non-zero, the tile count must fit in `usize`
    /// and the pixel extent of the grid must fit in `u32`.
    pub fn new(
        rows: usize,
        cols: usize,
        tile_w: u32,
        tile_h: u32,
    ) -> Result<Self, AnimationError> {
        if rows == 0 || cols == 0 {
            return Err(AnimationError::InvalidSheet(format!(
                "grid must have at least one tile, got {rows}x{cols}"
            )));
        }
        if tile_w == 0 || tile_h == 0 {
            return Err(AnimationError::InvalidSheet(format!(
                "tile size must be non-zero, got {tile_w}x{tile_h}"
            )));
        }
        if rows.checked_mul(cols).is_none() {
            return Err(AnimationError::InvalidSheet(format!(
                "{rows}x{cols} tiles overflow the index range"
            )));
        }
        if pixel_extent(cols, tile_w).is_none() || pixel_extent(rows, tile_h).is_none() {
            return Err(AnimationError::InvalidSheet(format!(
                "{cols}x{rows} tiles of {tile_w}x{tile_h} px overflow the pixel range"
            )));
        }

        Ok(Self {
            rows,
            cols,
            tile_w,
            tile_h,
        })
    }

    /// Number of tile rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tile columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile width in pixels.
    #[inline]
    pub fn tile_width(&self) -> u32 {
        self.tile_w
    }

    /// Tile height in pixels.
    #[inline]
    pub fn tile_height(&self) -> u32 {
        self.tile_h
    }

    /// Total number of tiles, `rows * cols`.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether `index` addresses a tile on this sheet.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.tile_count()
    }

    /// Grid row of tile `index`.
    #[inline]
    pub fn tile_row(&self, index: usize) -> usize {
        index / self.cols
    }

    /// Grid column of tile `index`.
    #[inline]
    pub fn tile_col(&self, index: usize) -> usize {
        index % self.cols
    }

    /// Tile index at grid position `(row, col)`.
    ///
    /// Saturates at `usize::MAX` for positions far off the grid.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row.saturating_mul(self.cols).saturating_add(col)
    }

    /// Wraps a single tile as a one-frame sequence.
    pub fn cell(&self, index: usize) -> Vec<usize> {
        vec![index]
    }

    /// Returns `cells` unchanged after checking every index is on the sheet.
    pub fn cells(&self, cells: Vec<usize>) -> Result<Vec<usize>, AnimationError> {
        self.check_frames(&cells)?;
        Ok(cells)
    }

    pub(crate) fn check_frames(&self, frames: &[usize]) -> Result<(), AnimationError> {
        match frames.iter().find(|&&i| !self.contains(i)) {
            Some(&index) => Err(AnimationError::OutOfRange {
                index,
                tile_count: self.tile_count(),
            }),
            None => Ok(()),
        }
    }

    /// All tiles of grid row `r`, left to right.
    ///
    /// `r` is not bounds-checked; a row past the bottom of the sheet yields
    /// indices that [`Spritesheet::cells`] would reject. Indices saturate
    /// rather than wrap, so a huge `r` gives a shorter run pinned at
    /// `usize::MAX`.
    pub fn row(&self, r: usize) -> Vec<usize> {
        let start = self.index_of(r, 0);
        (start..start.saturating_add(self.cols)).collect()
    }

    /// All tiles of grid column `c`, top to bottom.
    ///
    /// Like [`Spritesheet::row`], `c` is not bounds-checked.
    pub fn col(&self, c: usize) -> Vec<usize> {
        (0..self.rows).map(|r| self.index_of(r, c)).collect()
    }

    /// Pixel position of the top-left corner of tile `index`.
    ///
    /// Only meaningful for indices on the sheet; off-grid rows saturate.
    pub fn tile_origin(&self, index: usize) -> (u32, u32) {
        let x = pixel_extent(self.tile_col(index), self.tile_w).unwrap_or(u32::MAX);
        let y = pixel_extent(self.tile_row(index), self.tile_h).unwrap_or(u32::MAX);
        (x, y)
    }

    /// Source rectangle of tile `index` in texture pixel space.
    pub fn tile_rect(&self, index: usize) -> Result<Rect, AnimationError> {
        self.check_frames(&[index])?;

        let (x, y) = self.tile_origin(index);
        Ok(Rect::new(
            x as f32,
            y as f32,
            self.tile_w as f32,
            self.tile_h as f32,
        ))
    }
}

/// `tiles * tile_px`, or `None` if it leaves `u32`.
fn pixel_extent(tiles: usize, tile_px: u32) -> Option<u32> {
    u32::try_from(tiles).ok()?.checked_mul(tile_px)
}
