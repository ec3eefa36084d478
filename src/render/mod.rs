//! Symbol rendering
//!
//! All output formats are built from one walk over the module grid:
//! [`transform_rows`] visits every module of the symbol plus a white quiet
//! zone and hands it to a per-format mapping function.
//! - Text (terminal glyphs)
//! - SVG (one path of unit squares)
//! - Raster (1 pixel per module)

/// Raster image output
pub mod raster;
/// SVG document output
pub mod svg;
/// Terminal text output
pub mod text;

use crate::error::UpnError;
use crate::models::{ModuleGrid, QrSymbol};

/// Square grid of modules that can be rendered
pub trait Grid {
    /// Side length in modules
    fn size(&self) -> usize;

    /// Module at (x, y), true = black; coordinates outside the grid are white
    fn module(&self, x: i32, y: i32) -> bool;
}

impl Grid for ModuleGrid {
    fn size(&self) -> usize {
        ModuleGrid::size(self)
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.get(x, y)
    }
}

impl Grid for QrSymbol {
    fn size(&self) -> usize {
        self.modules.size()
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules.get(x, y)
    }
}

impl Grid for qrcodegen::QrCode {
    fn size(&self) -> usize {
        qrcodegen::QrCode::size(self).max(0) as usize
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.get_module(x, y)
    }
}

/// Reject negative quiet-zone widths
pub fn check_border(border: i32) -> Result<usize, UpnError> {
    usize::try_from(border).map_err(|_| UpnError::InvalidBorder(border))
}

/// Side length of the rendered output
pub fn output_size<G: Grid + ?Sized>(grid: &G, border: usize) -> usize {
    grid.size() + 2 * border
}

/// Lazily map every module (plus border) row by row
///
/// Rows run from `y = -border` to `size + border - 1`, and each row from
/// `x = -border` to `size + border - 1`. Border modules are white. The iterator
/// can be cloned to walk the grid again.
pub fn transform_rows<'a, G, T, F>(
    grid: &'a G,
    border: usize,
    f: F,
) -> impl Iterator<Item = Vec<T>> + Clone + 'a
where
    G: Grid + ?Sized,
    T: 'a,
    F: Fn(i32, i32, bool) -> T + Clone + 'a,
{
    let start = -(border as i32);
    let end = (grid.size() + border) as i32;
    (start..end).map(move |y| (start..end).map(|x| f(x, y, grid.module(x, y))).collect())
}

/// Map every module (plus border) into a row-major 2D vector
pub fn transform<G, T, F>(grid: &G, border: usize, f: F) -> Vec<Vec<T>>
where
    G: Grid + ?Sized,
    F: Fn(i32, i32, bool) -> T + Clone,
{
    transform_rows(grid, border, f).collect()
}
