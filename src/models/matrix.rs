/// Compact square module grid (true = black, false = white)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    data: Vec<u8>,
}

impl ModuleGrid {
    /// Create an all-white grid with the given side length
    pub fn new(size: usize) -> Self {
        let bytes_needed = (size * size + 7) / 8;
        Self {
            size,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every module
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut grid = Self::new(size);
        for y in 0..size {
            for x in 0..size {
                if f(x, y) {
                    grid.set(x, y, true);
                }
            }
        }
        grid
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get module at (x, y); anything outside the grid is white
    pub fn get(&self, x: i32, y: i32) -> bool {
        let Some((byte_index, bit_index)) = self.locate(x, y) else {
            return false;
        };
        (self.data[byte_index] >> bit_index) & 1 == 1
    }

    /// Set module at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Number of black modules
    pub fn count_black(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn locate(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.size || y >= self.size {
            return None;
        }
        let index = y * self.size + x;
        Some((index / 8, index % 8))
    }
}

impl Default for ModuleGrid {
    fn default() -> Self {
        Self::new(0)
    }
}
