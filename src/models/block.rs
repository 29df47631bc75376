use super::Raster;

/// Side length of one grid block in pixels
pub const BLOCK_SIZE: u32 = 11;
/// Blocks per grid row and column
pub const GRID_CELLS: usize = 3;
/// Side length of the working image in pixels
pub const IMAGE_SIZE: u32 = BLOCK_SIZE * GRID_CELLS as u32;
/// Number of blocks that get reordered
pub const NON_CORNER_COUNT: usize = 5;

/// One cell of the 3x3 block grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockPosition {
    /// Row 0, column 0
    TopLeft,
    /// Row 0, column 1
    TopCenter,
    /// Row 0, column 2
    TopRight,
    /// Row 1, column 0
    MiddleLeft,
    /// Row 1, column 1
    MiddleCenter,
    /// Row 1, column 2
    MiddleRight,
    /// Row 2, column 0
    BottomLeft,
    /// Row 2, column 1
    BottomCenter,
    /// Row 2, column 2
    BottomRight,
}

impl BlockPosition {
    /// All positions in row-major order
    pub const ALL: [BlockPosition; 9] = [
        BlockPosition::TopLeft,
        BlockPosition::TopCenter,
        BlockPosition::TopRight,
        BlockPosition::MiddleLeft,
        BlockPosition::MiddleCenter,
        BlockPosition::MiddleRight,
        BlockPosition::BottomLeft,
        BlockPosition::BottomCenter,
        BlockPosition::BottomRight,
    ];

    /// The four positions that stay fixed
    pub const CORNERS: [BlockPosition; 4] = [
        BlockPosition::TopLeft,
        BlockPosition::TopRight,
        BlockPosition::BottomLeft,
        BlockPosition::BottomRight,
    ];

    /// The five permuted positions, in slot order
    pub const NON_CORNERS: [BlockPosition; NON_CORNER_COUNT] = [
        BlockPosition::TopCenter,
        BlockPosition::MiddleLeft,
        BlockPosition::MiddleCenter,
        BlockPosition::MiddleRight,
        BlockPosition::BottomCenter,
    ];

    /// Look up the position at a grid cell
    pub fn from_cell(row: usize, col: usize) -> Option<Self> {
        if row >= GRID_CELLS || col >= GRID_CELLS {
            return None;
        }
        Some(Self::ALL[row * GRID_CELLS + col])
    }

    /// Row-major index (0-8)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid row (0-2)
    pub fn row(self) -> usize {
        self.index() / GRID_CELLS
    }

    /// Grid column (0-2)
    pub fn col(self) -> usize {
        self.index() % GRID_CELLS
    }

    /// Whether the block stays fixed across candidates
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            BlockPosition::TopLeft
                | BlockPosition::TopRight
                | BlockPosition::BottomLeft
                | BlockPosition::BottomRight
        )
    }

    /// Pixel coordinates (x, y) of the block's top-left corner
    pub fn origin(self) -> (u32, u32) {
        (self.col() as u32 * BLOCK_SIZE, self.row() as u32 * BLOCK_SIZE)
    }
}

/// A 33x33 image split into nine 11x11 blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrid {
    blocks: [Raster; 9],
    channels: u8,
}

impl BlockGrid {
    /// Split a 33x33 raster into its nine blocks
    ///
    /// Returns `None` if the raster is not exactly 33x33.
    pub fn from_raster(raster: &Raster) -> Option<Self> {
        if raster.width() != IMAGE_SIZE || raster.height() != IMAGE_SIZE {
            return None;
        }
        let blocks = std::array::from_fn(|i| {
            let (x, y) = BlockPosition::ALL[i].origin();
            raster.crop(x, y, BLOCK_SIZE, BLOCK_SIZE)
        });
        Some(Self {
            blocks,
            channels: raster.channels(),
        })
    }

    /// The block stored at `position`
    pub fn block(&self, position: BlockPosition) -> &Raster {
        &self.blocks[position.index()]
    }

    /// Channel count shared by every block
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Build a full image with the non-corner blocks rearranged
    ///
    /// Slot `k` of [`BlockPosition::NON_CORNERS`] receives the original block
    /// from slot `order[k]`. Corners are always copied in place. Returns `None`
    /// if `order` is not a permutation of `0..5`.
    pub fn assemble(&self, order: &[usize; NON_CORNER_COUNT]) -> Option<Raster> {
        let mut seen = [false; NON_CORNER_COUNT];
        for &slot in order {
            if slot >= NON_CORNER_COUNT || seen[slot] {
                return None;
            }
            seen[slot] = true;
        }

        let mut image = Raster::new(IMAGE_SIZE, IMAGE_SIZE, self.channels)?;
        for corner in BlockPosition::CORNERS {
            let (x, y) = corner.origin();
            image.blit(self.block(corner), x, y);
        }
        for (target, &source) in BlockPosition::NON_CORNERS.iter().zip(order) {
            let (x, y) = target.origin();
            image.blit(self.block(BlockPosition::NON_CORNERS[source]), x, y);
        }
        Some(image)
    }

    /// Reassemble the grid in its original arrangement
    pub fn to_raster(&self) -> Option<Raster> {
        self.assemble(&[0, 1, 2, 3, 4])
    }
}
