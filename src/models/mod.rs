pub mod block;
pub mod candidate;
pub mod raster;

pub use block::{BLOCK_SIZE, BlockGrid, BlockPosition, GRID_CELLS, IMAGE_SIZE, NON_CORNER_COUNT};
pub use candidate::{Candidate, ScanResult, SuccessfulScan};
pub use raster::Raster;
