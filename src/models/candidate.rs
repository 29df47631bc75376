use super::{NON_CORNER_COUNT, Raster};

/// One reconstructed image in the permutation sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position in enumeration order (0-119)
    pub index: usize,
    /// Source slot for each non-corner slot
    pub order: [usize; NON_CORNER_COUNT],
    /// The reassembled 33x33 image
    pub image: Raster,
}

/// Outcome of scanning a single candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Candidate index
    pub index: usize,
    /// Decoded text, if the scanner found a QR code
    pub content: Option<String>,
}

impl ScanResult {
    /// Whether the scan produced text
    pub fn is_success(&self) -> bool {
        self.content.is_some()
    }

    /// Keep only successful scans
    pub fn into_success(self) -> Option<SuccessfulScan> {
        self.content.map(|content| SuccessfulScan {
            index: self.index,
            content,
        })
    }
}

/// A candidate that decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessfulScan {
    /// Candidate index
    pub index: usize,
    /// Decoded text
    pub content: String,
}
