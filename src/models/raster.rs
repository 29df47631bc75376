use image::{DynamicImage, GenericImageView, ImageBuffer, Luma, LumaA, Rgb, Rgba};

/// Owned 8-bit pixel grid with 1-4 interleaved channels
///
/// Channel layouts follow the `image` crate: 1 = luma, 2 = luma + alpha,
/// 3 = RGB, 4 = RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Raster {
    /// Create a zero-filled raster
    ///
    /// Returns `None` for a channel count outside 1..=4.
    pub fn new(width: u32, height: u32, channels: u8) -> Option<Self> {
        if !(1..=4).contains(&channels) {
            return None;
        }
        let len = width as usize * height as usize * channels as usize;
        Some(Self {
            width,
            height,
            channels,
            data: vec![0; len],
        })
    }

    /// Wrap existing interleaved pixel bytes
    ///
    /// Returns `None` when the channel count is unsupported or `data` has the
    /// wrong length for the given dimensions.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Option<Self> {
        if !(1..=4).contains(&channels) {
            return None;
        }
        if data.len() != width as usize * height as usize * channels as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Copy a decoded image into a raster, keeping its channel count
    ///
    /// Images with more than 8 bits per channel are narrowed to 8 bits.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let (channels, data) = match image.color().channel_count() {
            1 => (1, image.to_luma8().into_raw()),
            2 => (2, image.to_luma_alpha8().into_raw()),
            3 => (3, image.to_rgb8().into_raw()),
            _ => (4, image.to_rgba8().into_raw()),
        };
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Convert back into an `image` crate buffer for encoding
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let data = self.data.clone();
        match self.channels {
            1 => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            2 => ImageBuffer::<LumaA<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageLumaA8),
            3 => ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            4 => ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
            _ => None,
        }
    }

    /// Raster width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of interleaved channels per pixel
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw interleaved pixel bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and return its pixel bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Channel values of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(x, y);
        Some(&self.data[start..start + self.channels as usize])
    }

    /// Copy out the `width` x `height` region whose top-left corner is (x, y)
    ///
    /// The region is clipped to the raster bounds.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Raster {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        let out_w = x_end.saturating_sub(x);
        let out_h = y_end.saturating_sub(y);
        let row_len = out_w as usize * self.channels as usize;

        let mut data = Vec::with_capacity(row_len * out_h as usize);
        for row in y..y_end {
            let start = self.offset(x, row);
            data.extend_from_slice(&self.data[start..start + row_len]);
        }

        Raster {
            width: out_w,
            height: out_h,
            channels: self.channels,
            data,
        }
    }

    /// Paste `src` with its top-left corner at (x, y)
    ///
    /// Pixels falling outside this raster are dropped. Returns `false` without
    /// writing anything if the channel counts differ.
    pub fn blit(&mut self, src: &Raster, x: u32, y: u32) -> bool {
        if src.channels != self.channels {
            return false;
        }
        let x_end = x.saturating_add(src.width).min(self.width);
        let y_end = y.saturating_add(src.height).min(self.height);
        if x_end <= x {
            return true;
        }
        let row_len = (x_end - x) as usize * self.channels as usize;

        for row in y..y_end {
            let dst = self.offset(x, row);
            let src_start = src.offset(0, row - y);
            self.data[dst..dst + row_len].copy_from_slice(&src.data[src_start..src_start + row_len]);
        }
        true
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }
}
