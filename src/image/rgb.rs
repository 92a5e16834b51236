//! Owned three-channel 8-bit image in row-major layout (stride == width).
//!
//! Pixels are stored as `[r, g, b]` triples so rows can be handed out as
//! `&[[u8; 3]]` without reinterpreting the backing bytes.

/// Number of colour channels per pixel.
pub const CHANNELS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of pixels between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<[u8; CHANNELS]>,
}

impl RgbImage {
    /// Construct a black image of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, [0, 0, 0])
    }

    /// Construct an image of size `w × h` with every pixel set to `px`.
    pub fn filled(w: usize, h: usize, px: [u8; CHANNELS]) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![px; w * h],
        }
    }

    /// Build from interleaved `RGBRGB...` bytes. Returns `None` when the byte
    /// count does not match `w * h * 3`.
    pub fn from_interleaved(w: usize, h: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != w * h * CHANNELS {
            return None;
        }
        let data = bytes
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Flatten into interleaved `RGBRGB...` bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.w * self.h * CHANNELS);
        for px in &self.data {
            out.extend_from_slice(px);
        }
        out
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel at (x, y).
    pub fn get(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: usize, y: usize, px: [u8; CHANNELS]) {
        let i = self.idx(x, y);
        self.data[i] = px;
    }

    /// Reallocate to `w × h` black pixels unless the size already matches.
    pub fn ensure_size(&mut self, w: usize, h: usize) {
        if self.w != w || self.h != h {
            *self = Self::new(w, h);
        }
    }
}

impl crate::image::traits::ImageView for RgbImage {
    type Pixel = [u8; CHANNELS];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[[u8; CHANNELS]] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for RgbImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [[u8; CHANNELS]] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
