//! Single-channel binary mask produced by colour segmentation.
//!
//! Values are stored as `u8` in `{0, 1}` so masks can be scaled directly into
//! display channels.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order, values in `{0, 1}`
    pub data: Vec<u8>,
}

impl BinaryMask {
    /// Construct an all-zero mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != 0
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let i = self.idx(x, y);
        self.data[i] = u8::from(on);
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

impl crate::image::traits::ImageView for BinaryMask {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for BinaryMask {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
