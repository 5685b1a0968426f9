use ndarray::{Array2, ArrayView3};

/// A decoded photograph: contiguous interleaved bytes in row-major order.
///
/// Supports 1 (gray), 3 (RGB) or 4 (RGBA) channels. Decoding happens at the
/// I/O boundary; scorers only see this type.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Single-channel intensity plane, shape `(height, width)`.
    ///
    /// Color frames use the Rec. 601 luma weights, rounded to 8-bit levels
    /// the way common grayscale conversions store them. Alpha is ignored.
    pub fn to_luma(&self) -> Array2<f64> {
        let src = self.as_ndarray();
        let (h, w) = (self.height as usize, self.width as usize);
        if self.channels < 3 {
            return Array2::from_shape_fn((h, w), |(y, x)| src[[y, x, 0]] as f64);
        }
        Array2::from_shape_fn((h, w), |(y, x)| {
            let r = src[[y, x, 0]] as f64;
            let g = src[[y, x, 1]] as f64;
            let b = src[[y, x, 2]] as f64;
            (0.299 * r + 0.587 * g + 0.114 * b).round()
        })
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
