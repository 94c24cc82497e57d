//! Dense 2-D grids
//!
//! [`Grid`] is the single container type behind every image in the
//! pipeline. Samples are stored row-major with no padding, so index
//! `y * width + x` addresses pixel `(x, y)`.
//!
//! # Ownership model
//!
//! Stages take `&Grid<T>` and return a freshly allocated `Grid<U>`.
//! Mutating accessors exist for builders (decoders, fixtures) that fill a
//! grid before handing it on.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Decoded color image.
pub type ColorGrid = Grid<Rgb>;

/// Single-channel 8-bit intensity image.
pub type GrayGrid = Grid<u8>;

/// Binary foreground mask; `true` marks a candidate object pixel.
pub type BinaryMask = Grid<bool>;

/// Euclidean distance to the nearest background pixel (0 on background).
pub type DistanceField = Grid<f32>;

/// Region labels; 0 is background, positive values identify regions.
pub type LabelGrid = Grid<u32>;

/// A dense, row-major 2-D grid of samples.
///
/// # Examples
///
/// ```
/// use rockcount_core::{BinaryMask, Grid};
///
/// let mut mask: BinaryMask = Grid::new(4, 3).unwrap();
/// mask.set(1, 2, true).unwrap();
/// assert_eq!(mask.get(1, 2), Some(true));
/// assert_eq!(mask.get(4, 0), None);
/// assert_eq!(mask.count_foreground(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let len = checked_len(width, height)?;
        if data.len() != len {
            return Err(Error::BufferSizeMismatch {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Result<Self> {
        let len = checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check that `other` has the same dimensions.
    pub fn check_same_size<U: Copy>(&self, other: &Grid<U>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Row-major offset of `(x, y)`. The caller guarantees bounds.
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether the signed coordinate lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Sample at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[self.index_of(x, y)])
        } else {
            None
        }
    }

    /// Sample at `(x, y)` without an `Option`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[self.index_of(x, y)]
    }

    /// Set the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside the grid.
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index_of(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Row-major sample buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every sample, producing a grid of the same size.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

impl Grid<bool> {
    /// Number of foreground (`true`) pixels.
    pub fn count_foreground(&self) -> u64 {
        self.data.iter().filter(|&&v| v).count() as u64
    }

    /// `true` if no pixel is foreground.
    pub fn is_empty_mask(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// `true` if every pixel is foreground.
    pub fn is_full_mask(&self) -> bool {
        self.data.iter().all(|&v| v)
    }

    /// Pixel-wise complement.
    pub fn invert(&self) -> Self {
        self.map(|v| !v)
    }
}

impl Grid<u32> {
    /// Largest label present (0 for an all-background grid).
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}
