//! Color samples and intensity conversion.

/// One 3-channel color sample.
///
/// Channel order is fixed to red, green, blue regardless of how the source
/// container stored it; decoders normalise on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Luma weights (ITU-R BT.601), scaled by 2^14 for integer arithmetic.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

impl Rgb {
    /// Create a sample from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral gray sample.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Weighted intensity `0.299 R + 0.587 G + 0.114 B`, rounded to nearest.
    ///
    /// Neutral grays map to themselves exactly.
    #[inline]
    pub fn luma(self) -> u8 {
        let sum = LUMA_R * self.r as u32 + LUMA_G * self.g as u32 + LUMA_B * self.b as u32;
        ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_gray_is_identity() {
        for v in [0u8, 1, 50, 127, 128, 200, 254, 255] {
            assert_eq!(Rgb::gray(v).luma(), v);
        }
    }

    #[test]
    fn test_luma_primaries() {
        // 0.299 * 255 = 76.2, 0.587 * 255 = 149.7, 0.114 * 255 = 29.1
        assert_eq!(Rgb::new(255, 0, 0).luma(), 76);
        assert_eq!(Rgb::new(0, 255, 0).luma(), 150);
        assert_eq!(Rgb::new(0, 0, 255).luma(), 29);
    }
}
