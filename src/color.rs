//! ARGB color values
//!
//! A color value is a `u32` laid out as `0xAARRGGBB`. Everything that touches
//! the pixel buffer speaks this format, and it matches SDL's `ARGB8888`
//! texture layout when the words are viewed as native-endian bytes.

/// Fully opaque alpha
pub const OPAQUE: u8 = 0xff;

pub const BLACK: u32 = 0xff00_0000;
pub const WHITE: u32 = 0xffff_ffff;
pub const TRANSPARENT: u32 = 0x0000_0000;

/// Combine four channels into one ARGB color value
#[inline]
pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

/// Opaque color value from red, green and blue
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    pack(r, g, b, OPAQUE)
}

/// Split a color value into (r, g, b, a). Exact inverse of [`pack`].
#[inline]
pub const fn unpack(cv: u32) -> (u8, u8, u8, u8) {
    let [a, r, g, b] = cv.to_be_bytes();
    (r, g, b, a)
}

#[inline]
pub const fn alpha(cv: u32) -> u8 {
    (cv >> 24) as u8
}

#[inline]
pub const fn red(cv: u32) -> u8 {
    (cv >> 16) as u8
}

#[inline]
pub const fn green(cv: u32) -> u8 {
    (cv >> 8) as u8
}

#[inline]
pub const fn blue(cv: u32) -> u8 {
    cv as u8
}

/// Intensity of a color: the truncated average of r, g and b. Alpha is ignored.
#[inline]
pub fn luminance(cv: u32) -> u8 {
    let (r, g, b, _) = unpack(cv);
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Intensity weighted by alpha, so transparent pixels count as dark
#[inline]
pub fn luminance_with_alpha(cv: u32) -> u8 {
    let (r, g, b, a) = unpack(cv);
    let gray = (r as u16 + g as u16 + b as u16) as f32 / 3.0;
    (gray * (a as f32 / 255.0)) as u8
}

/// Alpha-weighted average of two colors.
///
/// Each channel becomes `(c1 * a1 + c2 * a2) / 2` with the alphas normalized to
/// `[0, 1]`, and the new alpha is the product of the two alphas. This is a
/// symmetric average, not "over" compositing: an operand with alpha 0 adds
/// nothing to the channels but still forces the resulting alpha to 0.
pub fn blend(c1: u32, c2: u32) -> u32 {
    let a1 = alpha(c1) as f32 / 255.0;
    let a2 = alpha(c2) as f32 / 255.0;

    let mix = |x: u8, y: u8| ((x as f32 * a1 + y as f32 * a2) / 2.0) as u8;

    pack(
        mix(red(c1), red(c2)),
        mix(green(c1), green(c2)),
        mix(blue(c1), blue(c2)),
        (a1 * a2 * 255.0) as u8,
    )
}

/// Additive compositing: channels saturate at 255, the result is opaque
pub fn add(c1: u32, c2: u32) -> u32 {
    pack(
        red(c1).saturating_add(red(c2)),
        green(c1).saturating_add(green(c2)),
        blue(c1).saturating_add(blue(c2)),
        OPAQUE,
    )
}

// ============================================================================
// Channel masks
// ============================================================================

/// Invert the colors, but set the alpha to 0xff
#[inline]
pub fn invert(cv: u32) -> u32 {
    !cv | 0xff00_0000
}

/// Invert every channel, alpha included
#[inline]
pub fn invert_everything(cv: u32) -> u32 {
    !cv
}

#[inline]
pub fn only_red(cv: u32) -> u32 {
    cv & 0xffff_0000
}

#[inline]
pub fn only_green(cv: u32) -> u32 {
    cv & 0xff00_ff00
}

#[inline]
pub fn only_blue(cv: u32) -> u32 {
    cv & 0xff00_00ff
}

#[inline]
pub fn only_alpha(cv: u32) -> u32 {
    cv & 0xff00_0000
}

#[inline]
pub fn remove_red(cv: u32) -> u32 {
    cv & 0xff00_ffff
}

#[inline]
pub fn remove_green(cv: u32) -> u32 {
    cv & 0xffff_00ff
}

#[inline]
pub fn remove_blue(cv: u32) -> u32 {
    cv & 0xffff_ff00
}

/// Makes the pixel fully transparent
#[inline]
pub fn remove_alpha(cv: u32) -> u32 {
    cv & 0x00ff_ffff
}

#[inline]
pub fn set_red_bits(cv: u32) -> u32 {
    cv | 0x00ff_0000
}

#[inline]
pub fn set_green_bits(cv: u32) -> u32 {
    cv | 0x0000_ff00
}

#[inline]
pub fn set_blue_bits(cv: u32) -> u32 {
    cv | 0x0000_00ff
}

#[inline]
pub fn or_alpha(cv: u32) -> u32 {
    cv | 0xff00_0000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_roundtrip() {
        let cv = pack(255, 127, 63, 31);
        assert_eq!(unpack(cv), (255, 127, 63, 31));
    }

    #[test]
    fn test_pack_layout_is_argb() {
        assert_eq!(pack(0x11, 0x22, 0x33, 0x44), 0x4411_2233);
        assert_eq!(red(0xff80_0000), 0x80);
        assert_eq!(alpha(0x7f00_0000), 0x7f);
        assert_eq!(rgb(1, 2, 3), 0xff01_0203);
    }

    #[test]
    fn test_luminance_truncates() {
        assert_eq!(luminance(0xff80_0000), 42);
        assert_eq!(luminance(0xffff_ffff), 255);
        // alpha does not matter
        assert_eq!(luminance(0x00ff_ffff), 255);
        assert_eq!(luminance_with_alpha(0x00ff_ffff), 0);
        assert_eq!(luminance_with_alpha(0xffff_ffff), 255);
    }

    #[test]
    fn test_blend_is_symmetric_average() {
        let c = blend(rgb(200, 100, 50), rgb(100, 50, 0));
        assert_eq!(unpack(c), (150, 75, 25, 255));
        assert_eq!(blend(rgb(10, 20, 30), rgb(40, 50, 60)), blend(rgb(40, 50, 60), rgb(10, 20, 30)));
    }

    #[test]
    fn test_blend_zero_alpha_operand() {
        // The transparent operand contributes no color, and kills the alpha
        let c = blend(rgb(200, 200, 200), pack(255, 255, 255, 0));
        assert_eq!(unpack(c), (100, 100, 100, 0));
    }

    #[test]
    fn test_add_saturates_and_is_opaque() {
        let c = add(pack(200, 10, 0, 0), pack(100, 10, 5, 3));
        assert_eq!(unpack(c), (255, 20, 5, 255));
    }

    #[test]
    fn test_masks() {
        assert_eq!(invert(0x0000_00ff), 0xffff_ff00);
        assert_eq!(invert_everything(0x0000_00ff), 0xffff_ff00);
        assert_eq!(invert_everything(0xff00_0000), 0x00ff_ffff);
        assert_eq!(only_green(0x1234_5678), 0x1200_5600);
        assert_eq!(remove_blue(0x1234_5678), 0x1234_5600);
        assert_eq!(set_red_bits(0), 0x00ff_0000);
        assert_eq!(or_alpha(0x0012_3456), 0xff12_3456);
        assert_eq!(remove_alpha(0xff12_3456), 0x0012_3456);
    }
}
