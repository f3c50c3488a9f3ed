//! End-to-end behavior through the public API

use std::fs;

use image::RgbaImage;
use multiraster::color;
use multiraster::compositor::{blit_image, blit_image_on_top};
use multiraster::config::CanvasConfig;
use multiraster::display::PixelBuffer;
use multiraster::effects::{combine, map_buffer, pixel_fn, ContrastStretch, Flame};
use multiraster::geometry::Position;
use multiraster::raster::{fill_triangle, hline};
use multiraster::RenderError;

#[test]
fn test_contrast_scenario_byte_exact() {
    let mut buf = PixelBuffer::new(3, 1);
    buf.pixels_mut()
        .copy_from_slice(&[0xff80_0000, 0xff20_0000, 0xff50_0000]);
    ContrastStretch::new(0.9).apply(&mut buf, 1);
    assert_eq!(buf.pixels(), &[0xffac_a8a8, 0xffaf_a8a8, 0xff2d_a8a8]);
}

#[test]
fn test_uniform_image_contrast_is_noop() {
    let mut buf = PixelBuffer::with_stride(16, 9, 20);
    // padding stays zero
    for y in 0..9 {
        buf.clear_row(y, color::rgb(90, 60, 30));
    }
    let before = buf.clone();
    ContrastStretch::default().apply(&mut buf, 4);
    assert_eq!(buf, before);
}

#[test]
fn test_flat_triangle_equals_hline() {
    let mut filled = PixelBuffer::new(16, 4);
    fill_triangle(
        &mut filled,
        Position::new(0, 0),
        Position::new(5, 0),
        Position::new(10, 0),
        color::WHITE,
        4,
    );
    let mut lined = PixelBuffer::new(16, 4);
    hline(&mut lined, 0, 0, 10, color::WHITE);
    assert_eq!(filled, lined);
}

#[test]
fn test_wrap_identities() {
    let mut buf = PixelBuffer::new(7, 3);
    for (i, px) in buf.pixels_mut().iter_mut().enumerate() {
        *px = i as u32 * 3 + 1;
    }
    let size = buf.len();
    let n = size as isize;
    assert_eq!(buf.get_wrap(n, size), buf.get_wrap(0, size));
    assert_eq!(buf.get_wrap(-1, size), buf.get_wrap(n - 1, size));

    buf.set_wrap(-2, size, color::WHITE);
    assert_eq!(buf.pixels()[size - 2], color::WHITE);
}

#[test]
fn test_png_overwrite_refused() {
    let dir = std::env::temp_dir().join(format!("multiraster-png-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame.png");
    let _ = fs::remove_file(&path);

    let mut buf = PixelBuffer::new(4, 4);
    buf.fast_clear(color::rgb(1, 2, 3));
    buf.save_png(&path, false).unwrap();

    let err = buf.save_png(&path, false).unwrap_err();
    assert!(matches!(err, RenderError::FileExists(_)));
    buf.save_png(&path, true).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(2, 2).0, [1, 2, 3, 255]);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_compositor_rejects_smaller_images() {
    let mut buf = PixelBuffer::new(10, 10);
    let small = RgbaImage::new(9, 10);
    assert!(matches!(
        blit_image(&mut buf, &small),
        Err(RenderError::SizeMismatch { .. })
    ));
    assert!(matches!(
        blit_image_on_top(&mut buf, &small),
        Err(RenderError::SizeMismatch { .. })
    ));
}

#[test]
fn test_swap_twice_then_flame_is_opaque() {
    let config = CanvasConfig {
        width: 24,
        height: 16,
        ..CanvasConfig::default()
    };
    let mut buf = PixelBuffer::from_config(&config);
    let swap = combine(pixel_fn::INVERT, pixel_fn::SET_BLUE_BITS);
    map_buffer(&mut buf, 3, combine(swap, swap));
    assert!(buf.pixels().iter().all(|&c| c == 0xff00_00ff));

    fill_triangle(
        &mut buf,
        Position::new(2, 2),
        Position::new(20, 4),
        Position::new(8, 14),
        color::rgb(200, 10, 10),
        3,
    );
    Flame::butterfly().apply(&mut buf, 0.78);
    assert!(buf.pixels().iter().all(|&c| color::alpha(c) == 0xff || c == 0));
    // black frame two pixels wide
    assert_eq!(buf.get_pixel(0, 0), Some(0));
    assert_eq!(buf.get_pixel(23, 15), Some(0));
    assert_eq!(buf.get_pixel(1, 8), Some(0));
}
