use image::{Rgba, RgbaImage};

#[inline]
fn red(img: &RgbaImage, x: u32, y: u32) -> i32 {
    i32::from(img.get_pixel(x, y)[0])
}

#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Derive a tangent-space normal map from the red channel of `color`.
///
/// Each output pixel is `(128 + dx, 128 + dy, 255, 255)` where `dx` is the red
/// difference between the right and left neighbours and `dy` between the lower
/// and upper neighbours. A neighbour outside the image is replaced by the
/// centre pixel, and every channel saturates to `0..=255`.
pub fn derive_normal_map(color: &RgbaImage) -> RgbaImage {
    let (w, h) = color.dimensions();
    let mut out = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let c = red(color, x, y);
            let left = if x > 0 { red(color, x - 1, y) } else { c };
            let right = if x + 1 < w { red(color, x + 1, y) } else { c };
            let up = if y > 0 { red(color, x, y - 1) } else { c };
            let down = if y + 1 < h { red(color, x, y + 1) } else { c };
            out.put_pixel(
                x,
                y,
                Rgba([
                    clamp_channel(128 + (right - left)),
                    clamp_channel(128 + (down - up)),
                    255,
                    255,
                ]),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_reds(w: u32, h: u32, reds: &[u8]) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([reds[(y * w + x) as usize], 0, 0, 255]))
    }

    #[test]
    fn flat_image_is_neutral() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let n = derive_normal_map(&img);
        assert!(n.pixels().all(|p| p.0 == [128, 128, 255, 255]));
    }

    #[test]
    fn horizontal_ramp_uses_clamped_edges() {
        // Single row: 10, 20, 40
        let img = from_reds(3, 1, &[10, 20, 40]);
        let n = derive_normal_map(&img);
        // x=0: right(20) - centre(10)
        assert_eq!(n.get_pixel(0, 0).0, [138, 128, 255, 255]);
        // x=1: 40 - 10
        assert_eq!(n.get_pixel(1, 0).0, [158, 128, 255, 255]);
        // x=2: centre(40) - 20
        assert_eq!(n.get_pixel(2, 0).0, [148, 128, 255, 255]);
    }

    #[test]
    fn vertical_gradient_feeds_green() {
        let img = from_reds(1, 3, &[0, 100, 50]);
        let n = derive_normal_map(&img);
        assert_eq!(n.get_pixel(0, 0).0, [128, 228, 255, 255]);
        assert_eq!(n.get_pixel(0, 1).0, [128, 178, 255, 255]);
        assert_eq!(n.get_pixel(0, 2).0, [128, 78, 255, 255]);
    }

    #[test]
    fn steep_edges_saturate() {
        let img = from_reds(3, 1, &[0, 0, 255]);
        let n = derive_normal_map(&img);
        // 128 + 255 saturates high
        assert_eq!(n.get_pixel(1, 0)[0], 255);
        let img = from_reds(3, 1, &[255, 0, 0]);
        let n = derive_normal_map(&img);
        // 128 - 255 saturates low
        assert_eq!(n.get_pixel(1, 0)[0], 0);
    }

    #[test]
    fn only_red_channel_matters() {
        let a = RgbaImage::from_fn(5, 5, |x, y| Rgba([(x * 40 + y) as u8, 0, 0, 255]));
        let b = RgbaImage::from_fn(5, 5, |x, y| Rgba([(x * 40 + y) as u8, 200, 17, 3]));
        assert_eq!(derive_normal_map(&a), derive_normal_map(&b));
    }
}
