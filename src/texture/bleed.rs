//! Nearest-opaque color bleeding for fully transparent pixels.
//!
//! Bilinear filtering samples the RGB of neighbouring texels even when they
//! are fully transparent, so transparent pixels left black (or whatever the
//! paint program stored) show up as dark fringes around sprite edges. This
//! pass copies the color of the nearest visible pixel into every fully
//! transparent one while leaving its alpha at zero.
//!
//! "Nearest" means the smallest square (Chebyshev) radius. Within one radius
//! the first candidate in x-major scan order wins, so a donor at the same
//! radius but a smaller Euclidean distance can lose the tie.

use super::TextureData;

/// Counts from one bleeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BleedStats {
    /// Fully transparent pixels found.
    pub transparent: usize,
    /// Transparent pixels that received a donor color.
    pub filled: usize,
    /// Transparent pixels left untouched because the image has no donor.
    pub unresolved: usize,
}

impl BleedStats {
    /// Add another pass's counts to this one.
    pub fn accumulate(&mut self, other: BleedStats) {
        self.transparent += other.transparent;
        self.filled += other.filled;
        self.unresolved += other.unresolved;
    }
}

/// Find the donor pixel for (x, y): the first non-transparent pixel on the
/// smallest square ring around it.
///
/// Radii grow from 1 while the radius is below the width or the height; at
/// that point the ring has covered the whole image.
pub fn find_donor(texture: &TextureData, x: u32, y: u32) -> Option<(u32, u32)> {
    let (width, height) = (texture.width as i64, texture.height as i64);
    let (x, y) = (x as i64, y as i64);

    let mut radius = 1i64;
    while radius < width || radius < height {
        if let Some(found) = scan_ring(texture, x, y, radius) {
            return Some(found);
        }
        radius += 1;
    }
    None
}

/// Scan the cells at exactly `radius` from (x, y), clamped to the image,
/// in x-major then y order.
///
/// Every cell strictly inside the ring was rejected at a smaller radius, so
/// the first hit here is also the first hit in a scan of the full box.
fn scan_ring(texture: &TextureData, x: i64, y: i64, radius: i64) -> Option<(u32, u32)> {
    let (width, height) = (texture.width as i64, texture.height as i64);
    let x_min = (x - radius).max(0);
    let x_max = (x + radius).min(width - 1);
    let y_min = (y - radius).max(0);
    let y_max = (y + radius).min(height - 1);

    let opaque = |i: i64, j: i64| !texture.is_transparent(i as u32, j as u32);

    for i in x_min..=x_max {
        if (i - x).abs() == radius {
            // Left or right edge of the ring: the whole clamped column.
            for j in y_min..=y_max {
                if opaque(i, j) {
                    return Some((i as u32, j as u32));
                }
            }
        } else {
            for j in [y - radius, y + radius] {
                if (0..height).contains(&j) && opaque(i, j) {
                    return Some((i as u32, j as u32));
                }
            }
        }
    }
    None
}

/// Fill every fully transparent pixel with the RGB of its donor.
///
/// Donors are looked up in `source`, never in the output, so the result does
/// not depend on the order pixels are visited in. Alpha is copied through
/// unchanged for every pixel.
pub fn bleed_transparent(source: &TextureData) -> (TextureData, BleedStats) {
    let mut output = source.clone();
    let mut stats = BleedStats::default();

    for x in 0..source.width {
        for y in 0..source.height {
            if !source.is_transparent(x, y) {
                continue;
            }
            stats.transparent += 1;

            match find_donor(source, x, y) {
                Some((dx, dy)) => {
                    let [r, g, b, _] = source.get_pixel(dx, dy);
                    output.set_pixel(x, y, [r, g, b, 0]);
                    stats.filled += 1;
                }
                None => stats.unresolved += 1,
            }
        }
    }

    (output, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn texture_with(width: u32, height: u32, opaque: &[((u32, u32), [u8; 4])]) -> TextureData {
        let mut tex = TextureData::filled(width, height, CLEAR);
        for &((x, y), rgba) in opaque {
            tex.set_pixel(x, y, rgba);
        }
        tex
    }

    #[test]
    fn test_opaque_texture_unchanged() {
        let mut tex = TextureData::filled(4, 4, [10, 20, 30, 255]);
        tex.set_pixel(1, 1, [1, 2, 3, 1]);

        let (out, stats) = bleed_transparent(&tex);
        assert_eq!(out, tex);
        assert_eq!(stats, BleedStats::default());
    }

    #[test]
    fn test_fully_transparent_texture_unchanged() {
        let mut tex = TextureData::filled(3, 5, CLEAR);
        tex.set_pixel(2, 4, [77, 66, 55, 0]);

        let (out, stats) = bleed_transparent(&tex);
        assert_eq!(out, tex);
        assert_eq!(stats.transparent, 15);
        assert_eq!(stats.unresolved, 15);
        assert_eq!(stats.filled, 0);
    }

    #[test]
    fn test_single_pixel_texture() {
        let tex = TextureData::filled(1, 1, [5, 5, 5, 0]);
        assert_eq!(find_donor(&tex, 0, 0), None);
        assert_eq!(bleed_transparent(&tex).0, tex);
    }

    #[test]
    fn test_neighbour_color_copied_alpha_kept() {
        let tex = texture_with(3, 1, &[((1, 0), [200, 100, 50, 255])]);

        let (out, stats) = bleed_transparent(&tex);
        assert_eq!(out.get_pixel(0, 0), [200, 100, 50, 0]);
        assert_eq!(out.get_pixel(2, 0), [200, 100, 50, 0]);
        assert_eq!(out.get_pixel(1, 0), [200, 100, 50, 255]);
        assert_eq!(stats.filled, 2);
    }

    #[test]
    fn test_partially_transparent_pixel_is_donor() {
        let tex = texture_with(2, 1, &[((1, 0), [9, 9, 9, 1])]);
        let (out, _) = bleed_transparent(&tex);
        assert_eq!(out.get_pixel(0, 0), [9, 9, 9, 0]);
        assert_eq!(out.get_pixel(1, 0), [9, 9, 9, 1]);
    }

    #[test]
    fn test_smaller_radius_wins() {
        // (4, 2) is at radius 2 from (2, 2); (0, 0) is also at radius 2 and
        // earlier in scan order, but (3, 3) is at radius 1.
        let tex = texture_with(
            5,
            5,
            &[
                ((0, 0), [1, 0, 0, 255]),
                ((4, 2), [2, 0, 0, 255]),
                ((3, 3), [3, 0, 0, 255]),
            ],
        );
        assert_eq!(find_donor(&tex, 2, 2), Some((3, 3)));
    }

    #[test]
    fn test_tie_broken_by_scan_order_not_distance() {
        // Both donors are at radius 2 from (2, 2). (2, 0) is straight above
        // and Euclidean-closer, but (0, 4) comes first in x-major order.
        let tex = texture_with(
            5,
            5,
            &[((2, 0), [1, 0, 0, 255]), ((0, 4), [2, 0, 0, 255])],
        );
        assert_eq!(find_donor(&tex, 2, 2), Some((0, 4)));

        let (out, _) = bleed_transparent(&tex);
        assert_eq!(out.get_pixel(2, 2), [2, 0, 0, 0]);
    }

    #[test]
    fn test_ring_scan_matches_full_box_scan() {
        // Reference: scan the whole clamped box at each radius.
        fn box_donor(tex: &TextureData, x: u32, y: u32) -> Option<(u32, u32)> {
            let (w, h) = (tex.width as i64, tex.height as i64);
            let mut r = 1i64;
            while r < w || r < h {
                for i in (x as i64 - r).max(0)..=(x as i64 + r).min(w - 1) {
                    for j in (y as i64 - r).max(0)..=(y as i64 + r).min(h - 1) {
                        if !tex.is_transparent(i as u32, j as u32) {
                            return Some((i as u32, j as u32));
                        }
                    }
                }
                r += 1;
            }
            None
        }

        let tex = texture_with(
            7,
            4,
            &[
                ((6, 0), [1, 1, 1, 255]),
                ((0, 3), [2, 2, 2, 255]),
                ((3, 1), [3, 3, 3, 40]),
            ],
        );
        for x in 0..tex.width {
            for y in 0..tex.height {
                if tex.is_transparent(x, y) {
                    assert_eq!(find_donor(&tex, x, y), box_donor(&tex, x, y), "at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_far_donor_in_non_square_texture() {
        // Width 8, height 1: the donor is 7 columns away, reachable because
        // the radius keeps growing while it is below the width.
        let tex = texture_with(8, 1, &[((7, 0), [4, 5, 6, 255])]);
        assert_eq!(find_donor(&tex, 0, 0), Some((7, 0)));
    }

    #[test]
    fn test_bleed_is_stable_on_its_own_output() {
        // Alpha never changes and only non-zero alpha pixels donate, so a
        // second pass finds the same donors and the same colors.
        let tex = texture_with(
            6,
            6,
            &[
                ((1, 1), [255, 0, 0, 255]),
                ((4, 4), [0, 255, 0, 128]),
                ((5, 0), [0, 0, 255, 1]),
            ],
        );
        let (once, first) = bleed_transparent(&tex);
        let (twice, second) = bleed_transparent(&once);
        assert_eq!(once, twice);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut total = BleedStats {
            transparent: 2,
            filled: 1,
            unresolved: 1,
        };
        total.accumulate(BleedStats {
            transparent: 3,
            filled: 3,
            unresolved: 0,
        });
        assert_eq!(
            total,
            BleedStats {
                transparent: 5,
                filled: 4,
                unresolved: 1
            }
        );
    }
}
