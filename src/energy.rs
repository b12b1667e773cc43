// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the squared magnitude of its Sobel gradient
//! over the greyscale rendition of the raster.  Squared, because the seam
//! search only ever compares energies, and the square root buys nothing
//! but latency.  Neighbors outside the current logical window contribute
//! nothing at all: no clamping, no reflection.

use crate::grid::{Extent, Grid};
use image::{GrayImage, Luma, Pixel};
use itertools::iproduct;
use num_traits::{clamp, NumCast};

pub const SOBEL_X: [[f32; 3]; 3] = [
    [-1.0, 0.0, 1.0],
    [-2.0, 0.0, 2.0],
    [-1.0, 0.0, 1.0],
];

pub const SOBEL_Y: [[f32; 3]; 3] = [
    [-1.0, -2.0, -1.0],
    [0.0, 0.0, 0.0],
    [1.0, 2.0, 1.0],
];

// BT.709 luma weights over channels normalized to [0,1].
fn luminance(px: [u8; 4]) -> f32 {
    let r = <f32 as From<u8>>::from(px[0]) / 255.0;
    let g = <f32 as From<u8>>::from(px[1]) / 255.0;
    let b = <f32 as From<u8>>::from(px[2]) / 255.0;
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Fill the greyscale buffer for every pixel of the logical window.
pub fn to_greyscale(raster: &Grid<[u8; 4]>, grey: &mut Grid<f32>, extent: Extent) {
    for (row, col) in iproduct!(0..extent.height, 0..extent.width) {
        grey[(row, col)] = luminance(raster[(row, col)]);
    }
}

/// The squared Sobel gradient magnitude at one pixel.  Kernel taps that
/// fall outside the window are skipped, which is the same as multiplying
/// them by zero.
pub fn sobel_at(grey: &Grid<f32>, extent: Extent, row: usize, col: usize) -> f32 {
    let mut gx = 0.0;
    let mut gy = 0.0;
    for (k, l) in iproduct!(-1..=1isize, -1..=1isize) {
        let (r, c) = (row as isize + k, col as isize + l);
        if extent.contains(r, c) {
            let v = grey[(r as usize, c as usize)];
            gx += v * SOBEL_X[(k + 1) as usize][(l + 1) as usize];
            gy += v * SOBEL_Y[(k + 1) as usize][(l + 1) as usize];
        }
    }
    gx * gx + gy * gy
}

/// Fill the gradient buffer for every pixel of the logical window.
pub fn build_gradient(grey: &Grid<f32>, gradient: &mut Grid<f32>, extent: Extent) {
    for (row, col) in iproduct!(0..extent.height, 0..extent.width) {
        gradient[(row, col)] = sobel_at(grey, extent, row, col);
    }
}

/// Recompute the gradient only in the narrow band a removal disturbed: for
/// each row, the four columns `seam - 2 ..= seam + 1` in post-removal
/// coordinates, intersected with the (already shrunk) window.  Everything
/// further out kept its 3x3 neighborhood composition when the row segment
/// shifted, so its old value still stands.  This turns the per-iteration
/// gradient work into O(height).
//
// TODO: audit the band against rows whose neighbors' seam columns differ
// by one; a window three rows tall centered next to the band edge can
// straddle it.  Until then this is a deliberate approximation.
pub fn patch_gradient(grey: &Grid<f32>, gradient: &mut Grid<f32>, extent: Extent, seam: &[usize]) {
    for row in 0..extent.height {
        for dj in -2isize..=1 {
            let col = seam[row] as isize + dj;
            if extent.contains(row as isize, col) {
                gradient[(row, col as usize)] = sobel_at(grey, extent, row, col as usize);
            }
        }
    }
}

/// Render the gradient window as an 8-bit greymap, normalized to its peak.
/// Purely diagnostic, but seeing the energy is the fastest way to predict
/// where the seams will go.
pub fn gradient_to_image(gradient: &Grid<f32>, extent: Extent) -> GrayImage {
    let mut peak = 0.0f32;
    for (row, col) in iproduct!(0..extent.height, 0..extent.width) {
        peak = peak.max(gradient[(row, col)]);
    }
    if peak <= 0.0 {
        peak = 1.0;
    }

    let mut out = GrayImage::new(extent.width as u32, extent.height as u32);
    for (row, col) in iproduct!(0..extent.height, 0..extent.width) {
        let level = clamp(gradient[(row, col)] * 256.0 / peak, 0.0, 255.0);
        let cs = [NumCast::from(level).unwrap()];
        out.put_pixel(col as u32, row as u32, *Luma::from_slice(&cs));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1.0e-6;

    #[test]
    fn greyscale_uses_bt709_weights() {
        let raster = Grid::from_vec(3, vec![[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]);
        let mut grey = Grid::new(3, 1);
        to_greyscale(&raster, &mut grey, Extent::new(3, 1));
        assert!((grey[(0, 0)] - 0.2126).abs() < EPSILON);
        assert!((grey[(0, 1)] - 0.7152).abs() < EPSILON);
        assert!((grey[(0, 2)] - 0.0722).abs() < EPSILON);
    }

    #[test]
    fn sobel_of_an_impulse() {
        let grey = Grid::from_vec(3, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let extent = Extent::new(3, 3);
        // both kernels have a zero center tap
        assert_eq!(sobel_at(&grey, extent, 1, 1), 0.0);
        // the impulse is the lone corner tap: gx = gy = 1
        assert_eq!(sobel_at(&grey, extent, 0, 0), 2.0);
        // lone edge tap: gx = 2, gy = 0
        assert_eq!(sobel_at(&grey, extent, 1, 0), 4.0);
        // lone edge tap the other way: gx = 0, gy = 2
        assert_eq!(sobel_at(&grey, extent, 0, 1), 4.0);
    }

    #[test]
    fn missing_neighbors_contribute_nothing() {
        let grey = Grid::from_vec(3, vec![1.0; 9]);
        let extent = Extent::new(3, 3);
        // interior of a flat field cancels out
        assert_eq!(sobel_at(&grey, extent, 1, 1), 0.0);
        // on the top edge the vertical kernel loses its -1,-2,-1 row, so
        // gy = 4 rather than 0; reflected edges would have cancelled
        assert_eq!(sobel_at(&grey, extent, 0, 1), 16.0);
    }

    #[test]
    fn build_respects_the_logical_window() {
        let grey = Grid::from_vec(5, vec![0.5; 10]);
        let mut gradient = Grid::from_vec(5, vec![-1.0; 10]);
        let extent = Extent {
            width: 3,
            height: 2,
            stride: 5,
        };
        build_gradient(&grey, &mut gradient, extent);
        assert!(gradient[(0, 0)] >= 0.0);
        assert!(gradient[(1, 2)] >= 0.0);
        // stale columns beyond the window keep their bytes
        assert_eq!(gradient[(0, 3)], -1.0);
        assert_eq!(gradient[(1, 4)], -1.0);
    }

    #[test]
    fn patch_touches_only_the_band() {
        let grey = Grid::from_vec(6, vec![0.25; 12]);
        let mut gradient = Grid::from_vec(6, vec![-1.0; 12]);
        let extent = Extent::new(6, 2);
        patch_gradient(&grey, &mut gradient, extent, &[3, 3]);
        for row in 0..2 {
            for col in 1..=4 {
                assert!(gradient[(row, col)] >= 0.0, "column {} not patched", col);
            }
            assert_eq!(gradient[(row, 0)], -1.0);
            assert_eq!(gradient[(row, 5)], -1.0);
        }
    }

    #[test]
    fn greymap_normalizes_to_the_peak() {
        let gradient = Grid::from_vec(2, vec![0.0, 8.0]);
        let out = gradient_to_image(&gradient, Extent::new(2, 1));
        assert_eq!(out.get_pixel(0, 0).channels()[0], 0);
        assert_eq!(out.get_pixel(1, 0).channels()[0], 255);
    }
}
