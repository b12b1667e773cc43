// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Protection masks
//!
//! A mask tags every pixel of the original image with how the carver should
//! treat it: `Protected` pixels are priced out of every seam, `Weak` pixels
//! are discounted so seams gravitate toward them, and `None` leaves the
//! gradient alone.  Masks are painted at the original width, so their stride
//! never differs from the image's initial stride.

use crate::grid::Grid;
use image::RgbaImage;

/// How strongly the carver should avoid, or favor, a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    None,
    Protected,
    Weak,
}

impl Default for Protection {
    fn default() -> Self {
        Protection::None
    }
}

/// Read a painted mask back from an image aligned to the original extent.
/// The colors are the painter's overlay palette: green-dominant pixels are
/// protected, red-dominant pixels are weak, anything else is untagged.
pub fn mask_from_image(image: &RgbaImage) -> Grid<Protection> {
    let data = image
        .chunks_exact(4)
        .map(|px| {
            let (r, g, b) = (px[0], px[1], px[2]);
            if g > r && g > b {
                Protection::Protected
            } else if r > g && r > b {
                Protection::Weak
            } else {
                Protection::None
            }
        })
        .collect();
    Grid::from_vec(image.width() as usize, data)
}
