// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carver - the workspace and the main loop
//!
//! The carver owns every buffer of the operation: the RGBA raster, its
//! greyscale rendition, the gradient, the cost table, and the protection
//! mask, all stride-addressed over one shared [`Extent`].  Removing a seam
//! is a single operation over the four data buffers, so they cannot drift
//! out of alignment, and nothing is ever reallocated: the logical width
//! shrinks, the stores do not.

use crate::energy::{build_gradient, gradient_to_image, patch_gradient, to_greyscale};
use crate::error::CarveError;
use crate::grid::{Extent, Grid};
use crate::mask::Protection;
use crate::seam::{plan_costs, trace_seam};
use image::{GrayImage, RgbaImage};
use log::debug;

/// A struct holding the image being carved, with all of its derived
/// buffers.
pub struct Carver {
    raster: Grid<[u8; 4]>,
    grey: Grid<f32>,
    gradient: Grid<f32>,
    cost: Grid<f32>,
    mask: Grid<Protection>,
    seam: Vec<usize>,
    extent: Extent,
}

impl Carver {
    /// Build the working buffers for an image and an optional painted
    /// mask.  The mask must be aligned to the image's original extent.
    pub fn new(image: &RgbaImage, mask: Option<Grid<Protection>>) -> Result<Carver, CarveError> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        if width == 0 || height == 0 {
            return Err(CarveError::Config("cannot carve an empty image".to_string()));
        }
        width
            .checked_mul(height)
            .ok_or(CarveError::Allocation { width, height })?;
        let extent = Extent::new(width, height);

        let mask = match mask {
            Some(mask) => {
                if mask.stride() != width || mask.height() != height {
                    return Err(CarveError::Config(format!(
                        "mask is {}x{} but the image is {}x{}",
                        mask.stride(),
                        mask.height(),
                        width,
                        height
                    )));
                }
                mask
            }
            None => Grid::new(width, height),
        };

        let raster = Grid::from_vec(
            width,
            image
                .chunks_exact(4)
                .map(|px| [px[0], px[1], px[2], px[3]])
                .collect(),
        );

        let mut grey = Grid::new(width, height);
        let mut gradient = Grid::new(width, height);
        to_greyscale(&raster, &mut grey, extent);
        build_gradient(&grey, &mut gradient, extent);

        Ok(Carver {
            raster,
            grey,
            gradient,
            cost: Grid::new(width, height),
            mask,
            seam: Vec::with_capacity(height),
            extent,
        })
    }

    pub fn width(&self) -> usize {
        self.extent.width
    }

    pub fn height(&self) -> usize {
        self.extent.height
    }

    /// The columns of the most recently removed seam, in post-removal
    /// coordinates.  Empty before the first carve.
    pub fn last_seam(&self) -> &[usize] {
        &self.seam
    }

    /// Remove `seams` vertical seams.  The count must be positive and
    /// strictly less than the current width; since each round shrinks the
    /// width by exactly one, that is enough to keep every index of every
    /// round in bounds.
    pub fn carve(&mut self, seams: usize) -> Result<(), CarveError> {
        if seams == 0 {
            return Err(CarveError::Config(
                "no number of pixels to remove provided".to_string(),
            ));
        }
        if seams >= self.extent.width {
            return Err(CarveError::Config(
                "cannot remove more pixels than the image width".to_string(),
            ));
        }

        for round in 0..seams {
            plan_costs(&self.gradient, &self.mask, &mut self.cost, self.extent);
            trace_seam(&self.cost, self.extent, &mut self.seam);
            self.remove_seam();
            patch_gradient(&self.grey, &mut self.gradient, self.extent, &self.seam);
            debug!("round {}: width is now {}", round, self.extent.width);
        }
        Ok(())
    }

    // One operation across all four data buffers, so a half-applied
    // removal cannot exist.
    fn remove_seam(&mut self) {
        for row in 0..self.extent.height {
            let col = self.seam[row];
            self.raster.shift_left(row, col);
            self.grey.shift_left(row, col);
            self.gradient.shift_left(row, col);
            self.mask.shift_left(row, col);
        }
        self.extent.width -= 1;
    }

    /// Copy the carved window out of the stride-addressed store into a
    /// tightly packed image.
    pub fn to_image(&self) -> RgbaImage {
        let mut samples = Vec::with_capacity(self.extent.width * self.extent.height * 4);
        for row in 0..self.extent.height {
            for px in &self.raster.row(row)[..self.extent.width] {
                samples.extend_from_slice(px);
            }
        }
        RgbaImage::from_raw(self.extent.width as u32, self.extent.height as u32, samples)
            .expect("window matches sample count")
    }

    /// Render the current gradient buffer as a greymap.
    pub fn energy_image(&self) -> GrayImage {
        gradient_to_image(&self.gradient, self.extent)
    }
}
