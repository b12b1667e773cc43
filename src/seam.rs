// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plan and locate the next seam
//!
//! A seam is one column index per row, adjacent rows differing by at most
//! one.  Planning fills the cost table: the minimal cumulative, mask-biased
//! energy to reach each pixel from the top row.  Locating re-derives the
//! cheapest path from that table, bottom to top, with a deliberately rigid
//! tie-break: leftmost at the bottom, and while backtracking the left
//! neighbor is offered before the right and either must be a *strict*
//! improvement to win.  Equal costs never move the seam.

use crate::grid::{Extent, Grid};
use crate::mask::Protection;
use log::debug;

/// Added to a Protected pixel's energy.  Several orders of magnitude above
/// anything the gradient can produce (its ceiling is around 8 for
/// normalized channels), so a protected pixel loses every comparison that
/// has an unprotected alternative.
pub const PROTECT_PENALTY: f32 = 1.0e8;

/// Subtracted from a Weak pixel's energy, making it win every comparison
/// against pixels of ordinary cost.
pub const WEAK_BONUS: f32 = 5.0e7;

/// Fill the cost table for the current window.  The top row is taken
/// as-is; every later row adds its biased energy to the cheapest of the
/// three reachable parents.
pub fn plan_costs(
    gradient: &Grid<f32>,
    mask: &Grid<Protection>,
    cost: &mut Grid<f32>,
    extent: Extent,
) {
    for col in 0..extent.width {
        cost[(0, col)] = gradient[(0, col)];
    }

    for row in 1..extent.height {
        for col in 0..extent.width {
            let mut parent = cost[(row - 1, col)];
            if col > 0 {
                parent = parent.min(cost[(row - 1, col - 1)]);
            }
            if col + 1 < extent.width {
                parent = parent.min(cost[(row - 1, col + 1)]);
            }
            let biased = match mask[(row, col)] {
                Protection::Protected => gradient[(row, col)] + PROTECT_PENALTY,
                Protection::Weak => gradient[(row, col)] - WEAK_BONUS,
                Protection::None => gradient[(row, col)],
            };
            cost[(row, col)] = biased + parent;
        }
    }
}

/// Walk the cost table back up into `seam`, one column per row.  Starts at
/// the leftmost bottom-row minimum; each row above defaults to the column
/// below it and only moves on a strictly lower neighbor, left first.
pub fn trace_seam(cost: &Grid<f32>, extent: Extent, seam: &mut Vec<usize>) {
    seam.clear();
    seam.resize(extent.height, 0);

    let bottom = extent.height - 1;
    let mut foot = 0;
    for col in 1..extent.width {
        if cost[(bottom, col)] < cost[(bottom, foot)] {
            foot = col;
        }
    }
    seam[bottom] = foot;
    debug!("seam foot at column {} (cost {})", foot, cost[(bottom, foot)]);

    for row in (0..bottom).rev() {
        let below = seam[row + 1];
        let mut col = below;
        if below > 0 && cost[(row, below - 1)] < cost[(row, col)] {
            col = below - 1;
        }
        if below + 1 < extent.width && cost[(row, below + 1)] < cost[(row, col)] {
            col = below + 1;
        }
        seam[row] = col;
    }
}
