// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Offline mask painting
//!
//! The interactive front end that actually tracks a pointer is somebody
//! else's problem; what it produces is a stream of gestures, and folding
//! that stream into a finished mask is plain arithmetic.  This module is
//! that fold.  Left paints `Protected`, right paints `Weak`, erase mode
//! paints `None` over everything it touches, and the wheel resizes the
//! brush.  The session runs at the original image extent, where the stride
//! still equals the width.

use crate::grid::{Extent, Grid};
use crate::mask::Protection;

/// Brush radius a fresh session starts with.
const START_RADIUS: i32 = 10;
/// How much one wheel notch grows or shrinks the brush.
const RADIUS_STEP: i32 = 2;
/// The brush never shrinks below this.
const MIN_RADIUS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
}

/// One input event of a painting session, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    PointerDown { x: i32, y: i32, button: Button },
    PointerMove { x: i32, y: i32 },
    PointerUp,
    Scroll { delta: i32 },
    Erase(bool),
}

/// The running state of a painting session: the mask built so far, the
/// brush radius, the erase toggle, and which button is held.
pub struct PaintSession {
    extent: Extent,
    mask: Grid<Protection>,
    radius: i32,
    erase: bool,
    held: Option<Button>,
}

impl PaintSession {
    pub fn new(width: usize, height: usize) -> Self {
        PaintSession {
            extent: Extent::new(width, height),
            mask: Grid::new(width, height),
            radius: START_RADIUS,
            erase: false,
            held: None,
        }
    }

    /// Fold one gesture into the session.  While erase mode is on, any
    /// press or move wipes the disc under the pointer no matter which
    /// button is involved; otherwise a press stamps the button's tag and a
    /// move keeps stamping it for as long as the button is held.
    pub fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::PointerDown { x, y, button } => {
                self.held = Some(button);
                if self.erase {
                    self.stamp(x, y, Protection::None);
                } else {
                    self.stamp(x, y, tag_of(button));
                }
            }
            Gesture::PointerMove { x, y } => {
                if self.erase {
                    self.stamp(x, y, Protection::None);
                } else if let Some(button) = self.held {
                    self.stamp(x, y, tag_of(button));
                }
            }
            Gesture::PointerUp => self.held = None,
            Gesture::Scroll { delta } => {
                if delta > 0 {
                    self.radius += RADIUS_STEP;
                } else if delta < 0 {
                    self.radius = if self.radius > MIN_RADIUS {
                        self.radius - RADIUS_STEP
                    } else {
                        MIN_RADIUS
                    };
                }
            }
            Gesture::Erase(on) => self.erase = on,
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Hand over the finished mask.
    pub fn finish(self) -> Grid<Protection> {
        self.mask
    }

    fn stamp(&mut self, x: i32, y: i32, tag: Protection) {
        paint_disc(&mut self.mask, self.extent, x, y, self.radius, tag);
    }
}

fn tag_of(button: Button) -> Protection {
    match button {
        Button::Left => Protection::Protected,
        Button::Right => Protection::Weak,
    }
}

/// Stamp a filled disc onto the mask, clipped to the extent.
pub fn paint_disc(
    mask: &mut Grid<Protection>,
    extent: Extent,
    center_x: i32,
    center_y: i32,
    radius: i32,
    tag: Protection,
) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                let (row, col) = (center_y + dy, center_x + dx);
                if extent.contains(row as isize, col as isize) {
                    mask[(row as usize, col as usize)] = tag;
                }
            }
        }
    }
}

/// Fold a complete gesture stream into a finished mask.
pub fn paint_mask<I>(width: usize, height: usize, gestures: I) -> Grid<Protection>
where
    I: IntoIterator<Item = Gesture>,
{
    let mut session = PaintSession::new(width, height);
    for gesture in gestures {
        session.apply(gesture);
    }
    session.finish()
}
