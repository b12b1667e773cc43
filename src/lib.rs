// #![deny(missing_docs)]

extern crate image;

pub mod grid;
pub use grid::{Extent, Grid};

pub mod mask;
pub use mask::{mask_from_image, Protection};

pub mod paint;
pub use paint::{paint_mask, Button, Gesture, PaintSession};

pub mod energy;
pub mod seam;

pub mod carver;
pub use carver::Carver;

pub mod error;
pub use error::CarveError;
