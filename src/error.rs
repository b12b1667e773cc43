use failure::Fail;

/// Everything that can go wrong between a path on the command line and a
/// carved image on disk.  All of these are fatal at the process boundary;
/// the engine itself has no error paths once its inputs are validated.
#[derive(Debug, Fail)]
pub enum CarveError {
    /// A bad seam count, an empty input, or a mask that does not line up
    /// with the image.
    #[fail(display = "{}", _0)]
    Config(String),

    /// The input (or mask) image could not be read or decoded.
    #[fail(display = "cannot load image {} ({})", path, reason)]
    Decode { path: String, reason: String },

    /// The working-buffer size computation overflowed.
    #[fail(display = "cannot allocate working buffers for a {}x{} image", width, height)]
    Allocation { width: usize, height: usize },

    /// The output image could not be written.
    #[fail(display = "cannot write output image {} ({})", path, reason)]
    Encode { path: String, reason: String },
}
