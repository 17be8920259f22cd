/*
 * Error Module
 *
 * The simulation itself never fails: degenerate viewports collapse to an
 * empty grid and time steps are trusted. The only fallible input is the
 * snapshot pixel buffer handed over for the shard texture.
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShatterError {
    #[error("pixel buffer holds {len} bytes, expected {width}x{height}x4 = {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },

    #[error("snapshot image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to decode snapshot image: {0}")]
    Image(#[from] nannou::image::ImageError),
}
