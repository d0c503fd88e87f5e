use itertools::iproduct;

pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Bytes per pixel of the output buffer (interleaved RGB).
pub const CHANNELS: usize = 3;

/// Axis-aligned block of pixels rendered as one unit of work.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderTile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RenderTile {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pixels of the tile that fall inside a `image_width` x `image_height`
    /// image, row by row.
    pub fn pixels(&self, image_width: u32, image_height: u32) -> impl Iterator<Item = (u32, u32)> {
        iproduct!(
            self.y..self.y.saturating_add(self.height),
            self.x..self.x.saturating_add(self.width)
        )
        .filter(move |&(y, x)| x < image_width && y < image_height)
        .map(|(y, x)| (x, y))
    }
}

/// Splits the image into `tile_size` square tiles in row-major order.
///
/// Tiles on the right and bottom edges keep their full size and may reach
/// past the image; [`RenderTile::pixels`] skips what lies outside.
///
/// # Panics
///
/// Will panic if `tile_size` is zero
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<RenderTile> {
    assert!(tile_size > 0, "tile size must be positive");

    let step = tile_size as usize;
    iproduct!((0..height).step_by(step), (0..width).step_by(step))
        .map(|(y, x)| RenderTile::new(x, y, tile_size, tile_size))
        .collect()
}

/// Offset of pixel `(x, y)` in a row-major interleaved RGB buffer.
pub fn buffer_offset(x: u32, y: u32, width: u32) -> usize {
    (x as usize + y as usize * width as usize) * CHANNELS
}
