//! Narrow drawing surface used by object previews.

use crate::pools::ImageId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenCoords {
    pub x: i32,
    pub y: i32,
}

impl ScreenCoords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Target an object blits sprites onto.
pub trait DrawingContext {
    fn draw_sprite(&mut self, image: ImageId, at: ScreenCoords);
}

/// Canvas that records blits in order instead of rasterizing them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpriteRecorder {
    pub sprites: Vec<(ImageId, ScreenCoords)>,
}

impl SpriteRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrawingContext for SpriteRecorder {
    fn draw_sprite(&mut self, image: ImageId, at: ScreenCoords) {
        self.sprites.push((image, at));
    }
}
