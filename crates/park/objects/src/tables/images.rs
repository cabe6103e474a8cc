/// One sprite of an object's image table.
///
/// `source` names either a sprite in a bundled graphics file (`$G1[n]`) or a
/// file path; `x`/`y` are the sprite's draw offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub source: String,
    pub x: i16,
    pub y: i16,
}

impl ImageEntry {
    pub fn reference(source: impl Into<String>) -> Self {
        Self::at(source, 0, 0)
    }

    pub fn at(source: impl Into<String>, x: i16, y: i16) -> Self {
        Self {
            source: source.into(),
            x,
            y,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageTable {
    images: Vec<ImageEntry>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    /// Number of sprites, which is also the size of the range reserved on load.
    pub fn count(&self) -> u32 {
        self.images.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
