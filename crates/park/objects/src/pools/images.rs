use std::collections::BTreeMap;
use std::fmt;

use crate::tables::ImageEntry;

/// Global sprite id into the shared image pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u32);

impl ImageId {
    pub const NONE: Self = Self(0);

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// Returns the id `offset` sprites past this one.
    pub const fn offset(self, offset: u32) -> Self {
        Self(self.0 + offset)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImagePoolError {
    #[error("cannot allocate an empty image range")]
    EmptyRequest,

    #[error("no contiguous range of {requested} images left")]
    Exhausted { requested: u32 },

    #[error("no image range starts at {base}")]
    UnknownRange { base: ImageId },

    #[error("range at {base} holds {allocated} images, not {requested}")]
    SizeMismatch {
        base: ImageId,
        allocated: u32,
        requested: u32,
    },
}

/// Contiguous range allocator over the global sprite id space.
///
/// Ranges are handed out first-fit and must be released whole, with the same
/// size they were allocated with.
#[derive(Clone, Debug)]
pub struct ImagePool {
    base: u32,
    capacity: u32,
    ranges: BTreeMap<u32, Vec<ImageEntry>>,
}

impl ImagePool {
    /// First id after the built-in sprite set.
    pub const DEFAULT_BASE: u32 = 29_294;
    pub const DEFAULT_CAPACITY: u32 = 0x40000;

    /// Creates a pool over `capacity` ids starting at `base`.
    ///
    /// Id 0 is reserved for [`ImageId::NONE`] and never handed out.
    pub fn new(base: u32, capacity: u32) -> Self {
        Self {
            base: base.max(1),
            capacity,
            ranges: BTreeMap::new(),
        }
    }

    /// Copies `images` into a fresh contiguous range and returns its first id.
    pub fn allocate(&mut self, images: &[ImageEntry]) -> Result<ImageId, ImagePoolError> {
        let requested = u32::try_from(images.len())
            .map_err(|_| ImagePoolError::Exhausted { requested: u32::MAX })?;
        if requested == 0 {
            return Err(ImagePoolError::EmptyRequest);
        }

        let mut cursor = u64::from(self.base);
        for (&start, range) in &self.ranges {
            if u64::from(start) - cursor >= u64::from(requested) {
                break;
            }
            cursor = u64::from(start) + range.len() as u64;
        }

        let end = (u64::from(self.base) + u64::from(self.capacity)).min(u64::from(u32::MAX) + 1);
        if cursor + u64::from(requested) > end {
            return Err(ImagePoolError::Exhausted { requested });
        }

        let base = u32::try_from(cursor).map_err(|_| ImagePoolError::Exhausted { requested })?;
        self.ranges.insert(base, images.to_vec());
        Ok(ImageId(base))
    }

    /// Releases the range starting at `base`; `count` must match its size.
    pub fn free(&mut self, base: ImageId, count: u32) -> Result<(), ImagePoolError> {
        let allocated = self
            .ranges
            .get(&base.0)
            .map(|range| range.len() as u32)
            .ok_or(ImagePoolError::UnknownRange { base })?;
        if allocated != count {
            return Err(ImagePoolError::SizeMismatch {
                base,
                allocated,
                requested: count,
            });
        }
        self.ranges.remove(&base.0);
        Ok(())
    }

    /// Number of sprite ids currently in use.
    pub fn allocated(&self) -> u32 {
        self.ranges.values().map(|range| range.len() as u32).sum()
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl Default for ImagePool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(count: usize) -> Vec<ImageEntry> {
        (0..count)
            .map(|i| ImageEntry::reference(format!("$G1[{i}]")))
            .collect()
    }

    #[test]
    fn test_first_fit_reuses_gaps() {
        let mut pool = ImagePool::new(100, 50);
        let a = pool.allocate(&images(10)).unwrap();
        let b = pool.allocate(&images(5)).unwrap();
        assert_eq!(a, ImageId(100));
        assert_eq!(b, ImageId(110));

        pool.free(a, 10).unwrap();
        assert_eq!(pool.allocate(&images(4)).unwrap(), ImageId(100));
        assert_eq!(pool.allocate(&images(7)).unwrap(), ImageId(115));
        assert_eq!(pool.allocated(), 16);
    }

    #[test]
    fn test_exhaustion() {
        let mut pool = ImagePool::new(0, 8);
        pool.allocate(&images(6)).unwrap();
        assert_eq!(
            pool.allocate(&images(3)),
            Err(ImagePoolError::Exhausted { requested: 3 })
        );
        assert_eq!(pool.allocate(&[]), Err(ImagePoolError::EmptyRequest));
    }

    #[test]
    fn test_free_requires_matching_size() {
        let mut pool = ImagePool::default();
        let base = pool.allocate(&images(3)).unwrap();

        assert_eq!(
            pool.free(base, 2),
            Err(ImagePoolError::SizeMismatch {
                base,
                allocated: 3,
                requested: 2
            })
        );
        assert_eq!(
            pool.free(base.offset(1), 3),
            Err(ImagePoolError::UnknownRange {
                base: base.offset(1)
            })
        );
        pool.free(base, 3).unwrap();
        assert_eq!(pool.allocated(), 0);
    }

    #[test]
    fn test_pool_at_top_of_id_space() {
        let base = u32::MAX - 5;
        let mut pool = ImagePool::new(base, 100);

        let first = pool.allocate(&images(4)).unwrap();
        assert_eq!(first, ImageId(base));
        let second = pool.allocate(&images(2)).unwrap();
        assert_eq!(second, ImageId(u32::MAX - 1));
        assert_eq!(
            pool.allocate(&images(1)),
            Err(ImagePoolError::Exhausted { requested: 1 })
        );

        pool.free(first, 4).unwrap();
        assert_eq!(pool.allocate(&images(3)).unwrap(), ImageId(base));
    }
}
