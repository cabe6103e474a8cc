use std::fmt;

/// Display-name id handed to a loaded object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectStringId(pub u16);

impl ObjectStringId {
    pub const NONE: Self = Self(0);

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl fmt::Display for ObjectStringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "str#{}", self.0)
    }
}

/// Slots for object display names, resolved in the current language.
#[derive(Clone, Debug)]
pub struct ObjectStringPool {
    start: u16,
    slots: Vec<Option<String>>,
}

impl ObjectStringPool {
    pub const DEFAULT_START: u16 = 0x2000;
    pub const DEFAULT_CAPACITY: usize = 2048;

    pub fn new(start: u16, capacity: usize) -> Self {
        let capacity = capacity.min(usize::from(u16::MAX - start));
        Self {
            start: start.max(1),
            slots: vec![None; capacity],
        }
    }

    /// Stores `text` in the lowest free slot.
    pub fn allocate(&mut self, text: &str) -> Option<ObjectStringId> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(text.to_owned());
        Some(ObjectStringId(self.start + slot as u16))
    }

    /// Releases `id`. Ids outside the pool, including [`ObjectStringId::NONE`], are ignored.
    pub fn free(&mut self, id: ObjectStringId) {
        if let Some(slot) = self.slot(id) {
            self.slots[slot] = None;
        }
    }

    pub fn get(&self, id: ObjectStringId) -> Option<&str> {
        self.slots.get(self.slot(id)?)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: ObjectStringId) -> Option<usize> {
        let slot = usize::from(id.0.checked_sub(self.start)?);
        (slot < self.slots.len()).then_some(slot)
    }
}

impl Default for ObjectStringPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START, Self::DEFAULT_CAPACITY)
    }
}
