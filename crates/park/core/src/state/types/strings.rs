use std::fmt;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::text;

/// Identifier of a displayable string.
///
/// Ids from [`StringId::USER_STRING_START`] upwards address the
/// [`UserStringPool`]; lower ids belong to the language tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringId(pub u16);

impl StringId {
    pub const NONE: Self = Self(0xFFFF);
    pub const USER_STRING_START: u16 = 0x8000;

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    pub const fn is_user_string(self) -> bool {
        !self.is_none() && self.0 >= Self::USER_STRING_START
    }
}

impl Default for StringId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "str#{:04x}", self.0)
    }
}

/// Whether a new user string may share its text with an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Duplication {
    Permitted,
    Forbidden,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StringPoolError {
    #[error("user string pool is full ({capacity} strings)")]
    Exhausted { capacity: usize },

    #[error("a user string with the same text already exists")]
    Duplicate,
}

impl GameError for StringPoolError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Exhausted { .. } => ErrorSeverity::Recoverable,
            Self::Duplicate => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "STRING_POOL_EXHAUSTED",
            Self::Duplicate => "STRING_POOL_DUPLICATE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct UserString {
    text: String,
    refs: u32,
}

/// Reference-counted store of user-editable text.
///
/// # Invariants
///
/// - Every live entry has `refs >= 1`
/// - Stored text never exceeds `GameConfig::USER_STRING_MAX_LENGTH` bytes,
///   not counting one leading colour code
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserStringPool {
    entries: Vec<Option<UserString>>,
}

impl UserStringPool {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(usize::from(u16::MAX - StringId::USER_STRING_START));
        Self {
            entries: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of live strings.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `text` in a free slot and returns its id with one reference.
    ///
    /// Text longer than the user string limit is truncated on a char boundary.
    /// A leading colour code does not count against the limit.
    pub fn allocate(
        &mut self,
        text: &str,
        duplication: Duplication,
    ) -> Result<StringId, StringPoolError> {
        let text = clamp_length(text);

        if duplication == Duplication::Forbidden
            && self.entries.iter().flatten().any(|entry| entry.text == text)
        {
            return Err(StringPoolError::Duplicate);
        }

        let slot = self
            .entries
            .iter()
            .position(Option::is_none)
            .ok_or(StringPoolError::Exhausted {
                capacity: self.capacity(),
            })?;

        self.entries[slot] = Some(UserString { text, refs: 1 });
        Ok(StringId(StringId::USER_STRING_START + slot as u16))
    }

    /// Drops one reference, releasing the slot when none remain.
    ///
    /// Ids outside the user range are ignored.
    pub fn free(&mut self, id: StringId) {
        let Some(slot) = Self::slot(id) else {
            return;
        };
        let Some(entry) = self.entries.get_mut(slot) else {
            return;
        };
        let released = match entry {
            Some(string) => {
                string.refs = string.refs.saturating_sub(1);
                string.refs == 0
            }
            None => false,
        };
        if released {
            *entry = None;
        }
    }

    /// Returns the text of a live user string.
    pub fn get(&self, id: StringId) -> Option<&str> {
        let slot = Self::slot(id)?;
        self.entries
            .get(slot)?
            .as_ref()
            .map(|entry| entry.text.as_str())
    }

    /// Resolves `id` to display text; unknown ids format as empty.
    pub fn format(&self, id: StringId) -> String {
        self.get(id).unwrap_or_default().to_owned()
    }

    fn slot(id: StringId) -> Option<usize> {
        id.is_user_string()
            .then(|| usize::from(id.0 - StringId::USER_STRING_START))
    }
}

impl Default for UserStringPool {
    fn default() -> Self {
        Self::with_capacity(GameConfig::DEFAULT_USER_STRING_CAPACITY)
    }
}

fn clamp_length(input: &str) -> String {
    let body_start = match input.chars().next() {
        Some(first) if text::is_colour_code(first) => first.len_utf8(),
        _ => 0,
    };
    let (code, body) = input.split_at(body_start);
    let mut clamped = String::with_capacity(input.len());
    clamped.push_str(code);
    clamped.push_str(truncate(body, GameConfig::USER_STRING_MAX_LENGTH));
    clamped
}

fn truncate(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut pool = UserStringPool::with_capacity(4);
        let id = pool.allocate("Exit", Duplication::Permitted).unwrap();

        assert!(id.is_user_string());
        assert_eq!(pool.get(id), Some("Exit"));

        pool.free(id);
        assert_eq!(pool.get(id), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_exhausted_pool() {
        let mut pool = UserStringPool::with_capacity(1);
        pool.allocate("a", Duplication::Permitted).unwrap();

        let err = pool.allocate("b", Duplication::Permitted).unwrap_err();
        assert_eq!(err, StringPoolError::Exhausted { capacity: 1 });
    }

    #[test]
    fn test_duplicates() {
        let mut pool = UserStringPool::with_capacity(4);
        pool.allocate("Gate", Duplication::Forbidden).unwrap();

        assert_eq!(
            pool.allocate("Gate", Duplication::Forbidden),
            Err(StringPoolError::Duplicate)
        );
        assert!(pool.allocate("Gate", Duplication::Permitted).is_ok());
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let mut pool = UserStringPool::with_capacity(1);
        let long = "é".repeat(GameConfig::USER_STRING_MAX_LENGTH);
        let id = pool.allocate(&long, Duplication::Permitted).unwrap();

        let stored = pool.get(id).unwrap();
        assert!(stored.len() <= GameConfig::USER_STRING_MAX_LENGTH);
        assert!(stored.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_leading_colour_code_not_counted() {
        let mut pool = UserStringPool::with_capacity(2);
        let code = text::colour_code(4).unwrap();
        let body = "B".repeat(GameConfig::USER_STRING_MAX_LENGTH);

        let id = pool
            .allocate(&format!("{code}{body}"), Duplication::Permitted)
            .unwrap();
        assert_eq!(pool.get(id), Some(format!("{code}{body}").as_str()));

        let id = pool
            .allocate(&format!("{code}{body}X"), Duplication::Permitted)
            .unwrap();
        assert_eq!(pool.get(id), Some(format!("{code}{body}").as_str()));
    }

    #[test]
    fn test_free_tolerates_zero_refs() {
        let mut pool = UserStringPool {
            entries: vec![Some(UserString {
                text: "Gate".to_owned(),
                refs: 0,
            })],
        };
        let id = StringId(StringId::USER_STRING_START);

        pool.free(id);
        assert_eq!(pool.get(id), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decoded_pool_with_zero_refs_frees_cleanly() {
        let corrupt = UserStringPool {
            entries: vec![
                Some(UserString {
                    text: "Exit".to_owned(),
                    refs: 0,
                }),
                None,
            ],
        };
        let bytes = bincode::serialize(&corrupt).unwrap();
        let mut pool: UserStringPool = bincode::deserialize(&bytes).unwrap();

        let id = StringId(StringId::USER_STRING_START);
        pool.free(id);
        pool.free(id);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_non_user_ids_ignored() {
        let mut pool = UserStringPool::with_capacity(1);
        pool.free(StringId::NONE);
        pool.free(StringId(12));
        assert_eq!(pool.format(StringId(12)), "");
    }
}
