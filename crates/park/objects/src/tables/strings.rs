/// Role a localized string plays for its object.
///
/// Declaration order is the table sort order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ObjectStringKind {
    Name,
    Description,
    Capacity,
    VehicleName,
}

/// Language tag of a string table entry.
///
/// Declaration order is the table sort order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
pub enum LanguageId {
    #[strum(serialize = "en-GB")]
    EnglishUk,
    #[strum(serialize = "en-US")]
    EnglishUs,
    #[strum(serialize = "de-DE")]
    German,
    #[strum(serialize = "nl-NL")]
    Dutch,
    #[strum(serialize = "fr-FR")]
    French,
    #[strum(serialize = "es-ES")]
    Spanish,
    #[strum(serialize = "it-IT")]
    Italian,
    #[strum(serialize = "pl-PL")]
    Polish,
    #[strum(serialize = "ja-JP")]
    Japanese,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringEntry {
    pub kind: ObjectStringKind,
    pub language: LanguageId,
    pub text: String,
}

/// Localized strings of one object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<StringEntry>,
}

impl StringTable {
    /// Language used when the requested one has no entry.
    pub const FALLBACK_LANGUAGE: LanguageId = LanguageId::EnglishUk;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ObjectStringKind, language: LanguageId, text: impl Into<String>) {
        self.entries.push(StringEntry {
            kind,
            language,
            text: text.into(),
        });
    }

    /// Orders entries by kind, then language. Equal keys keep their order.
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.kind.cmp(&b.kind).then(a.language.cmp(&b.language)));
    }

    /// Looks up `kind` in `language`, falling back to British English.
    pub fn get(&self, kind: ObjectStringKind, language: LanguageId) -> Option<&str> {
        self.find(kind, language)
            .or_else(|| self.find(kind, Self::FALLBACK_LANGUAGE))
            .map(|entry| entry.text.as_str())
    }

    pub fn entries(&self) -> &[StringEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, kind: ObjectStringKind, language: LanguageId) -> Option<&StringEntry> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && entry.language == language)
    }
}
