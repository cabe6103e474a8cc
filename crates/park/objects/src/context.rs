//! Diagnostics sink used while reading object documents.

/// Category of a recoverable problem found in an object document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ObjectWarning {
    /// A field exists but has the wrong JSON type.
    InvalidProperty,
    UnknownStringKind,
    UnknownLanguage,
    InvalidImage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectDiagnostic {
    pub code: ObjectWarning,
    pub message: String,
}

/// Receives warnings raised by `read_json`.
///
/// Warnings never abort reading; the offending entry is skipped.
pub trait ReadObjectContext {
    /// Identifier of the object being read.
    fn object_id(&self) -> &str;

    fn log_warning(&mut self, code: ObjectWarning, message: &str);
}

/// Context that keeps every warning in order.
#[derive(Clone, Debug, Default)]
pub struct ObjectReadContext {
    identifier: String,
    warnings: Vec<ObjectDiagnostic>,
}

impl ObjectReadContext {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[ObjectDiagnostic] {
        &self.warnings
    }

    pub fn was_warning(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<ObjectDiagnostic> {
        self.warnings
    }
}

impl ReadObjectContext for ObjectReadContext {
    fn object_id(&self) -> &str {
        &self.identifier
    }

    fn log_warning(&mut self, code: ObjectWarning, message: &str) {
        self.warnings.push(ObjectDiagnostic {
            code,
            message: message.to_owned(),
        });
    }
}
