//! String and image tables shared by every object type.

mod images;
mod strings;

pub use images::{ImageEntry, ImageTable};
pub use strings::{LanguageId, ObjectStringKind, StringEntry, StringTable};

use serde_json::{Map, Value};

use crate::context::{ObjectWarning, ReadObjectContext};

/// Fills `strings` and `images` from the `strings` and `images` members of
/// an object document.
///
/// Expected shape:
///
/// ```json
/// {
///     "strings": { "name": { "en-GB": "Tarmac footpath" } },
///     "images": ["$G1[2]", { "path": "images/tarmac.png", "x": -32, "y": 0 }]
/// }
/// ```
///
/// Malformed entries are reported to `context` and skipped.
pub fn populate_tables_from_json(
    context: &mut dyn ReadObjectContext,
    root: &Map<String, Value>,
    strings: &mut StringTable,
    images: &mut ImageTable,
) {
    if let Some(value) = root.get("strings") {
        match value.as_object() {
            Some(table) => read_strings(context, table, strings),
            None => {
                context.log_warning(ObjectWarning::InvalidProperty, "'strings' is not an object")
            }
        }
    }

    if let Some(value) = root.get("images") {
        match value.as_array() {
            Some(list) => read_images(context, list, images),
            None => {
                context.log_warning(ObjectWarning::InvalidProperty, "'images' is not an array")
            }
        }
    }
}

fn read_strings(
    context: &mut dyn ReadObjectContext,
    table: &Map<String, Value>,
    strings: &mut StringTable,
) {
    for (key, languages) in table {
        let Ok(kind) = key.parse::<ObjectStringKind>() else {
            context.log_warning(
                ObjectWarning::UnknownStringKind,
                &format!("unknown string kind '{key}'"),
            );
            continue;
        };
        let Some(languages) = languages.as_object() else {
            context.log_warning(
                ObjectWarning::InvalidProperty,
                &format!("string '{key}' is not an object"),
            );
            continue;
        };

        for (tag, text) in languages {
            let Ok(language) = tag.parse::<LanguageId>() else {
                context.log_warning(
                    ObjectWarning::UnknownLanguage,
                    &format!("unknown language '{tag}' for string '{key}'"),
                );
                continue;
            };
            match text.as_str() {
                Some(text) => strings.push(kind, language, text),
                None => context.log_warning(
                    ObjectWarning::InvalidProperty,
                    &format!("string '{key}' ({tag}) is not text"),
                ),
            }
        }
    }
}

fn read_images(context: &mut dyn ReadObjectContext, list: &[Value], images: &mut ImageTable) {
    for (position, value) in list.iter().enumerate() {
        match read_image(value) {
            Some(image) => images.push(image),
            None => context.log_warning(
                ObjectWarning::InvalidImage,
                &format!("image {position} is neither a reference nor an image object"),
            ),
        }
    }
}

fn read_image(value: &Value) -> Option<ImageEntry> {
    match value {
        Value::String(source) => Some(ImageEntry::reference(source.as_str())),
        Value::Object(image) => {
            let source = image.get("path")?.as_str()?;
            let offset = |name: &str| match image.get(name) {
                None => Some(0),
                Some(value) => value.as_i64().and_then(|v| i16::try_from(v).ok()),
            };
            Some(ImageEntry::at(source, offset("x")?, offset("y")?))
        }
        _ => None,
    }
}
